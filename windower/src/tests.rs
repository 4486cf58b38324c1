use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start))
    }
}

// Walks every row and keeps the ones overlapping the (clamped) viewport.
fn naive_visible(
    count: usize,
    item_size: u32,
    padding_start: u32,
    padding_end: u32,
    scroll_offset: u64,
    viewport_size: u32,
) -> VirtualRange {
    if count == 0 || viewport_size == 0 || item_size == 0 {
        return VirtualRange::EMPTY;
    }
    let total = padding_start as u64 + item_size as u64 * count as u64 + padding_end as u64;
    let off = scroll_offset.min(total.saturating_sub(viewport_size as u64));
    let end = off + viewport_size as u64;

    let mut first = None;
    let mut last = None;
    for i in 0..count {
        let s = padding_start as u64 + item_size as u64 * i as u64;
        let e = s + item_size as u64;
        if e > off && s < end {
            first.get_or_insert(i);
            last = Some(i);
        }
    }
    match (first, last) {
        (Some(f), Some(l)) => VirtualRange {
            start_index: f,
            end_index: l + 1,
        },
        _ if off >= padding_start as u64 + item_size as u64 * count as u64 => VirtualRange {
            start_index: count,
            end_index: count,
        },
        _ => VirtualRange::EMPTY,
    }
}

#[test]
fn fixed_size_range_and_total() {
    let mut w = Windower::new(WindowerOptions::new(100).with_item_size(1).with_overscan(1));
    w.set_viewport_size(10);
    w.set_scroll_offset(0);
    assert_eq!(w.total_size(), 100);

    let r = w.virtual_range();
    assert_eq!(r.start_index, 0);
    // 10 visible + overscan(1) at end
    assert_eq!(r.end_index, 11);
}

#[test]
fn overscan_and_scroll() {
    let mut w = Windower::new(WindowerOptions::new(100).with_item_size(1).with_overscan(1));
    w.set_viewport_and_scroll(10, 50);
    let r = w.virtual_range();
    assert_eq!(r.start_index, 49);
    assert_eq!(r.end_index, 61);
}

#[test]
fn defaults_match_fifty_px_rows_and_five_overscan() {
    let mut w = Windower::new(WindowerOptions::new(1_000));
    w.set_viewport_size(500);
    assert_eq!(w.item_size(), DEFAULT_ITEM_SIZE);
    assert_eq!(w.overscan(), DEFAULT_OVERSCAN);
    assert_eq!(w.total_size(), 50_000);

    w.set_scroll_offset(1_000);
    assert_eq!(
        w.visible_range(),
        VirtualRange {
            start_index: 20,
            end_index: 30
        }
    );
    assert_eq!(
        w.virtual_range(),
        VirtualRange {
            start_index: 15,
            end_index: 35
        }
    );
}

#[test]
fn partial_rows_at_both_edges_are_visible() {
    let mut w = Windower::new(WindowerOptions::new(100).with_item_size(50).with_overscan(0));
    w.set_viewport_and_scroll(100, 25);
    // [25, 125) touches rows 0, 1 and 2.
    assert_eq!(
        w.visible_range(),
        VirtualRange {
            start_index: 0,
            end_index: 3
        }
    );
}

#[test]
fn items_carry_offsets_and_sizes() {
    let mut w = Windower::new(
        WindowerOptions::new(10)
            .with_item_size(50)
            .with_overscan(1)
            .with_padding(8, 4),
    );
    w.set_viewport_and_scroll(100, 58);
    let items = w.virtual_items();
    assert_eq!(items.first().map(|it| it.index), Some(0));
    assert_eq!(items.last().map(|it| it.index), Some(3));
    for it in &items {
        assert_eq!(it.start, 8 + 50 * it.index as u64);
        assert_eq!(it.size, 50);
        assert_eq!(it.end(), it.start + 50);
    }
    assert_eq!(w.total_size(), 8 + 500 + 4);
}

#[test]
fn scroll_offset_is_clamped_for_queries() {
    let mut w = Windower::new(WindowerOptions::new(10).with_item_size(10).with_overscan(0));
    w.set_viewport_and_scroll(30, 10_000);
    assert_eq!(
        w.visible_range(),
        VirtualRange {
            start_index: 7,
            end_index: 10
        }
    );
    assert_eq!(w.max_scroll_offset(), 70);
    w.set_scroll_offset_clamped(10_000);
    assert_eq!(w.scroll_offset(), 70);
}

#[test]
fn viewport_larger_than_content_shows_everything() {
    let mut w = Windower::new(WindowerOptions::new(3).with_item_size(50));
    w.set_viewport_and_scroll(500, 0);
    let items = w.virtual_items();
    assert_eq!(items.len(), 3);
    assert_eq!(w.last_virtual_item().map(|it| it.index), Some(2));
}

#[test]
fn empty_list_and_zero_viewport_produce_no_items() {
    let mut w = Windower::new(WindowerOptions::new(0));
    w.set_viewport_size(500);
    assert!(w.virtual_items().is_empty());
    assert_eq!(w.last_virtual_item(), None);
    assert_eq!(w.total_size(), 0);
    assert_eq!(w.index_at_offset(0), None);

    let w = Windower::new(WindowerOptions::new(100));
    assert!(w.virtual_range().is_empty());
}

#[test]
fn growing_count_extends_window_without_moving_rows() {
    let mut w = Windower::new(WindowerOptions::new(11).with_item_size(50).with_overscan(5));
    w.set_viewport_and_scroll(500, 0);
    let before = w.virtual_items();
    assert_eq!(before.last().map(|it| it.index), Some(10));

    w.set_count(21);
    let after = w.virtual_items();
    assert_eq!(after.last().map(|it| it.index), Some(14));
    for (a, b) in before.iter().zip(after.iter()) {
        assert_eq!(a, b);
    }
    assert_eq!(w.total_size(), 21 * 50);
}

#[test]
fn viewport_inside_end_padding_keeps_last_row_mounted() {
    let mut w = Windower::new(
        WindowerOptions::new(21)
            .with_item_size(50)
            .with_overscan(2)
            .with_padding(0, 600),
    );
    w.set_viewport_size(500);
    w.set_scroll_offset_clamped(u64::MAX);
    assert_eq!(w.scroll_offset(), 1_150);

    // [1150, 1650) only covers padding.
    assert!(w.visible_range().is_empty());
    assert_eq!(
        w.virtual_range(),
        VirtualRange {
            start_index: 18,
            end_index: 21
        }
    );
    assert_eq!(w.last_virtual_item().map(|it| it.index), Some(20));
    assert_eq!(w.window().items, w.virtual_items());
}

#[test]
fn viewport_inside_start_padding_keeps_first_row_mounted() {
    let mut w = Windower::new(
        WindowerOptions::new(10)
            .with_item_size(50)
            .with_overscan(1)
            .with_padding(300, 0),
    );
    w.set_viewport_and_scroll(200, 0);
    assert!(w.visible_range().is_empty());
    let items = w.virtual_items();
    assert_eq!(items.iter().map(|it| it.index).collect::<Vec<_>>(), vec![0, 1]);
    assert_eq!(items[0].start, 300);
}

#[test]
fn index_at_offset_maps_rows_and_padding() {
    let w = Windower::new(WindowerOptions::new(3).with_item_size(10).with_padding(5, 5));
    assert_eq!(w.index_at_offset(0), Some(0));
    assert_eq!(w.index_at_offset(5), Some(0));
    assert_eq!(w.index_at_offset(14), Some(0));
    assert_eq!(w.index_at_offset(15), Some(1));
    assert_eq!(w.index_at_offset(34), Some(2));
    assert_eq!(w.index_at_offset(1_000), Some(2));
    assert_eq!(w.item_start(1), Some(15));
    assert_eq!(w.item_end(2), Some(35));
    assert_eq!(w.item_start(3), None);
}

#[test]
fn scroll_to_index_offset_aligns() {
    let mut w = Windower::new(WindowerOptions::new(100).with_item_size(10));
    w.set_viewport_size(30);

    assert_eq!(w.scroll_to_index_offset(10, Align::Start), 100);
    assert_eq!(w.scroll_to_index_offset(10, Align::End), 80);
    assert_eq!(w.scroll_to_index_offset(10, Align::Center), 90);
    // Last row clamps to max scroll.
    assert_eq!(w.scroll_to_index_offset(99, Align::Start), 970);
    assert_eq!(w.scroll_to_index_offset(500, Align::Start), 970);

    w.set_scroll_offset(100);
    assert_eq!(w.scroll_to_index_offset(11, Align::Auto), 100);
    assert_eq!(w.scroll_to_index_offset(5, Align::Auto), 50);
    assert_eq!(w.scroll_to_index_offset(20, Align::Auto), 180);

    assert_eq!(w.scroll_to_index(40, Align::Start), 400);
    assert_eq!(w.scroll_offset(), 400);
}

#[test]
fn scroll_direction_and_is_scrolling_debounce() {
    let mut w = Windower::new(
        WindowerOptions::new(100)
            .with_item_size(10)
            .with_is_scrolling_reset_delay_ms(100),
    );
    w.set_viewport_size(30);

    w.apply_scroll_offset_event(50, 0);
    assert!(w.is_scrolling());
    assert_eq!(w.scroll_direction(), Some(ScrollDirection::Forward));

    w.apply_scroll_offset_event(20, 10);
    assert_eq!(w.scroll_direction(), Some(ScrollDirection::Backward));

    w.update_scrolling(50);
    assert!(w.is_scrolling());
    w.update_scrolling(110);
    assert!(!w.is_scrolling());
    assert_eq!(w.scroll_direction(), None);

    w.apply_scroll_offset_event(40, 200);
    assert!(w.is_scrolling());
    w.stop_scrolling();
    assert!(!w.is_scrolling());
    // Programmatic jumps never start a gesture.
    w.set_scroll_offset(90);
    assert!(!w.is_scrolling());
}

#[test]
fn batch_update_coalesces_on_change() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut w = Windower::new(WindowerOptions::new(100).with_on_change({
        let calls = Arc::clone(&calls);
        move |_: &Windower, _| {
            calls.fetch_add(1, Ordering::Relaxed);
        }
    }));

    w.apply_scroll_frame(
        Rect {
            main: 500,
            cross: 80,
        },
        200,
        0,
    );
    assert_eq!(calls.load(Ordering::Relaxed), 1);

    w.set_count(100);
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    w.set_count(101);
    assert_eq!(calls.load(Ordering::Relaxed), 2);
}

#[test]
fn on_change_sees_updated_state() {
    let seen = Arc::new(AtomicUsize::new(0));
    let mut w = Windower::new(WindowerOptions::new(0).with_on_change({
        let seen = Arc::clone(&seen);
        move |w: &Windower, _| {
            seen.store(w.count(), Ordering::Relaxed);
        }
    }));
    w.set_count(42);
    assert_eq!(seen.load(Ordering::Relaxed), 42);
}

#[test]
fn initial_offset_is_applied_on_new() {
    let w = Windower::new(
        WindowerOptions::new(100)
            .with_initial_rect(Some(Rect {
                main: 100,
                cross: 0,
            }))
            .with_initial_offset(250),
    );
    assert_eq!(w.scroll_offset(), 250);
    assert_eq!(w.visible_range().start_index, 5);
}

#[test]
fn frame_state_roundtrips() {
    let mut w = Windower::new(WindowerOptions::new(100));
    w.apply_scroll_frame(
        Rect {
            main: 500,
            cross: 120,
        },
        700,
        5,
    );
    let frame = w.frame_state();
    assert!(frame.scroll.is_scrolling);

    let mut restored = Windower::new(WindowerOptions::new(100));
    restored.restore_frame_state(frame, 5);
    assert_eq!(restored.frame_state(), frame);
    assert_eq!(restored.virtual_range(), w.virtual_range());
}

#[test]
fn compute_window_matches_windower() {
    let window = compute_window(1_000, 500, 200, 50, 5);
    let mut w = Windower::new(WindowerOptions::new(200));
    w.set_viewport_and_scroll(500, 1_000);
    assert_eq!(window, w.window());
    assert_eq!(window.items, w.virtual_items());
    assert_eq!(window.last().map(|it| it.index), Some(34));
}

#[test]
fn compute_window_with_loader_slot() {
    // Ten loaded rows plus one trailing loader slot, 500px viewport of 50px rows.
    let window = compute_window(0, 500, 11, 50, 5);
    assert_eq!(window.visible.end_index, 10);
    assert_eq!(window.last().map(|it| it.index), Some(10));
    assert_eq!(window.total_size, 550);
}

#[test]
fn random_layouts_match_naive_reference() {
    let mut rng = Lcg::new(0x5eed);
    for _ in 0..500 {
        let count = rng.gen_range_u64(0, 200) as usize;
        let item_size = rng.gen_range_u64(0, 60) as u32;
        let padding_start = rng.gen_range_u64(0, 40) as u32;
        let padding_end = rng.gen_range_u64(0, 40) as u32;
        let viewport = rng.gen_range_u64(0, 700) as u32;
        let offset = rng.gen_range_u64(0, 15_000);
        let overscan = rng.gen_range_u64(0, 8) as usize;

        let mut w = Windower::new(
            WindowerOptions::new(count)
                .with_item_size(item_size)
                .with_overscan(overscan)
                .with_padding(padding_start, padding_end),
        );
        w.set_viewport_and_scroll(viewport, offset);

        let expected = naive_visible(
            count,
            item_size,
            padding_start,
            padding_end,
            offset,
            viewport,
        );
        assert_eq!(
            w.visible_range(),
            expected,
            "count={count} size={item_size} pad=({padding_start},{padding_end}) \
             view={viewport} off={offset}"
        );

        // A viewport that only sees padding keeps the nearest edge row mounted.
        let anchor = match expected {
            r if !r.is_empty() => r,
            _ if count == 0 || item_size == 0 || viewport == 0 => {
                assert!(w.virtual_items().is_empty());
                continue;
            }
            r if r.start_index >= count => VirtualRange {
                start_index: count - 1,
                end_index: count,
            },
            _ => VirtualRange {
                start_index: 0,
                end_index: 1,
            },
        };

        let items: Vec<VirtualItem> = w.virtual_items();
        let first = anchor.start_index.saturating_sub(overscan);
        let last = (anchor.end_index + overscan).min(count);
        assert_eq!(items.len(), last - first);
        for (k, it) in items.iter().enumerate() {
            assert_eq!(it.index, first + k);
            assert_eq!(
                it.start,
                padding_start as u64 + item_size as u64 * it.index as u64
            );
        }
    }
}
