// Example: window a growing list and follow a scroll.
use windower::{Align, Windower, WindowerOptions, compute_window};

fn main() {
    let mut w = Windower::new(WindowerOptions::new(1_000));
    w.set_viewport_and_scroll(500, 12_345);

    let mut items = Vec::new();
    w.collect_virtual_items(&mut items);
    println!("total_size={}", w.total_size());
    println!("visible_range={:?}", w.visible_range());
    println!("first_mounted={:?}", items.first());
    println!("last_mounted={:?}", w.last_virtual_item());

    // More rows arrive; nothing already mounted moves.
    w.set_count(2_000);
    let off = w.scroll_to_index_offset(1_999, Align::End);
    w.set_scroll_offset_clamped(off);
    println!("after scroll_to_index: offset={}", w.scroll_offset());

    let window = compute_window(0, 500, 11, 50, 5);
    println!("pure window over 11 rows: {:?}", window.visible);
}
