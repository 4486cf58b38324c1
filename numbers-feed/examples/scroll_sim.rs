// Example: a host loop that scrolls a feed and serves its page requests in-process.
use numbers_feed::{EndpointSource, Feed, FeedOptions, ShellView};
use sequence_api::Endpoint;
use windower::Rect;

fn main() {
    let (mut feed, first) = Feed::mount(FeedOptions::new().with_viewport(Rect {
        main: 500,
        cross: 320,
    }));
    println!("mounted, first request={first:?}, view={:?}", feed.view());

    let mut source = EndpointSource::new(Endpoint::default());
    let served = feed.pump(&mut source).unwrap_or(0);
    println!("served {served} request(s), rows={}", feed.rows().len());

    for step in 1..=8u64 {
        let now_ms = step * 16;
        if let Some(req) = feed.on_scroll(step * 400, now_ms) {
            println!("scroll step {step}: fetching cursor={} limit={}", req.cursor, req.limit);
        }
        if let Err(err) = feed.pump(&mut source) {
            eprintln!("pump failed: {err}");
            return;
        }
        feed.tick(now_ms + 200);
    }

    match feed.view() {
        ShellView::List(list) => {
            println!("total_size={} mounted={}", list.total_size, list.rows.len());
            for row in list.rows.iter().take(3) {
                println!("  #{:>4} @ {:>6}px  {}", row.index, row.start, row.content);
            }
            if let Some(row) = list.rows.last() {
                println!("  #{:>4} @ {:>6}px  {}", row.index, row.start, row.content);
            }
        }
        other => println!("{other:?}"),
    }
    println!("requests issued={}", feed.cache().request_count());
}
