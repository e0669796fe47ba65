use mission_views::{parse_source, Dashboard, FeedOptions};

pub fn execute(dash: &Dashboard, limit: usize, source: Option<&str>, json: bool) -> anyhow::Result<()> {
    let options = FeedOptions {
        limit,
        source: source.map(parse_source).transpose()?,
        ..FeedOptions::default()
    };
    let items = dash.feed(&options);

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }
    if items.is_empty() {
        println!("No activity yet.");
        return Ok(());
    }
    for item in &items {
        let e = &item.event;
        println!(
            "[{:<8}] {:>9}  {}  ({})",
            e.source.as_str(),
            item.age,
            e.title,
            e.detail
        );
        if !e.origin_id.is_empty() {
            println!("{:>22}session: {}", "", e.origin_id);
        }
    }
    println!("\n({} items)", items.len());
    Ok(())
}
