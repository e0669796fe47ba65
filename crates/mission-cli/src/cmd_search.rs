use mission_views::Dashboard;

pub async fn execute(dash: &Dashboard, query: &str, limit: usize, json: bool) -> anyhow::Result<()> {
    let hits = dash.search(query, limit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }
    if hits.is_empty() {
        println!("No results for '{}'.", query.trim());
        return Ok(());
    }
    for hit in &hits {
        println!("{:.2}  {}  {}", hit.score, hit.title, hit.path);
        for line in hit.preview.lines().filter(|l| !l.trim().is_empty()) {
            println!("      {line}");
        }
    }
    Ok(())
}
