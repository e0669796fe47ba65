use mission_views::Dashboard;

pub async fn execute(dash: &Dashboard, json: bool) -> anyhow::Result<()> {
    let stats = dash.stats().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }
    println!("Activities:      {}", stats.activities);
    println!("Sessions:        {}", stats.sessions);
    println!("Cron jobs:       {}", stats.cron_jobs);
    println!("Planning files:  {}", stats.planning_files);
    println!(
        "Memories:        {} ({} personal, {} document, {} pending)",
        stats.memories.total,
        stats.memories.personal,
        stats.memories.document,
        stats.memories.pending
    );
    Ok(())
}
