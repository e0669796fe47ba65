use mission_views::Dashboard;

pub async fn execute(dash: &Dashboard, limit: usize, json: bool) -> anyhow::Result<()> {
    let jobs = dash.upcoming(limit).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&jobs)?);
        return Ok(());
    }
    if jobs.is_empty() {
        println!("No upcoming cron jobs.");
        return Ok(());
    }
    for up in &jobs {
        let marker = if up.imminent { "!" } else { " " };
        println!(
            "{marker} {} UTC  {}  [{}]",
            up.next_run_utc, up.job.name, up.job.schedule_description
        );
    }
    Ok(())
}
