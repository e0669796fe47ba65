use mission_views::Dashboard;

pub fn execute(dash: &Dashboard, json: bool) -> anyhow::Result<()> {
    let board = dash.kanban();

    if json {
        println!("{}", serde_json::to_string_pretty(&board)?);
        return Ok(());
    }
    for col in &board.columns {
        println!("── {} ({}) ──", col.label, col.count);
        for card in &col.cards {
            let project = card
                .project
                .as_deref()
                .map(|p| format!(" #{p}"))
                .unwrap_or_default();
            println!("  - {} @{}{}", card.title, card.agent.slug(), project);
        }
    }
    println!("\n({} tasks)", board.total);
    Ok(())
}
