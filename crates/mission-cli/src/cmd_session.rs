use mission_views::Dashboard;

pub fn execute(dash: &Dashboard, id: &str, json: bool) -> anyhow::Result<()> {
    let Some(transcript) = dash.session(id)? else {
        anyhow::bail!("session not found: {id}");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&transcript)?);
        return Ok(());
    }
    println!("Session {} ({} messages)\n", transcript.id, transcript.message_count);
    for msg in &transcript.messages {
        println!("── {} {} ──", msg.role, msg.timestamp);
        println!("{}\n", msg.text);
    }
    Ok(())
}
