use mission_views::Dashboard;

pub fn execute(dash: &Dashboard, path: &str, json: bool) -> anyhow::Result<()> {
    let Some(doc) = dash.document(path) else {
        anyhow::bail!("document not found: {path}");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("{}", doc.content);
    }
    Ok(())
}
