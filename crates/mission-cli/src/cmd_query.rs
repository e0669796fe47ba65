use mission_views::{Dashboard, QueryParams};

pub async fn execute(dash: &Dashboard, view: &str, params: &QueryParams) -> anyhow::Result<()> {
    let value = dash.query(view, params).await?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
