use mission_views::{parse_memory_type, Dashboard};

pub struct MemoriesParams<'a> {
    pub dash: &'a Dashboard,
    pub memory_type: Option<&'a str>,
    pub query: Option<&'a str>,
    pub pending: bool,
    pub limit: usize,
    pub json: bool,
}

pub async fn execute(params: &MemoriesParams<'_>) -> anyhow::Result<()> {
    let items = if params.pending {
        params.dash.pending_memories(params.limit).await
    } else {
        let memory_type = params.memory_type.map(parse_memory_type).transpose()?;
        params
            .dash
            .memories(params.limit, memory_type, params.query)
            .await
    };

    if params.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }
    if items.is_empty() {
        if params.pending {
            println!("No pending memories.");
        } else {
            println!("No memories found.");
        }
        return Ok(());
    }
    for item in &items {
        let r = &item.record;
        println!(
            "[{}] {:.2} ({:?})  {}",
            r.memory_type.as_str(),
            r.confidence,
            item.confidence_band,
            r.content
        );
    }
    Ok(())
}
