use clap::Subcommand;

use crate::config::{default_config_path, Config};

// ── CLI Schema ──

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Print the resolved configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

// ── Dispatch ──

pub fn run(cmd: ConfigCmd, cfg: &Config) -> anyhow::Result<()> {
    match cmd {
        ConfigCmd::Show { json } => show(cfg, json),
    }
}

// ── Command Implementations ──

fn show(cfg: &Config, json: bool) -> anyhow::Result<()> {
    let value = serde_json::to_value(cfg)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }
    println!("# default file: {}", default_config_path().display());
    if let serde_json::Value::Object(map) = value {
        for (key, val) in &map {
            match val {
                serde_json::Value::String(s) => println!("{key} = {s}"),
                other => println!("{key} = {other}"),
            }
        }
    }
    Ok(())
}
