use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use mission_views::SourcePaths;

pub const ENV_WORKSPACE: &str = "MISSION_WORKSPACE";
pub const ENV_SESSIONS_DIR: &str = "MISSION_SESSIONS_DIR";
pub const ENV_NOTES_DIR: &str = "MISSION_NOTES_DIR";

const DEFAULT_CRON_PROGRAM: &str = "openclaw";
const DEFAULT_SEARCH_PROGRAM: &str = "qmd";

/// Keys as written in `config.json`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub workspace_dir: Option<PathBuf>,
    pub sessions_dir: Option<PathBuf>,
    pub notes_dir: Option<PathBuf>,
    pub planning_dir: Option<PathBuf>,
    pub status_doc: Option<PathBuf>,
    pub checklist_doc: Option<PathBuf>,
    pub activity_log: Option<PathBuf>,
    pub cron_program: Option<String>,
    pub search_program: Option<String>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub workspace_dir: PathBuf,
    #[serde(flatten)]
    pub sources: SourcePaths,
    pub cron_program: String,
    pub search_program: String,
}

/// Default config file: `<config dir>/mission/config.json`
/// (falls back to `~/.mission/config.json`).
pub fn default_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("mission").join("config.json")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".mission").join("config.json")
    } else {
        PathBuf::from(".mission").join("config.json")
    }
}

/// Read the config file. A missing default file is an empty config; a
/// missing file named with `--config` is an error.
pub fn read_file_config(path: &Path, explicit: bool) -> anyhow::Result<FileConfig> {
    if !path.exists() {
        if explicit {
            anyhow::bail!("config file not found: {}", path.display());
        }
        return Ok(FileConfig::default());
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))
}

/// Load the config from `explicit` (or the default path) and apply
/// environment overrides.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let path = explicit.map_or_else(default_config_path, Path::to_path_buf);
    let file = read_file_config(&path, explicit.is_some())?;
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let cfg = resolve(file, &home, |key| std::env::var(key).ok());
    tracing::debug!(
        config = %path.display(),
        workspace = %cfg.workspace_dir.display(),
        notes = %cfg.sources.notes_dir.display(),
        "config resolved"
    );
    Ok(cfg)
}

fn expand_home(path: PathBuf, home: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path,
    }
}

/// Fill defaults. Environment values win over the file for the three
/// root directories; derived paths follow the roots they live under.
pub fn resolve(file: FileConfig, home: &Path, env: impl Fn(&str) -> Option<String>) -> Config {
    let pick = |env_key: Option<&str>, file_value: Option<PathBuf>, default: PathBuf| {
        env_key
            .and_then(&env)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or(file_value)
            .map(|p| expand_home(p, home))
            .unwrap_or(default)
    };

    let workspace_dir = pick(
        Some(ENV_WORKSPACE),
        file.workspace_dir,
        home.join(".openclaw").join("workspace"),
    );
    let sessions_dir = pick(
        Some(ENV_SESSIONS_DIR),
        file.sessions_dir,
        home.join(".openclaw").join("agents").join("main").join("sessions"),
    );
    let notes_dir = pick(Some(ENV_NOTES_DIR), file.notes_dir, home.join("obsidian-notes"));
    let planning_dir = pick(None, file.planning_dir, notes_dir.join("GTD"));
    let status_doc = pick(
        None,
        file.status_doc,
        workspace_dir.join("memory").join("WORKING.md"),
    );
    let checklist_doc = pick(
        None,
        file.checklist_doc,
        planning_dir.join("01-Next-Actions").join("next.md"),
    );
    let activity_log = pick(
        None,
        file.activity_log,
        workspace_dir.join("mission-control").join("activities.jsonl"),
    );

    Config {
        workspace_dir,
        sources: SourcePaths {
            activity_log,
            sessions_dir,
            status_doc,
            checklist_doc,
            notes_dir,
            planning_dir,
        },
        cron_program: file
            .cron_program
            .unwrap_or_else(|| DEFAULT_CRON_PROGRAM.to_string()),
        search_program: file
            .search_program
            .unwrap_or_else(|| DEFAULT_SEARCH_PROGRAM.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_live_under_home() {
        let cfg = resolve(FileConfig::default(), Path::new("/home/u"), no_env);
        assert_eq!(cfg.workspace_dir, PathBuf::from("/home/u/.openclaw/workspace"));
        assert_eq!(
            cfg.sources.sessions_dir,
            PathBuf::from("/home/u/.openclaw/agents/main/sessions")
        );
        assert_eq!(
            cfg.sources.activity_log,
            PathBuf::from("/home/u/.openclaw/workspace/mission-control/activities.jsonl")
        );
        assert_eq!(
            cfg.sources.status_doc,
            PathBuf::from("/home/u/.openclaw/workspace/memory/WORKING.md")
        );
        assert_eq!(cfg.sources.planning_dir, PathBuf::from("/home/u/obsidian-notes/GTD"));
        assert_eq!(
            cfg.sources.checklist_doc,
            PathBuf::from("/home/u/obsidian-notes/GTD/01-Next-Actions/next.md")
        );
        assert_eq!(cfg.cron_program, "openclaw");
        assert_eq!(cfg.search_program, "qmd");
    }

    #[test]
    fn file_values_and_tilde() {
        let file: FileConfig = serde_json::from_str(
            r#"{"notes_dir": "~/vault", "search_program": "/opt/qmd", "unknown_key": 1}"#,
        )
        .unwrap();
        let cfg = resolve(file, Path::new("/home/u"), no_env);
        assert_eq!(cfg.sources.notes_dir, PathBuf::from("/home/u/vault"));
        assert_eq!(cfg.sources.planning_dir, PathBuf::from("/home/u/vault/GTD"));
        assert_eq!(cfg.search_program, "/opt/qmd");
    }

    #[test]
    fn env_overrides_file() {
        let file = FileConfig {
            workspace_dir: Some(PathBuf::from("/from/file")),
            ..Default::default()
        };
        let env = |key: &str| (key == ENV_WORKSPACE).then(|| "/from/env".to_string());
        let cfg = resolve(file, Path::new("/home/u"), env);
        assert_eq!(cfg.workspace_dir, PathBuf::from("/from/env"));
        assert_eq!(
            cfg.sources.status_doc,
            PathBuf::from("/from/env/memory/WORKING.md")
        );
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nope.json");
        assert!(read_file_config(&path, true).is_err());
        assert!(read_file_config(&path, false).is_ok());
    }

    #[test]
    fn load_reads_explicit_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, r#"{"cron_program": "/opt/cron", "search_program": "/opt/qmd"}"#)
            .unwrap();
        let cfg = load(Some(&path)).unwrap();
        assert_eq!(cfg.cron_program, "/opt/cron");
        assert_eq!(cfg.search_program, "/opt/qmd");
        assert!(load(Some(&tmp.path().join("missing.json"))).is_err());
    }

    #[test]
    fn invalid_json_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = read_file_config(&path, false).unwrap_err();
        assert!(err.to_string().contains("invalid config"));
    }
}
