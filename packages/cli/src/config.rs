use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use studio_compiler_html::CompileOptions as HtmlOptions;

pub const DEFAULT_CONFIG_NAME: &str = "studio.config.json";

/// Studio configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Working document snapshot
    #[serde(default = "default_state_file")]
    pub state_file: String,

    /// Project and version database
    #[serde(default = "default_projects_file")]
    pub projects_file: String,

    /// Where `export` writes generated pages
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Pretty print rendered HTML
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Indentation for rendered HTML
    #[serde(default = "default_indent")]
    pub indent: String,
}

fn default_state_file() -> String {
    ".studio/state.json".to_string()
}

fn default_projects_file() -> String {
    ".studio/projects.json".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_pretty() -> bool {
    true
}

fn default_indent() -> String {
    "  ".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn state_path(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.state_file)
    }

    pub fn projects_path(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.projects_file)
    }

    pub fn out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }

    pub fn html_options(&self) -> HtmlOptions {
        HtmlOptions {
            pretty: self.pretty,
            indent: self.indent.clone(),
            ..Default::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            projects_file: default_projects_file(),
            out_dir: default_out_dir(),
            pretty: default_pretty(),
            indent: default_indent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "stateFile": "state.json",
            "outDir": "build",
            "pretty": false
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.state_file, "state.json");
        assert_eq!(config.projects_file, ".studio/projects.json");
        assert_eq!(config.out_dir, "build");
        assert!(!config.pretty);
        assert_eq!(config.indent, "  ");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.state_file, ".studio/state.json");
        assert_eq!(config.out_dir, "dist");
        assert!(config.html_options().pretty);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let cwd = dir.path().display().to_string();

        let config = Config::load(&cwd).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.state_path(&cwd), dir.path().join(".studio/state.json"));
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let cwd = dir.path().display().to_string();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r#"{ "projectsFile": "db.json", "indent": "    " }"#,
        )
        .unwrap();

        let config = Config::load(&cwd).unwrap();
        assert_eq!(config.projects_path(&cwd), dir.path().join("db.json"));
        assert_eq!(config.html_options().indent, "    ");
    }
}
