// Config store: a single YAML file under the user's home directory that
// holds the API token, the chosen workspace and the alias table.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".clickup-cli";
const CONFIG_FILE: &str = "config.yaml";

/// Everything persisted between invocations. Keys we do not know about are
/// carried in `extra` so a load/save cycle never drops them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub api_token: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number"
    )]
    pub user_id: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number"
    )]
    pub username: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number"
    )]
    pub workspace_id: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number"
    )]
    pub workspace_name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub aliases: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Config {
    pub fn new(api_token: impl Into<String>) -> Self {
        Config {
            api_token: api_token.into(),
            ..Default::default()
        }
    }

    /// Workspace id chosen during `config init`.
    pub fn workspace_id(&self) -> Result<&str> {
        match self.workspace_id.as_deref() {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(Error::ConfigInvalid(
                "No workspace_id in config. Run 'cl config init'.".into(),
            )),
        }
    }

    /// Token shortened for display: first eight characters, or stars when
    /// the token is too short to reveal anything safely.
    pub fn masked_token(&self) -> String {
        if self.api_token.chars().count() > 8 {
            let head: String = self.api_token.chars().take(8).collect();
            format!("{head}...")
        } else {
            "***".to_string()
        }
    }

    /// Key/value pairs in file order, token masked. Used by `config show`.
    pub fn display_entries(&self) -> Vec<(String, String)> {
        let mut rows = vec![("api_token".to_string(), self.masked_token())];
        let optional = [
            ("user_id", &self.user_id),
            ("username", &self.username),
            ("workspace_id", &self.workspace_id),
            ("workspace_name", &self.workspace_name),
        ];
        for (key, value) in optional {
            if let Some(v) = value {
                rows.push((key.to_string(), v.clone()));
            }
        }
        if !self.aliases.is_empty() {
            let joined = self
                .aliases
                .iter()
                .map(|(name, target)| format!("@{name}={target}"))
                .collect::<Vec<_>>()
                .join(", ");
            rows.push(("aliases".to_string(), joined));
        }
        for (key, value) in &self.extra {
            let shown = serde_yaml::to_string(value)
                .map(|s| s.trim_end().to_string())
                .unwrap_or_default();
            rows.push((key.clone(), shown));
        }
        rows
    }
}

/// Scalar keys are read back as text whatever YAML type they were written as.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
        Flag(bool),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
        Raw::Flag(b) => b.to_string(),
    }))
}

/// Handle on the config file location. `ConfigStore::locate()` gives the
/// real per-user path; tests point `ConfigStore::at` into a temp dir.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn locate() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::at(home.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        ConfigStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Err(Error::ConfigMissing(self.path.clone()));
        }
        let text = fs::read_to_string(&self.path)?;
        let value: serde_yaml::Value = serde_yaml::from_str(&text)?;

        let has_token = value
            .as_mapping()
            .and_then(|m| m.get("api_token"))
            .map(|t| t.is_string())
            .unwrap_or(false);
        if !has_token {
            return Err(Error::ConfigInvalid(
                "Config is missing 'api_token'. Run 'cl config init' to fix.".into(),
            ));
        }

        let config: Config = serde_yaml::from_value(value)?;
        log::debug!("loaded config from {}", self.path.display());
        Ok(config)
    }

    /// Writes the whole config, replacing whatever the file held before.
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let text = serde_yaml::to_string(config)?;
        fs::write(&self.path, text)?;
        log::debug!("saved config to {}", self.path.display());
        Ok(())
    }
}
