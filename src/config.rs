use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.yaml";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_WWW_DIR: &str = "www";
/// Environment variable consulted when `api_key` is absent from the config.
const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Address the web daemon binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Directory with the static front-end, served for non-api paths.
    #[serde(default = "default_www_dir")]
    pub www_dir: String,

    /// YouTube Data API key. Falls back to the YOUTUBE_API_KEY environment
    /// variable when unset.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            listen_addr: default_listen_addr(),
            www_dir: default_www_dir(),
            api_key: None,
        }
    }
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

fn default_www_dir() -> String {
    DEFAULT_WWW_DIR.to_string()
}

impl Config {
    /// Loads `config.yaml` from the base directory, creating it with defaults
    /// on first run.
    pub fn load_with(base_path: &Path) -> anyhow::Result<Self> {
        let path = base_path.join(CONFIG_FILE);

        if !path.exists() {
            let config = Config::default();
            config.save(base_path)?;
            return Ok(config);
        }

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config = serde_yml::from_str(&raw)
            .with_context(|| format!("{} is malformed", path.display()))?;

        // resave in case config version needs an upgrade
        if raw != serde_yml::to_string(&config)? {
            config.save(base_path)?;
        }

        Ok(config)
    }

    pub fn save(&self, base_path: &Path) -> anyhow::Result<()> {
        let path = base_path.join(CONFIG_FILE);
        std::fs::write(&path, serde_yml::to_string(self)?)
            .with_context(|| format!("failed to write {}", path.display()))
    }

    /// Key from the config file first, environment second. Blank values count
    /// as unset.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

/// Filesystem layout under the application base directory.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub base_path: PathBuf,
    pub playlists_path: PathBuf,
}

impl AppPaths {
    /// TUBELIST_BASE_PATH wins; otherwise ~/.local/share/tubelist.
    pub fn resolve() -> anyhow::Result<Self> {
        let base_path = match std::env::var("TUBELIST_BASE_PATH") {
            Ok(path) => PathBuf::from(path),
            Err(_) => {
                let home = homedir::my_home()
                    .context("could not determine home directory")?
                    .context("home directory path is empty")?;
                home.join(".local/share/tubelist")
            }
        };

        std::fs::create_dir_all(&base_path)
            .context("failed to create application base directory")?;

        Ok(AppPaths {
            playlists_path: base_path.join("playlists"),
            base_path,
        })
    }
}
