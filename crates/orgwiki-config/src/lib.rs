use orgwiki_render::{OutputFormat, RenderOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding wiki pages, one file per page title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages_path: Option<PathBuf>,
    /// File extension of page files, without the dot.
    pub page_extension: String,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pages_path: None,
            page_extension: "org".to_string(),
            render: RenderConfig::default(),
        }
    }
}

/// Default output settings, overridable on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    pub escape_text: bool,
}

impl From<RenderConfig> for RenderOptions {
    fn from(config: RenderConfig) -> Self {
        RenderOptions {
            format: config.format,
            pretty: config.pretty,
            escape_text: config.escape_text,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            log::debug!("no config file at {}", config_path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded pages path
        config.pages_path = config
            .pages_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        log::debug!("loaded config from {}", config_path.display());
        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/orgwiki");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// File holding the page called `title`, if a pages directory is set.
    pub fn page_path(&self, title: &str) -> Option<PathBuf> {
        let pages_path = self.pages_path.as_ref()?;
        Some(pages_path.join(format!("{title}.{}", self.page_extension)))
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/orgwiki/config.toml"));
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.page_extension, "org");
        assert_eq!(config.render.format, OutputFormat::Html);
    }

    #[test]
    fn test_full_file() {
        let config_content = r#"
pages_path = "/srv/wiki"
page_extension = "txt"

[render]
format = "xml"
pretty = true
escape_text = true
"#;
        let config: Config = toml::from_str(config_content).unwrap();
        assert_eq!(config.pages_path, Some(PathBuf::from("/srv/wiki")));
        assert_eq!(config.page_extension, "txt");
        assert_eq!(
            RenderOptions::from(config.render),
            RenderOptions {
                format: OutputFormat::Xml,
                pretty: true,
                escape_text: true,
            }
        );
    }

    #[test]
    fn test_partial_render_table() {
        let config: Config = toml::from_str("[render]\npretty = true\n").unwrap();
        assert_eq!(config.render.format, OutputFormat::Html);
        assert!(config.render.pretty);
        assert!(!config.render.escape_text);
    }

    #[test]
    fn test_unknown_format_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "[render]\nformat = \"markdown\"\n").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("ORGWIKI_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$ORGWIKI_TEST_VAR/subdir");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/subdir")));

        unsafe {
            env::remove_var("ORGWIKI_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_path_with_relative_path() {
        let path = PathBuf::from("relative/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let test_config = Config {
            pages_path: Some(PathBuf::from("/tmp/test-pages")),
            page_extension: "wiki".to_string(),
            render: RenderConfig {
                format: OutputFormat::Xml,
                pretty: true,
                escape_text: false,
            },
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_save_without_pages_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");

        Config::default().save_to_path(&config_file).unwrap();

        let content = std::fs::read_to_string(&config_file).unwrap();
        assert!(!content.contains("pages_path"));
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(loaded_config, Config::default());
    }

    #[test]
    fn test_pages_path_with_env_var_in_toml() {
        unsafe {
            env::set_var("ORGWIKI_PAGES_ROOT", "/custom/wiki");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "pages_path = \"$ORGWIKI_PAGES_ROOT/pages\"\n").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(config.pages_path, Some(PathBuf::from("/custom/wiki/pages")));

        unsafe {
            env::remove_var("ORGWIKI_PAGES_ROOT");
        }
    }

    #[test]
    fn test_page_path() {
        let config = Config {
            pages_path: Some(PathBuf::from("/srv/wiki")),
            ..Config::default()
        };
        assert_eq!(
            config.page_path("Main"),
            Some(PathBuf::from("/srv/wiki/Main.org"))
        );
        assert_eq!(Config::default().page_path("Main"), None);
    }
}
