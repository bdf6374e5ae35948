use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path of the JSON document to update
    #[serde(default = "default_output")]
    pub output: PathBuf,
    pub sources: Vec<SourceConfig>,
}

fn default_output() -> PathBuf {
    PathBuf::from("api/home.json")
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    /// Label used in the status line, e.g. "Decrypt"
    pub name: String,
    pub url: String,
    /// Tag stamped on every item taken from this feed, e.g. "decrypt"
    pub source: String,
    pub section: Section,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    5
}

/// Sections a feed may target. `projects` is curated by hand and is
/// deliberately not a valid target.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Markets,
    Foss,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_config() {
        let content = r#"
            output = "data/home.json"

            [[sources]]
            name = "Decrypt"
            url = "https://decrypt.co/feed"
            source = "decrypt"
            section = "markets"
            limit = 3

            [[sources]]
            name = "HN"
            url = "https://news.ycombinator.com/rss"
            source = "hn"
            section = "foss"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.output, PathBuf::from("data/home.json"));
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.sources[0].name, "Decrypt");
        assert_eq!(config.sources[0].source, "decrypt");
        assert_eq!(config.sources[0].section, Section::Markets);
        assert_eq!(config.sources[0].limit, 3);
        assert_eq!(config.sources[1].section, Section::Foss);
    }

    #[test]
    fn test_default_output_path() {
        let content = r#"
            [[sources]]
            name = "HN"
            url = "https://news.ycombinator.com/rss"
            source = "hn"
            section = "foss"
        "#;

        let config = Config::from_str(content).unwrap();
        assert_eq!(config.output, PathBuf::from("api/home.json"));
    }

    #[test]
    fn test_default_limit() {
        let content = r#"
            [[sources]]
            name = "HN"
            url = "https://news.ycombinator.com/rss"
            source = "hn"
            section = "foss"
        "#;

        let config = Config::from_str(content).unwrap();
        assert_eq!(config.sources[0].limit, 5);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = Config::load("/nonexistent/path/config.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let content = "this is not valid toml {{{";

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let result = Config::load(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_projects_is_not_a_valid_section() {
        let content = r#"
            [[sources]]
            name = "Projects"
            url = "https://example.com/feed"
            source = "example"
            section = "projects"
        "#;

        let result = Config::from_str(content);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_required_fields() {
        let content = r#"
            [[sources]]
            name = "HN"
            # Missing url, source and section
        "#;

        let result = Config::from_str(content);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_sources_list() {
        let content = "sources = []";

        let config = Config::from_str(content).unwrap();
        assert!(config.sources.is_empty());
    }
}
