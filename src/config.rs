//! Run-time configuration: line-delimited keyword and channel lists plus the
//! gateway connection settings from `config.toml`.

use chanscan_core::{ChannelRef, ConfigError, KeywordSet};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    pub api_base: String,
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    gateway: Option<GatewayConfig>,
}

pub fn load_gateway_config(path: &str) -> Result<GatewayConfig, ConfigError> {
    let raw = read_file(path)?;
    let parsed: ConfigFile = toml::from_str(&raw)?;
    parsed.gateway.ok_or_else(|| ConfigError::MissingField {
        field: "gateway".to_string(),
    })
}

/// Loads the keyword list. An empty list (after dropping blank lines) is a
/// configuration error: nothing could ever match.
pub fn load_keywords(path: &str) -> Result<KeywordSet, ConfigError> {
    let keywords = KeywordSet::new(read_lines(path)?);
    if keywords.is_empty() {
        return Err(ConfigError::NoKeywords {
            path: path.to_string(),
        });
    }
    Ok(keywords)
}

pub fn load_channels(path: &str) -> Result<Vec<ChannelRef>, ConfigError> {
    let channels: Vec<ChannelRef> = read_lines(path)?
        .iter()
        .map(|line| ChannelRef::parse(line))
        .collect();
    if channels.is_empty() {
        return Err(ConfigError::NoChannels {
            path: path.to_string(),
        });
    }
    Ok(channels)
}

fn read_file(path: &str) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

/// One entry per line; blank and whitespace-only lines are ignored, order is
/// preserved.
fn read_lines(path: &str) -> Result<Vec<String>, ConfigError> {
    Ok(read_file(path)?
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;

    fn write_temp(contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("test_chanscan_cfg_{}", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_keywords_skip_blank_lines() {
        let path = write_temp("urgent\n\n   \nsale\n");
        let keywords = load_keywords(path.to_str().unwrap()).unwrap();
        assert_eq!(keywords.iter().collect::<Vec<_>>(), vec!["urgent", "sale"]);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_empty_keyword_list_rejected() {
        let path = write_temp("\n  \n");
        let result = load_keywords(path.to_str().unwrap());
        assert!(matches!(result, Err(ConfigError::NoKeywords { .. })));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let result = load_keywords("/nonexistent/keywords.txt");
        assert!(matches!(result, Err(ConfigError::Unreadable { .. })));
    }

    #[test]
    fn test_channels_parse_handles_and_ids() {
        let path = write_temp("@rustlang\nnews_channel\n-1001234567890\n");
        let channels = load_channels(path.to_str().unwrap()).unwrap();
        assert_eq!(
            channels,
            vec![
                ChannelRef::Handle("rustlang".to_string()),
                ChannelRef::Handle("news_channel".to_string()),
                ChannelRef::Id(-1001234567890),
            ]
        );
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_gateway_config() {
        let path = write_temp(
            "[gateway]\napi_base = \"https://gw.example\"\naccess_token = \"secret\"\n",
        );
        let gateway = load_gateway_config(path.to_str().unwrap()).unwrap();
        assert_eq!(gateway.api_base, "https://gw.example");
        assert_eq!(gateway.access_token, "secret");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_gateway_section_required() {
        let path = write_temp("[other]\nkey = 1\n");
        let result = load_gateway_config(path.to_str().unwrap());
        assert!(matches!(result, Err(ConfigError::MissingField { .. })));
        std::fs::remove_file(&path).ok();
    }
}
