//! Loader for `application.properties`.
//!
//! `key = value` lines. `#` comments and blank lines are ignored, lines
//! without `=` are skipped, unknown keys are ignored.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use guidegate_core::config::AppConfig;

pub fn parse_properties(text: &str) -> AppConfig {
    let mut config = AppConfig::default();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim();

        match key.trim() {
            "userguide.path" => config.userguide_path = PathBuf::from(value),
            "userguide.filename" => config.userguide_filename = value.to_string(),
            "server.port" => match value.parse::<u16>() {
                Ok(port) => config.port = port,
                Err(e) => tracing::warn!(
                    "Ignoring invalid server.port {:?} ({}), using {}",
                    value,
                    e,
                    config.port
                ),
            },
            "static.path" => config.static_path = PathBuf::from(value),
            "auth.token" => config.auth_token = value.to_string(),
            _ => {}
        }
    }

    config
}

/// Load config from `path`. A file that cannot be opened yields defaults;
/// a file that opens but cannot be read is an error.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound || e.kind() == ErrorKind::PermissionDenied => {
            tracing::warn!(
                "Could not open config file {}, using defaults: {}",
                path.display(),
                e
            );
            return Ok(AppConfig::default());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read config file {}", path.display()))
        }
    };
    let text = String::from_utf8(bytes)
        .with_context(|| format!("Config file {} is not valid UTF-8", path.display()))?;
    Ok(parse_properties(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_gives_defaults() {
        assert_eq!(parse_properties(""), AppConfig::default());
        let config = AppConfig::default();
        assert_eq!(config.userguide_path, PathBuf::from("./userguides"));
        assert_eq!(config.userguide_filename, "user-guide.pdf");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn reads_recognized_keys() {
        let config = parse_properties(
            "userguide.path=/data/guides\n\
             userguide.filename = manual.docx \n\
             server.port=9090\n\
             static.path=/srv/static\n\
             auth.token=s3cret\n",
        );
        assert_eq!(config.userguide_path, PathBuf::from("/data/guides"));
        assert_eq!(config.userguide_filename, "manual.docx");
        assert_eq!(config.port, 9090);
        assert_eq!(config.static_path, PathBuf::from("/srv/static"));
        assert_eq!(config.auth_token, "s3cret");
    }

    #[test]
    fn skips_comments_blank_and_malformed_lines() {
        let config = parse_properties(
            "# userguide.filename=commented.pdf\n\
             \n\
             this line has no separator\n\
             unknown.key=ignored\n\
             userguide.filename=kept.pdf\n",
        );
        assert_eq!(config.userguide_filename, "kept.pdf");
        assert_eq!(config.userguide_path, PathBuf::from("./userguides"));
    }

    #[test]
    fn splits_on_first_equals_only() {
        let config = parse_properties("auth.token=abc=def\n");
        assert_eq!(config.auth_token, "abc=def");
    }

    #[test]
    fn invalid_port_keeps_default() {
        assert_eq!(parse_properties("server.port=eighty\n").port, 8080);
        assert_eq!(parse_properties("server.port=70000\n").port, 8080);
    }

    #[test]
    fn later_keys_win() {
        let config = parse_properties("userguide.filename=a.pdf\nuserguide.filename=b.pdf\n");
        assert_eq!(config.userguide_filename, "b.pdf");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.properties")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn loads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("application.properties");
        std::fs::write(&path, "# guides\nuserguide.filename=guide.txt\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.userguide_filename, "guide.txt");
    }

    #[test]
    fn unreadable_content_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("application.properties");
        std::fs::write(&path, [0xff, 0xfe, b'=', b'x']).unwrap();

        assert!(load_config(&path).is_err());
    }
}
