//! INI-style configuration: `[Section]` headers, `key = value` pairs, `#` comments.
//!
//! ```text
//! # jobcat.conf
//! [Logging]
//! console_enabled = true
//! console_target = stderr
//! console_timestamps = false
//! ```

use std::{collections::HashMap, fmt, fs, io, path::Path};

use crate::log::ConsoleTarget;

/// Section read by [`LogConfig::from_config`].
pub const LOGGING_SECTION: &str = "Logging";

/// Environment variable overriding `console_enabled`.
pub const CONSOLE_ENV_VAR: &str = "JOBCAT_CONSOLE";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: String, source: io::Error },
    MalformedLine { line: usize, content: String },
    InvalidValue { section: String, key: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ConfigError::*;
        match self {
            Io { path, source } => write!(f, "error reading file {path}: {source}"),
            MalformedLine { line, content } => {
                write!(f, "line {line}: expected `[section]` or `key = value`, got {content:?}")
            }
            InvalidValue {
                section,
                key,
                value,
            } => write!(f, "invalid value for [{section}] {key}: {value:?}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Raw key/value view of a config file. Keys before the first header are globals.
#[derive(Debug, Default, Clone)]
pub struct Config {
    pub globals: HashMap<String, String>,
    pub sections: HashMap<String, HashMap<String, String>>,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        let mut current_section: Option<String> = None;

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                current_section = Some(name.trim().to_string());
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::MalformedLine {
                    line: idx + 1,
                    content: raw.to_string(),
                });
            };
            let key = key.trim().to_string();
            let value = value.trim().trim_matches('"').to_string();

            match &current_section {
                None => {
                    cfg.globals.insert(key, value);
                }
                Some(sec) => {
                    cfg.sections.entry(sec.clone()).or_default().insert(key, value);
                }
            }
        }
        Ok(cfg)
    }

    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|sec| sec.get(key))
            .map(String::as_str)
    }

    /// Section value, falling back to a global key of the same name. Empty values count as unset.
    #[must_use]
    pub fn get_non_empty(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section, key)
            .or_else(|| self.globals.get(key).map(String::as_str))
            .filter(|s| !s.is_empty())
    }

    pub fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>, ConfigError> {
        self.get_non_empty(section, key)
            .map(|v| {
                parse_bool(v).ok_or_else(|| ConfigError::InvalidValue {
                    section: section.to_string(),
                    key: key.to_string(),
                    value: v.to_string(),
                })
            })
            .transpose()
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Typed settings for the default console sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub console_enabled: bool,
    pub console_target: ConsoleTarget,
    pub console_timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console_enabled: true,
            console_target: ConsoleTarget::Stderr,
            console_timestamps: false,
        }
    }
}

impl LogConfig {
    /// Reads the `[Logging]` section; missing keys keep their defaults.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let mut out = Self::default();

        if let Some(on) = config.get_bool(LOGGING_SECTION, "console_enabled")? {
            out.console_enabled = on;
        }
        if let Some(on) = config.get_bool(LOGGING_SECTION, "console_timestamps")? {
            out.console_timestamps = on;
        }
        if let Some(target) = config.get_non_empty(LOGGING_SECTION, "console_target") {
            out.console_target = match target.to_ascii_lowercase().as_str() {
                "stderr" => ConsoleTarget::Stderr,
                "stdout" => ConsoleTarget::Stdout,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        section: LOGGING_SECTION.to_string(),
                        key: "console_target".to_string(),
                        value: target.to_string(),
                    });
                }
            };
        }
        Ok(out)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_config(&Config::load(path)?)
    }

    /// Applies a `JOBCAT_CONSOLE`-style override. Unrecognized values are ignored.
    #[must_use]
    pub fn with_console_override(mut self, value: Option<&str>) -> Self {
        if let Some(on) = value.and_then(|v| parse_bool(v.trim())) {
            self.console_enabled = on;
        }
        self
    }

    /// [`with_console_override`](Self::with_console_override) fed from the process environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        let value = std::env::var(CONSOLE_ENV_VAR).ok();
        self.with_console_override(value.as_deref())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    const SAMPLE: &str = r#"
# global keys come first
console_timestamps = yes

[Logging]
console_enabled = false
console_target = "stdout"
"#;

    #[test]
    fn parses_sections_and_globals() {
        let cfg = Config::parse(SAMPLE).unwrap();
        assert_eq!(cfg.get(LOGGING_SECTION, "console_target"), Some("stdout"));
        assert_eq!(cfg.globals.get("console_timestamps").map(String::as_str), Some("yes"));
    }

    #[test]
    fn log_config_reads_logging_section_with_global_fallback() {
        let cfg = LogConfig::from_config(&Config::parse(SAMPLE).unwrap()).unwrap();
        assert_eq!(
            cfg,
            LogConfig {
                console_enabled: false,
                console_target: ConsoleTarget::Stdout,
                console_timestamps: true,
            }
        );
    }

    #[test]
    fn empty_config_gives_defaults() {
        let cfg = LogConfig::from_config(&Config::parse("").unwrap()).unwrap();
        assert_eq!(cfg, LogConfig::default());
        assert!(cfg.console_enabled);
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let err = Config::parse("[Logging]\nconsole_enabled\n").unwrap_err();
        match err {
            ConfigError::MalformedLine { line, .. } => assert_eq!(line, 2),
            other => panic!("expected MalformedLine, got {other:?}"),
        }
    }

    #[test]
    fn invalid_bool_is_rejected() {
        let raw = Config::parse("[Logging]\nconsole_enabled = maybe\n").unwrap();
        let err = LogConfig::from_config(&raw).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "console_enabled"
        ));
        assert!(err.to_string().contains("maybe"));
    }

    #[test]
    fn invalid_target_is_rejected() {
        let raw = Config::parse("[Logging]\nconsole_target = syslog\n").unwrap();
        assert!(LogConfig::from_config(&raw).is_err());
    }

    #[test]
    fn console_override_wins_when_recognized() {
        let base = LogConfig::default();
        assert!(!base.clone().with_console_override(Some("off")).console_enabled);
        assert!(base.clone().with_console_override(Some("garbage")).console_enabled);
        assert!(base.with_console_override(None).console_enabled);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Config::load("/definitely/not/here/jobcat.conf").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }
}
