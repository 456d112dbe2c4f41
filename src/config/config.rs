use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{map_io_err, SpliceError, SpliceResult};
use crate::splice::{Bounds, LineRange, SpliceOptions};

/// Name of the per-directory config file picked up automatically
pub const LOCAL_CONFIG_FILE: &str = "linesplice.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpliceConfig {
    pub job: JobConfig,
    pub write: WriteConfig,
    pub log: LogConfig,
}

/// The file to edit, the file to splice in, and where
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    pub target: PathBuf,
    pub replacement: PathBuf,
    pub start: usize,
    pub end: usize,
    /// Treat `start`/`end` as inclusive 1-based line numbers
    pub one_based: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expect_sha256: Option<String>,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            target: PathBuf::from("app/dashboard/create/page.tsx"),
            replacement: PathBuf::from("app/dashboard/create_effect_tmp.tsx"),
            start: 102,
            end: 186,
            one_based: false,
            expect_sha256: None,
        }
    }
}

impl JobConfig {
    pub fn range(&self) -> SpliceResult<LineRange> {
        if self.one_based {
            LineRange::from_one_based(self.start, self.end)
        } else {
            Ok(LineRange::new(self.start, self.end))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteConfig {
    pub atomic: bool,
    pub bounds: Bounds,
}

impl Default for WriteConfig {
    fn default() -> Self {
        Self {
            atomic: true,
            bounds: Bounds::Strict,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl SpliceConfig {
    pub fn load(path: &Path) -> SpliceResult<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let content = std::fs::read_to_string(path).map_err(map_io_err(path))?;

        match ext {
            "json" => Ok(serde_json::from_str(&content)?),
            "yaml" | "yml" => Ok(serde_yaml::from_str(&content)?),
            "toml" => Ok(toml::from_str(&content)?),
            _ => Err(SpliceError::invalid_argument(format!(
                "Unsupported config format: {}",
                ext
            ))),
        }
    }

    pub fn save(&self, path: &Path) -> SpliceResult<()> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let content = match ext {
            "json" => serde_json::to_string_pretty(self)?,
            "yaml" | "yml" => serde_yaml::to_string(self)?,
            "toml" => toml::to_string(self)?,
            _ => {
                return Err(SpliceError::invalid_argument(format!(
                    "Unsupported config format: {}",
                    ext
                )))
            }
        };

        std::fs::write(path, content).map_err(map_io_err(path))?;
        Ok(())
    }

    /// User-level config, e.g. `~/.config/linesplice/config.toml`
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("linesplice")
            .join("config.toml")
    }

    /// Find the config to use.
    ///
    /// An explicit path must exist. Otherwise `./linesplice.toml` is tried,
    /// then the user-level file; with neither present the defaults apply.
    pub fn discover(explicit: Option<&Path>) -> SpliceResult<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        for candidate in [PathBuf::from(LOCAL_CONFIG_FILE), Self::default_config_path()] {
            if candidate.is_file() {
                debug!("Using config file {}", candidate.display());
                return Ok((Self::load(&candidate)?, Some(candidate)));
            }
        }

        debug!("No config file found, using built-in defaults");
        Ok((Self::default(), None))
    }

    /// Splice options as configured; the caller layers CLI flags on top
    pub fn splice_options(&self) -> SpliceOptions {
        SpliceOptions {
            bounds: self.write.bounds,
            atomic: self.write.atomic,
            expect_sha256: self.job.expect_sha256.clone(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_match_builtin_job() {
        let config = SpliceConfig::default();
        assert_eq!(config.job.range().unwrap(), LineRange::new(102, 186));
        assert_eq!(config.write.bounds, Bounds::Strict);
        assert!(config.write.atomic);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_load_partial_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("linesplice.toml");
        std::fs::write(
            &path,
            r#"
[job]
target = "src/main.rs"
replacement = "patch.rs"
start = 3
end = 7
one_based = true

[write]
bounds = "clamp"
"#,
        )
        .unwrap();

        let config = SpliceConfig::load(&path).unwrap();
        assert_eq!(config.job.target, PathBuf::from("src/main.rs"));
        assert_eq!(config.job.range().unwrap(), LineRange::new(2, 7));
        assert_eq!(config.write.bounds, Bounds::Clamp);
        assert!(config.write.atomic);
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn test_load_json_and_yaml() {
        let dir = tempdir().unwrap();

        let json = dir.path().join("config.json");
        std::fs::write(&json, r#"{"job": {"start": 1, "end": 2}, "log": {"level": "debug"}}"#)
            .unwrap();
        let config = SpliceConfig::load(&json).unwrap();
        assert_eq!(config.job.range().unwrap(), LineRange::new(1, 2));
        assert_eq!(config.log.level, "debug");

        let yaml = dir.path().join("config.yml");
        std::fs::write(&yaml, "write:\n  atomic: false\n").unwrap();
        let config = SpliceConfig::load(&yaml).unwrap();
        assert!(!config.write.atomic);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let mut config = SpliceConfig::default();
        config.job.expect_sha256 = Some("abc123".to_string());
        config.write.bounds = Bounds::Clamp;

        for name in ["out.toml", "out.json", "out.yaml"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(SpliceConfig::load(&path).unwrap(), config, "{}", name);
        }
    }

    #[test]
    fn test_unsupported_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "start=1").unwrap();

        let err = SpliceConfig::load(&path).unwrap_err();
        assert!(matches!(err, SpliceError::InvalidArgument { .. }));
        assert!(SpliceConfig::default().save(&path).is_err());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[job\nstart = ").unwrap();

        let err = SpliceConfig::load(&path).unwrap_err();
        assert!(matches!(err, SpliceError::ParseError { .. }));
    }

    #[test]
    fn test_discover_explicit_missing_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(SpliceConfig::discover(Some(&missing)).is_err());
    }

    #[test]
    fn test_splice_options_from_config() {
        let mut config = SpliceConfig::default();
        config.write.atomic = false;
        config.job.expect_sha256 = Some("deadbeef".to_string());

        let options = config.splice_options();
        assert!(!options.atomic);
        assert!(!options.dry_run);
        assert_eq!(options.expect_sha256.as_deref(), Some("deadbeef"));
    }
}
