//! Runtime settings: optional TOML file, then `HEFT_*` environment variables,
//! then command-line flags.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Used when `--config` is not given. Missing is fine.
pub const DEFAULT_CONFIG_PATH: &str = "~/.config/heft/config.toml";

/// Shape of the config file and `HEFT_*` environment.
///
/// ```toml
/// db_path  = "~/.local/share/heft/bmi_data.db"
/// log_file = "~/.local/state/heft/heft.log"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
  #[serde(default = "default_db_path")]
  pub db_path:  PathBuf,
  #[serde(default = "default_log_file")]
  pub log_file: PathBuf,
}

fn default_db_path() -> PathBuf { PathBuf::from("bmi_data.db") }

fn default_log_file() -> PathBuf { PathBuf::from("heft.log") }

impl Default for Settings {
  fn default() -> Self {
    Self { db_path: default_db_path(), log_file: default_log_file() }
  }
}

impl Settings {
  /// Layer the config file (required only when given explicitly) under the
  /// `HEFT_` environment.
  pub fn load(config_path: Option<&Path>) -> Result<Self, config::ConfigError> {
    let (path, required) = match config_path {
      Some(p) => (p.to_path_buf(), true),
      None => (expand_tilde(Path::new(DEFAULT_CONFIG_PATH)), false),
    };

    let settings: Self = config::Config::builder()
      .add_source(config::File::from(path).required(required))
      .add_source(config::Environment::with_prefix("HEFT"))
      .build()?
      .try_deserialize()?;

    Ok(settings.expanded())
  }

  /// Apply command-line overrides.
  pub fn with_overrides(
    mut self,
    db_path: Option<PathBuf>,
    log_file: Option<PathBuf>,
  ) -> Self {
    if let Some(p) = db_path {
      self.db_path = p;
    }
    if let Some(p) = log_file {
      self.log_file = p;
    }
    self.expanded()
  }

  fn expanded(self) -> Self {
    Self {
      db_path:  expand_tilde(&self.db_path),
      log_file: expand_tilde(&self.log_file),
    }
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use std::io::Write as _;

  use super::*;

  #[test]
  fn reads_paths_from_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "db_path = \"/tmp/heft/data.db\"").unwrap();
    writeln!(file, "log_file = \"/tmp/heft/heft.log\"").unwrap();

    let s = Settings::load(Some(file.path())).unwrap();
    assert_eq!(s.db_path, PathBuf::from("/tmp/heft/data.db"));
    assert_eq!(s.log_file, PathBuf::from("/tmp/heft/heft.log"));
  }

  #[test]
  fn missing_keys_use_defaults() {
    let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    let s = Settings::load(Some(file.path())).unwrap();
    assert_eq!(s.db_path, PathBuf::from("bmi_data.db"));
    assert_eq!(s.log_file, PathBuf::from("heft.log"));
  }

  #[test]
  fn explicit_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Settings::load(Some(&dir.path().join("nope.toml"))).is_err());
  }

  #[test]
  fn flags_override_file() {
    let s = Settings::default()
      .with_overrides(Some(PathBuf::from("/data/bmi.db")), None);
    assert_eq!(s.db_path, PathBuf::from("/data/bmi.db"));
    assert_eq!(s.log_file, PathBuf::from("heft.log"));
  }

  #[test]
  fn tilde_expands_to_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(
      expand_tilde(Path::new("~/bmi.db")),
      PathBuf::from(home).join("bmi.db")
    );
    assert_eq!(expand_tilde(Path::new("/abs/bmi.db")), PathBuf::from("/abs/bmi.db"));
  }
}
