/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory, then the current
/// working directory, unless an explicit path is given on the command line.
/// A missing file or missing keys fall back to defaults; a file that does
/// not parse is reported and ignored.

use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";

// ── Public Config Struct ──

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Fixed RNG seed; `None` draws one from OS entropy.
    pub seed: Option<i64>,
    pub color: bool,
    pub sound: bool,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    #[serde(default)]
    general: TomlGeneral,
    #[serde(default)]
    display: TomlDisplay,
    #[serde(default)]
    log: TomlLog,
}

#[derive(Deserialize, Debug, Default)]
struct TomlGeneral {
    #[serde(default)]
    seed: Option<i64>,
}

#[derive(Deserialize, Debug)]
struct TomlDisplay {
    #[serde(default = "default_true")]
    color: bool,
    #[serde(default = "default_true")]
    sound: bool,
}

#[derive(Deserialize, Debug)]
struct TomlLog {
    #[serde(default = "default_log_filter")]
    filter: String,
}

// ── Defaults ──

fn default_true() -> bool { true }
fn default_log_filter() -> String { "warn".into() }

impl Default for TomlDisplay {
    fn default() -> Self {
        TomlDisplay { color: default_true(), sound: default_true() }
    }
}

impl Default for TomlLog {
    fn default() -> Self {
        TomlLog { filter: default_log_filter() }
    }
}

impl From<TomlConfig> for GameConfig {
    fn from(cfg: TomlConfig) -> Self {
        GameConfig {
            seed: cfg.general.seed,
            color: cfg.display.color,
            sound: cfg.display.sound,
            log_filter: cfg.log.filter,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        TomlConfig::default().into()
    }
}

// ── Loading ──

impl GameConfig {
    /// Load from `explicit` if given, otherwise search the candidate dirs.
    ///
    /// Runs before logging is set up, so problems go straight to stderr.
    pub fn load(explicit: Option<&Path>) -> Self {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => candidate_dirs()
                .into_iter()
                .map(|d| d.join(CONFIG_FILE))
                .find(|p| p.is_file()),
        };
        match path {
            Some(p) => load_file(&p),
            None => GameConfig::default(),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<TomlConfig>(text).map(GameConfig::from)
    }
}

/// Executable directory first, then CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    dirs
}

fn load_file(path: &Path) -> GameConfig {
    match std::fs::read_to_string(path) {
        Ok(text) => match GameConfig::from_toml_str(&text) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Warning: {} parse error: {e}", path.display());
                eprintln!("Using default settings.");
                GameConfig::default()
            }
        },
        Err(e) => {
            eprintln!("Warning: could not read {}: {e}", path.display());
            GameConfig::default()
        }
    }
}
