//! Configuration file parsing for `intcode.toml`.
//!
//! Searches current directory then ancestors, falling back to
//! `~/.config/intcode/intcode.toml` if no project-level file is found.

use std::path::{Path, PathBuf};

use intcode_vm::Memory;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CliError;

pub const CONFIG_FILE: &str = "intcode.toml";

fn default_memory_size() -> usize {
    4096
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct IntcodeConfig {
    /// Words of memory to allocate before loading the program.
    #[serde(default = "default_memory_size")]
    pub memory_size: usize,
    /// Let memory grow past `memory_size` on writes.
    #[serde(default)]
    pub growable: bool,
    #[serde(default)]
    pub max_instructions: Option<u64>,
}

impl Default for IntcodeConfig {
    fn default() -> Self {
        Self {
            memory_size: default_memory_size(),
            growable: false,
            max_instructions: None,
        }
    }
}

impl IntcodeConfig {
    /// Load config from `intcode.toml`, searching current dir then parents.
    /// Returns `Default` when no file is found.
    pub fn load() -> Result<Self, CliError> {
        match Self::find() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: Self = toml::from_str(&content).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), ?cfg, "loaded config");
        Ok(cfg)
    }

    fn find() -> Option<PathBuf> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.exists() {
                return Some(candidate);
            }
            if !dir.pop() {
                break;
            }
        }
        let home = std::env::var("HOME").ok().map(PathBuf::from)?;
        let global = home.join(".config").join("intcode").join(CONFIG_FILE);
        global.exists().then_some(global)
    }

    /// Parse a TOML string directly.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Apply command-line overrides on top of file settings.
    pub fn with_overrides(
        mut self,
        memory_size: Option<usize>,
        growable: bool,
        max_instructions: Option<u64>,
    ) -> Self {
        if let Some(size) = memory_size {
            self.memory_size = size;
        }
        self.growable |= growable;
        if max_instructions.is_some() {
            self.max_instructions = max_instructions;
        }
        self
    }

    /// Fresh memory buffer as configured.
    pub fn memory(&self) -> Memory {
        let mut memory = Memory::with_len(self.memory_size);
        memory.set_growable(self.growable);
        memory
    }

    /// Template written by `intcode init`.
    pub fn default_template() -> &'static str {
        r#"# Intcode VM configuration

# Words of memory allocated before the program is loaded.
memory_size = 4096

# Let memory grow on writes past the end instead of failing.
growable = false

# Stop runaway programs after this many instructions.
# max_instructions = 10000000
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let cfg = IntcodeConfig::from_toml("").expect("empty toml is valid");
        assert_eq!(cfg, IntcodeConfig::default());
        assert_eq!(cfg.memory_size, 4096);
    }

    #[test]
    fn parse_all_keys() {
        let cfg = IntcodeConfig::from_toml(
            r#"
memory_size = 100
growable = true
max_instructions = 5000
"#,
        )
        .unwrap();
        assert_eq!(cfg.memory_size, 100);
        assert!(cfg.growable);
        assert_eq!(cfg.max_instructions, Some(5000));
    }

    #[test]
    fn broken_toml_is_an_error() {
        assert!(IntcodeConfig::from_toml("[broken").is_err());
        assert!(IntcodeConfig::from_toml("memory_size = \"big\"").is_err());
    }

    #[test]
    fn template_parses_to_default() {
        let cfg = IntcodeConfig::from_toml(IntcodeConfig::default_template()).unwrap();
        assert_eq!(cfg, IntcodeConfig::default());
    }

    #[test]
    fn overrides_win() {
        let cfg = IntcodeConfig::default().with_overrides(Some(64), true, Some(10));
        assert_eq!(cfg.memory_size, 64);
        assert!(cfg.growable);
        assert_eq!(cfg.max_instructions, Some(10));

        let kept = cfg.clone().with_overrides(None, false, None);
        assert_eq!(kept, cfg);
    }

    #[test]
    fn memory_matches_settings() {
        let cfg = IntcodeConfig::default().with_overrides(Some(16), true, None);
        let memory = cfg.memory();
        assert_eq!(memory.len(), 16);
        assert!(memory.is_growable());
    }

    #[test]
    fn load_from_reports_path() {
        let dir = std::env::temp_dir().join(format!("intcode-cfg-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE);
        std::fs::write(&path, "memory_size = [").unwrap();
        let err = IntcodeConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("intcode.toml"), "{}", err);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
