//! Where level documents come from
//!
//! Levels are numbered from 1. A source only hands back raw text; parsing
//! and validation happen in [`super::load`].

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use super::error::LevelError;

/// Abstract level source
pub trait LevelSource {
    /// Raw level document for `number`, or `LevelError::NotFound`
    fn fetch(&self, number: u32) -> Result<String, LevelError>;

    /// Short description for log output
    fn describe(&self) -> String;
}

/// Levels stored as `level{N}.json` in a directory
#[derive(Debug, Clone)]
pub struct DirLevelSource {
    root: PathBuf,
}

impl DirLevelSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, number: u32) -> PathBuf {
        self.root.join(format!("level{number}.json"))
    }
}

impl LevelSource for DirLevelSource {
    fn fetch(&self, number: u32) -> Result<String, LevelError> {
        let path = self.path_for(number);
        std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                LevelError::NotFound { level: number }
            } else {
                LevelError::Io { path, source }
            }
        })
    }

    fn describe(&self) -> String {
        format!("disk:{}", self.root.display())
    }
}

/// Levels compiled into the binary.
///
/// Adding a level means adding an entry here and a file under `levels/`.
const EMBEDDED_LEVELS: &[(u32, &str)] = &[
    (1, include_str!("../../levels/level1.json")),
    (2, include_str!("../../levels/level2.json")),
    (3, include_str!("../../levels/level3.json")),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedLevels;

impl EmbeddedLevels {
    pub fn count(&self) -> usize {
        EMBEDDED_LEVELS.len()
    }
}

impl LevelSource for EmbeddedLevels {
    fn fetch(&self, number: u32) -> Result<String, LevelError> {
        EMBEDDED_LEVELS
            .iter()
            .find(|(n, _)| *n == number)
            .map(|(_, text)| text.to_string())
            .ok_or(LevelError::NotFound { level: number })
    }

    fn describe(&self) -> String {
        format!("embedded ({} levels)", EMBEDDED_LEVELS.len())
    }
}

/// Levels held in memory (tools and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryLevels {
    levels: BTreeMap<u32, String>,
}

impl MemoryLevels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, number: u32, text: impl Into<String>) -> Self {
        self.insert(number, text);
        self
    }

    pub fn insert(&mut self, number: u32, text: impl Into<String>) {
        self.levels.insert(number, text.into());
    }
}

impl LevelSource for MemoryLevels {
    fn fetch(&self, number: u32) -> Result<String, LevelError> {
        self.levels
            .get(&number)
            .cloned()
            .ok_or(LevelError::NotFound { level: number })
    }

    fn describe(&self) -> String {
        format!("memory ({} levels)", self.levels.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{self, Layout};
    use crate::tuning::BrickTypeTable;

    #[test]
    fn test_embedded_levels_all_load() {
        let source = EmbeddedLevels;
        let types = BrickTypeTable::default();
        for number in 1..=source.count() as u32 {
            let loaded = level::load(&source, number, &types);
            assert!(loaded.is_ok(), "embedded level {number}: {:?}", loaded.err());
        }
        let missing = source.fetch(source.count() as u32 + 1).unwrap_err();
        assert!(missing.is_not_found());
    }

    #[test]
    fn test_embedded_level_two_is_auto_fitted() {
        let types = BrickTypeTable::default();
        let level = level::load(&EmbeddedLevels, 2, &types).unwrap();
        let Layout::Grid(grid) = &level.layout else {
            panic!("level 2 is a grid level");
        };
        assert!(grid.brick_width < 150.0);
    }

    #[test]
    fn test_dir_source_reads_and_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("level1.json"), r#"{"format": "grid"}"#).unwrap();

        let source = DirLevelSource::new(dir.path());
        assert_eq!(source.fetch(1).unwrap(), r#"{"format": "grid"}"#);
        assert!(matches!(source.fetch(2), Err(LevelError::NotFound { level: 2 })));
        assert!(source.describe().starts_with("disk:"));
    }

    #[test]
    fn test_memory_source() {
        let source = MemoryLevels::new().with_level(3, "{}");
        assert_eq!(source.fetch(3).unwrap(), "{}");
        assert!(source.fetch(1).unwrap_err().is_not_found());
    }
}
