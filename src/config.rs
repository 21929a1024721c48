use crate::error::{EngineError, EngineResult};
use crate::validation::pieces::PieceKind;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Engine settings, read from a JSON file. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Layout name `start_game` seeds new games from.
    pub board_type: String,
    /// Optional JSON file of extra named layouts.
    pub layouts_file: Option<PathBuf>,
    /// Refuse moves of the side not on turn.
    pub enforce_turn_order: bool,
    /// What a pawn becomes when no promotion is requested.
    pub promotion_kind: PieceKind,
    /// `env_logger` filter used when `BOARD_ENGINE_LOG` is unset.
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_type: "standard".into(),
            layouts_file: None,
            enforce_turn_order: true,
            promotion_kind: PieceKind::Queen,
            log_level: "info".into(),
        }
    }
}

impl EngineConfig {
    /// Loads `path` if it exists, otherwise returns the defaults.
    pub fn load(path: Option<&PathBuf>) -> EngineResult<Self> {
        let cfg: EngineConfig = match path {
            Some(p) if p.exists() => {
                let content: String = fs::read_to_string(p)?;
                Self::from_json(&content)?
            }
            _ => Self::default(),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json(json: &str) -> EngineResult<Self> {
        let cfg: EngineConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// The logging filter to fall back on, `info` when left blank.
    pub fn log_filter(&self) -> &str {
        match self.log_level.trim() {
            "" => "info",
            level => level,
        }
    }

    pub(crate) fn validate(&self) -> EngineResult<()> {
        if !PieceKind::PROMOTIONS.contains(&self.promotion_kind) {
            return Err(EngineError::Config(format!(
                "pawns cannot be promoted to {}",
                self.promotion_kind
            )));
        }
        if self.board_type.trim().is_empty() {
            return Err(EngineError::Config("board_type must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_keys() {
        let cfg = EngineConfig::from_json(r#"{"board_type": "empty"}"#).unwrap();
        assert_eq!(cfg.board_type, "empty");
        assert!(cfg.enforce_turn_order);
        assert_eq!(cfg.promotion_kind, PieceKind::Queen);
    }

    #[test]
    fn test_rejects_bad_promotion() {
        assert!(EngineConfig::from_json(r#"{"promotion_kind": "King"}"#).is_err());
        assert!(EngineConfig::from_json(r#"{"promotion_kind": "Rook"}"#).is_ok());
        assert!(EngineConfig::from_json("{").is_err());
    }

    #[test]
    fn test_log_filter() {
        let cfg = EngineConfig::from_json(r#"{"log_level": "debug"}"#).unwrap();
        assert_eq!(cfg.log_filter(), "debug");
        let blank = EngineConfig {
            log_level: "  ".into(),
            ..EngineConfig::default()
        };
        assert_eq!(blank.log_filter(), "info");
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = PathBuf::from("/nonexistent/board_engine.json");
        assert_eq!(EngineConfig::load(Some(&path)).unwrap(), EngineConfig::default());
        assert_eq!(EngineConfig::load(None).unwrap(), EngineConfig::default());
    }
}
