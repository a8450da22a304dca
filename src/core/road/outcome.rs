use serde::{Deserialize, Serialize};
use std::fmt;

/// 单局结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Banker,
    Player,
    Tie,
}

impl Outcome {
    pub fn glyph(self) -> &'static str {
        match self {
            Outcome::Banker => "🔴",
            Outcome::Player => "🔵",
            Outcome::Tie => "🟢",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Banker => "Banker",
            Outcome::Player => "Player",
            Outcome::Tie => "Tie",
        }
    }

    /// 庄闲互换，和局没有对边
    pub fn opposite(self) -> Option<Outcome> {
        match self {
            Outcome::Banker => Some(Outcome::Player),
            Outcome::Player => Some(Outcome::Banker),
            Outcome::Tie => None,
        }
    }

    pub fn is_side(self) -> bool {
        !matches!(self, Outcome::Tie)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 原始标记的分类，未识别的标记只用于原样展示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Known(Outcome),
    Unknown,
}

impl Marker {
    pub const UNKNOWN_GLYPH: &'static str = "❔";

    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Marker::Known(outcome) => Some(outcome),
            Marker::Unknown => None,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Marker::Known(outcome) => outcome.glyph(),
            Marker::Unknown => Self::UNKNOWN_GLYPH,
        }
    }
}
