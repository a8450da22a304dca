//! 路单 - 从房间内容中提取最近的开奖结果
//!
//! 标记标识来自房间 HTML（class / src / alt），按子串识别庄、闲、和，
//! 未识别的标记不参与分析。

use thiserror::Error;

pub mod extractor;
pub mod outcome;
pub mod parser;

pub use extractor::{MarkerRules, OutcomeExtractor, HISTORY_WINDOW};
pub use outcome::{Marker, Outcome};
pub use parser::{markers_from_html, DEFAULT_MARKER_SELECTOR};

#[derive(Error, Debug)]
pub enum RoadError {
    #[error("invalid marker selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
}
