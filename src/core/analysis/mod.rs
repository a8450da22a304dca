//! 序列分析 - 最近 10 局的频率、长龙 / 单跳识别和下一局建议

pub mod analyzer;
pub mod caption;
pub mod pattern;

pub use analyzer::{
    AnalysisResult, AnalyzerConfig, Frequency, Pattern, Recommendation, RenderedHistory,
    SequenceAnalyzer,
};
pub use caption::render_caption;
pub use pattern::{detect_dragon, is_ping_pong, DRAGON_THRESHOLD, PING_PONG_MIN_LEN};
