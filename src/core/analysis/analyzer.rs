use serde::{Deserialize, Serialize};

use super::pattern::{detect_dragon, is_ping_pong, sides_only, DRAGON_THRESHOLD, PING_PONG_MIN_LEN};
use crate::core::road::{Outcome, HISTORY_WINDOW};

/// 每行展示的局数
const ROW_WIDTH: usize = 5;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub window: usize,
    pub dragon_threshold: usize,
    pub ping_pong_min_len: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            window: HISTORY_WINDOW,
            dragon_threshold: DRAGON_THRESHOLD,
            ping_pong_min_len: PING_PONG_MIN_LEN,
        }
    }
}

/// 百分比，四舍五入到整数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Frequency {
    pub banker: u32,
    pub player: u32,
    pub tie: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedHistory {
    pub line1: String,
    pub line2: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Pattern {
    Dragon(Outcome),
    PingPong,
    #[default]
    None,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Recommendation {
    Banker,
    Player,
    #[default]
    None,
}

impl Recommendation {
    fn from_side(side: Outcome) -> Self {
        match side {
            Outcome::Banker => Recommendation::Banker,
            Outcome::Player => Recommendation::Player,
            // 和局不会进入庄闲序列
            Outcome::Tie => Recommendation::None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Recommendation::Banker => "Banker",
            Recommendation::Player => "Player",
            Recommendation::None => "-",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub frequency: Frequency,
    pub recent: RenderedHistory,
    pub pattern: Pattern,
    pub recommendation: Recommendation,
    pub analysed: usize,
}

impl AnalysisResult {
    /// 没有历史时的固定结果
    pub fn no_history() -> Self {
        Self::default()
    }

    pub fn has_history(&self) -> bool {
        self.analysed > 0
    }
}

/// 序列分析器 - 纯函数，无 I/O，无状态
#[derive(Debug, Clone, Default)]
pub struct SequenceAnalyzer {
    config: AnalyzerConfig,
}

impl SequenceAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn analyze(&self, outcomes: &[Outcome]) -> AnalysisResult {
        let skip = outcomes.len().saturating_sub(self.config.window);
        let outcomes = &outcomes[skip..];

        if outcomes.is_empty() {
            return AnalysisResult::no_history();
        }

        let frequency = Self::frequency(outcomes);
        let recent = Self::render(outcomes);

        let sides = sides_only(outcomes);
        let pattern = if let Some(side) = detect_dragon(&sides, self.config.dragon_threshold) {
            Pattern::Dragon(side)
        } else if is_ping_pong(&sides, self.config.ping_pong_min_len) {
            Pattern::PingPong
        } else {
            Pattern::None
        };

        let recommendation = match (pattern, sides.last()) {
            (Pattern::Dragon(side), _) => Recommendation::from_side(side),
            (Pattern::PingPong, Some(last)) => last
                .opposite()
                .map(Recommendation::from_side)
                .unwrap_or_default(),
            _ => Self::majority(outcomes),
        };

        AnalysisResult {
            frequency,
            recent,
            pattern,
            recommendation,
            analysed: outcomes.len(),
        }
    }

    fn frequency(outcomes: &[Outcome]) -> Frequency {
        let count = |target: Outcome| outcomes.iter().filter(|&&o| o == target).count();
        let len = outcomes.len();

        Frequency {
            banker: percent(count(Outcome::Banker), len),
            player: percent(count(Outcome::Player), len),
            tie: percent(count(Outcome::Tie), len),
        }
    }

    fn render(outcomes: &[Outcome]) -> RenderedHistory {
        let glyphs: Vec<&str> = outcomes.iter().map(|o| o.glyph()).collect();
        let split = glyphs.len().min(ROW_WIDTH);
        RenderedHistory {
            line1: glyphs[..split].concat(),
            line2: glyphs[split..].concat(),
        }
    }

    /// 庄闲数量相等时偏向庄
    fn majority(outcomes: &[Outcome]) -> Recommendation {
        let banker = outcomes.iter().filter(|&&o| o == Outcome::Banker).count();
        let player = outcomes.iter().filter(|&&o| o == Outcome::Player).count();
        if banker >= player {
            Recommendation::Banker
        } else {
            Recommendation::Player
        }
    }
}

/// round(100 * count / len)，0.5 向上取整
fn percent(count: usize, len: usize) -> u32 {
    if len == 0 {
        return 0;
    }
    ((200 * count + len) / (2 * len)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use Outcome::{Banker as B, Player as P, Tie as T};

    fn analyze(outcomes: &[Outcome]) -> AnalysisResult {
        SequenceAnalyzer::new().analyze(outcomes)
    }

    #[test]
    fn test_empty_history_is_fixed_result() {
        let result = analyze(&[]);
        assert_eq!(result, AnalysisResult::no_history());
        assert!(!result.has_history());
        assert_eq!(result.recommendation, Recommendation::None);
        assert_eq!(result.pattern, Pattern::None);
        assert!(result.recent.line1.is_empty());
    }

    #[test]
    fn test_frequency_rounding() {
        let result = analyze(&[B, B, P, T]);
        assert_eq!(
            result.frequency,
            Frequency {
                banker: 50,
                player: 25,
                tie: 25
            }
        );

        let result = analyze(&[B, P, P]);
        assert_eq!(result.frequency.banker, 33);
        assert_eq!(result.frequency.player, 67);

        // 1/8 = 12.5% → 13
        let result = analyze(&[T, B, B, B, P, P, P, P]);
        assert_eq!(result.frequency.tie, 13);
    }

    #[test]
    fn test_render_splits_into_two_lines() {
        let result = analyze(&[B, B, P, T, B, P, P]);
        assert_eq!(result.recent.line1, "🔴🔴🔵🟢🔴");
        assert_eq!(result.recent.line2, "🔵🔵");

        let short = analyze(&[B, T]);
        assert_eq!(short.recent.line1, "🔴🟢");
        assert!(short.recent.line2.is_empty());
    }

    #[test]
    fn test_dragon_recommends_streak_side() {
        let result = analyze(&[P, B, B, B, B]);
        assert_eq!(result.pattern, Pattern::Dragon(B));
        assert_eq!(result.recommendation, Recommendation::Banker);

        let result = analyze(&[B, P, T, P, P, P]);
        assert_eq!(result.pattern, Pattern::Dragon(P));
        assert_eq!(result.recommendation, Recommendation::Player);
    }

    #[test]
    fn test_ping_pong_recommends_opposite_of_last_side() {
        let result = analyze(&[B, P, B, P, B]);
        assert_eq!(result.pattern, Pattern::PingPong);
        assert_eq!(result.recommendation, Recommendation::Player);

        // 末尾的和局不影响"最后一个庄闲"
        let result = analyze(&[P, B, P, B, T, P, B, T]);
        assert_eq!(result.pattern, Pattern::PingPong);
        assert_eq!(result.recommendation, Recommendation::Player);
    }

    #[test]
    fn test_dragon_takes_priority_over_ping_pong() {
        // 全庄同时满足长龙和周期 2 条件
        let result = analyze(&[B, B, B, B, B]);
        assert_eq!(result.pattern, Pattern::Dragon(B));
        assert_eq!(result.recommendation, Recommendation::Banker);
    }

    #[test]
    fn test_majority_tie_break_favours_banker() {
        let result = analyze(&[B, P, P, B]);
        assert_eq!(result.pattern, Pattern::None);
        assert_eq!(result.recommendation, Recommendation::Banker);

        let result = analyze(&[P, B, P, P, B, B, P]);
        assert_eq!(result.pattern, Pattern::None);
        assert_eq!(result.recommendation, Recommendation::Player);
    }

    #[test]
    fn test_all_ties_still_recommends_banker() {
        let result = analyze(&[T, T, T]);
        assert_eq!(result.frequency.tie, 100);
        assert_eq!(result.recommendation, Recommendation::Banker);
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let outcomes = [B, P, T, B, B, P, P, B, T, P];
        let analyzer = SequenceAnalyzer::new();
        assert_eq!(analyzer.analyze(&outcomes), analyzer.analyze(&outcomes));
    }

    #[test]
    fn test_long_input_uses_last_window() {
        let mut outcomes = vec![P; 6];
        outcomes.extend([B, P, B, P, B, P, B, P, B, P]);
        let result = analyze(&outcomes);
        assert_eq!(result.analysed, 10);
        assert_eq!(result.pattern, Pattern::PingPong);
        assert_eq!(result.recommendation, Recommendation::Banker);
    }
}
