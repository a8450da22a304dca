use serde::Deserialize;

use super::outcome::{Marker, Outcome};

/// 分析窗口 - 只看最近 10 局
pub const HISTORY_WINDOW: usize = 10;

/// 标记识别规则：标识中包含对应子串即命中，按庄、闲、和的顺序匹配，先命中先得
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarkerRules {
    pub banker: String,
    pub player: String,
    pub tie: String,
}

impl Default for MarkerRules {
    fn default() -> Self {
        Self {
            banker: "banker".to_string(),
            player: "player".to_string(),
            tie: "tie".to_string(),
        }
    }
}

impl MarkerRules {
    pub fn classify(&self, identifier: &str) -> Marker {
        let identifier = identifier.to_ascii_lowercase();
        let rules = [
            (&self.banker, Outcome::Banker),
            (&self.player, Outcome::Player),
            (&self.tie, Outcome::Tie),
        ];

        rules
            .iter()
            .find(|(needle, _)| {
                !needle.is_empty() && identifier.contains(needle.to_ascii_lowercase().as_str())
            })
            .map(|(_, outcome)| Marker::Known(*outcome))
            .unwrap_or(Marker::Unknown)
    }
}

/// 结果提取器 - 标记标识列表 → 最近 N 局结果（旧的在前）
#[derive(Debug, Clone)]
pub struct OutcomeExtractor {
    rules: MarkerRules,
    window: usize,
}

impl OutcomeExtractor {
    pub fn new() -> Self {
        Self::with_rules(MarkerRules::default())
    }

    pub fn with_rules(rules: MarkerRules) -> Self {
        Self {
            rules,
            window: HISTORY_WINDOW,
        }
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn rules(&self) -> &MarkerRules {
        &self.rules
    }

    /// 未识别的标记先丢弃，再截取最后 N 个
    pub fn extract<S: AsRef<str>>(&self, markers: &[S]) -> Vec<Outcome> {
        let outcomes: Vec<Outcome> = markers
            .iter()
            .filter_map(|m| self.rules.classify(m.as_ref()).outcome())
            .collect();

        let skip = outcomes.len().saturating_sub(self.window);
        outcomes[skip..].to_vec()
    }

    /// 原样展示最后 N 个标记，未识别的用占位符，仅用于诊断
    pub fn render_raw<S: AsRef<str>>(&self, markers: &[S]) -> String {
        let skip = markers.len().saturating_sub(self.window);
        markers[skip..]
            .iter()
            .map(|m| self.rules.classify(m.as_ref()).glyph())
            .collect()
    }
}

impl Default for OutcomeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Outcome::{Banker as B, Player as P, Tie as T};

    #[test]
    fn test_classify_first_matching_rule_wins() {
        let rules = MarkerRules::default();
        assert_eq!(rules.classify("road-item banker"), Marker::Known(B));
        assert_eq!(rules.classify("/img/PLAYER.png"), Marker::Known(P));
        assert_eq!(rules.classify("bead tie"), Marker::Known(T));
        // 同时包含时庄优先
        assert_eq!(rules.classify("banker-player-pair"), Marker::Known(B));
        assert_eq!(rules.classify("road-item empty"), Marker::Unknown);
    }

    #[test]
    fn test_extract_keeps_document_order() {
        let extractor = OutcomeExtractor::new();
        let markers = ["banker", "player", "tie", "player"];
        assert_eq!(extractor.extract(&markers), vec![B, P, T, P]);
    }

    #[test]
    fn test_extract_caps_to_last_ten() {
        let extractor = OutcomeExtractor::new();
        let mut markers = vec!["tie"; 3];
        markers.extend(vec!["banker"; 5]);
        markers.extend(vec!["player"; 5]);

        let outcomes = extractor.extract(&markers);
        assert_eq!(outcomes.len(), 10);
        assert_eq!(outcomes[..5], [B; 5]);
        assert_eq!(outcomes[5..], [P; 5]);
    }

    #[test]
    fn test_unknown_markers_dropped_before_cap() {
        let extractor = OutcomeExtractor::new();
        let mut markers = vec!["banker"; 10];
        markers.push("player");
        markers.extend(vec!["spacer"; 5]);

        let outcomes = extractor.extract(&markers);
        assert_eq!(outcomes.len(), 10);
        assert_eq!(*outcomes.last().unwrap(), P);
        assert_eq!(outcomes[..9], [B; 9]);
    }

    #[test]
    fn test_extract_empty() {
        let extractor = OutcomeExtractor::new();
        let markers: Vec<String> = Vec::new();
        assert!(extractor.extract(&markers).is_empty());
    }

    #[test]
    fn test_render_raw_uses_placeholder() {
        let extractor = OutcomeExtractor::new();
        let markers = ["banker", "spacer", "player", "tie"];
        assert_eq!(extractor.render_raw(&markers), "🔴❔🔵🟢");
    }

    #[test]
    fn test_custom_rules() {
        let rules = MarkerRules {
            banker: "red".to_string(),
            player: "blue".to_string(),
            tie: "green".to_string(),
        };
        let extractor = OutcomeExtractor::with_rules(rules).with_window(3);
        let markers = ["dot red", "dot blue", "dot green", "dot RED"];
        assert_eq!(extractor.extract(&markers), vec![P, T, B]);
    }
}
