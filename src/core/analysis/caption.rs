use super::analyzer::{AnalysisResult, Pattern};
use crate::core::road::Outcome;
use crate::core::room::RoomKey;

pub fn render_caption(key: &RoomKey, result: &AnalysisResult) -> String {
    let mut lines = vec![format!("🎰 {} | Room {}", key.camp, key.index)];

    if !result.has_history() {
        lines.push("📭 No history yet".to_string());
        return lines.join("\n");
    }

    let f = &result.frequency;
    lines.push(format!(
        "{} Banker {}% | {} Player {}% | {} Tie {}%",
        Outcome::Banker.glyph(),
        f.banker,
        Outcome::Player.glyph(),
        f.player,
        Outcome::Tie.glyph(),
        f.tie
    ));

    lines.push(result.recent.line1.clone());
    if !result.recent.line2.is_empty() {
        lines.push(result.recent.line2.clone());
    }

    match result.pattern {
        Pattern::Dragon(side) => lines.push(format!("🐉 Dragon {}", side)),
        Pattern::PingPong => lines.push("🏓 Ping-pong".to_string()),
        Pattern::None => {}
    }

    lines.push(format!("👉 Next: {}", result.recommendation.label()));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analysis::SequenceAnalyzer;
    use Outcome::{Banker as B, Player as P, Tie as T};

    #[test]
    fn test_caption_full_layout() {
        let key = RoomKey::new("wm", 2);
        let result = SequenceAnalyzer::new().analyze(&[P, B, B, B, B, T, P]);
        let caption = render_caption(&key, &result);

        let expected = [
            "🎰 wm | Room 2",
            "🔴 Banker 57% | 🔵 Player 29% | 🟢 Tie 14%",
            "🔵🔴🔴🔴🔴",
            "🟢🔵",
            "🐉 Dragon Banker",
            "👉 Next: Banker",
        ]
        .join("\n");
        assert_eq!(caption, expected);
    }

    #[test]
    fn test_caption_without_pattern_or_second_line() {
        let key = RoomKey::new("sexy", 1);
        let result = SequenceAnalyzer::new().analyze(&[B, P, T]);
        let caption = render_caption(&key, &result);

        assert!(!caption.contains("Dragon"));
        assert!(!caption.contains("Ping-pong"));
        assert_eq!(caption.lines().count(), 4);
        assert!(caption.ends_with("👉 Next: Banker"));
    }

    #[test]
    fn test_caption_ping_pong() {
        let key = RoomKey::new("sexy", 1);
        let result = SequenceAnalyzer::new().analyze(&[P, B, P, B, P]);
        let caption = render_caption(&key, &result);
        assert!(caption.contains("🏓 Ping-pong"));
        assert!(caption.ends_with("👉 Next: Banker"));
    }

    #[test]
    fn test_caption_no_history() {
        let key = RoomKey::new("wm", 5);
        let caption = render_caption(&key, &AnalysisResult::no_history());
        assert_eq!(caption, "🎰 wm | Room 5\n📭 No history yet");
    }
}
