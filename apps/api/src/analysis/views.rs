//! Presentation views for the score card, keyword tags and feedback list.

use serde::Serialize;

const MAX_MATCHING_SHOWN: usize = 20;
const MAX_MISSING_SHOWN: usize = 15;
/// Radius of the score ring in the front-end SVG.
const SCORE_RING_RADIUS: f64 = 56.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTone {
    Excellent,
    Good,
    NeedsWork,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreView {
    pub value: u32,
    pub label: &'static str,
    pub tone: ScoreTone,
    /// Tailwind text colour for the ring.
    pub color_class: &'static str,
    /// `stroke-dashoffset` that fills the ring to `value` percent.
    pub ring_dash_offset: f64,
}

impl ScoreView {
    pub fn new(score: u32) -> Self {
        let value = score.min(100);
        let (tone, label, color_class) = match value {
            80.. => (ScoreTone::Excellent, "Excellent! Ready to apply", "text-green-500"),
            60..=79 => (ScoreTone::Good, "Good, minor improvements needed", "text-yellow-500"),
            _ => (ScoreTone::NeedsWork, "Needs significant work", "text-red-500"),
        };
        let circumference = 2.0 * std::f64::consts::PI * SCORE_RING_RADIUS;
        ScoreView {
            value,
            label,
            tone,
            color_class,
            ring_dash_offset: circumference - (value as f64 / 100.0) * circumference,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordsView {
    pub match_percent: u32,
    pub matching: Vec<String>,
    pub missing: Vec<String>,
    /// Length of the full missing list, not the truncated one.
    pub missing_count: usize,
    pub matching_empty_message: Option<&'static str>,
    pub missing_empty_message: Option<&'static str>,
}

impl KeywordsView {
    pub fn new(match_percent: u32, matching: &[String], missing: &[String]) -> Self {
        KeywordsView {
            match_percent: match_percent.min(100),
            matching: matching.iter().take(MAX_MATCHING_SHOWN).cloned().collect(),
            missing: missing.iter().take(MAX_MISSING_SHOWN).cloned().collect(),
            missing_count: missing.len(),
            matching_empty_message: matching
                .is_empty()
                .then_some("No matching keywords found"),
            missing_empty_message: missing
                .is_empty()
                .then_some("Great! All important keywords present"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackLevel {
    Success,
    Warning,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackItem {
    pub text: String,
    pub level: FeedbackLevel,
}

impl FeedbackItem {
    pub fn classify(text: &str) -> Self {
        // checked in this order; an item can carry more than one glyph
        let level = if text.contains('✅') {
            FeedbackLevel::Success
        } else if text.contains('⚠') {
            FeedbackLevel::Warning
        } else if text.contains('❌') {
            FeedbackLevel::Error
        } else {
            FeedbackLevel::Info
        };
        FeedbackItem {
            text: text.to_string(),
            level,
        }
    }
}

pub fn feedback_view(items: &[String]) -> Vec<FeedbackItem> {
    items.iter().map(|item| FeedbackItem::classify(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreView::new(80).tone, ScoreTone::Excellent);
        assert_eq!(ScoreView::new(79).tone, ScoreTone::Good);
        assert_eq!(ScoreView::new(60).tone, ScoreTone::Good);
        assert_eq!(ScoreView::new(59).tone, ScoreTone::NeedsWork);
        assert_eq!(ScoreView::new(0).label, "Needs significant work");
    }

    #[test]
    fn test_score_clamped_and_ring_offset() {
        let full = ScoreView::new(140);
        assert_eq!(full.value, 100);
        assert!(full.ring_dash_offset.abs() < 1e-9);

        let empty = ScoreView::new(0);
        let circumference = 2.0 * std::f64::consts::PI * 56.0;
        assert!((empty.ring_dash_offset - circumference).abs() < 1e-9);

        let half = ScoreView::new(50);
        assert!((half.ring_dash_offset - circumference / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_keywords_truncated_but_count_full() {
        let matching: Vec<String> = (0..30).map(|i| format!("kw{i}")).collect();
        let missing: Vec<String> = (0..18).map(|i| format!("gap{i}")).collect();
        let view = KeywordsView::new(55, &matching, &missing);
        assert_eq!(view.matching.len(), 20);
        assert_eq!(view.missing.len(), 15);
        assert_eq!(view.missing_count, 18);
        assert_eq!(view.matching[0], "kw0");
        assert!(view.matching_empty_message.is_none());
    }

    #[test]
    fn test_keywords_empty_messages() {
        let view = KeywordsView::new(0, &[], &[]);
        assert_eq!(view.matching_empty_message, Some("No matching keywords found"));
        assert_eq!(
            view.missing_empty_message,
            Some("Great! All important keywords present")
        );
    }

    #[test]
    fn test_feedback_levels() {
        let items = feedback_view(&strings(&[
            "✅ Contact info present",
            "⚠️ Summary is long",
            "❌ No skills section",
            "Consider a portfolio link",
            "✅ Dates ok ❌ but no GPA",
        ]));
        let levels: Vec<FeedbackLevel> = items.iter().map(|i| i.level).collect();
        assert_eq!(
            levels,
            [
                FeedbackLevel::Success,
                FeedbackLevel::Warning,
                FeedbackLevel::Error,
                FeedbackLevel::Info,
                FeedbackLevel::Success,
            ]
        );
    }
}
