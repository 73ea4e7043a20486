//! Priority-action extraction.
//!
//! Looks for a `TOP <N> PRIORITY ACTIONS` section first and falls back to
//! `AREAS FOR IMPROVEMENT`. Works on the raw report text, independently of
//! [`crate::report::render`]; the HTML layer escapes whatever it extracts.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::report::sanitize::normalize_line_endings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    /// From the priority-actions section: do these first.
    Actionable,
    /// From the areas-for-improvement fallback.
    Advisory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriorityAction {
    pub title: Option<String>,
    pub explanation: String,
    pub category: ActionCategory,
}

/// Which section the actions came from. `NotFound` tells the caller to show
/// the generic "see the detailed analysis" pointer instead of cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionSection {
    TopPriority,
    AreasForImprovement,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedActions {
    pub section: ActionSection,
    pub actions: Vec<PriorityAction>,
}

impl ExtractedActions {
    pub fn not_found() -> Self {
        ExtractedActions {
            section: ActionSection::NotFound,
            actions: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(#{1,6})\s+(.*)$").unwrap())
}

fn top_priority_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bTOP\s+\d+\s+PRIORITY\s+ACTIONS\b").unwrap())
}

fn areas_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bAREAS\s+FOR\s+IMPROVEMENT\b").unwrap())
}

/// `1. **Title** - explanation`
fn bold_title_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.\s*\*\*(.+?)\*\*\s*-\s*(.+)$").unwrap())
}

/// `1. Title: explanation`
fn colon_title_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.\s*([^:]+):\s*(.+)$").unwrap())
}

/// `1. explanation`
fn numbered_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.\s+(.+)$").unwrap())
}

/// Extracts the recommended actions from a raw analysis report.
pub fn extract_priority_actions(text: &str) -> ExtractedActions {
    let text = normalize_line_endings(text);
    let lines: Vec<&str> = text.lines().map(str::trim).collect();

    if let Some(section) = section_lines(&lines, top_priority_re()) {
        let actions: Vec<PriorityAction> = section.iter().filter_map(|l| parse_priority_line(l)).collect();
        if !actions.is_empty() {
            debug!("Extracted {} priority actions", actions.len());
            return ExtractedActions {
                section: ActionSection::TopPriority,
                actions,
            };
        }
        debug!("Priority actions section has no numbered lines; trying fallback");
    }

    if let Some(section) = section_lines(&lines, areas_re()) {
        let actions: Vec<PriorityAction> = section
            .iter()
            .filter_map(|line| {
                let caps = numbered_re().captures(line)?;
                Some(PriorityAction {
                    title: None,
                    explanation: caps[1].trim().to_string(),
                    category: ActionCategory::Advisory,
                })
            })
            .collect();
        if !actions.is_empty() {
            debug!("Extracted {} improvement areas (fallback)", actions.len());
            return ExtractedActions {
                section: ActionSection::AreasForImprovement,
                actions,
            };
        }
    }

    debug!("No structured recommendations section found");
    ExtractedActions::not_found()
}

/// Lines between the first heading whose text matches `title` and the next
/// heading of the same or a higher level.
fn section_lines<'a>(lines: &'a [&'a str], title: &Regex) -> Option<&'a [&'a str]> {
    let (start, level) = lines.iter().enumerate().find_map(|(i, line)| {
        let caps = heading_re().captures(line)?;
        title.is_match(&caps[2]).then(|| (i, caps[1].len()))
    })?;

    let body = &lines[start + 1..];
    let end = body
        .iter()
        .position(|line| {
            heading_re()
                .captures(line)
                .is_some_and(|caps| caps[1].len() <= level)
        })
        .unwrap_or(body.len());
    Some(&body[..end])
}

fn parse_priority_line(line: &str) -> Option<PriorityAction> {
    let titled = |title: &str, explanation: &str| PriorityAction {
        title: Some(title.trim().to_string()),
        explanation: explanation.trim().to_string(),
        category: ActionCategory::Actionable,
    };

    if let Some(caps) = bold_title_re().captures(line) {
        return Some(titled(&caps[1], &caps[2]));
    }
    if let Some(caps) = colon_title_re().captures(line) {
        return Some(titled(&caps[1], &caps[2]));
    }
    let caps = numbered_re().captures(line)?;
    Some(PriorityAction {
        title: None,
        explanation: caps[1].trim().to_string(),
        category: ActionCategory::Actionable,
    })
}
