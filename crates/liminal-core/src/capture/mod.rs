//! Quick capture: one line of free text in, a task-creation payload out.
//!
//! Inline tokens, matched case-insensitively and stripped from the title in
//! this order:
//!
//! 1. `!high` / `!medium` / `!low` - priority shorthand (90 / 60 / 30)
//! 2. `p:<int>` - numeric priority, overrides the shorthand
//! 3. `30m`, `e:1.5h`, `90min`... - estimated duration in minutes
//! 4. `v:<int>` - value score
//!
//! Numeric scores are clamped onto 1-100. Nothing here can fail: text
//! without tokens simply gets the defaults.

pub mod intent;

use regex::Regex;
use std::sync::LazyLock;

use crate::task::{clamp_score, PriorityLabel, TaskCreate, TaskStatus, NEUTRAL_SCORE};

pub use intent::{classify_intent, interpret, CaptureIntent, CaptureOutcome, HELP_MESSAGE};

static PRIORITY_SHORTHAND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)!(high|medium|low)").expect("valid regex"));

static PRIORITY_NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)p:([0-9]+)").expect("valid regex"));

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:e:)?([0-9]+\.?[0-9]*)(m|h|min|mins|hour|hours)\b").expect("valid regex")
});

static VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)v:([0-9]+)").expect("valid regex"));

/// Parse a quick-capture line into a creation payload.
///
/// The returned title is whatever text is left once every matched token is
/// removed; it may be empty and callers decide whether to reject that.
pub fn parse(input: &str) -> TaskCreate {
    let mut title = input.trim().to_string();
    let mut priority_score = NEUTRAL_SCORE;
    let mut priority = PriorityLabel::Medium;
    let mut value_score = NEUTRAL_SCORE;
    let mut estimated_duration = None;

    if let Some(caps) = PRIORITY_SHORTHAND_RE.captures(&title) {
        // The regex only admits the three label spellings.
        let label = caps[1].parse::<PriorityLabel>().unwrap_or_default();
        priority_score = label.shorthand_score();
        priority = label;
        title = strip_first(&PRIORITY_SHORTHAND_RE, &title);
    }

    if let Some(caps) = PRIORITY_NUMERIC_RE.captures(&title) {
        priority_score = clamp_score(parse_integer(&caps[1]));
        priority = PriorityLabel::from_score(priority_score);
        title = strip_first(&PRIORITY_NUMERIC_RE, &title);
    }

    if let Some(caps) = DURATION_RE.captures(&title) {
        let amount = caps[1].parse::<f64>().unwrap_or(0.0);
        let unit = caps[2].to_ascii_lowercase();
        estimated_duration = Some(to_minutes(amount, &unit));
        title = strip_first(&DURATION_RE, &title);
    }

    if let Some(caps) = VALUE_RE.captures(&title) {
        value_score = clamp_score(parse_integer(&caps[1]));
        title = strip_first(&VALUE_RE, &title);
    }

    tracing::debug!(
        %priority,
        priority_score,
        value_score,
        ?estimated_duration,
        "parsed quick capture"
    );

    TaskCreate {
        title,
        priority: Some(priority),
        priority_score: Some(priority_score),
        status: Some(TaskStatus::Backlog),
        estimated_duration,
        effort_score: estimated_duration,
        value_score: Some(value_score),
        ..TaskCreate::default()
    }
}

fn strip_first(re: &Regex, text: &str) -> String {
    re.replace(text, "").trim().to_string()
}

/// Digits-only input; the only failure mode is overflow, which saturates.
fn parse_integer(digits: &str) -> i64 {
    digits.parse::<i64>().unwrap_or(i64::MAX)
}

fn to_minutes(amount: f64, unit: &str) -> u32 {
    let minutes = if unit.starts_with('h') {
        amount * 60.0
    } else {
        amount
    };
    // `as` saturates, so absurd durations pin to u32::MAX instead of wrapping.
    minutes.round() as u32
}
