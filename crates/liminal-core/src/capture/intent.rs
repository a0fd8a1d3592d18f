//! Routing for the quick-capture chat box.
//!
//! Decides whether a line of text is a new task, a request to edit an
//! existing one, a theme to create, or just conversation.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::parse;
use crate::task::{TaskCreate, TaskStatus};

/// Reply for text that is not a capture request.
pub const HELP_MESSAGE: &str = "I capture tasks. Say \u{201c}create task <name> v:80 e:30 p:70 theme:XYZ\u{201d} to add one, or \u{201c}update task <id> \u{2026}\u{201d} to change an existing task.";

static UPDATE_HINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(update|change|edit)\s+(task|item|card)").expect("valid regex")
});

static NEW_HINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(add|create|new)\s+(task|item|card)").expect("valid regex")
});

static TOKEN_HINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(v:[0-9]+|e:[0-9]+|p:[0-9]+|!high|!medium|!low|theme:)").expect("valid regex")
});

static THEME_CREATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:new|create) theme (.+)").expect("valid regex"));

static THEME_HINT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)theme\s*:\s*([^,]+)").expect("valid regex"));

static PRIORITIZE_HINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)prioriti[sz]e|do now|today|queue|start|focus").expect("valid regex")
});

/// Coarse intent of a chat line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CaptureIntent {
    New,
    Update,
    General,
}

/// Classify a chat line. Edit phrasing beats creation phrasing.
pub fn classify_intent(text: &str) -> CaptureIntent {
    if UPDATE_HINT_RE.is_match(text) {
        return CaptureIntent::Update;
    }
    if NEW_HINT_RE.is_match(text) || TOKEN_HINT_RE.is_match(text) {
        return CaptureIntent::New;
    }
    CaptureIntent::General
}

/// What the capture box should do with a line of text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CaptureOutcome {
    /// Not a capture request; reply with usage help.
    Help { message: String },
    /// Ask the user to confirm a new theme.
    CreateTheme { name: String },
    /// Switch to editing an existing task.
    Update,
    /// A task draft ready for review.
    NewTask {
        task: TaskCreate,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        theme_name: Option<String>,
    },
}

/// Route a chat line and, for new tasks, build the draft.
pub fn interpret(text: &str) -> CaptureOutcome {
    let text = text.trim();

    let intent = classify_intent(text);
    if intent == CaptureIntent::General {
        return CaptureOutcome::Help {
            message: HELP_MESSAGE.to_string(),
        };
    }
    if let Some(name) = theme_to_create(text) {
        return CaptureOutcome::CreateTheme { name };
    }
    if intent == CaptureIntent::Update {
        return CaptureOutcome::Update;
    }

    let mut task = parse(text);
    if task.title.is_empty() {
        task.title = text.to_string();
    }
    if PRIORITIZE_HINT_RE.is_match(text) {
        task.status = Some(TaskStatus::InProgress);
    }

    let theme_name = THEME_HINT_RE
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|name| !name.is_empty());

    CaptureOutcome::NewTask { task, theme_name }
}

fn theme_to_create(text: &str) -> Option<String> {
    THEME_CREATE_RE
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|name| !name.is_empty())
}
