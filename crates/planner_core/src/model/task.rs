//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record persisted by the store.
//! - Own identifier derivation (`task_id`) and title slugging.
//! - Define partial-update semantics through `TaskPatch`.
//!
//! # Invariants
//! - `id` and `created_at` never change after creation.
//! - `TaskPatch` cannot carry `id` or `created_at`, so updates cannot touch them.
//! - Wire shape uses camelCase keys and RFC 3339 dates.

use chrono::{DateTime, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum number of characters kept from a title slug.
pub const TITLE_SLUG_MAX_CHARS: usize = 20;

static SLUG_STRIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s]").expect("valid slug strip regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Stable task identifier, `YYYY-MM-DD-<slug>-<stamp>`.
pub type TaskId = String;

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Derived once from day, title slug and creation stamp.
    pub id: TaskId,
    pub title: String,
    /// May be empty.
    pub description: String,
    /// Scheduled date. Only the calendar day matters for views.
    pub date: DateTime<Local>,
    pub completed: bool,
    /// Assigned once at creation.
    pub created_at: DateTime<Local>,
}

impl Task {
    /// Builds a fresh, not-yet-completed task.
    ///
    /// # Invariants
    /// - `completed` starts as `false`.
    /// - `id` is derived from `title`, `date` and `stamp_ms`.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        date: DateTime<Local>,
        created_at: DateTime<Local>,
        stamp_ms: i64,
    ) -> Self {
        let title = title.into();
        Self {
            id: task_id(&title, &date, stamp_ms),
            title,
            description: description.into(),
            date,
            completed: false,
            created_at,
        }
    }

    /// Local calendar day the task is scheduled for.
    pub fn scheduled_day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    /// Returns whether the task is scheduled on `day`.
    pub fn is_scheduled_on(&self, day: NaiveDate) -> bool {
        self.scheduled_day() == day
    }

    /// Overwrites every field present in `patch`.
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}

/// Partial update for an existing task.
///
/// Unknown JSON keys (including `id` and `createdAt`) are ignored on decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Local>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn date(mut self, date: DateTime<Local>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Returns whether the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.completed.is_none()
    }
}

/// Derives a task id from its scheduled day, title slug and a uniqueness stamp.
///
/// An empty slug is accepted and yields `YYYY-MM-DD--<stamp>`.
pub fn task_id(title: &str, date: &DateTime<Local>, stamp_ms: i64) -> TaskId {
    format!(
        "{}-{}-{}",
        date.format("%Y-%m-%d"),
        title_slug(title),
        stamp_ms
    )
}

/// Lower-cases `title`, drops everything but ASCII letters, digits and
/// whitespace, joins words with `-` and truncates the result.
pub fn title_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = SLUG_STRIP_RE.replace_all(&lowered, "");
    WHITESPACE_RE
        .replace_all(stripped.trim(), "-")
        .chars()
        .take(TITLE_SLUG_MAX_CHARS)
        .collect()
}
