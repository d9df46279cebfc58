//! Task form descriptors and draft validation.
//!
//! # Invariants
//! - Validation is driven by `task_form_fields()`; a field flagged `required`
//!   is rejected when blank, and `disable_past_dates` rejects days before today.
//! - Drafts reach the store only after validation passes.

use crate::model::task::{Task, TaskPatch};
use crate::store::task_store::TaskStore;
use chrono::{DateTime, Local, NaiveDate};
use mockable::Clock;
use std::fmt::{Display, Formatter};

pub const FIELD_TITLE: &str = "title";
pub const FIELD_DATE: &str = "date";
pub const FIELD_DESCRIPTION: &str = "description";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Textarea,
    DatePicker,
}

/// Declarative form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: Option<&'static str>,
    /// Date pickers only.
    pub disable_past_dates: bool,
}

pub fn task_form_fields() -> Vec<FormField> {
    vec![
        FormField {
            name: FIELD_TITLE,
            label: "Title",
            kind: FieldKind::Text,
            required: true,
            placeholder: Some("Enter a task title"),
            disable_past_dates: false,
        },
        FormField {
            name: FIELD_DATE,
            label: "Date",
            kind: FieldKind::DatePicker,
            required: true,
            placeholder: Some("Pick a date"),
            disable_past_dates: true,
        },
        FormField {
            name: FIELD_DESCRIPTION,
            label: "Description",
            kind: FieldKind::Textarea,
            required: true,
            placeholder: Some("Enter a task description"),
            disable_past_dates: false,
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Required { field: &'static str },
    PastDate { field: &'static str, day: NaiveDate },
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required { field } => write!(f, "{field} is required"),
            Self::PastDate { field, day } => write!(f, "{field} {day} is in the past"),
        }
    }
}

/// Unvalidated form input for creating or editing a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub date: Option<DateTime<Local>>,
}

impl TaskDraft {
    /// Prefills a draft from an existing task for editing.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            date: Some(task.date),
        }
    }

    /// Checks the draft against the task form descriptors.
    ///
    /// Returns every failing field, in form order.
    pub fn validate(&self, today: NaiveDate) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        for field in task_form_fields() {
            if field.required && self.is_blank(field.name) {
                errors.push(FieldError::Required { field: field.name });
                continue;
            }
            if field.disable_past_dates {
                if let Some(day) = self.date.map(|date| date.date_naive()) {
                    if day < today {
                        errors.push(FieldError::PastDate {
                            field: field.name,
                            day,
                        });
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validates, then adds the draft as a new task.
    pub fn submit<C: Clock>(
        self,
        store: &mut TaskStore<C>,
        today: NaiveDate,
    ) -> Result<Task, Vec<FieldError>> {
        let date = self.checked_date(today)?;
        Ok(store.add_task(self.title.trim(), self.description, date))
    }

    /// Validates, then overwrites title, description and date of task `id`.
    ///
    /// `Ok(None)` means the task no longer exists.
    pub fn submit_edit<C: Clock>(
        self,
        store: &mut TaskStore<C>,
        id: &str,
        today: NaiveDate,
    ) -> Result<Option<Task>, Vec<FieldError>> {
        let date = self.checked_date(today)?;
        let patch = TaskPatch::default()
            .title(self.title.trim())
            .description(self.description)
            .date(date);
        Ok(store.update_task(id, &patch))
    }

    fn checked_date(&self, today: NaiveDate) -> Result<DateTime<Local>, Vec<FieldError>> {
        self.validate(today)?;
        self.date
            .ok_or_else(|| vec![FieldError::Required { field: FIELD_DATE }])
    }

    fn is_blank(&self, name: &str) -> bool {
        match name {
            FIELD_TITLE => self.title.trim().is_empty(),
            FIELD_DESCRIPTION => self.description.trim().is_empty(),
            FIELD_DATE => self.date.is_none(),
            _ => false,
        }
    }
}
