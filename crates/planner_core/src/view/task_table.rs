//! Task table descriptors and row intent routing.

use super::table::{CellValue, ColumnAlign, TableAction, TableColumn};
use crate::model::task::{Task, TaskId};
use crate::store::task_store::TaskStore;
use mockable::Clock;

/// Display form for task dates, day first.
pub const TASK_DATE_FORMAT: &str = "%d.%m.%Y";

/// Intent produced by a task row action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskRowAction {
    ToggleCompletion(TaskId),
    /// Host opens the edit form for this task.
    Edit(Task),
    /// Host confirms, then calls `TaskStore::delete_task`.
    Delete(Task),
}

/// Result of routing a row intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowActionOutcome {
    /// Toggle applied; carries the task as now stored.
    Toggled(Task),
    /// Row no longer exists in the store.
    NotFound(TaskId),
    /// Intent the host has to handle itself.
    Host(TaskRowAction),
}

pub fn task_table_columns() -> Vec<TableColumn<Task>> {
    vec![
        TableColumn {
            key: "title",
            title: "Title",
            sortable: true,
            width: Some(250),
            align: None,
            value: |task| CellValue::Text(task.title.clone()),
            formatter: None,
        },
        TableColumn {
            key: "description",
            title: "Description",
            sortable: false,
            width: Some(300),
            align: None,
            value: |task| CellValue::Text(task.description.clone()),
            formatter: None,
        },
        TableColumn {
            key: "date",
            title: "Date",
            sortable: true,
            width: Some(120),
            align: Some(ColumnAlign::Center),
            value: |task| CellValue::Date(task.date),
            formatter: Some(format_date_cell),
        },
        TableColumn {
            key: "completed",
            title: "Status",
            sortable: true,
            width: Some(120),
            align: Some(ColumnAlign::Center),
            value: |task| CellValue::Flag(task.completed),
            formatter: Some(format_status_cell),
        },
        TableColumn {
            key: "createdAt",
            title: "Created",
            sortable: true,
            width: Some(140),
            align: Some(ColumnAlign::Center),
            value: |task| CellValue::Date(task.created_at),
            formatter: Some(format_date_cell),
        },
    ]
}

pub fn task_table_actions() -> Vec<TableAction<Task, TaskRowAction>> {
    vec![
        TableAction {
            icon: "mdi-check",
            color: Some("success"),
            tooltip: Some("Mark as done"),
            handler: |task| TaskRowAction::ToggleCompletion(task.id.clone()),
            show: Some(is_pending),
        },
        TableAction {
            icon: "mdi-undo",
            color: Some("warning"),
            tooltip: Some("Mark as pending"),
            handler: |task| TaskRowAction::ToggleCompletion(task.id.clone()),
            show: Some(is_completed),
        },
        TableAction {
            icon: "mdi-pencil",
            color: Some("primary"),
            tooltip: Some("Edit"),
            handler: |task| TaskRowAction::Edit(task.clone()),
            show: None,
        },
        TableAction {
            icon: "mdi-delete",
            color: Some("error"),
            tooltip: Some("Delete"),
            handler: |task| TaskRowAction::Delete(task.clone()),
            show: None,
        },
    ]
}

/// Applies store-level intents and hands host-level ones back.
///
/// Toggles go through `TaskStore::toggle_task_completion`; edit and delete
/// intents are returned unchanged for the host to handle.
pub fn apply_row_action<C: Clock>(
    store: &mut TaskStore<C>,
    action: TaskRowAction,
) -> RowActionOutcome {
    match action {
        TaskRowAction::ToggleCompletion(id) => match store.toggle_task_completion(&id) {
            Some(task) => RowActionOutcome::Toggled(task),
            None => RowActionOutcome::NotFound(id),
        },
        host_action => RowActionOutcome::Host(host_action),
    }
}

fn is_pending(task: &Task) -> bool {
    !task.completed
}

fn is_completed(task: &Task) -> bool {
    task.completed
}

fn format_date_cell(value: &CellValue) -> String {
    match value {
        CellValue::Date(date) => date.format(TASK_DATE_FORMAT).to_string(),
        other => other.to_string(),
    }
}

fn format_status_cell(value: &CellValue) -> String {
    match value {
        CellValue::Flag(true) => "Done".to_string(),
        CellValue::Flag(false) => "Pending".to_string(),
        other => other.to_string(),
    }
}
