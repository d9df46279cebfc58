//! CLI smoke entry point.
//!
//! # Responsibility
//! - Wire config, logging, storage and the task store end to end.
//! - Print a deterministic summary of the persisted task list.

use planner_core::view::table::TableColumn;
use planner_core::view::task_table::task_table_columns;
use planner_core::{core_version, init_logging, PlannerConfig, Task};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match PlannerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("planner: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(config.log_level, log_dir) {
            eprintln!("planner: {err}");
        }
    }

    println!("planner_core version={}", core_version());
    println!("storage_key={}", config.storage_key);

    let mut store = config.task_store();
    let total = store.all_tasks().len();
    let completed = store.completed_tasks().len();
    let today = store.today_tasks().len();
    println!(
        "tasks total={total} completed={completed} pending={} today={today}",
        total - completed
    );

    let columns = task_table_columns();
    println!("{}", header_line(&columns));
    for task in store.all_tasks() {
        println!("{}", row_line(&columns, task));
    }

    ExitCode::SUCCESS
}

fn header_line(columns: &[TableColumn<Task>]) -> String {
    columns
        .iter()
        .map(|column| column.title)
        .collect::<Vec<_>>()
        .join(" | ")
}

fn row_line(columns: &[TableColumn<Task>], task: &Task) -> String {
    columns
        .iter()
        .map(|column| column.render(task))
        .collect::<Vec<_>>()
        .join(" | ")
}
