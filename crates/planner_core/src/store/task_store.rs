//! Canonical task store.
//!
//! # Responsibility
//! - Lazily load the task list from the persistence adapter, once.
//! - Apply add/update/delete/toggle/clear mutations in memory.
//! - Write the full list back after every mutation.
//! - Recompute derived views on every call.
//!
//! # Invariants
//! - No view or mutation observes an unloaded collection.
//! - Ids are unique within the collection and never rewritten.
//! - `created_at` is assigned once by `add_task`.
//! - Not-found is reported through logs and a `None`/`false` sentinel.
//! - A persisted record that fails to decode is skipped; the rest still load.

use super::TASKS_STORAGE_KEY;
use crate::model::task::{task_id, Task, TaskPatch};
use crate::storage::PersistenceAdapter;
use chrono::{DateTime, Local, NaiveDate};
use log::{info, warn};
use mockable::{Clock, DefaultClock};
use serde_json::Value;
use std::collections::HashSet;

/// Owner of the task collection and its persisted copy.
pub struct TaskStore<C: Clock = DefaultClock> {
    adapter: PersistenceAdapter,
    storage_key: String,
    clock: C,
    /// `None` until the first view or mutation loads persisted state.
    tasks: Option<Vec<Task>>,
    last_stamp_ms: i64,
}

impl TaskStore<DefaultClock> {
    /// Creates a store on the wall clock and the default storage key.
    pub fn new(adapter: PersistenceAdapter) -> Self {
        Self::with_clock(adapter, DefaultClock)
    }
}

impl<C: Clock> TaskStore<C> {
    pub fn with_clock(adapter: PersistenceAdapter, clock: C) -> Self {
        Self {
            adapter,
            storage_key: TASKS_STORAGE_KEY.to_string(),
            clock,
            tasks: None,
            last_stamp_ms: i64::MIN,
        }
    }

    /// Overrides the key the task list is persisted under.
    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Returns whether persisted state has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.tasks.is_some()
    }

    /// Loads persisted state if that has not happened yet.
    pub fn init(&mut self) {
        self.tasks_mut();
    }

    /// Writes the full collection back to storage.
    ///
    /// Returns the adapter outcome; `false` means the write was attempted and
    /// lost, while the in-memory collection stays authoritative.
    pub fn save(&mut self) -> bool {
        self.init();
        self.persist()
    }

    /// Full collection in insertion order.
    pub fn all_tasks(&mut self) -> &[Task] {
        self.tasks_mut()
    }

    pub fn completed_tasks(&mut self) -> Vec<&Task> {
        self.filtered(|task| task.completed)
    }

    pub fn pending_tasks(&mut self) -> Vec<&Task> {
        self.filtered(|task| !task.completed)
    }

    /// Tasks scheduled on the clock's current local day.
    pub fn today_tasks(&mut self) -> Vec<&Task> {
        let today = self.clock.local().date_naive();
        self.tasks_for_date(today)
    }

    /// Tasks scheduled on `day`, compared at day granularity.
    pub fn tasks_for_date(&mut self, day: NaiveDate) -> Vec<&Task> {
        self.filtered(move |task| task.is_scheduled_on(day))
    }

    pub fn task_by_id(&mut self, id: &str) -> Option<&Task> {
        self.tasks_mut().iter().find(|task| task.id == id)
    }

    /// Creates, appends and persists a new pending task.
    pub fn add_task(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        date: DateTime<Local>,
    ) -> Task {
        let created_at = self.clock.local();
        let mut stamp_ms = created_at
            .timestamp_millis()
            .max(self.last_stamp_ms.saturating_add(1));
        let mut task = Task::new(title, description, date, created_at, stamp_ms);

        while self.tasks_mut().iter().any(|existing| existing.id == task.id) {
            stamp_ms += 1;
            task.id = task_id(&task.title, &task.date, stamp_ms);
        }
        self.last_stamp_ms = stamp_ms;

        self.tasks_mut().push(task.clone());
        let persisted = self.persist();
        info!(
            "event=task_add module=store status=ok task_id={} persisted={persisted}",
            task.id
        );
        task
    }

    /// Merges `patch` into the task with `id` and persists.
    ///
    /// Returns `None` without writing when no such task exists.
    pub fn update_task(&mut self, id: &str, patch: &TaskPatch) -> Option<Task> {
        let Some(task) = self.tasks_mut().iter_mut().find(|task| task.id == id) else {
            warn!("event=task_update module=store status=not_found task_id={id}");
            return None;
        };
        task.apply(patch);
        let updated = task.clone();

        let persisted = self.persist();
        info!("event=task_update module=store status=ok task_id={id} persisted={persisted}");
        Some(updated)
    }

    /// Removes the task with `id`, keeping the order of the rest.
    ///
    /// Writes back only when a task was removed.
    pub fn delete_task(&mut self, id: &str) -> bool {
        let tasks = self.tasks_mut();
        let Some(index) = tasks.iter().position(|task| task.id == id) else {
            warn!("event=task_delete module=store status=not_found task_id={id}");
            return false;
        };
        tasks.remove(index);

        let persisted = self.persist();
        info!("event=task_delete module=store status=ok task_id={id} persisted={persisted}");
        true
    }

    /// Flips `completed` through the update path.
    pub fn toggle_task_completion(&mut self, id: &str) -> Option<Task> {
        let Some(completed) = self.task_by_id(id).map(|task| task.completed) else {
            warn!("event=task_toggle module=store status=not_found task_id={id}");
            return None;
        };
        self.update_task(id, &TaskPatch::default().completed(!completed))
    }

    pub fn clear_all_tasks(&mut self) {
        let tasks = self.tasks_mut();
        let removed = tasks.len();
        tasks.clear();

        let persisted = self.persist();
        info!("event=task_clear module=store status=ok scope=all removed={removed} persisted={persisted}");
    }

    /// Drops completed tasks; pending ones keep their order.
    pub fn clear_completed_tasks(&mut self) {
        let tasks = self.tasks_mut();
        let before = tasks.len();
        tasks.retain(|task| !task.completed);
        let removed = before - tasks.len();

        let persisted = self.persist();
        info!("event=task_clear module=store status=ok scope=completed removed={removed} persisted={persisted}");
    }

    fn filtered(&mut self, keep: impl Fn(&Task) -> bool) -> Vec<&Task> {
        self.tasks_mut().iter().filter(|&task| keep(task)).collect()
    }

    fn tasks_mut(&mut self) -> &mut Vec<Task> {
        let Self {
            adapter,
            storage_key,
            tasks,
            ..
        } = self;
        tasks.get_or_insert_with(|| load_tasks(adapter, storage_key))
    }

    fn persist(&mut self) -> bool {
        let tasks = self.tasks.as_deref().unwrap_or_default();
        self.adapter.write(&self.storage_key, tasks)
    }
}

fn load_tasks(adapter: &PersistenceAdapter, storage_key: &str) -> Vec<Task> {
    let records: Vec<Value> = adapter.read(storage_key, Vec::new());
    let stored_count = records.len();

    let mut seen = HashSet::with_capacity(stored_count);
    let mut tasks = Vec::with_capacity(stored_count);
    let mut undecodable = 0_usize;
    for (index, record) in records.into_iter().enumerate() {
        let task = match serde_json::from_value::<Task>(record) {
            Ok(task) => task,
            Err(err) => {
                undecodable += 1;
                warn!(
                    "event=task_load module=store status=invalid_record key={storage_key} index={index} error={err}"
                );
                continue;
            }
        };
        if seen.insert(task.id.clone()) {
            tasks.push(task);
        }
    }

    let duplicates = stored_count - undecodable - tasks.len();
    if duplicates > 0 {
        warn!("event=task_load module=store status=duplicate_ids dropped={duplicates}");
    }
    info!(
        "event=task_load module=store status=ok key={storage_key} count={}",
        tasks.len()
    );
    tasks
}
