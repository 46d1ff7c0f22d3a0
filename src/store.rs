// File: src/store.rs
use crate::model::{Priority, Sort, Task};
use crate::storage::LocalStorage;
use anyhow::Result;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::path::Path;

/// The ordered collection of tasks behind one todo.txt file.
///
/// Ids count non-blank lines from 1 in file order, assigned on load and on
/// `add`; they stay fixed until the next load, even across `purge_deleted`
/// and `archive`.
#[derive(Debug, Clone, Default)]
pub struct TaskBag {
    tasks: Vec<Task>,
    next_id: usize,
}

impl TaskBag {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut bag = Self::new();
        for line in lines {
            let id = bag.allocate_id();
            bag.tasks.push(Task::new(id, line.as_ref()));
        }
        bag
    }

    pub fn load(path: &Path) -> Result<Self> {
        let lines = LocalStorage::load_lines(path)?;
        let bag = Self::from_lines(&lines);
        log::info!("Loaded {} tasks from {}", bag.len(), path.display());
        Ok(bag)
    }

    /// Writes every task that is not soft-deleted.
    pub fn save(&self, path: &Path, today: NaiveDate) -> Result<()> {
        LocalStorage::save(path, self.tasks.iter().filter(|t| !t.is_deleted()), today)
    }

    fn allocate_id(&mut self) -> usize {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: usize) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    fn get_mut(&mut self, id: usize) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or_else(|| anyhow::anyhow!("Task {} not found", id))
    }

    /// Appends a new task. `created` is stamped when the line has no date.
    pub fn add(&mut self, raw: &str, created: Option<NaiveDate>) -> &Task {
        let id = self.allocate_id();
        let task = match created {
            Some(date) => Task::with_default_date(id, raw, date),
            None => Task::new(id, raw),
        };
        log::debug!("Added task {}: '{}'", id, raw);
        self.tasks.push(task);
        &self.tasks[self.tasks.len() - 1]
    }

    pub fn update(&mut self, id: usize, raw: &str) -> Result<()> {
        self.get_mut(id)?.update(raw);
        log::debug!("Updated task {}", id);
        Ok(())
    }

    pub fn complete(&mut self, id: usize, date: NaiveDate) -> Result<()> {
        self.get_mut(id)?.mark_complete(date);
        Ok(())
    }

    pub fn uncomplete(&mut self, id: usize) -> Result<()> {
        self.get_mut(id)?.mark_incomplete();
        Ok(())
    }

    pub fn set_priority(&mut self, id: usize, priority: Priority) -> Result<()> {
        self.get_mut(id)?.set_priority(priority);
        Ok(())
    }

    pub fn delete(&mut self, id: usize) -> Result<()> {
        self.get_mut(id)?.delete_task();
        log::debug!("Deleted task {}", id);
        Ok(())
    }

    /// Puts back the state captured in `snapshot` (e.g. to undo a delete).
    pub fn restore(&mut self, snapshot: &Task) -> Result<()> {
        let target = self.get_mut(snapshot.id())?;
        snapshot.copy_into(target);
        Ok(())
    }

    /// Drops soft-deleted tasks. Returns how many were removed.
    pub fn purge_deleted(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.is_deleted());
        let purged = before - self.tasks.len();
        if purged > 0 {
            log::info!("Purged {} deleted tasks", purged);
        }
        purged
    }

    /// Removes completed tasks and returns them in file order.
    pub fn archive(&mut self) -> Vec<Task> {
        let (done, keep): (Vec<Task>, Vec<Task>) = std::mem::take(&mut self.tasks)
            .into_iter()
            .partition(|t| t.is_completed() && !t.is_deleted());
        self.tasks = keep;
        done
    }

    /// Archives completed tasks into `done_path` and rewrites `todo_path`.
    pub fn archive_to(
        &mut self,
        todo_path: &Path,
        done_path: &Path,
        today: NaiveDate,
    ) -> Result<usize> {
        let done = self.archive();
        LocalStorage::append(done_path, &done, today)?;
        self.save(todo_path, today)?;
        log::info!("Archived {} tasks to {}", done.len(), done_path.display());
        Ok(done.len())
    }

    fn live(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.is_deleted())
    }

    /// Every context in use, sorted.
    pub fn contexts(&self) -> Vec<String> {
        let set: BTreeSet<&String> = self.live().flat_map(|t| t.contexts().iter()).collect();
        set.into_iter().cloned().collect()
    }

    /// Every project in use, sorted.
    pub fn projects(&self) -> Vec<String> {
        let set: BTreeSet<&String> = self.live().flat_map(|t| t.projects().iter()).collect();
        set.into_iter().cloned().collect()
    }

    /// Live tasks in `sort` order. The sort is stable, so ties keep file order.
    pub fn sorted(&self, sort: Sort) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.live().collect();
        tasks.sort_by(|a, b| sort.compare(a, b));
        tasks
    }

    pub fn search(&self, sort: Sort, term: &str) -> Vec<&Task> {
        let mut tasks = self.sorted(sort);
        tasks.retain(|t| t.matches_search(term));
        tasks
    }
}
