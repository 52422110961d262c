//! Deferred one-shot task schedulers

use std::cell::RefCell;
use std::collections::VecDeque;

use tracing::debug;

use super::Scheduler;

/// Schedules onto the current tokio `LocalSet`.
///
/// Tasks run after the scheduling task yields, plus one extra tick, so a
/// frame in progress can finish before a blocking task starts. Must be
/// used from inside `LocalSet::run_until` or a `spawn_local` task.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalScheduler;

impl LocalScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for LocalScheduler {
    fn schedule_once(&self, task: Box<dyn FnOnce()>) {
        tokio::task::spawn_local(async move {
            tokio::task::yield_now().await;
            task();
        });
    }
}

/// Queue of tasks drained explicitly by the host loop
#[derive(Default)]
pub struct ManualScheduler {
    queue: RefCell<VecDeque<Box<dyn FnOnce()>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the tasks queued before this call. Tasks they schedule wait
    /// for the next call. Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let tasks: Vec<_> = self.queue.borrow_mut().drain(..).collect();
        let count = tasks.len();
        if count > 0 {
            debug!(count, "running scheduled tasks");
        }
        for task in tasks {
            task();
        }
        count
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_once(&self, task: Box<dyn FnOnce()>) {
        self.queue.borrow_mut().push_back(task);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use tokio::task::LocalSet;

    use super::*;

    #[test]
    fn test_manual_scheduler_defers_nested_tasks() {
        let scheduler = Rc::new(ManualScheduler::new());
        let runs = Rc::new(Cell::new(0));

        let inner_scheduler = Rc::clone(&scheduler);
        let inner_runs = Rc::clone(&runs);
        scheduler.schedule_once(Box::new(move || {
            inner_runs.set(inner_runs.get() + 1);
            let nested_runs = Rc::clone(&inner_runs);
            inner_scheduler.schedule_once(Box::new(move || nested_runs.set(nested_runs.get() + 1)));
        }));

        assert_eq!(runs.get(), 0);
        assert_eq!(scheduler.run_pending(), 1);
        assert_eq!(runs.get(), 1);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.run_pending(), 1);
        assert_eq!(runs.get(), 2);
        assert_eq!(scheduler.run_pending(), 0);
    }

    #[test]
    fn test_local_scheduler_runs_after_current_task() {
        let local = LocalSet::new();
        let ran = Rc::new(Cell::new(false));

        let observed = Rc::clone(&ran);
        tokio_test::block_on(local.run_until(async move {
            let flag = Rc::clone(&observed);
            LocalScheduler::new().schedule_once(Box::new(move || flag.set(true)));
            assert!(!observed.get(), "task ran inline");

            for _ in 0..4 {
                tokio::task::yield_now().await;
            }
            assert!(observed.get());
        }));

        assert!(ran.get());
    }
}
