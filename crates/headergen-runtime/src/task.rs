//! Task handles and the type-erased jobs queued in the pool

use crate::error::TaskError;
use parking_lot::{Condvar, Mutex};
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Set once the task has run, panicked or been cancelled
#[derive(Debug, Default)]
pub(crate) struct Completion {
    finished: AtomicBool,
}

impl Completion {
    pub(crate) fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    fn finish(&self) {
        self.finished.store(true, Ordering::Release);
    }
}

/// Result slot shared between a job and its handle
struct Slot<T> {
    value: Mutex<Option<Result<T, TaskError>>>,
    ready: Condvar,
}

impl<T> Slot<T> {
    fn new() -> Self {
        Self {
            value: Mutex::new(None),
            ready: Condvar::new(),
        }
    }

    fn fulfill(&self, result: Result<T, TaskError>) {
        *self.value.lock() = Some(result);
        self.ready.notify_all();
    }
}

/// Prerequisite of another task, obtained from [`TaskHandle::dependency`]
#[derive(Debug, Clone)]
pub struct TaskDependency {
    completion: Arc<Completion>,
}

impl TaskDependency {
    pub fn is_finished(&self) -> bool {
        self.completion.is_finished()
    }
}

/// Future-like handle on the value of a submitted task
pub struct TaskHandle<T> {
    slot: Arc<Slot<T>>,
    completion: Arc<Completion>,
}

impl<T> std::fmt::Debug for TaskHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHandle")
            .field("finished", &self.completion.is_finished())
            .finish()
    }
}

impl<T> TaskHandle<T> {
    pub fn is_finished(&self) -> bool {
        self.completion.is_finished()
    }

    /// Dependency usable to delay other tasks until this one finished
    pub fn dependency(&self) -> TaskDependency {
        TaskDependency {
            completion: self.completion.clone(),
        }
    }

    /// Block until the task finished and take its result
    pub fn join(self) -> Result<T, TaskError> {
        let mut value = self.slot.value.lock();
        loop {
            if let Some(result) = value.take() {
                return result;
            }
            self.slot.ready.wait(&mut value);
        }
    }
}

/// A queued unit of work, type-erased
pub(crate) trait Job: Send {
    fn run(self: Box<Self>);
    fn cancel(self: Box<Self>);
}

struct TypedJob<F, T> {
    work: F,
    slot: Arc<Slot<T>>,
    completion: Arc<Completion>,
}

impl<F, T> Job for TypedJob<F, T>
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    fn run(self: Box<Self>) {
        let TypedJob {
            work,
            slot,
            completion,
        } = *self;

        let result = catch_unwind(AssertUnwindSafe(work)).map_err(|payload| {
            let message = panic_message(payload.as_ref());
            tracing::error!(panic = %message, "Task panicked");
            TaskError::Panicked(message)
        });

        completion.finish();
        slot.fulfill(result);
    }

    fn cancel(self: Box<Self>) {
        self.completion.finish();
        self.slot.fulfill(Err(TaskError::Cancelled));
    }
}

/// Job waiting in the pool queue
pub(crate) struct PendingTask {
    pub(crate) dependencies: Vec<TaskDependency>,
    pub(crate) job: Box<dyn Job>,
}

impl PendingTask {
    pub(crate) fn is_ready(&self) -> bool {
        self.dependencies.iter().all(TaskDependency::is_finished)
    }
}

/// Wrap `work` into a queued task and the handle observing it
pub(crate) fn new_task<F, T>(work: F, dependencies: Vec<TaskDependency>) -> (PendingTask, TaskHandle<T>)
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let slot = Arc::new(Slot::new());
    let completion = Arc::new(Completion::default());

    let task = PendingTask {
        dependencies,
        job: Box::new(TypedJob {
            work,
            slot: slot.clone(),
            completion: completion.clone(),
        }),
    };

    (task, TaskHandle { slot, completion })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
