//! Fixed-size worker pool
//!
//! Workers share one task list guarded by a mutex and a condition variable.
//! A worker takes the first task whose dependencies have all finished, runs it
//! outside the lock, then wakes every other worker since the completion may
//! have made further tasks ready.

use crate::error::PoolError;
use crate::task::{PendingTask, TaskDependency, TaskHandle, new_task};
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::sync::Arc;
use std::thread::JoinHandle;

/// What happens to queued tasks when the pool is dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminationMode {
    /// Cancel every task not started yet
    DropPending,

    /// Run every queued task before the workers exit
    #[default]
    DrainAll,
}

/// Configuration for the worker pool
#[derive(Debug, Clone)]
pub struct ThreadPoolConfig {
    /// Number of worker threads, at least 1
    pub thread_count: usize,
    /// Name prefix for worker threads
    pub thread_name: String,
    pub termination: TerminationMode,
    /// Whether workers pick tasks as soon as they are submitted
    pub start_running: bool,
}

impl Default for ThreadPoolConfig {
    fn default() -> Self {
        Self {
            thread_count: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            thread_name: "headergen-worker".to_string(),
            termination: TerminationMode::default(),
            start_running: true,
        }
    }
}

impl ThreadPoolConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thread_count(mut self, count: usize) -> Self {
        self.thread_count = count;
        self
    }

    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    pub fn with_termination(mut self, termination: TerminationMode) -> Self {
        self.termination = termination;
        self
    }

    /// Start paused, see [`ThreadPool::set_is_running`]
    pub fn paused(mut self) -> Self {
        self.start_running = false;
        self
    }
}

struct PoolState {
    tasks: Vec<PendingTask>,
    is_running: bool,
    is_shutting_down: bool,
    termination: TerminationMode,

    /// Workers currently executing a task
    active_workers: usize,
}

impl PoolState {
    fn should_exit(&self) -> bool {
        self.is_shutting_down
            && (self.termination == TerminationMode::DropPending || self.tasks.is_empty())
    }

    fn is_idle(&self) -> bool {
        self.tasks.is_empty() && self.active_workers == 0
    }
}

struct Shared {
    state: Mutex<PoolState>,
    wakeup: Condvar,
    idle: Condvar,
}

/// Worker pool executing closures with optional dependencies between them
pub struct ThreadPool {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl std::fmt::Debug for ThreadPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("ThreadPool")
            .field("thread_count", &self.workers.len())
            .field("pending_tasks", &state.tasks.len())
            .field("is_running", &state.is_running)
            .finish()
    }
}

impl ThreadPool {
    /// Create a pool and start its workers
    pub fn new(config: ThreadPoolConfig) -> Result<Self, PoolError> {
        let thread_count = config.thread_count.max(1);
        let shared = Arc::new(Shared {
            state: Mutex::new(PoolState {
                tasks: Vec::new(),
                is_running: config.start_running,
                is_shutting_down: false,
                termination: config.termination,
                active_workers: 0,
            }),
            wakeup: Condvar::new(),
            idle: Condvar::new(),
        });

        let mut pool = Self {
            shared,
            workers: Vec::with_capacity(thread_count),
        };

        for index in 0..thread_count {
            let shared = pool.shared.clone();
            let worker = std::thread::Builder::new()
                .name(format!("{}-{index}", config.thread_name))
                .spawn(move || worker_loop(&shared))?;
            pool.workers.push(worker);
        }

        tracing::debug!(thread_count, termination = ?config.termination, "Thread pool started");
        Ok(pool)
    }

    /// Pool with `thread_count` workers and default settings
    pub fn with_thread_count(thread_count: usize) -> Result<Self, PoolError> {
        Self::new(ThreadPoolConfig::new().with_thread_count(thread_count))
    }

    pub fn thread_count(&self) -> usize {
        self.workers.len()
    }

    /// Queue a task with no dependency
    pub fn submit<F, T>(&self, work: F) -> TaskHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        self.submit_with_dependencies(Vec::new(), work)
    }

    /// Queue a task that only starts once every dependency has finished
    pub fn submit_with_dependencies<F, T>(
        &self,
        dependencies: Vec<TaskDependency>,
        work: F,
    ) -> TaskHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (task, handle) = new_task(work, dependencies);

        let mut state = self.shared.state.lock();
        if state.is_shutting_down {
            drop(state);
            task.job.cancel();
            return handle;
        }
        state.tasks.push(task);
        drop(state);

        self.shared.wakeup.notify_one();
        handle
    }

    /// Pause or resume task dispatch.
    ///
    /// Paused workers finish the task they are executing and then wait, which
    /// lets the caller publish a batch of tasks before any of them starts.
    pub fn set_is_running(&self, is_running: bool) {
        self.shared.state.lock().is_running = is_running;
        if is_running {
            self.shared.wakeup.notify_all();
        }
    }

    pub fn is_running(&self) -> bool {
        self.shared.state.lock().is_running
    }

    /// Tasks queued and not started yet
    pub fn pending_task_count(&self) -> usize {
        self.shared.state.lock().tasks.len()
    }

    pub fn active_worker_count(&self) -> usize {
        self.shared.state.lock().active_workers
    }

    /// Block until no task is queued or executing.
    ///
    /// Never returns while the pool is paused with queued tasks.
    pub fn wait_idle(&self) {
        let mut state = self.shared.state.lock();
        while !state.is_idle() {
            self.shared.idle.wait(&mut state);
        }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        let cancelled = {
            let mut state = self.shared.state.lock();
            state.is_shutting_down = true;
            state.is_running = true;
            match state.termination {
                TerminationMode::DropPending => std::mem::take(&mut state.tasks),
                TerminationMode::DrainAll => Vec::new(),
            }
        };

        if !cancelled.is_empty() {
            tracing::debug!(count = cancelled.len(), "Cancelling pending tasks");
        }
        for task in cancelled {
            task.job.cancel();
        }

        self.shared.wakeup.notify_all();
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                tracing::error!("Worker thread terminated abnormally");
            }
        }
        self.shared.idle.notify_all();
    }
}

fn worker_loop(shared: &Shared) {
    let mut state = shared.state.lock();

    loop {
        if state.should_exit() {
            break;
        }

        if state.is_running {
            if let Some(index) = state.tasks.iter().position(PendingTask::is_ready) {
                let task = state.tasks.remove(index);
                state.active_workers += 1;

                MutexGuard::unlocked(&mut state, || task.job.run());

                state.active_workers -= 1;
                if state.is_idle() {
                    shared.idle.notify_all();
                }
                shared.wakeup.notify_all();
                continue;
            }
        }

        shared.wakeup.wait(&mut state);
    }
}
