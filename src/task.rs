// src/task.rs

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

/// Opaque identifier assigned to every [`Task`] at construction.
///
/// Identity is the sole basis for task equality and hashing: two tasks with
/// identical labels and priorities but different ids are distinct. Ids are
/// drawn from a process-wide counter, so they are never reused and their
/// ordering reflects construction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        TaskId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type Work = dyn Fn() + Send + Sync + 'static;

struct TaskInner {
    id: TaskId,
    label: Option<String>,
    priority: i32,
    /// Tasks that must be ordered before this one.
    dependencies: Mutex<HashSet<Task>>,
    work: Option<Box<Work>>,
}

/// A unit of work with identity, a priority hint and a set of prerequisite
/// tasks.
///
/// `Task` is a cheap handle: clones share the same underlying task, which is
/// how a single task can be held simultaneously by the manager and by every
/// task that lists it as a dependency. Everything but the dependency set is
/// fixed at construction; the dependency set is guarded by its own lock and
/// grows monotonically (additions only), so it can be extended concurrently
/// from multiple threads without losing insertions.
///
/// Higher priority means the task is *favoured* to run sooner among tasks
/// that are not ordered relative to each other; dependency edges always win.
#[derive(Clone)]
pub struct Task {
    inner: Arc<TaskInner>,
}

impl Task {
    /// An unlabeled task whose unit of work logs its identity.
    pub fn new(priority: i32) -> Self {
        Self::build(None, priority, None)
    }

    /// A labeled task whose unit of work logs its identity.
    pub fn labeled(label: impl Into<String>, priority: i32) -> Self {
        Self::build(Some(label.into()), priority, None)
    }

    /// A labeled task carrying a caller-supplied unit of work.
    ///
    /// The closure runs on whatever worker the queue hands it to, so it must
    /// be `Send + Sync`; the scheduler never consumes a return value.
    pub fn with_work(
        label: impl Into<String>,
        priority: i32,
        work: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self::build(Some(label.into()), priority, Some(Box::new(work)))
    }

    fn build(label: Option<String>, priority: i32, work: Option<Box<Work>>) -> Self {
        Self {
            inner: Arc::new(TaskInner {
                id: TaskId::next(),
                label,
                priority,
                dependencies: Mutex::new(HashSet::new()),
                work,
            }),
        }
    }

    pub fn id(&self) -> TaskId {
        self.inner.id
    }

    pub fn label(&self) -> Option<&str> {
        self.inner.label.as_deref()
    }

    pub fn priority(&self) -> i32 {
        self.inner.priority
    }

    /// Label if present, otherwise the id. Used in logs and error messages.
    pub fn display_name(&self) -> String {
        match &self.inner.label {
            Some(label) => label.clone(),
            None => self.inner.id.to_string(),
        }
    }

    /// Record that `other` must be ordered before this task.
    ///
    /// Returns `true` if the dependency was newly added, `false` if it was
    /// already present. Whether `other` is actually registered with a manager
    /// is not checked here; an unregistered dependency only surfaces when a
    /// snapshot is built.
    pub fn add_dependency(&self, other: &Task) -> bool {
        let mut deps = self
            .inner
            .dependencies
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        deps.insert(other.clone())
    }

    /// A consistent copy of the current dependency set.
    ///
    /// Safe to call while other threads are adding dependencies; additions
    /// racing with the copy may or may not be included.
    pub fn dependencies(&self) -> HashSet<Task> {
        self.inner
            .dependencies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Perform the task's unit of work.
    ///
    /// Side effect only; re-executable any number of times. Tasks built
    /// without an explicit unit of work log their identity instead.
    pub fn execute(&self) {
        match &self.inner.work {
            Some(work) => work(),
            None => info!(
                id = %self.inner.id,
                label = self.inner.label.as_deref(),
                priority = self.inner.priority,
                "executing task"
            ),
        }
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Task {}

impl Hash for Task {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

// Manual impl: deriving would walk the dependency set, which may contain
// reference cycles and in any case requires taking the lock.
impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.inner.id)
            .field("label", &self.inner.label)
            .field("priority", &self.inner.priority)
            .finish_non_exhaustive()
    }
}
