mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};

use common::init_tracing;
use taskdag::exec::{spawn_executor, spawn_serial_executor};
use taskdag::{Task, TaskManager};

/// A task that appends its name to a shared log when executed.
fn recording_task(name: &str, priority: i32, log: &Arc<Mutex<Vec<String>>>) -> Task {
    let log = Arc::clone(log);
    let tag = name.to_string();
    Task::with_work(name, priority, move || {
        log.lock().unwrap().push(tag.clone());
    })
}

#[tokio::test]
async fn serial_executor_completes_tasks_in_submission_order() {
    init_tracing();

    let log: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let (queue, executor) = spawn_serial_executor();
    let manager = TaskManager::new(Arc::new(queue));

    let a = recording_task("a", 3, &log);
    let b = recording_task("b", 2, &log);
    let c = recording_task("c", 1, &log);
    b.add_dependency(&a);
    c.add_dependency(&b);

    for task in [&a, &b, &c] {
        manager.add(task);
    }

    let snapshot = manager.build_snapshot().unwrap();
    let plan: Vec<String> = snapshot.tasks().iter().map(Task::display_name).collect();
    snapshot.execute();

    // Drop every queue handle so the loop drains and finishes.
    drop(snapshot);
    drop(manager);
    executor.await.unwrap();

    assert_eq!(*log.lock().unwrap(), plan);
}

#[tokio::test]
async fn parallel_executor_runs_every_submission() {
    init_tracing();

    let completed = Arc::new(AtomicUsize::new(0));
    let (queue, executor) = spawn_executor();
    let manager = TaskManager::new(Arc::new(queue));

    for i in 0..8 {
        let completed = Arc::clone(&completed);
        let task = Task::with_work(format!("t{i}"), i, move || {
            completed.fetch_add(1, Ordering::SeqCst);
        });
        manager.add(&task);
    }

    let snapshot = manager.build_snapshot().unwrap();
    snapshot.execute();

    drop(snapshot);
    drop(manager);
    executor.await.unwrap();

    assert_eq!(completed.load(Ordering::SeqCst), 8);
}

#[tokio::test]
async fn execute_returns_before_any_task_runs() {
    init_tracing();

    // The task blocks on a gate the test controls, so if `execute` waited
    // for completion it would deadlock here instead of returning.
    let gate = Arc::new((Mutex::new(false), Condvar::new()));
    let ran = Arc::new(AtomicUsize::new(0));

    let (queue, executor) = spawn_serial_executor();
    let manager = TaskManager::new(Arc::new(queue));

    let task = {
        let gate = Arc::clone(&gate);
        let ran = Arc::clone(&ran);
        Task::with_work("gated", 0, move || {
            let (lock, cvar) = &*gate;
            let mut open = lock.lock().unwrap();
            while !*open {
                open = cvar.wait(open).unwrap();
            }
            ran.fetch_add(1, Ordering::SeqCst);
        })
    };
    manager.add(&task);

    let snapshot = manager.build_snapshot().unwrap();
    snapshot.execute();

    // Submission happened, execution cannot have: the gate is still closed.
    assert_eq!(ran.load(Ordering::SeqCst), 0);

    {
        let (lock, cvar) = &*gate;
        *lock.lock().unwrap() = true;
        cvar.notify_all();
    }

    drop(snapshot);
    drop(manager);
    executor.await.unwrap();

    assert_eq!(ran.load(Ordering::SeqCst), 1);
}
