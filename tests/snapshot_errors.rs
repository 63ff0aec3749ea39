mod common;

use common::{RecordingQueue, position};
use taskdag::{Task, TaskDagError, TaskManager};

#[test]
fn two_task_cycle_is_detected() {
    let a = Task::labeled("a", 10);
    let b = Task::labeled("b", 8);
    let c = Task::labeled("c", 11);
    let d = Task::labeled("d", 11);

    a.add_dependency(&b);
    a.add_dependency(&c);
    d.add_dependency(&a);
    // The extra edge that closes the loop.
    b.add_dependency(&a);

    let manager = TaskManager::new(RecordingQueue::new());
    for task in [&a, &b, &c, &d] {
        manager.add(task);
    }

    let err = manager.build_snapshot().unwrap_err();
    assert!(matches!(err, TaskDagError::CyclicDependency { .. }), "got {err}");
}

#[test]
fn three_task_cycle_is_detected() {
    let x = Task::labeled("x", 0);
    let y = Task::labeled("y", 0);
    let z = Task::labeled("z", 0);

    x.add_dependency(&y);
    y.add_dependency(&z);
    z.add_dependency(&x);

    let manager = TaskManager::new(RecordingQueue::new());
    for task in [&x, &y, &z] {
        manager.add(task);
    }

    let err = manager.build_snapshot().unwrap_err();
    assert!(matches!(err, TaskDagError::CyclicDependency { .. }), "got {err}");
}

#[test]
fn self_dependency_is_a_cycle() {
    let a = Task::labeled("a", 0);
    a.add_dependency(&a);

    let manager = TaskManager::new(RecordingQueue::new());
    manager.add(&a);

    let err = manager.build_snapshot().unwrap_err();
    assert!(matches!(err, TaskDagError::CyclicDependency { .. }), "got {err}");
}

#[test]
fn unregistered_dependency_is_reported_with_both_names() {
    let e = Task::labeled("e", 1);
    let f = Task::labeled("f", 2);
    e.add_dependency(&f);

    let manager = TaskManager::new(RecordingQueue::new());
    manager.add(&e);
    // `f` is deliberately never added.

    match manager.build_snapshot() {
        Err(TaskDagError::TaskNotRegistered { task, dependency }) => {
            assert_eq!(task, "e");
            assert_eq!(dependency, "f");
        }
        other => panic!("expected TaskNotRegistered, got {other:?}"),
    }
}

#[test]
fn failed_build_leaves_manager_reusable() {
    let e = Task::labeled("e", 1);
    let f = Task::labeled("f", 2);
    e.add_dependency(&f);

    let manager = TaskManager::new(RecordingQueue::new());
    manager.add(&e);

    assert!(manager.build_snapshot().is_err());
    assert_eq!(manager.task_count(), 1);

    // Fixing the registration makes the next attempt succeed.
    manager.add(&f);
    let snapshot = manager.build_snapshot().expect("graph is complete now");

    assert_eq!(snapshot.len(), 2);
    assert!(position(snapshot.tasks(), &f) < position(snapshot.tasks(), &e));
}
