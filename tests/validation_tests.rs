use cpm_tool::{GraphError, ScheduleError, Task, compute_schedule};

fn t(id: &str, duration: i64, preds: &[&str]) -> Task {
    Task::with_predecessors(id, id, duration, preds.iter().map(|p| p.to_string()).collect())
}

#[test]
fn negative_duration_fails_validation_before_graph_work() {
    let err = compute_schedule(&[t("A", -1, &[])]).unwrap_err();
    assert!(matches!(err, ScheduleError::Validation(_)));
    assert!(err.to_string().contains("negative duration"));
}

#[test]
fn blank_id_fails_validation() {
    let err = compute_schedule(&[t("", 1, &[])]).unwrap_err();
    assert!(matches!(err, ScheduleError::Validation(_)));
}

#[test]
fn duplicate_ids_fail_validation() {
    let err = compute_schedule(&[t("A", 1, &[]), t("A", 2, &[])]).unwrap_err();
    assert!(matches!(err, ScheduleError::Validation(_)));
    assert!(err.to_string().contains("duplicate task id A"));
}

#[test]
fn two_task_cycle_is_a_graph_error() {
    let err = compute_schedule(&[t("A", 1, &["B"]), t("B", 1, &["A"])]).unwrap_err();
    match err {
        ScheduleError::Graph(GraphError::Cycle { task_ids }) => {
            assert_eq!(task_ids, vec!["A".to_string(), "B".to_string()]);
        }
        other => panic!("expected cycle error, got {other:?}"),
    }
}

#[test]
fn transitive_cycle_is_detected() {
    let tasks = [t("A", 1, &["C"]), t("B", 1, &["A"]), t("C", 1, &["B"])];
    let err = compute_schedule(&tasks).unwrap_err();
    assert!(matches!(
        err,
        ScheduleError::Graph(GraphError::Cycle { .. })
    ));
}

#[test]
fn unknown_predecessor_is_a_graph_error() {
    let err = compute_schedule(&[t("A", 1, &["X"])]).unwrap_err();
    match err {
        ScheduleError::Graph(GraphError::UnknownPredecessor {
            task_id,
            predecessor_id,
        }) => {
            assert_eq!(task_id, "A");
            assert_eq!(predecessor_id, "X");
        }
        other => panic!("expected unknown predecessor error, got {other:?}"),
    }
}

#[test]
fn graph_errors_render_readable_messages() {
    let err = compute_schedule(&[t("A", 1, &["X"])]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "graph error: task A references unknown predecessor X"
    );

    let err = compute_schedule(&[t("A", 1, &["A"])]).unwrap_err();
    assert!(err.to_string().contains("dependency cycle involving tasks: A"));
}
