use cpm_tool::{ScheduledTask, Task, compute_schedule, sample_project};

fn t(id: &str, duration: i64, preds: &[&str]) -> Task {
    Task::with_predecessors(
        id,
        format!("Task {id}"),
        duration,
        preds.iter().map(|p| p.to_string()).collect(),
    )
}

fn diamond() -> Vec<Task> {
    vec![
        t("A", 3, &[]),
        t("B", 2, &["A"]),
        t("C", 4, &["A"]),
        t("D", 1, &["B", "C"]),
    ]
}

fn get<'a>(schedule: &'a cpm_tool::Schedule, id: &str) -> &'a ScheduledTask {
    schedule.find_task(id).expect("task present in schedule")
}

#[test]
fn diamond_schedule_matches_hand_computation() {
    let schedule = compute_schedule(&diamond()).unwrap();

    assert_eq!(schedule.project_duration(), 8);

    let a = get(&schedule, "A");
    assert_eq!((a.early_start, a.early_finish), (0, 3));
    assert_eq!((a.late_start, a.late_finish), (0, 3));
    assert_eq!(a.total_float, 0);
    assert!(a.is_critical);

    let b = get(&schedule, "B");
    assert_eq!((b.early_start, b.early_finish), (3, 5));
    assert_eq!(b.late_start, 5);
    assert_eq!(b.total_float, 2);
    assert!(!b.is_critical);

    let c = get(&schedule, "C");
    assert_eq!((c.early_start, c.early_finish), (3, 7));
    assert_eq!(c.late_start, 3);
    assert_eq!(c.total_float, 0);
    assert!(c.is_critical);

    let d = get(&schedule, "D");
    assert_eq!((d.early_start, d.early_finish), (7, 8));
    assert_eq!(d.late_start, 7);
    assert_eq!(d.total_float, 0);
    assert!(d.is_critical);

    assert_eq!(schedule.critical_path(), ["A", "C", "D"]);
}

#[test]
fn empty_task_list_yields_empty_schedule() {
    let schedule = compute_schedule(&[]).unwrap();
    assert!(schedule.tasks().is_empty());
    assert_eq!(schedule.project_duration(), 0);
    assert!(schedule.critical_path().is_empty());
}

#[test]
fn single_zero_duration_task_is_critical() {
    let schedule = compute_schedule(&[t("A", 0, &[])]).unwrap();
    assert_eq!(schedule.project_duration(), 0);
    let a = get(&schedule, "A");
    assert_eq!((a.early_start, a.early_finish), (0, 0));
    assert!(a.is_critical);
    assert_eq!(schedule.critical_path(), ["A"]);
}

#[test]
fn tasks_without_predecessors_start_at_zero() {
    let schedule = compute_schedule(&sample_project()).unwrap();
    for task in schedule.tasks() {
        if task.predecessors.is_empty() {
            assert_eq!(task.early_start, 0, "task {} should start at 0", task.id);
        }
    }
}

#[test]
fn float_is_never_negative_and_duration_matches_both_passes() {
    let schedule = compute_schedule(&sample_project()).unwrap();
    let max_early_finish = schedule.tasks().iter().map(|t| t.early_finish).max();
    let max_late_finish = schedule.tasks().iter().map(|t| t.late_finish).max();
    assert_eq!(max_early_finish, Some(schedule.project_duration()));
    assert_eq!(max_late_finish, Some(schedule.project_duration()));
    for task in schedule.tasks() {
        assert!(task.total_float >= 0, "task {} has negative float", task.id);
    }
}

#[test]
fn critical_sinks_finish_at_project_duration() {
    let schedule = compute_schedule(&diamond()).unwrap();
    let d = get(&schedule, "D");
    assert!(d.is_critical);
    assert_eq!(d.late_finish, schedule.project_duration());
}

#[test]
fn compute_schedule_is_idempotent() {
    let tasks = sample_project();
    let first = compute_schedule(&tasks).unwrap();
    let second = compute_schedule(&tasks).unwrap();
    assert_eq!(first, second);
}

#[test]
fn disconnected_components_schedule_independently() {
    let tasks = vec![
        t("A", 2, &[]),
        t("B", 3, &["A"]),
        t("X", 1, &[]),
        t("Y", 1, &["X"]),
    ];
    let schedule = compute_schedule(&tasks).unwrap();
    assert_eq!(schedule.project_duration(), 5);
    // Short component floats against the global duration.
    assert_eq!(get(&schedule, "X").total_float, 3);
    assert_eq!(get(&schedule, "Y").total_float, 3);
    assert!(get(&schedule, "A").is_critical);
    assert!(get(&schedule, "B").is_critical);
    assert_eq!(schedule.critical_path(), ["A", "B"]);
}

#[test]
fn sample_project_solution_is_pinned() {
    let schedule = compute_schedule(&sample_project()).unwrap();
    assert_eq!(schedule.project_duration(), 71);
    assert_eq!(schedule.critical_path(), ["A", "B", "C", "D", "F", "H"]);

    let expected_finishes = [
        ("A", 5),
        ("B", 15),
        ("C", 30),
        ("D", 50),
        ("E", 42),
        ("F", 68),
        ("G", 59),
        ("H", 71),
    ];
    for (id, finish) in expected_finishes {
        assert_eq!(get(&schedule, id).early_finish, finish, "task {id}");
    }

    assert_eq!(get(&schedule, "E").total_float, 8);
    assert_eq!(get(&schedule, "G").total_float, 9);
    assert_eq!(schedule.critical_tasks().len(), 6);
}

#[test]
fn tasks_keep_input_order_in_the_output() {
    let tasks = diamond();
    let schedule = compute_schedule(&tasks).unwrap();
    let ids: Vec<&str> = schedule.tasks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["A", "B", "C", "D"]);
}

#[test]
fn summary_counts_critical_tasks() {
    let summary = compute_schedule(&diamond()).unwrap().summary();
    assert_eq!(summary.task_count, 4);
    assert_eq!(summary.critical_count, 3);
    assert_eq!(summary.project_duration, 8);
    assert_eq!(summary.critical_path, ["A", "C", "D"]);
}

#[test]
fn dataframe_projection_carries_all_columns() {
    let schedule = compute_schedule(&diamond()).unwrap();
    let df = schedule.to_dataframe().unwrap();
    assert_eq!(df.height(), 4);
    let names: Vec<String> = df
        .get_columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    assert_eq!(
        names,
        [
            "id",
            "name",
            "duration",
            "predecessors",
            "early_start",
            "early_finish",
            "late_start",
            "late_finish",
            "total_float",
            "is_critical",
        ]
    );

    let floats = df.column("total_float").unwrap().i64().unwrap();
    assert_eq!(floats.get(1), Some(2));
    let critical = df.column("is_critical").unwrap().bool().unwrap();
    assert_eq!(critical.get(0), Some(true));
    assert_eq!(critical.get(1), Some(false));
}
