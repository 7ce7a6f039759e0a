use crate::task::Task;

/// The stock demonstration plan: an eight-task construction project whose
/// critical path runs A->B->C->D->F->H for a total duration of 71 units.
pub fn sample_project() -> Vec<Task> {
    let rows: [(&str, &str, i64, &[&str]); 8] = [
        ("A", "Initial Planning", 5, &[]),
        ("B", "Site Preparation", 10, &["A"]),
        ("C", "Foundation", 15, &["B"]),
        ("D", "Framing", 20, &["C"]),
        ("E", "Plumbing & Electrical", 12, &["C"]),
        ("F", "Drywall & Interior", 18, &["D", "E"]),
        ("G", "Exterior Finishes", 9, &["D"]),
        ("H", "Final Inspection", 3, &["F", "G"]),
    ];

    rows.into_iter()
        .map(|(id, name, duration, preds)| {
            Task::with_predecessors(
                id,
                name,
                duration,
                preds.iter().map(|p| p.to_string()).collect(),
            )
        })
        .collect()
}
