use cpm_tool::persistence::{
    load_tasks_from_csv, load_tasks_from_json, save_schedule_to_csv, save_tasks_to_json,
};
use cpm_tool::{Schedule, Task, compute_schedule, sample_project};
use polars::prelude::{AnyValue, DataFrame};
use std::io::{self, Write};

fn parse_pred_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn render_df_as_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let cell = |col: &polars::prelude::Column, row_idx: usize| -> String {
        match col.get(row_idx) {
            Ok(AnyValue::Null) => String::new(),
            Ok(AnyValue::Int64(v)) => v.to_string(),
            Ok(AnyValue::Boolean(v)) => v.to_string(),
            Ok(AnyValue::String(s)) => s.to_string(),
            Ok(AnyValue::List(inner)) => {
                if let Ok(ca) = inner.str() {
                    ca.into_iter()
                        .flatten()
                        .collect::<Vec<_>>()
                        .join(",")
                } else {
                    format!("{:?}", inner)
                }
            }
            Ok(other) => other.to_string(),
            Err(_) => String::new(),
        }
    };

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.len()).collect();
    for (ci, col) in columns.iter().enumerate() {
        for row_idx in 0..df.height() {
            let s = cell(col, row_idx);
            if s.len() > widths[ci] {
                widths[ci] = s.len();
            }
        }
    }

    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');

    out.push('|');
    for (i, name) in col_names.iter().enumerate() {
        out.push(' ');
        out.push_str(name);
        let pad = widths[i] - name.len();
        if pad > 0 {
            out.push_str(&" ".repeat(pad));
        }
        out.push(' ');
        out.push('|');
    }
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');

    for row_idx in 0..df.height() {
        out.push('|');
        for (ci, col) in columns.iter().enumerate() {
            let s = cell(col, row_idx);
            out.push(' ');
            out.push_str(&s);
            let pad = widths[ci].saturating_sub(s.len());
            if pad > 0 {
                out.push_str(&" ".repeat(pad));
            }
            out.push(' ');
            out.push('|');
        }
        out.push('\n');
    }

    out.push_str(&sep);
    out.push('\n');
    out
}

fn render_task_table(tasks: &[Task]) -> String {
    let headers = ["id", "name", "duration", "predecessors"];
    let rows: Vec<[String; 4]> = tasks
        .iter()
        .map(|t| {
            [
                t.id.clone(),
                t.name.clone(),
                t.duration.to_string(),
                t.predecessors.join(","),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, value) in row.iter().enumerate() {
            if value.len() > widths[i] {
                widths[i] = value.len();
            }
        }
    }

    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push('|');
    for (i, header) in headers.iter().enumerate() {
        out.push_str(&format!(" {:<width$} |", header, width = widths[i]));
    }
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &rows {
        out.push('|');
        for (i, value) in row.iter().enumerate() {
            out.push_str(&format!(" {:<width$} |", value, width = widths[i]));
        }
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show current task list\n  add <id> <name> <duration> [preds] Upsert a task (preds like A,B)\n  delete <id>                        Delete a task and clean up dependencies\n  sample                             Replace task list with the sample project\n  compute                            Run the CPM passes and show the schedule\n  save json <path>                   Save the task list as JSON\n  save csv <path>                    Compute and export the schedule as CSV\n  load <json|csv> <path>             Load a task list from disk\n  quit|exit                          Exit"
    );
}

fn print_schedule(schedule: &Schedule) {
    println!("Computed ({})", schedule.summary().to_cli_summary());
    match schedule.to_dataframe() {
        Ok(df) => println!("{}", render_df_as_text_table(&df)),
        Err(e) => println!("Render error: {}", e),
    }
}

fn main() {
    let mut tasks: Vec<Task> = Vec::new();

    println!("CPM Tool (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        if stdin.read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => {
                println!("{}", render_task_table(&tasks));
            }
            "sample" => {
                tasks = sample_project();
                println!("Loaded sample project ({} tasks).", tasks.len());
                println!("{}", render_task_table(&tasks));
            }
            "add" => {
                let id_s = parts.next();
                let name_s = parts.next();
                let dur_s = parts.next();
                let preds_s = parts.next();
                match (id_s, name_s, dur_s) {
                    (Some(id), Some(name), Some(dur_s)) => {
                        let duration: i64 = match dur_s.parse() {
                            Ok(v) => v,
                            Err(_) => {
                                println!("Invalid duration");
                                continue;
                            }
                        };
                        let predecessors = preds_s.map(parse_pred_list).unwrap_or_default();
                        let task =
                            Task::with_predecessors(id, name, duration, predecessors);
                        match tasks.iter_mut().find(|t| t.id == id) {
                            Some(existing) => {
                                *existing = task;
                                println!("Task {id} updated.");
                            }
                            None => {
                                tasks.push(task);
                                println!("Task {id} added.");
                            }
                        }
                        println!("{}", render_task_table(&tasks));
                    }
                    _ => println!("Usage: add <id> <name> <duration> [preds_csv]"),
                }
            }
            "delete" => match parts.next() {
                Some(id) => {
                    let before = tasks.len();
                    tasks.retain(|t| t.id != id);
                    if tasks.len() == before {
                        println!("Task {id} not found.");
                    } else {
                        for task in tasks.iter_mut() {
                            task.predecessors.retain(|p| p != id);
                        }
                        println!("Deleted task {id}.");
                        println!("{}", render_task_table(&tasks));
                    }
                }
                None => println!("Usage: delete <id>"),
            },
            "compute" => match compute_schedule(&tasks) {
                Ok(schedule) => print_schedule(&schedule),
                Err(e) => println!("Schedule error: {}", e),
            },
            "save" => {
                let format = parts.next();
                let path = parts.next();
                match (format, path) {
                    (Some("json"), Some(path)) => match save_tasks_to_json(&tasks, path) {
                        Ok(_) => println!("Task list saved to {path}."),
                        Err(e) => println!("Save error: {}", e),
                    },
                    (Some("csv"), Some(path)) => match compute_schedule(&tasks) {
                        Ok(schedule) => match save_schedule_to_csv(&schedule, path) {
                            Ok(_) => println!("Schedule exported to {path}."),
                            Err(e) => println!("Save error: {}", e),
                        },
                        Err(e) => println!("Schedule error: {}", e),
                    },
                    _ => println!("Usage: save <json|csv> <path>"),
                }
            }
            "load" => {
                let format = parts.next();
                let path = parts.next();
                let loaded = match (format, path) {
                    (Some("json"), Some(path)) => Some(load_tasks_from_json(path)),
                    (Some("csv"), Some(path)) => Some(load_tasks_from_csv(path)),
                    _ => {
                        println!("Usage: load <json|csv> <path>");
                        None
                    }
                };
                if let Some(result) = loaded {
                    match result {
                        Ok(new_tasks) => {
                            tasks = new_tasks;
                            println!("Task list loaded from {}.", path.unwrap_or(""));
                            println!("{}", render_task_table(&tasks));
                        }
                        Err(e) => println!("Load error: {}", e),
                    }
                }
            }
            other => println!("Unknown command '{}'. Type 'help' for commands.", other),
        }
    }
}
