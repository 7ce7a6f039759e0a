use super::{PersistenceResult, TaskStore};
use crate::task::Task;
use rusqlite::{Connection, params};
use std::sync::Mutex;

/// Task-list store over a single SQLite table. `position` preserves input
/// order across round-trips; a save overwrites the whole list inside one
/// transaction.
pub struct SqliteTaskStore {
    connection: Mutex<Connection>,
}

impl SqliteTaskStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS tasks (
                position     INTEGER PRIMARY KEY,
                id           TEXT    NOT NULL UNIQUE,
                name         TEXT    NOT NULL,
                duration     INTEGER NOT NULL,
                predecessors TEXT    NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }
}

impl TaskStore for SqliteTaskStore {
    fn save_tasks(&self, tasks: &[Task]) -> PersistenceResult<()> {
        super::validate_tasks(tasks)?;
        let mut conn = self.connection.lock().expect("sqlite mutex poisoned");
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM tasks", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO tasks (position, id, name, duration, predecessors)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (position, task) in tasks.iter().enumerate() {
                stmt.execute(params![
                    position as i64,
                    task.id,
                    task.name,
                    task.duration,
                    task.predecessors.join(","),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn load_tasks(&self) -> PersistenceResult<Option<Vec<Task>>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, name, duration, predecessors FROM tasks ORDER BY position ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut tasks = Vec::new();
        for row in rows {
            let (id, name, duration, predecessors) = row?;
            let predecessors = predecessors
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(ToOwned::to_owned)
                .collect();
            tasks.push(Task::with_predecessors(id, name, duration, predecessors));
        }

        if tasks.is_empty() {
            return Ok(None);
        }

        super::validate_tasks(&tasks)?;
        Ok(Some(tasks))
    }
}
