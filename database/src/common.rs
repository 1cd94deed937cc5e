use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};
use todo_core::{
    error::{Result, TodoError},
    models::Item,
};

/// Convert SQLite row to Item model
pub fn row_to_item(row: &SqliteRow) -> Result<Item> {
    let updated_at: DateTime<Utc> = row
        .try_get("updated_at")
        .map_err(|e| TodoError::Database(format!("Invalid updated_at in database: {e}")))?;

    Ok(Item {
        id: row.try_get("id").map_err(sqlx_error_to_todo_error)?,
        title: row.try_get("title").map_err(sqlx_error_to_todo_error)?,
        updated_at,
    })
}

/// Convert SQLx error to TodoError
pub fn sqlx_error_to_todo_error(err: sqlx::Error) -> TodoError {
    match &err {
        sqlx::Error::Database(db_err) => {
            TodoError::Database(format!("Database constraint error: {}", db_err.message()))
        }
        sqlx::Error::RowNotFound => {
            // Callers that expect "no rows" use fetch_optional instead
            TodoError::Database("Unexpected RowNotFound error".to_string())
        }
        sqlx::Error::PoolTimedOut => TodoError::Database("Connection pool timeout".to_string()),
        sqlx::Error::PoolClosed => {
            TodoError::Cancelled("Connection pool is closed".to_string())
        }
        sqlx::Error::Io(io_err) => TodoError::Database(format!("Database I/O error: {io_err}")),
        _ => TodoError::Database(format!("Database operation failed: {err}")),
    }
}
