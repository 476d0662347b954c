use crate::model::{AttendanceRecord, AttendanceStatus, NewAttendance};
use chrono::NaiveDate;
use sqlx::SqliteConnection;

pub async fn list_all(conn: &mut SqliteConnection) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRecord>(
        "SELECT id, employee_id, date, status FROM attendance ORDER BY id",
    )
    .fetch_all(conn)
    .await
}

pub async fn list_for_employee(
    conn: &mut SqliteConnection,
    employee_id: &str,
) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRecord>(
        r#"
        SELECT id, employee_id, date, status
        FROM attendance
        WHERE employee_id = ?
        ORDER BY id
        "#,
    )
    .bind(employee_id)
    .fetch_all(conn)
    .await
}

pub async fn exists_on(
    conn: &mut SqliteConnection,
    employee_id: &str,
    date: NaiveDate,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM attendance WHERE employee_id = ? AND date = ?)",
    )
    .bind(employee_id)
    .bind(date)
    .fetch_one(conn)
    .await
}

/// Inserts only while the referenced employee exists; `None` otherwise.
pub async fn insert(
    conn: &mut SqliteConnection,
    record: &NewAttendance,
) -> Result<Option<AttendanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRecord>(
        r#"
        INSERT INTO attendance (employee_id, date, status)
        SELECT ?, ?, ?
        WHERE EXISTS (SELECT 1 FROM employees WHERE employee_id = ?)
        RETURNING id, employee_id, date, status
        "#,
    )
    .bind(&record.employee_id)
    .bind(record.date)
    .bind(record.status)
    .bind(&record.employee_id)
    .fetch_optional(conn)
    .await
}

pub async fn count_with_status(
    conn: &mut SqliteConnection,
    employee_id: &str,
    status: AttendanceStatus,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM attendance WHERE employee_id = ? AND status = ?",
    )
    .bind(employee_id)
    .bind(status)
    .fetch_one(conn)
    .await
}

pub async fn delete_for_employee(
    conn: &mut SqliteConnection,
    employee_id: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM attendance WHERE employee_id = ?")
        .bind(employee_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
