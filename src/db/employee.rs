use crate::model::{Employee, NewEmployee};
use sqlx::SqliteConnection;

pub async fn list_all(conn: &mut SqliteConnection) -> Result<Vec<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, employee_id, full_name, email, department
        FROM employees
        ORDER BY id
        "#,
    )
    .fetch_all(conn)
    .await
}

pub async fn find_by_employee_id(
    conn: &mut SqliteConnection,
    employee_id: &str,
) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, employee_id, full_name, email, department
        FROM employees
        WHERE employee_id = ?
        "#,
    )
    .bind(employee_id)
    .fetch_optional(conn)
    .await
}

pub async fn exists(conn: &mut SqliteConnection, employee_id: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM employees WHERE employee_id = ?)")
        .bind(employee_id)
        .fetch_one(conn)
        .await
}

/// Email comparison is case-insensitive through the column collation.
pub async fn email_taken(conn: &mut SqliteConnection, email: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM employees WHERE email = ?)")
        .bind(email)
        .fetch_one(conn)
        .await
}

pub async fn insert(
    conn: &mut SqliteConnection,
    employee: &NewEmployee,
) -> Result<Employee, sqlx::Error> {
    sqlx::query_as::<_, Employee>(
        r#"
        INSERT INTO employees (employee_id, full_name, email, department)
        VALUES (?, ?, ?, ?)
        RETURNING id, employee_id, full_name, email, department
        "#,
    )
    .bind(&employee.employee_id)
    .bind(&employee.full_name)
    .bind(&employee.email)
    .bind(&employee.department)
    .fetch_one(conn)
    .await
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete(conn: &mut SqliteConnection, employee_id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM employees WHERE employee_id = ?")
        .bind(employee_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
