use crate::{
    db,
    error::{ApiError, ErrorBody},
    model::{Employee, NewEmployee},
    utils::validation::{require_email, require_non_empty},
};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, info};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    #[schema(example = "Alice Smith")]
    pub full_name: String,
    #[schema(example = "alice@company.com", format = "email")]
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
}

impl CreateEmployee {
    pub fn validate(&self) -> Result<NewEmployee, ApiError> {
        Ok(NewEmployee {
            employee_id: require_non_empty("employee_id", "Employee ID", &self.employee_id)?,
            full_name: require_non_empty("full_name", "Full Name", &self.full_name)?,
            email: require_email("email", &self.email)?,
            department: require_non_empty("department", "Department", &self.department)?,
        })
    }
}

const EMPLOYEE_ID_TAKEN: &str = "Employee ID already exists";
const EMAIL_TAKEN: &str = "Email already exists";

/// Names the column whose UNIQUE constraint rejected the insert.
fn insert_conflict(err: sqlx::Error) -> ApiError {
    let detail = match &err {
        sqlx::Error::Database(db_err) if db_err.message().contains("employees.email") => {
            EMAIL_TAKEN
        }
        _ => EMPLOYEE_ID_TAKEN,
    };
    ApiError::on_unique_violation(err, detail)
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Employee ID or email already exists", body = ErrorBody, example = json!({
            "detail": "Employee ID already exists"
        })),
        (status = 422, description = "Validation error", body = ErrorBody, example = json!({
            "detail": "Full Name cannot be empty",
            "field": "full_name"
        }))
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let new_employee = payload.validate()?;

    let mut conn = pool.acquire().await?;

    if db::employee::exists(&mut conn, &new_employee.employee_id).await? {
        return Err(ApiError::Conflict(EMPLOYEE_ID_TAKEN.into()));
    }
    if db::employee::email_taken(&mut conn, &new_employee.email).await? {
        return Err(ApiError::Conflict(EMAIL_TAKEN.into()));
    }

    // Autocommit insert: a concurrent duplicate waits on the write lock and
    // then fails the UNIQUE constraint.
    let employee = db::employee::insert(&mut conn, &new_employee)
        .await
        .map_err(insert_conflict)?;

    info!(employee_id = %employee.employee_id, id = employee.id, "Employee created");
    Ok(HttpResponse::Created().json(employee))
}

#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees", body = [Employee])
    ),
    tag = "Employee"
)]
pub async fn list_employees(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let mut conn = pool.acquire().await?;
    let employees = db::employee::list_all(&mut conn).await?;

    debug!(count = employees.len(), "Listed employees");
    Ok(HttpResponse::Ok().json(employees))
}

/// Get Employee by employee ID
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Externally assigned employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = ErrorBody, example = json!({
            "detail": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();
    let mut conn = pool.acquire().await?;

    match db::employee::find_by_employee_id(&mut conn, &employee_id).await? {
        Some(employee) => Ok(HttpResponse::Ok().json(employee)),
        None => Err(ApiError::employee_not_found()),
    }
}

/// Delete Employee together with its attendance records
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Externally assigned employee ID")
    ),
    responses(
        (status = 204, description = "Employee and attendance deleted"),
        (status = 404, description = "Employee not found", body = ErrorBody, example = json!({
            "detail": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    // Both deletes commit together or not at all. The first statement is a
    // write so the transaction takes the write lock up front.
    let mut tx = pool.begin().await?;

    let attendance_removed = db::attendance::delete_for_employee(&mut tx, &employee_id).await?;
    if db::employee::delete(&mut tx, &employee_id).await? == 0 {
        // dropping tx rolls back
        return Err(ApiError::employee_not_found());
    }

    tx.commit().await?;

    info!(%employee_id, attendance_removed, "Employee deleted");
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::temp_pool;

    fn payload(employee_id: &str, full_name: &str, email: &str, department: &str) -> CreateEmployee {
        CreateEmployee {
            employee_id: employee_id.into(),
            full_name: full_name.into(),
            email: email.into(),
            department: department.into(),
        }
    }

    #[test]
    fn validate_trims_every_field() {
        let valid = payload(" E1 ", " Alice ", " alice@x.com ", " Ops ")
            .validate()
            .unwrap();
        assert_eq!(
            valid,
            NewEmployee {
                employee_id: "E1".into(),
                full_name: "Alice".into(),
                email: "alice@x.com".into(),
                department: "Ops".into(),
            }
        );
    }

    #[test]
    fn validate_names_the_offending_field() {
        let cases = [
            (payload("", "Alice", "alice@x.com", "Ops"), "employee_id"),
            (payload("E1", "  ", "alice@x.com", "Ops"), "full_name"),
            (payload("E1", "Alice", "not-an-email", "Ops"), "email"),
            (payload("E1", "Alice", "alice@x.com", ""), "department"),
        ];

        for (input, expected) in cases {
            match input.validate() {
                Err(ApiError::Validation { field, .. }) => {
                    assert_eq!(field.as_deref(), Some(expected))
                }
                other => panic!("expected validation error on {expected}, got {other:?}"),
            }
        }
    }

    #[actix_web::test]
    async fn constraint_failures_name_the_duplicate_column() {
        let (pool, _dir) = temp_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let first = payload("E1", "Alice", "alice@x.com", "Ops").validate().unwrap();
        db::employee::insert(&mut conn, &first).await.unwrap();

        let same_id = payload("E1", "Bob", "bob@x.com", "Ops").validate().unwrap();
        let err = insert_conflict(db::employee::insert(&mut conn, &same_id).await.unwrap_err());
        assert!(matches!(err, ApiError::Conflict(ref d) if d == EMPLOYEE_ID_TAKEN));

        let same_email = payload("E2", "Bob", "ALICE@x.com", "Ops").validate().unwrap();
        let err = insert_conflict(db::employee::insert(&mut conn, &same_email).await.unwrap_err());
        assert!(matches!(err, ApiError::Conflict(ref d) if d == EMAIL_TAKEN));
    }
}
