use crate::{
    db,
    error::{ApiError, ErrorBody},
    model::{AttendanceRecord, AttendanceStatus, NewAttendance},
    utils::validation::require_non_empty,
};
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;
use utoipa::ToSchema;

/// Date and status arrive as text and are checked after the employee lookup,
/// so an unknown employee is reported as such whatever else is wrong.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateAttendance {
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    #[schema(example = "2024-01-01", format = "date")]
    pub date: String,
    #[schema(example = "Present", value_type = AttendanceStatus)]
    pub status: String,
}

impl CreateAttendance {
    pub fn validate(&self) -> Result<NewAttendance, ApiError> {
        let employee_id = require_non_empty("employee_id", "Employee ID", &self.employee_id)?;
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|_| {
            ApiError::validation("date", "Date must be a calendar date in YYYY-MM-DD format")
        })?;
        let status = AttendanceStatus::from_str(self.status.trim()).map_err(|_| {
            ApiError::validation("status", r#"Status must be "Present" or "Absent""#)
        })?;

        Ok(NewAttendance {
            employee_id,
            date,
            status,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PresentDaysResponse {
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    #[schema(example = 12)]
    pub present_days: i64,
}

const DATE_TAKEN: &str = "Attendance record for this date already exists";

/// Mark attendance for one employee on one day
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = CreateAttendance,
    responses(
        (status = 201, description = "Attendance recorded", body = AttendanceRecord),
        (status = 400, description = "Attendance already recorded for this date", body = ErrorBody, example = json!({
            "detail": "Attendance record for this date already exists"
        })),
        (status = 404, description = "Employee not found", body = ErrorBody, example = json!({
            "detail": "Employee not found"
        })),
        (status = 422, description = "Validation error", body = ErrorBody, example = json!({
            "detail": "Status must be \"Present\" or \"Absent\"",
            "field": "status"
        }))
    ),
    tag = "Attendance"
)]
pub async fn create_attendance(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateAttendance>,
) -> Result<HttpResponse, ApiError> {
    let mut conn = pool.acquire().await?;

    if !db::employee::exists(&mut conn, payload.employee_id.trim()).await? {
        return Err(ApiError::employee_not_found());
    }

    let new_record = payload.validate()?;

    if db::attendance::exists_on(&mut conn, &new_record.employee_id, new_record.date).await? {
        return Err(ApiError::Conflict(DATE_TAKEN.into()));
    }

    // Single autocommit statement: the UNIQUE (employee_id, date) constraint
    // rejects a concurrent duplicate, and an employee deleted in the meantime
    // yields no row.
    let record = db::attendance::insert(&mut conn, &new_record)
        .await
        .map_err(|e| ApiError::on_unique_violation(e, DATE_TAKEN))?
        .ok_or_else(ApiError::employee_not_found)?;

    info!(
        employee_id = %record.employee_id,
        date = %record.date,
        status = %record.status,
        "Attendance recorded"
    );
    Ok(HttpResponse::Created().json(record))
}

#[utoipa::path(
    get,
    path = "/api/attendance",
    responses(
        (status = 200, description = "Attendance records of every employee", body = [AttendanceRecord])
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let mut conn = pool.acquire().await?;
    let records = db::attendance::list_all(&mut conn).await?;

    Ok(HttpResponse::Ok().json(records))
}

#[utoipa::path(
    get,
    path = "/api/attendance/{employee_id}",
    params(
        ("employee_id", Path, description = "Externally assigned employee ID")
    ),
    responses(
        (status = 200, description = "Attendance records of the employee", body = [AttendanceRecord]),
        (status = 404, description = "Employee not found", body = ErrorBody, example = json!({
            "detail": "Employee not found"
        }))
    ),
    tag = "Attendance"
)]
pub async fn employee_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();
    let mut conn = pool.acquire().await?;

    if !db::employee::exists(&mut conn, &employee_id).await? {
        return Err(ApiError::employee_not_found());
    }

    let records = db::attendance::list_for_employee(&mut conn, &employee_id).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Number of days the employee was marked present
#[utoipa::path(
    get,
    path = "/api/attendance/{employee_id}/present-days",
    params(
        ("employee_id", Path, description = "Externally assigned employee ID")
    ),
    responses(
        (status = 200, description = "Present day count", body = PresentDaysResponse),
        (status = 404, description = "Employee not found", body = ErrorBody, example = json!({
            "detail": "Employee not found"
        }))
    ),
    tag = "Attendance"
)]
pub async fn present_days(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();
    let mut conn = pool.acquire().await?;

    if !db::employee::exists(&mut conn, &employee_id).await? {
        return Err(ApiError::employee_not_found());
    }

    let present_days =
        db::attendance::count_with_status(&mut conn, &employee_id, AttendanceStatus::Present)
            .await?;

    Ok(HttpResponse::Ok().json(PresentDaysResponse {
        employee_id,
        present_days,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(date: &str, status: &str) -> CreateAttendance {
        CreateAttendance {
            employee_id: " E1 ".into(),
            date: date.into(),
            status: status.into(),
        }
    }

    #[test]
    fn accepts_both_statuses() {
        let present = payload("2024-01-01", "Present").validate().unwrap();
        assert_eq!(present.employee_id, "E1");
        assert_eq!(present.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(present.status, AttendanceStatus::Present);

        assert_eq!(
            payload("2024-01-02", "Absent").validate().unwrap().status,
            AttendanceStatus::Absent
        );
    }

    #[test]
    fn rejects_status_outside_enum() {
        for status in ["Late", "present", ""] {
            match payload("2024-01-01", status).validate() {
                Err(ApiError::Validation { field, message }) => {
                    assert_eq!(field.as_deref(), Some("status"));
                    assert_eq!(message, r#"Status must be "Present" or "Absent""#);
                }
                other => panic!("expected validation error for {status:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_impossible_or_timestamped_dates() {
        for date in ["2024-02-30", "01/02/2024", "2024-01-01T09:00:00", ""] {
            match payload(date, "Present").validate() {
                Err(ApiError::Validation { field, .. }) => {
                    assert_eq!(field.as_deref(), Some("date"))
                }
                other => panic!("expected validation error for {date:?}, got {other:?}"),
            }
        }
    }
}
