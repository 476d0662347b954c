use crate::api::attendance::{CreateAttendance, PresentDaysResponse};
use crate::api::employee::CreateEmployee;
use crate::error::ErrorBody;
use crate::model::{AttendanceRecord, AttendanceStatus, Employee};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## HRMS Lite

A small Human Resource Management service for keeping **employee records** and
**daily attendance**.

### Key Features
- **Employee Management**
  - Create, list, view and delete employees (deleting also removes their attendance)
- **Attendance Management**
  - Mark an employee `Present` or `Absent` for a day, list records, count present days

### Response Format
- JSON request and response bodies, dates as `YYYY-MM-DD`
- Errors carry a human-readable `detail` (and `field` for validation errors)
"#,
    ),
    paths(
        crate::api::health::index,
        crate::api::health::health,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::create_attendance,
        crate::api::attendance::list_attendance,
        crate::api::attendance::employee_attendance,
        crate::api::attendance::present_days
    ),
    components(
        schemas(
            Employee,
            CreateEmployee,
            AttendanceRecord,
            AttendanceStatus,
            CreateAttendance,
            PresentDaysResponse,
            ErrorBody
        )
    ),
    tags(
        (name = "Health", description = "Liveness endpoints"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
    )
)]
pub struct ApiDoc;
