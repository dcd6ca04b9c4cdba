use crate::api::attendance::CheckInReq;
use crate::api::dashboard::{AdminDashboard, ManagerDashboard, TeamMemberStatus};
use crate::api::leave::{CreateLeave, LeaveFilter, LeaveListResponse, RejectLeave};
use crate::auth::handlers::LoginResponse;
use crate::error::FieldError;
use crate::ledger::leave::LeaveDraft;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus, AttendanceSummary};
use crate::model::employee::{EmployeeProfile, LeaveBalance};
use crate::model::leave::{LeaveApplication, LeaveStatus, LeaveType};
use crate::model::role::Role;
use crate::models::LoginReqDto;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendly API",
        version = "1.0.0",
        description = r#"
## Employee Attendance & Leave Management

This API powers an employee attendance and leave-management system.

### Key Features
- **Authentication**
  - Login, session restore, token refresh and logout
- **Attendance**
  - Daily check-in/check-out, history and weekly/monthly summaries
- **Leave Management**
  - Apply for leave, approve/reject requests, review queues
- **Dashboards**
  - Manager team view and admin organization view

### Security
Protected endpoints use **JWT Bearer authentication**. Leave review and the
dashboards are restricted to **Manager**/**Admin** roles.

### Response Format
JSON responses; failures carry a `message` (and field-keyed `errors` for
validation problems).
"#,
    ),
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::refresh_token,
        crate::auth::handlers::session,
        crate::auth::handlers::logout,

        crate::api::leave::leave_list,
        crate::api::leave::pending_leave,
        crate::api::leave::get_leave,
        crate::api::leave::create_leave,
        crate::api::leave::approve_leave,
        crate::api::leave::reject_leave,

        crate::api::attendance::check_in,
        crate::api::attendance::check_out,
        crate::api::attendance::history,
        crate::api::attendance::summary,

        crate::api::employee::me,
        crate::api::employee::list_employees,

        crate::api::dashboard::manager_dashboard,
        crate::api::dashboard::admin_dashboard
    ),
    components(
        schemas(
            LoginReqDto,
            LoginResponse,
            EmployeeProfile,
            LeaveBalance,
            Role,
            FieldError,
            CheckInReq,
            AttendanceRecord,
            AttendanceStatus,
            AttendanceSummary,
            LeaveDraft,
            CreateLeave,
            RejectLeave,
            LeaveFilter,
            LeaveListResponse,
            LeaveApplication,
            LeaveType,
            LeaveStatus,
            ManagerDashboard,
            TeamMemberStatus,
            AdminDashboard
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Authentication and session APIs"),
        (name = "Leave", description = "Leave management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
        (name = "Employee", description = "Employee profile APIs"),
        (name = "Dashboard", description = "Role-differentiated dashboard APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
