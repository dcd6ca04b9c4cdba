use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::auth::AuthUser;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::leave::LeaveApplication;
use crate::model::role::Role;
use crate::state::AppState;

#[derive(Serialize, ToSchema)]
pub struct TeamMemberStatus {
    #[schema(example = "EMP001")]
    pub employee_id: String,
    #[schema(example = "Sarah Johnson")]
    pub name: String,
    #[schema(example = "Senior Developer")]
    pub position: String,
    /// Today's attendance record, if any.
    pub today: Option<AttendanceRecord>,
}

#[derive(Serialize, ToSchema)]
pub struct ManagerDashboard {
    pub pending_leave: Vec<LeaveApplication>,
    pub team: Vec<TeamMemberStatus>,
}

#[derive(Serialize, ToSchema)]
pub struct AdminDashboard {
    #[schema(example = 5)]
    pub employees: usize,
    #[schema(example = 3)]
    pub present_today: usize,
    #[schema(example = 1)]
    pub late_today: usize,
    #[schema(example = 1)]
    pub pending_leave: usize,
}

/// Review queue plus today's attendance for the caller's team. A manager
/// sees their own reports; an admin sees every employee.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/manager",
    responses(
        (status = 200, description = "Manager view", body = ManagerDashboard),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn manager_dashboard(
    auth: AuthUser,
    state: web::Data<AppState>,
) -> actix_web::Result<impl Responder> {
    auth.require_approver()?;

    let today = state.clock.today();
    let team_ids: Vec<String> = match state.identity.find(&auth.employee_id) {
        Some(actor) if actor.role == Role::Manager => actor.team_members.clone(),
        _ => state
            .identity
            .roster()
            .iter()
            .filter(|e| e.role == Role::Employee)
            .map(|e| e.id.clone())
            .collect(),
    };

    let team = team_ids
        .iter()
        .filter_map(|id| state.identity.find(id))
        .map(|member| {
            let today_record = state
                .attendance
                .by_employee(&member.id)
                .into_iter()
                .find(|r| r.date == today);
            TeamMemberStatus {
                employee_id: member.id.clone(),
                name: member.name.clone(),
                position: member.position.clone(),
                today: today_record,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(ManagerDashboard {
        pending_leave: state.leaves.pending(),
        team,
    }))
}

/// Organization-wide counts for the admin view.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/admin",
    responses(
        (status = 200, description = "Admin view", body = AdminDashboard),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn admin_dashboard(
    auth: AuthUser,
    state: web::Data<AppState>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let today_records = state.attendance.on_date(state.clock.today());
    let present_today = today_records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Present)
        .count();
    let late_today = today_records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Late)
        .count();

    Ok(HttpResponse::Ok().json(AdminDashboard {
        employees: state.identity.roster().len(),
        present_today,
        late_today,
        pending_leave: state.leaves.pending().len(),
    }))
}
