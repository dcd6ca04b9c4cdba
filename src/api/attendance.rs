use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::auth::auth::AuthUser;
use crate::model::attendance::{AttendanceRecord, AttendanceSummary};
use crate::state::AppState;
use crate::utils::date::{month_range, week_range};

const DEFAULT_LOCATION: &str = "Office - Main Building";

#[derive(Deserialize, ToSchema)]
pub struct CheckInReq {
    #[schema(example = "Office - Main Building")]
    pub location: Option<String>,
}

#[derive(Deserialize, IntoParams)]
pub struct HistoryQuery {
    /// Another employee's history; manager/admin only.
    pub employee_id: Option<String>,
}

#[derive(Deserialize, IntoParams)]
pub struct SummaryQuery {
    /// "week" (default) or "month".
    pub period: Option<String>,
    /// Another employee's summary; manager/admin only.
    pub employee_id: Option<String>,
}

/// Whose records the caller may read: their own, or anyone's for reviewers.
fn resolve_subject(auth: &AuthUser, requested: Option<&str>) -> actix_web::Result<String> {
    match requested {
        Some(id) if id != auth.employee_id => {
            auth.require_approver()?;
            Ok(id.to_string())
        }
        _ => Ok(auth.employee_id.clone()),
    }
}

/// Check-in endpoint
#[utoipa::path(
    post,
    path = "/api/v1/attendance/check-in",
    request_body(content = CheckInReq, content_type = "application/json"),
    responses(
        (status = 200, description = "Checked in successfully", body = AttendanceRecord),
        (status = 400, description = "Already checked in today", body = Object, example = json!({
            "message": "Already checked in today"
        })),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn check_in(
    auth: AuthUser,
    state: web::Data<AppState>,
    payload: Option<web::Json<CheckInReq>>,
) -> actix_web::Result<impl Responder> {
    let location = payload
        .and_then(|p| p.into_inner().location)
        .unwrap_or_else(|| DEFAULT_LOCATION.to_string());

    match state
        .attendance
        .check_in(&auth.employee_id, state.clock.now(), &location)
    {
        Ok(record) => Ok(HttpResponse::Ok().json(json!({
            "message": "Checked in successfully",
            "record": record
        }))),
        Err(e) => {
            tracing::info!(employee_id = %auth.employee_id, "Check-in rejected: {e}");
            Ok(e.to_response())
        }
    }
}

/// Check-out endpoint
#[utoipa::path(
    put,
    path = "/api/v1/attendance/check-out",
    responses(
        (status = 200, description = "Checked out successfully", body = AttendanceRecord),
        (status = 400, description = "No active check-in found for today", body = Object, example = json!({
            "message": "No active check-in found for today"
        })),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn check_out(
    auth: AuthUser,
    state: web::Data<AppState>,
) -> actix_web::Result<impl Responder> {
    match state
        .attendance
        .check_out(&auth.employee_id, state.clock.now())
    {
        Ok(record) => Ok(HttpResponse::Ok().json(json!({
            "message": "Checked out successfully",
            "record": record
        }))),
        Err(e) => {
            tracing::info!(employee_id = %auth.employee_id, "Check-out rejected: {e}");
            Ok(e.to_response())
        }
    }
}

/// Attendance history, insertion order.
#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Attendance records", body = [AttendanceRecord]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn history(
    auth: AuthUser,
    state: web::Data<AppState>,
    query: web::Query<HistoryQuery>,
) -> actix_web::Result<impl Responder> {
    let subject = resolve_subject(&auth, query.employee_id.as_deref())?;
    Ok(HttpResponse::Ok().json(state.attendance.by_employee(&subject)))
}

/// Weekly or monthly status counts.
#[utoipa::path(
    get,
    path = "/api/v1/attendance/summary",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Status counts for the period", body = AttendanceSummary),
        (status = 400, description = "Unknown period"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn summary(
    auth: AuthUser,
    state: web::Data<AppState>,
    query: web::Query<SummaryQuery>,
) -> actix_web::Result<impl Responder> {
    let subject = resolve_subject(&auth, query.employee_id.as_deref())?;

    let today = state.clock.today();
    let (from, to) = match query.period.as_deref().unwrap_or("week") {
        "week" => week_range(today),
        "month" => month_range(today),
        other => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "message": format!("Unknown period '{other}', expected week or month")
            })));
        }
    };

    Ok(HttpResponse::Ok().json(state.attendance.summary(&subject, from, to)))
}
