use std::str::FromStr;

use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::auth::auth::AuthUser;
use crate::gate;
use crate::ledger::leave::LeaveDraft;
use crate::model::leave::{LeaveApplication, LeaveStatus};
use crate::state::AppState;

#[derive(Deserialize, ToSchema)]
pub struct CreateLeave {
    #[schema(example = "annual")]
    pub leave_type: String,
    #[schema(example = "2026-01-01", format = "date")]
    pub start_date: String,
    #[schema(example = "2026-01-03", format = "date")]
    pub end_date: String,
    #[schema(example = "Family vacation in the mountains")]
    pub reason: String,
    /// Reviewer for the request; defaults to the employee's manager.
    #[schema(example = "EMP002")]
    pub approver: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct RejectLeave {
    #[schema(example = "Team is at capacity that week")]
    pub reason: String,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct LeaveFilter {
    /// Filter by employee ID
    #[schema(example = "EMP001")]
    pub employee_id: Option<String>,
    /// Filter by leave status
    #[schema(example = "pending")]
    pub status: Option<String>,
    /// Pagination page number (start with 1)
    #[schema(example = 1)]
    pub page: Option<u64>, // 1-based
    /// Pagination per page number
    #[schema(example = 10)]
    pub per_page: Option<u64>, // items per page
}

#[derive(Serialize, ToSchema)]
pub struct LeaveListResponse {
    pub data: Vec<LeaveApplication>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 10)]
    pub per_page: u32,
    #[schema(example = 1)]
    pub total: u64,
}

/* =========================
Create leave request
========================= */
/// Swagger doc for create_leave endpoint
#[utoipa::path(
    post,
    path = "/api/v1/leave",
    request_body(
        content = CreateLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave request submitted successfully",
         body = Object,
         example = json!({
            "message": "Leave request submitted",
            "application": { "id": "LA003", "status": "pending" }
         })
        ),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "message": "Validation failed",
            "errors": { "reason": "Reason must be at least 10 characters" }
        })),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn create_leave(
    auth: AuthUser,
    state: web::Data<AppState>,
    payload: web::Json<CreateLeave>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();

    // resolve the reviewer before touching the ledger
    let approver = match &payload.approver {
        Some(id) => match state.identity.find(id) {
            Some(e) if gate::can_approve_leave(e.role) => e.id.clone(),
            Some(_) => {
                return Ok(HttpResponse::BadRequest()
                    .json(json!({"message": "Approver must be a manager or admin"})));
            }
            None => {
                return Ok(
                    HttpResponse::BadRequest().json(json!({"message": "Unknown approver"}))
                );
            }
        },
        None => match state.identity.default_approver_for(&auth.employee_id) {
            Some(e) => e.id.clone(),
            None => {
                return Ok(HttpResponse::BadRequest()
                    .json(json!({"message": "No approver available for this employee"})));
            }
        },
    };

    let draft = LeaveDraft {
        leave_type: payload.leave_type,
        start_date: payload.start_date,
        end_date: payload.end_date,
        reason: payload.reason,
    };

    match state.leaves.apply(&auth.employee_id, &draft, &approver) {
        Ok(application) => Ok(HttpResponse::Ok().json(json!({
            "message": "Leave request submitted",
            "application": application
        }))),
        Err(e) => {
            tracing::info!(employee_id = %auth.employee_id, "Leave application rejected: {e}");
            Ok(e.to_response())
        }
    }
}

/* =========================
Approve leave (Manager/Admin)
========================= */
/// Swagger doc for approve_leave endpoint
#[utoipa::path(
    put,
    path = "/api/v1/leave/{leave_id}/approve",
    params(
        ("leave_id" = String, Path, description = "ID of the leave request to approve")
    ),
    responses(
        (status = 200, description = "Leave approved successfully", body = Object, example = json!({
            "message": "Leave approved"
        })),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Leave request already processed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn approve_leave(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let leave_id = path.into_inner();

    match state.leaves.approve(&leave_id, auth.role) {
        Ok(application) => Ok(HttpResponse::Ok().json(json!({
            "message": "Leave approved",
            "application": application
        }))),
        Err(e) => {
            tracing::info!(leave_id, actor = %auth.employee_id, "Approve rejected: {e}");
            Ok(e.to_response())
        }
    }
}

/* =========================
Reject leave (Manager/Admin)
========================= */
/// Swagger doc for reject_leave endpoint
#[utoipa::path(
    put,
    path = "/api/v1/leave/{leave_id}/reject",
    params(
        ("leave_id" = String, Path, description = "ID of the leave request to reject")
    ),
    request_body(content = RejectLeave, content_type = "application/json"),
    responses(
        (status = 200, description = "Leave rejected successfully", body = Object, example = json!({
            "message": "Leave rejected"
        })),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Leave request already processed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn reject_leave(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<RejectLeave>,
) -> actix_web::Result<impl Responder> {
    let leave_id = path.into_inner();

    match state.leaves.reject(&leave_id, auth.role, payload.reason.trim()) {
        Ok(application) => Ok(HttpResponse::Ok().json(json!({
            "message": "Leave rejected",
            "application": application
        }))),
        Err(e) => {
            tracing::info!(leave_id, actor = %auth.employee_id, "Reject rejected: {e}");
            Ok(e.to_response())
        }
    }
}

/// Applications awaiting review, for the manager/admin queue.
#[utoipa::path(
    get,
    path = "/api/v1/leave/pending",
    responses(
        (status = 200, description = "Pending leave applications", body = [LeaveApplication]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn pending_leave(
    auth: AuthUser,
    state: web::Data<AppState>,
) -> actix_web::Result<impl Responder> {
    auth.require_approver()?;
    Ok(HttpResponse::Ok().json(state.leaves.pending()))
}

/// for getting a leave application details endpoint
#[utoipa::path(
    get,
    path = "/api/v1/leave/{leave_id}",
    params(
        ("leave_id" = String, Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveApplication),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn get_leave(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let leave_id = path.into_inner();

    let application = match state.leaves.get(&leave_id) {
        Ok(application) => application,
        Err(e) => return Ok(e.to_response()),
    };

    // owners see their own; reviewers see everything
    if application.employee_id != auth.employee_id {
        auth.require_approver()?;
    }

    Ok(HttpResponse::Ok().json(application))
}

/// for getting leave applications endpoint
#[utoipa::path(
    get,
    path = "/api/v1/leave",
    params(LeaveFilter),
    responses(
        (status = 200, description = "Paginated leave list", body = LeaveListResponse),
        (status = 400, description = "Unknown status filter"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn leave_list(
    auth: AuthUser,
    state: web::Data<AppState>,
    query: web::Query<LeaveFilter>,
) -> actix_web::Result<impl Responder> {
    // -------------------------
    // Pagination
    // -------------------------
    let per_page = query.per_page.unwrap_or(10).min(100);
    let page = query.page.unwrap_or(1).max(1);

    // employees only ever see their own applications
    let employee_filter = if gate::can_approve_leave(auth.role) {
        query.employee_id.clone()
    } else {
        Some(auth.employee_id.clone())
    };

    let status_filter = match query.status.as_deref() {
        Some(raw) => match LeaveStatus::from_str(raw) {
            Ok(status) => Some(status),
            Err(_) => {
                return Ok(HttpResponse::BadRequest().json(json!({
                    "message": format!("Unknown status '{raw}', expected pending, approved or rejected")
                })));
            }
        },
        None => None,
    };

    let matching: Vec<LeaveApplication> = state
        .leaves
        .all()
        .into_iter()
        .filter(|l| {
            employee_filter
                .as_deref()
                .is_none_or(|id| l.employee_id == id)
        })
        .filter(|l| status_filter.is_none_or(|s| l.status == s))
        .collect();

    let total = matching.len() as u64;
    let data: Vec<LeaveApplication> = matching
        .into_iter()
        .skip(((page - 1) * per_page) as usize)
        .take(per_page as usize)
        .collect();

    Ok(HttpResponse::Ok().json(LeaveListResponse {
        data,
        page: page as u32,
        per_page: per_page as u32,
        total,
    }))
}
