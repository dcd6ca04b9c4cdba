use actix_web::{HttpResponse, Responder, web};
use serde_json::json;

use crate::auth::auth::AuthUser;
use crate::model::employee::EmployeeProfile;
use crate::state::AppState;

/// The caller's own roster entry, leave balance included.
#[utoipa::path(
    get,
    path = "/api/v1/employee/me",
    responses(
        (status = 200, description = "Own profile", body = EmployeeProfile),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No roster entry for this session")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn me(auth: AuthUser, state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    match state.identity.find(&auth.employee_id) {
        Some(employee) => Ok(HttpResponse::Ok().json(employee.profile())),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": format!("Employee not found: {}", auth.employee_id)
        }))),
    }
}

/// Full roster, admin only.
#[utoipa::path(
    get,
    path = "/api/v1/employee",
    responses(
        (status = 200, description = "All employees", body = [EmployeeProfile]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn list_employees(
    auth: AuthUser,
    state: web::Data<AppState>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let profiles: Vec<EmployeeProfile> = state
        .identity
        .roster()
        .iter()
        .map(|e| e.profile())
        .collect();
    Ok(HttpResponse::Ok().json(profiles))
}
