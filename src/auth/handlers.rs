use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, error, info, instrument};
use utoipa::ToSchema;

use crate::auth::jwt::{generate_access_token, generate_refresh_token, verify_token};
use crate::config::Config;
use crate::model::employee::EmployeeProfile;
use crate::models::{LoginReqDto, TokenType};
use crate::state::AppState;

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: EmployeeProfile,
}

/// Login handler
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body(
        content = LoginReqDto,
        description = "Employee credentials",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing employee id or password"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(user, state, config),
    fields(employee_id = %user.employee_id)
)]
pub async fn login(
    user: web::Json<LoginReqDto>,
    state: web::Data<AppState>,
    config: web::Data<Config>,
) -> impl Responder {
    info!("Login request received");

    if user.employee_id.trim().is_empty() || user.password.is_empty() {
        info!("Validation failed: empty employee id or password");
        return HttpResponse::BadRequest()
            .json(json!({"message": "Employee ID and password are required"}));
    }

    let profile = match state
        .identity
        .authenticate(user.employee_id.trim(), &user.password)
    {
        Ok(profile) => profile,
        Err(e) => {
            info!("Invalid credentials");
            return e.to_response();
        }
    };

    debug!("Generating tokens");
    let access_token = generate_access_token(&profile, &config.jwt_secret, config.access_token_ttl);
    let refresh_token =
        generate_refresh_token(&profile, &config.jwt_secret, config.refresh_token_ttl);

    info!("Login successful");

    HttpResponse::Ok().json(LoginResponse {
        access_token,
        refresh_token,
        user: profile,
    })
}

/// Exchanges a refresh token for a fresh token pair.
#[utoipa::path(
    post,
    path = "/auth/refresh",
    responses(
        (status = 200, description = "New token pair", body = LoginResponse),
        (status = 401, description = "Missing, invalid or non-refresh token")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn refresh_token(
    req: HttpRequest,
    state: web::Data<AppState>,
    config: web::Data<Config>,
) -> impl Responder {
    let header = match req.headers().get("Authorization") {
        Some(h) => h.to_str().unwrap_or(""),
        None => return HttpResponse::Unauthorized().body("No token"),
    };

    let token = match header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return HttpResponse::Unauthorized().body("Invalid token"),
    };

    let claims = match verify_token(token, &config.jwt_secret) {
        Ok(c) => c,
        Err(_) => return HttpResponse::Unauthorized().finish(),
    };

    if claims.token_type != TokenType::Refresh {
        return HttpResponse::Unauthorized().finish();
    }

    // the subject must still be on the roster
    let profile = match state.identity.find(&claims.sub) {
        Some(employee) => employee.profile(),
        None => return HttpResponse::Unauthorized().finish(),
    };

    let access_token = generate_access_token(&profile, &config.jwt_secret, config.access_token_ttl);
    let refresh_token =
        generate_refresh_token(&profile, &config.jwt_secret, config.refresh_token_ttl);

    HttpResponse::Ok().json(LoginResponse {
        access_token,
        refresh_token,
        user: profile,
    })
}

/// The session restored from the key-value store, if one is persisted.
#[utoipa::path(
    get,
    path = "/auth/session",
    responses(
        (status = 200, description = "Restored session", body = EmployeeProfile),
        (status = 404, description = "No active session")
    ),
    tag = "Auth"
)]
pub async fn session(state: web::Data<AppState>) -> impl Responder {
    match state.identity.current_session() {
        Some(profile) => HttpResponse::Ok().json(profile),
        None => HttpResponse::NotFound().json(json!({"message": "No active session"})),
    }
}

/// Clears the persisted session. Always succeeds from the caller's view.
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses((status = 204, description = "Session cleared")),
    tag = "Auth"
)]
pub async fn logout(state: web::Data<AppState>) -> impl Responder {
    if let Err(e) = state.identity.end_session() {
        error!(error = %e, "Failed to clear persisted session");
    }
    HttpResponse::NoContent().finish()
}
