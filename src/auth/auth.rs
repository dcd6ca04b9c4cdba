use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorUnauthorized, web::Data};
use futures::future::{Ready, ready};

use crate::auth::jwt::verify_token;
use crate::config::Config;
use crate::gate;
use crate::model::role::Role;

/// The authenticated caller, reconstructed from the bearer token.
pub struct AuthUser {
    pub employee_id: String,
    pub name: String,
    pub role: Role,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = match req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
        {
            Some(t) => t,
            None => return ready(Err(ErrorUnauthorized("Missing token"))),
        };

        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => {
                return ready(Err(actix_web::error::ErrorInternalServerError(
                    "Config missing",
                )));
            }
        };

        let claims = match verify_token(token, &config.jwt_secret) {
            Ok(c) => c,
            Err(_) => return ready(Err(ErrorUnauthorized("Invalid token"))),
        };

        let role = match Role::from_id(claims.role) {
            Some(r) => r,
            None => return ready(Err(ErrorUnauthorized("Invalid role"))),
        };

        ready(Ok(AuthUser {
            employee_id: claims.sub,
            name: claims.name,
            role,
        }))
    }
}

impl AuthUser {
    /// Manager or admin, the roles allowed to review leave.
    pub fn require_approver(&self) -> actix_web::Result<()> {
        if gate::can_approve_leave(self.role) {
            Ok(())
        } else {
            Err(actix_web::error::ErrorForbidden("Manager/Admin only"))
        }
    }

    pub fn require_admin(&self) -> actix_web::Result<()> {
        if gate::can_view_admin_dashboard(self.role) {
            Ok(())
        } else {
            Err(actix_web::error::ErrorForbidden("Admin only"))
        }
    }
}
