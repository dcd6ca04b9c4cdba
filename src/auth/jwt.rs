use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::model::employee::EmployeeProfile;
use crate::models::{Claims, TokenType};

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

fn claims_for(user: &EmployeeProfile, token_type: TokenType, ttl: usize) -> Claims {
    Claims {
        sub: user.id.clone(),
        name: user.name.clone(),
        role: user.role.id(),
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
        token_type,
    }
}

pub fn generate_access_token(user: &EmployeeProfile, secret: &str, ttl: usize) -> String {
    encode(
        &Header::default(),
        &claims_for(user, TokenType::Access, ttl),
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn generate_refresh_token(user: &EmployeeProfile, secret: &str, ttl: usize) -> String {
    encode(
        &Header::default(),
        &claims_for(user, TokenType::Refresh, ttl),
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn access_token_round_trips_identity_and_role() {
        let profile = seed::demo_roster()[1].profile(); // EMP002, manager
        let token = generate_access_token(&profile, "test-secret", 900);
        let claims = verify_token(&token, "test-secret").unwrap();
        assert_eq!(claims.sub, "EMP002");
        assert_eq!(claims.name, "Michael Chen");
        assert_eq!(claims.role, 2);
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let profile = seed::demo_roster()[0].profile();
        let token = generate_access_token(&profile, "test-secret", 900);
        assert!(verify_token(&token, "other-secret").is_err());
    }
}
