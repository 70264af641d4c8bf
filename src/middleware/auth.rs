use axum::{extract::FromRequestParts, http::header};
use jsonwebtoken::{DecodingKey, Validation, decode};
use uuid::Uuid;

use crate::{dto::auth::Claims, error::AppError};

pub const SESSION_COOKIE: &str = "session";

/// The authenticated actor, decoded from the session token. Every domain
/// operation that mutates state takes one of these explicitly.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub is_admin: bool,
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    if !user.is_admin {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

/// Pull the raw token from either the Authorization header or the session
/// cookie. Header wins when both are present.
fn extract_token(parts: &axum::http::request::Parts) -> Option<String> {
    if let Some(value) = parts.headers.get(header::AUTHORIZATION) {
        let value = value.to_str().ok()?;
        let token = value.strip_prefix("Bearer ")?.trim();
        return Some(token.to_string());
    }

    let cookies = parts.headers.get(header::COOKIE)?.to_str().ok()?;
    cookie_value(cookies, SESSION_COOKIE).map(str::to_string)
}

fn cookie_value<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then_some(value)
    })
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts).ok_or(AppError::Unauthorized)?;

        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| AppError::Internal(anyhow::anyhow!("JWT_SECRET is not set")))?;

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::Unauthorized)?;

        let user_id = Uuid::parse_str(&decoded.claims.sub).map_err(|_| AppError::Unauthorized)?;

        Ok(AuthUser {
            user_id,
            is_admin: decoded.claims.admin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_admin_rejects_regular_user() {
        let user = AuthUser {
            user_id: Uuid::new_v4(),
            is_admin: false,
        };
        assert!(matches!(ensure_admin(&user), Err(AppError::Forbidden)));
    }

    #[test]
    fn ensure_admin_accepts_admin() {
        let admin = AuthUser {
            user_id: Uuid::new_v4(),
            is_admin: true,
        };
        assert!(ensure_admin(&admin).is_ok());
    }

    #[test]
    fn cookie_value_finds_session_among_others() {
        let cookies = "theme=dark; session=abc.def.ghi; lang=en";
        assert_eq!(cookie_value(cookies, "session"), Some("abc.def.ghi"));
    }

    #[test]
    fn cookie_value_ignores_cleared_cookie() {
        assert_eq!(cookie_value("session=", "session"), None);
        assert_eq!(cookie_value("other=1", "session"), None);
    }
}
