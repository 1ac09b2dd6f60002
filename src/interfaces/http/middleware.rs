//! Authentication middleware
//!
//! Verifies the JWT from the `Authorization` header and stores a typed
//! [`Caller`] in the request extensions. Handlers hand that context to the
//! facades, which decide authorization themselves.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::{Caller, UserContext};
use crate::domain::Role;
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig, TokenClaims};

/// Authentication state shared by the middleware
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

fn caller_from_claims(claims: TokenClaims) -> Option<Caller> {
    let id: i32 = claims.sub.parse().ok()?;
    let roles: Vec<Role> = claims
        .roles
        .iter()
        .filter_map(|name| Role::from_str(name))
        .collect();
    Some(Caller::User(UserContext {
        id,
        username: claims.username,
        roles,
    }))
}

fn verified_caller(request: &Request<Body>, auth_state: &AuthState) -> Option<Caller> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?;
    let token = extract_token(auth_header)?;
    let claims = verify_token(token, &auth_state.jwt_config).ok()?;
    if claims.is_expired() {
        return None;
    }
    caller_from_claims(claims)
}

/// Required authentication - rejects requests without a valid token
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match verified_caller(&request, &auth_state) {
        Some(caller) => {
            request.extensions_mut().insert(caller);
            next.run(request).await
        }
        None => auth_error_response(),
    }
}

/// Optional authentication - anonymous requests pass through with
/// `Caller::Anonymous`
pub async fn optional_auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let caller = verified_caller(&request, &auth_state).unwrap_or(Caller::Anonymous);
    request.extensions_mut().insert(caller);
    next.run(request).await
}

fn auth_error_response() -> Response {
    let body = Json(json!({
        "success": false,
        "error": "Missing or invalid authentication token"
    }));
    (StatusCode::UNAUTHORIZED, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::crypto::jwt::create_token;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 1,
            issuer: "gameclub".to_string(),
        }
    }

    fn request_with_auth(value: &str) -> Request<Body> {
        Request::builder()
            .header(header::AUTHORIZATION, value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn bearer_token_yields_user_caller() {
        let cfg = config();
        let token = create_token(42, "alice", vec!["member".to_string()], &cfg).unwrap();
        let request = request_with_auth(&format!("Bearer {token}"));

        let caller = verified_caller(&request, &AuthState { jwt_config: cfg }).unwrap();
        let ctx = caller.user().unwrap();
        assert_eq!(ctx.id, 42);
        assert_eq!(ctx.roles, vec![Role::Member]);
    }

    #[test]
    fn malformed_headers_yield_no_caller() {
        let state = AuthState {
            jwt_config: config(),
        };
        let no_scheme = request_with_auth("some-raw-token");
        assert!(verified_caller(&no_scheme, &state).is_none());

        let bad_token = request_with_auth("Bearer not-a-jwt");
        assert!(verified_caller(&bad_token, &state).is_none());

        let no_header = Request::builder().body(Body::empty()).unwrap();
        assert!(verified_caller(&no_header, &state).is_none());
    }

    #[test]
    fn unknown_role_names_are_dropped() {
        let cfg = config();
        let token = create_token(
            7,
            "carol",
            vec!["member".to_string(), "janitor".to_string()],
            &cfg,
        )
        .unwrap();
        let request = request_with_auth(&format!("Bearer {token}"));
        let caller = verified_caller(&request, &AuthState { jwt_config: cfg }).unwrap();
        assert_eq!(caller.user().unwrap().roles, vec![Role::Member]);
    }
}
