use super::*;
use axum::http::Request;
use jsonwebtoken::{EncodingKey, Header, encode};

const SECRET: &str = "supersecretjwtsecretforunittesting123";

fn token_for(claims: &AppClaims, secret: &str) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn claims(sub: &str, role: &str, exp: usize) -> AppClaims {
    AppClaims {
        sub: sub.to_string(),
        role: role.to_string(),
        email: Some("student@example.com".to_string()),
        exp,
    }
}

#[test]
fn test_validate_jwt_success() {
    let my_claims = claims("admin-1", "ADMIN", 9999999999);
    let token = token_for(&my_claims, SECRET);

    let decoded = validate_jwt(&token, SECRET).expect("Valid token should pass");
    assert_eq!(decoded.sub, "admin-1");
    assert_eq!(decoded.email, my_claims.email);
}

#[test]
fn test_validate_jwt_expired() {
    let token = token_for(&claims("admin-1", "ADMIN", 1), SECRET);
    assert!(validate_jwt(&token, SECRET).is_err());
}

#[test]
fn test_validate_jwt_invalid_signature() {
    let token = token_for(&claims("admin-1", "ADMIN", 9999999999), "wrongsecret");
    assert!(validate_jwt(&token, SECRET).is_err());
}

#[test]
fn test_validate_jwt_rejects_empty_subject() {
    let token = token_for(&claims("  ", "USER", 9999999999), SECRET);
    assert!(validate_jwt(&token, SECRET).is_err());
}

#[test]
fn test_admin_role_is_case_insensitive() {
    let user = AuthUser {
        user_id: "admin-1".to_string(),
        email: None,
        role: "admin".to_string(),
    };
    assert!(user.is_admin());

    let student = AuthUser {
        role: "STUDENT".to_string(),
        ..user
    };
    assert!(!student.is_admin());
}

#[test]
fn test_bearer_token_requires_scheme() {
    let (parts, _) = Request::builder()
        .header("Authorization", "Token abc")
        .body(())
        .unwrap()
        .into_parts();
    let err = bearer_token(&parts).unwrap_err();
    assert_eq!(err.0, StatusCode::UNAUTHORIZED);

    let (parts, _) = Request::builder()
        .header("Authorization", "Bearer abc")
        .body(())
        .unwrap()
        .into_parts();
    assert_eq!(bearer_token(&parts).unwrap(), "abc");
}

fn request_parts(token: &str, auth: Option<Auth>) -> Parts {
    let mut builder = Request::builder().header("Authorization", format!("Bearer {token}"));
    if let Some(auth) = auth {
        builder = builder.extension(auth);
    }
    builder.body(()).unwrap().into_parts().0
}

#[tokio::test]
async fn test_extractor_uses_configured_secret() {
    let token = token_for(&claims("user-42", "USER", 9999999999), SECRET);
    let mut parts = request_parts(
        &token,
        Some(Auth {
            jwt_secret: SECRET.to_string(),
        }),
    );

    let user = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();

    assert_eq!(user.user_id, "user-42");
    assert!(!user.is_admin());
}

#[tokio::test]
async fn test_extractor_without_auth_config_is_server_error() {
    let token = token_for(&claims("user-42", "USER", 9999999999), SECRET);
    let mut parts = request_parts(&token, None);

    let (status, _) = AuthUser::from_request_parts(&mut parts, &())
        .await
        .unwrap_err();

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
