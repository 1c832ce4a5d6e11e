use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Form, Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginForm, RegisterRequest, TokenResponse},
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::User,
    },
    error::ApiError,
    state::AppState,
};

const EMAIL_TAKEN: &str = "Email already registered";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::BadRequest(EMAIL_TAKEN));
    }

    let hash = hash_password(&payload.password)?;

    let user = match User::create(&state.db, &payload.email, &hash).await {
        Ok(u) => u,
        // Lost a race against a concurrent registration of the same email.
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            warn!(email = %payload.email, "email already registered");
            return Err(ApiError::BadRequest(EMAIL_TAKEN));
        }
        Err(e) => return Err(e.into()),
    };

    let access_token = JwtKeys::from_ref(&state).sign(user.id)?;

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok((StatusCode::CREATED, Json(TokenResponse::bearer(access_token))))
}

#[instrument(skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = match User::find_by_email(&state.db, &form.username).await? {
        Some(u) if verify_password(&form.password, &u.hashed_password) => u,
        Some(u) => {
            warn!(user_id = u.id, "login invalid password");
            return Err(ApiError::BadRequest(INVALID_CREDENTIALS));
        }
        None => {
            warn!(email = %form.username, "login unknown email");
            return Err(ApiError::BadRequest(INVALID_CREDENTIALS));
        }
    };

    let access_token = JwtKeys::from_ref(&state).sign(user.id)?;

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok(Json(TokenResponse::bearer(access_token)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_serialization() {
        let json = serde_json::to_value(TokenResponse::bearer("abc".into())).unwrap();
        assert_eq!(json["access_token"], "abc");
        assert_eq!(json["token_type"], "bearer");
    }

    #[tokio::test]
    async fn login_form_parses_password_grant_fields() {
        use axum::{body::Body, extract::FromRequest, http::Request};

        let req = Request::builder()
            .method("POST")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("username=a%40a.com&password=x&grant_type=password"))
            .unwrap();
        let Form(form) = Form::<LoginForm>::from_request(req, &()).await.unwrap();
        assert_eq!(form.username, "a@a.com");
        assert_eq!(form.password, "x");
    }
}
