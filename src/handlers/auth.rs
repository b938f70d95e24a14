use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::{
    cookie::{Cookie, CookieJar, SameSite},
    WithRejection,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{AuthenticatedUser, AUTH_COOKIE},
    models::auth::{AuthResponse, LoginUserPayload, UserDto},
};

// Handler de login: devolve o token e também o grava num cookie HttpOnly
pub async fn login(
    State(app_state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(payload), _): WithRejection<Json<LoginUserPayload>, AppError>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    payload.validate()?;

    let (token, user) = app_state
        .auth_service
        .login_user(&payload.user_name, &payload.password)
        .await?;

    let cookie = Cookie::build((AUTH_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict);

    Ok((jar.add(cookie), Json(AuthResponse { token, user })))
}

// Handler da rota protegida /me
pub async fn get_me(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<UserDto>, AppError> {
    let user_id = user.user_id().ok_or(AppError::Unauthorized)?;
    let me = app_state.auth_service.current_user(user_id).await?;
    Ok(Json(me))
}

// Sempre envia o cookie expirado, mesmo que o cliente não tenha mandado um
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let mut cookie = Cookie::build((AUTH_COOKIE, "")).path("/").build();
    cookie.make_removal();
    (jar.add(cookie), StatusCode::OK)
}
