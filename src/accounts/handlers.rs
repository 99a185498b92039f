use super::protocol::CredentialsRequest;
use super::service::AccountService;
use super::session::{CurrentAccount, SessionSigner};
use crate::error::AppError;

use axum::{
    Extension, Json,
    extract::rejection::JsonRejection,
    http::{StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn handle_login(
    Extension(accounts): Extension<Arc<AccountService>>,
    Extension(signer): Extension<Arc<SessionSigner>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let account = accounts.authenticate(&req.username, &req.password).await?;
    tracing::info!("Login: {}", account.value.name);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, signer.session_cookie(&account.id))],
    ))
}

pub async fn handle_register(
    Extension(accounts): Extension<Arc<AccountService>>,
    Extension(signer): Extension<Arc<SessionSigner>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let account = accounts.register(&req.username, &req.password).await?;

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, signer.session_cookie(&account.id))],
    ))
}

pub async fn handle_logout(
    CurrentAccount(account): CurrentAccount,
    Extension(signer): Extension<Arc<SessionSigner>>,
) -> impl IntoResponse {
    tracing::info!("Logout: {}", account.value.name);
    (StatusCode::OK, [(header::SET_COOKIE, signer.clear_cookie())])
}
