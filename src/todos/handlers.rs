use super::protocol::{
    CreateTodoRequest, ListQuery, PatchTodoRequest, TodoResponse, parse_todo_id,
};
use super::service::TodoService;
use crate::accounts::CurrentAccount;
use crate::error::AppError;

use axum::{
    Extension, Json,
    extract::{
        Path, Query,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use std::sync::Arc;

pub async fn handle_list_todos(
    account: CurrentAccount,
    Extension(todos): Extension<Arc<TodoService>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<TodoResponse>>, AppError> {
    let Query(query) = query?;

    let items = todos
        .list(account.id(), query.filter, query.order_by)
        .await?;

    tracing::debug!("Listing {} to-dos for {}", items.len(), account.id());
    Ok(Json(items.into_iter().map(TodoResponse::from).collect()))
}

pub async fn handle_create_todo(
    account: CurrentAccount,
    Extension(todos): Extension<Arc<TodoService>>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<Json<TodoResponse>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let item = todos.create(account.id(), req.description).await?;
    Ok(Json(item.into()))
}

pub async fn handle_patch_todo(
    account: CurrentAccount,
    Extension(todos): Extension<Arc<TodoService>>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<PatchTodoRequest>, JsonRejection>,
) -> Result<Json<TodoResponse>, AppError> {
    let Path(raw_id) = id?;
    let id = parse_todo_id(&raw_id)?;
    let Json(req) = payload?;
    let patch = req.validate()?;

    let item = todos.patch(&id, account.id(), patch).await?;
    Ok(Json(item.into()))
}

pub async fn handle_delete_todo(
    account: CurrentAccount,
    Extension(todos): Extension<Arc<TodoService>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(raw_id) = id?;
    let id = parse_todo_id(&raw_id)?;

    todos.delete(&id, account.id()).await?;
    Ok(StatusCode::OK)
}
