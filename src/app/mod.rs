//! HTTP Application
//!
//! Wires the account and to-do handlers into one Axum router. Shared
//! services travel as `Extension` layers; the session extractor reads
//! `AccountService` and `SessionSigner` from them.

use axum::{
    Extension, Router,
    routing::{get, patch, post, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::accounts::handlers::{handle_login, handle_logout, handle_register};
use crate::accounts::protocol::{ENDPOINT_LOGIN, ENDPOINT_LOGOUT, ENDPOINT_REGISTER};
use crate::accounts::{AccountService, SessionSigner};
use crate::storage::Cache;
use crate::todos::TodoService;
use crate::todos::handlers::{
    handle_create_todo, handle_delete_todo, handle_list_todos, handle_patch_todo,
};
use crate::todos::protocol::{ENDPOINT_TODO, ENDPOINT_TODOS};

/// The services one running instance shares across requests.
#[derive(Clone)]
pub struct Services {
    pub accounts: Arc<AccountService>,
    pub todos: Arc<TodoService>,
    pub signer: Arc<SessionSigner>,
}

impl Services {
    /// Builds both services on one cache; segments keep their keys apart.
    pub fn new(cache: Arc<dyn Cache>, signer: Arc<SessionSigner>, bcrypt_cost: u32) -> Self {
        Self {
            accounts: AccountService::new(cache.clone(), bcrypt_cost),
            todos: TodoService::new(cache),
            signer,
        }
    }
}

pub fn build_router(services: Services) -> Router {
    Router::new()
        .route(ENDPOINT_LOGIN, post(handle_login))
        .route(ENDPOINT_REGISTER, put(handle_register))
        .route(ENDPOINT_LOGOUT, get(handle_logout))
        .route(ENDPOINT_TODOS, get(handle_list_todos).put(handle_create_todo))
        .route(ENDPOINT_TODO, patch(handle_patch_todo).delete(handle_delete_todo))
        .layer(Extension(services.accounts))
        .layer(Extension(services.todos))
        .layer(Extension(services.signer))
        .layer(TraceLayer::new_for_http())
}
