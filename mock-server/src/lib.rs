use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

pub const LIST_PATH: &str = "/todos/api/v1.0/todos";
pub const CREATE_PATH: &str = "/todos/api/v1.0/todo/create";
pub const DELETE_PATH: &str = "/todos/api/v1.0/todo/delete/{id}";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub priority: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodoList {
    pub todos: Vec<Todo>,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub priority: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResult {
    pub result: bool,
}

/// In-memory todos keyed by id; ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct Store {
    todos: BTreeMap<i64, Todo>,
    last_id: i64,
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    expected_authorization: Arc<str>,
}

/// `Authorization` header value the server accepts for these credentials.
pub fn basic_auth_value(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

pub fn app(username: &str, password: &str) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(Store::default())),
        expected_authorization: basic_auth_value(username, password).into(),
    };
    Router::new()
        .route(LIST_PATH, get(list_todos))
        .route(CREATE_PATH, post(create_todo))
        .route(DELETE_PATH, delete(delete_todo))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_basic_auth,
        ))
        .with_state(state)
}

pub async fn run(
    listener: TcpListener,
    username: &str,
    password: &str,
) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!("mock todo service listening on http://{addr}");
    }
    axum::serve(listener, app(username, password)).await
}

async fn require_basic_auth(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == &*state.expected_authorization);
    if !authorized {
        debug!(uri = %request.uri(), "rejecting request without valid credentials");
        return (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Basic realm=\"todos\"")],
        )
            .into_response();
    }
    next.run(request).await
}

async fn list_todos(State(state): State<AppState>) -> Json<TodoList> {
    let store = state.db.read().await;
    Json(TodoList {
        todos: store.todos.values().cloned().collect(),
    })
}

async fn create_todo(
    State(state): State<AppState>,
    Json(input): Json<CreateTodo>,
) -> Result<Json<Todo>, StatusCode> {
    if input.title.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut store = state.db.write().await;
    store.last_id += 1;
    let todo = Todo {
        id: store.last_id,
        title: input.title,
        body: input.body,
        priority: input.priority,
    };
    store.todos.insert(todo.id, todo.clone());
    debug!(id = todo.id, "created todo");
    Ok(Json(todo))
}

async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResult>, StatusCode> {
    let mut store = state.db.write().await;
    store
        .todos
        .remove(&id)
        .map(|_| Json(DeleteResult { result: true }))
        .ok_or(StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_to_json() {
        let todo = Todo {
            id: 1,
            title: "Test".to_string(),
            body: "Body".to_string(),
            priority: 3,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Test");
        assert_eq!(json["body"], "Body");
        assert_eq!(json["priority"], 3);
    }

    #[test]
    fn todo_list_wraps_todos_field() {
        let list = TodoList { todos: Vec::new() };
        assert_eq!(serde_json::to_string(&list).unwrap(), r#"{"todos":[]}"#);
    }

    #[test]
    fn create_todo_defaults_body_and_priority() {
        let input: CreateTodo = serde_json::from_str(r#"{"title":"Only title"}"#).unwrap();
        assert_eq!(input.title, "Only title");
        assert_eq!(input.body, "");
        assert_eq!(input.priority, 0);
    }

    #[test]
    fn create_todo_ignores_client_supplied_id() {
        let input: CreateTodo =
            serde_json::from_str(r#"{"id":99,"title":"T","body":"B","priority":2}"#).unwrap();
        assert_eq!(input.priority, 2);
    }

    #[test]
    fn create_todo_rejects_missing_title() {
        let result: Result<CreateTodo, _> = serde_json::from_str(r#"{"body":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn basic_auth_value_matches_rfc_encoding() {
        assert_eq!(basic_auth_value("test", "test"), "Basic dGVzdDp0ZXN0");
    }
}
