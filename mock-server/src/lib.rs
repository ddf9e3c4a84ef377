use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
    Json, Router,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const SESSION_EXPIRED: &str = "驗證失效";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub create_time: i64,
    pub content: String,
    pub status: bool,
}

#[derive(Deserialize)]
pub struct SignUp {
    pub email: String,
    pub password: String,
    pub nickname: String,
}

#[derive(Deserialize)]
pub struct SignIn {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct Content {
    pub content: String,
}

#[derive(Clone, Debug)]
struct Account {
    uid: String,
    password: String,
    nickname: String,
}

#[derive(Default)]
pub struct Store {
    accounts: HashMap<String, Account>,
    sessions: HashMap<String, String>,
    todos: HashMap<String, Vec<Todo>>,
}

pub type Db = Arc<RwLock<Store>>;

/// `{ "status": false, "message": ... }` with a status code.
#[derive(Debug)]
pub struct Failure(StatusCode, &'static str);

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        (self.0, Json(json!({ "status": false, "message": self.1 }))).into_response()
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/users/sign_up", post(sign_up))
        .route("/users/sign_in", post(sign_in))
        .route("/users/sign_out", post(sign_out))
        .route("/users/checkout", get(checkout))
        .route("/todos/", get(list_todos).post(create_todo))
        .route("/todos/{id}", put(update_todo).delete(delete_todo))
        .route("/todos/{id}/toggle", patch(toggle_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Resolve the `authorization` header to a uid.
fn authorize(store: &Store, headers: &HeaderMap) -> Result<String, Failure> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|token| store.sessions.get(token))
        .cloned()
        .ok_or(Failure(StatusCode::UNAUTHORIZED, SESSION_EXPIRED))
}

async fn sign_up(
    State(db): State<Db>,
    Json(input): Json<SignUp>,
) -> Result<(StatusCode, Json<serde_json::Value>), Failure> {
    let mut store = db.write().await;
    if store.accounts.contains_key(&input.email) {
        return Err(Failure(StatusCode::BAD_REQUEST, "用戶已存在"));
    }
    let uid = Uuid::new_v4().to_string();
    store.accounts.insert(
        input.email,
        Account {
            uid: uid.clone(),
            password: input.password,
            nickname: input.nickname,
        },
    );
    tracing::info!(%uid, "account created");
    Ok((StatusCode::CREATED, Json(json!({ "status": true, "uid": uid }))))
}

async fn sign_in(
    State(db): State<Db>,
    Json(input): Json<SignIn>,
) -> Result<Json<serde_json::Value>, Failure> {
    let mut store = db.write().await;
    let account = store
        .accounts
        .get(&input.email)
        .filter(|account| account.password == input.password)
        .cloned()
        .ok_or(Failure(StatusCode::BAD_REQUEST, "登入失敗"))?;
    let token = Uuid::new_v4().simple().to_string();
    let exp = (Utc::now() + Duration::days(1)).timestamp();
    store.sessions.insert(token.clone(), account.uid);
    Ok(Json(json!({
        "status": true,
        "token": token,
        "exp": exp,
        "nickname": account.nickname,
    })))
}

async fn sign_out(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, Failure> {
    let mut store = db.write().await;
    authorize(&store, &headers)?;
    if let Some(token) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        store.sessions.remove(token);
    }
    Ok(Json(json!({ "status": true, "message": "登出成功" })))
}

async fn checkout(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, Failure> {
    let store = db.read().await;
    let uid = authorize(&store, &headers)?;
    let nickname = store
        .accounts
        .values()
        .find(|account| account.uid == uid)
        .map(|account| account.nickname.clone());
    Ok(Json(json!({ "status": true, "uid": uid, "nickname": nickname })))
}

async fn list_todos(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, Failure> {
    let store = db.read().await;
    let uid = authorize(&store, &headers)?;
    let todos = store.todos.get(&uid).cloned().unwrap_or_default();
    Ok(Json(json!({ "status": true, "data": todos })))
}

async fn create_todo(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<Content>,
) -> Result<(StatusCode, Json<serde_json::Value>), Failure> {
    let mut store = db.write().await;
    let uid = authorize(&store, &headers)?;
    let todo = Todo {
        id: Uuid::new_v4().simple().to_string(),
        create_time: Utc::now().timestamp(),
        content: input.content,
        status: false,
    };
    store.todos.entry(uid).or_default().push(todo.clone());
    Ok((
        StatusCode::CREATED,
        Json(json!({ "status": true, "newTodo": todo })),
    ))
}

/// Apply `edit` to the caller's to-do `id`.
async fn with_todo(
    db: &Db,
    headers: &HeaderMap,
    id: &str,
    edit: impl FnOnce(&mut Vec<Todo>, usize),
) -> Result<(), Failure> {
    let mut store = db.write().await;
    let uid = authorize(&store, headers)?;
    let todos = store.todos.entry(uid).or_default();
    let index = todos
        .iter()
        .position(|todo| todo.id == id)
        .ok_or(Failure(StatusCode::NOT_FOUND, "查無此代辦"))?;
    edit(todos, index);
    Ok(())
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(input): Json<Content>,
) -> Result<Json<serde_json::Value>, Failure> {
    with_todo(&db, &headers, &id, |todos, i| todos[i].content = input.content).await?;
    Ok(Json(json!({ "status": true, "message": "更新成功" })))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, Failure> {
    with_todo(&db, &headers, &id, |todos, i| {
        todos.remove(i);
    })
    .await?;
    Ok(Json(json!({ "status": true, "message": "刪除成功" })))
}

async fn toggle_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, Failure> {
    with_todo(&db, &headers, &id, |todos, i| todos[i].status = !todos[i].status).await?;
    Ok(Json(json!({ "status": true, "message": "狀態切換成功" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_with_camel_case() {
        let todo = Todo {
            id: "abc".to_string(),
            create_time: 42,
            content: "Test".to_string(),
            status: false,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["createTime"], 42);
        assert_eq!(json["status"], false);
    }

    #[test]
    fn sign_up_requires_nickname() {
        let result: Result<SignUp, _> =
            serde_json::from_str(r#"{"email":"a@b.com","password":"pw"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn sign_in_ignores_extra_fields() {
        let input: SignIn =
            serde_json::from_str(r#"{"email":"a@b.com","password":"pw","nickname":"n"}"#).unwrap();
        assert_eq!(input.email, "a@b.com");
    }

    #[test]
    fn missing_header_is_session_expired() {
        let store = Store::default();
        let failure = authorize(&store, &HeaderMap::new()).unwrap_err();
        assert_eq!(failure.0, StatusCode::UNAUTHORIZED);
        assert_eq!(failure.1, SESSION_EXPIRED);
    }
}
