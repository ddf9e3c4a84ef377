//! Full session lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every endpoint
//! twice over real HTTP: once by driving `TodoClient`'s build/parse pairs
//! with a blocking ureq executor, and once through the async `Api` facade
//! with the reqwest transport and an in-memory cookie jar.

use todo_client::{
    report_error, Api, ApiError, ClientConfig, CookieStore, HttpMethod, HttpRequest,
    HttpResponse, LoginForm, MemoryCookieJar, MemoryNotifier, ReqwestTransport, SignupForm,
    TodoClient, RELOGIN_PROMPT,
};

/// Bind the mock server to a random port on its own runtime thread.
fn start_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

/// Execute an `HttpRequest` with ureq, returning 4xx/5xx as data.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let headers = req.headers.clone();
    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => {
            let mut r = agent.get(&req.path);
            for (k, v) in &headers {
                r = r.header(k.as_str(), v.as_str());
            }
            r.call()
        }
        (HttpMethod::Delete, _) => {
            let mut r = agent.delete(&req.path);
            for (k, v) in &headers {
                r = r.header(k.as_str(), v.as_str());
            }
            r.call()
        }
        (method, body) => {
            let mut r = match method {
                HttpMethod::Post => agent.post(&req.path),
                HttpMethod::Put => agent.put(&req.path),
                _ => agent.patch(&req.path),
            };
            for (k, v) in &headers {
                r = r.header(k.as_str(), v.as_str());
            }
            match body {
                Some(body) => r.send(body.as_bytes()),
                None => r.send_empty(),
            }
        }
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn authed(req: HttpRequest, token: &str) -> HttpRequest {
    req.with_header("authorization", token)
}

#[test]
fn build_parse_lifecycle() {
    let addr = start_server();
    let client = TodoClient::new(&format!("http://{addr}"));

    // Step 1: sign up and sign in.
    let form = SignupForm::new("sync@example.com", "secret", "Sync");
    let req = client.build_signup(&form).unwrap();
    let signed_up = client.parse_signup(execute(req)).unwrap();
    assert!(signed_up.status);

    let req = client.build_login(&form.credentials).unwrap();
    let login = client.parse_login(execute(req)).unwrap();
    let token = login.token;
    assert!(!token.is_empty());

    // Step 2: session check.
    let req = authed(client.build_check_auth(), &token);
    let checkout = client.parse_check_auth(execute(req)).unwrap();
    assert_eq!(checkout.nickname.as_deref(), Some("Sync"));

    // Step 3: list — should be empty.
    let req = authed(client.build_list_todos(), &token);
    let todos = client.parse_list_todos(execute(req)).unwrap();
    assert!(todos.is_empty(), "expected empty list");

    // Step 4: create.
    let req = authed(client.build_create_todo("Integration test").unwrap(), &token);
    let created = client.parse_create_todo(execute(req)).unwrap();
    assert_eq!(created.content, "Integration test");
    assert!(!created.status);
    let id = created.id;

    // Step 5: update and toggle.
    let req = authed(client.build_update_todo(&id, "Updated").unwrap(), &token);
    assert!(client.parse_status(execute(req)).unwrap().status);
    let req = authed(client.build_toggle_todo(&id).unwrap(), &token);
    assert!(client.parse_status(execute(req)).unwrap().status);

    let req = authed(client.build_list_todos(), &token);
    let todos = client.parse_list_todos(execute(req)).unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].content, "Updated");
    assert!(todos[0].status);

    // Step 6: delete, then delete again.
    let req = authed(client.build_delete_todo(&id), &token);
    client.parse_status(execute(req)).unwrap();
    let req = authed(client.build_delete_todo(&id), &token);
    let err = client.parse_status(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::Server { status: 404, .. }));

    // Step 7: sign out, then the token no longer works.
    let req = authed(client.build_logout(), &token);
    client.parse_logout(execute(req)).unwrap();
    let req = authed(client.build_check_auth(), &token);
    let err = client.parse_check_auth(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired { status: 401 }));
}

#[tokio::test]
async fn facade_session_lifecycle() {
    let addr = start_server();
    let api = Api::new(
        &ClientConfig::new(&format!("http://{addr}/")),
        ReqwestTransport::default(),
        MemoryCookieJar::default(),
    );
    let notifier = MemoryNotifier::new();

    // Without a token the service refuses to list.
    let err = api.todos().list().await.unwrap_err();
    report_error(&notifier, &err);
    assert_eq!(notifier.last().unwrap().title, RELOGIN_PROMPT);

    // Sign up, then log in and keep the token.
    let form = SignupForm::new("async@example.com", "secret", "Async");
    let response = api.users().signup(&form).await.unwrap();
    assert_eq!(response.status, 201);

    let login = api.users().start_session(&form.credentials).await.unwrap();
    assert_eq!(api.cookies().get(), Some(login.token));

    let response = api.users().check_auth().await.unwrap();
    let checkout = api.client().parse_check_auth(response).unwrap();
    assert_eq!(checkout.nickname.as_deref(), Some("Async"));

    // CRUD through the facade.
    let response = api.todos().create("Walk dog").await.unwrap();
    let created = api.client().parse_create_todo(response).unwrap();

    api.todos().update(&created.id, "Walk cat").await.unwrap();
    api.todos().toggle(&created.id).await.unwrap();

    let response = api.todos().list().await.unwrap();
    let todos = api.client().parse_list_todos(response).unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].content, "Walk cat");
    assert!(todos[0].status);

    api.todos().delete(&created.id).await.unwrap();
    let err = api.todos().delete(&created.id).await.unwrap_err();
    report_error(&notifier, &err);
    assert_eq!(notifier.last().unwrap().title, "錯誤：查無此代辦");

    // A wrong password surfaces the server's message.
    let wrong = LoginForm {
        email: "async@example.com".to_string(),
        password: "nope".to_string(),
    };
    let err = api.users().login(&wrong).await.unwrap_err();
    assert_eq!(err.server_message(), Some("登入失敗"));

    // Log out: the cookie is gone and the session is dead server-side.
    api.users().end_session().await.unwrap();
    assert!(!api.is_authenticated());
    let err = api.users().check_auth().await.unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired { .. }));
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let api = Api::new(
        &ClientConfig::new(&format!("http://{addr}")),
        ReqwestTransport::default(),
        MemoryCookieJar::default(),
    );

    let err = api.todos().list().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));

    let notifier = MemoryNotifier::new();
    report_error(&notifier, &err);
    assert!(notifier.last().unwrap().title.starts_with("network error:"));
}
