//! In-process mock of the complaint service REST API.
//! Every request is recorded; responses are canned per (method, path).

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use complaint_desk::{ApiClient, ClientConfig, RecordingNavigator, SessionStore};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> { self.headers.get(&name.to_ascii_lowercase()).map(String::as_str) }
    pub fn json(&self) -> Value { serde_json::from_slice(&self.body).unwrap_or(Value::Null) }
    pub fn body_text(&self) -> String { String::from_utf8_lossy(&self.body).to_string() }
}

#[derive(Clone)]
struct Canned {
    status: u16,
    content_type: &'static str,
    body: String,
}

#[derive(Default)]
struct Shared {
    requests: Mutex<Vec<Recorded>>,
    routes: Mutex<HashMap<(String, String), Canned>>,
}

pub struct MockBackend {
    pub base: String,
    shared: Arc<Shared>,
    handle: JoinHandle<()>,
}

impl Drop for MockBackend {
    fn drop(&mut self) { self.handle.abort(); }
}

async fn handle(State(shared): State<Arc<Shared>>, method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
    let path = uri.path().to_string();
    let rec = Recorded {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        headers: headers
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect(),
        body: body.to_vec(),
    };
    shared.requests.lock().push(rec);
    let canned = shared.routes.lock().get(&(method.to_string(), path)).cloned();
    let canned = canned.unwrap_or(Canned {
        status: 404,
        content_type: "application/json",
        body: json!({"error": "Not found"}).to_string(),
    });
    let status = StatusCode::from_u16(canned.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, canned.content_type)], canned.body).into_response()
}

impl MockBackend {
    pub async fn start() -> Self {
        let shared = Arc::new(Shared::default());
        let app = Router::new().fallback(handle).with_state(shared.clone());
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.expect("bind 127.0.0.1:0");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("mock backend error: {e:?}");
            }
        });
        Self { base: format!("http://{}/api", addr), shared, handle }
    }

    /// Respond to `method /api{path}` with `status` and a JSON body.
    pub fn on(&self, method: &str, path: &str, status: u16, body: Value) -> &Self {
        self.on_raw(method, path, status, "application/json", body.to_string())
    }

    pub fn on_raw(&self, method: &str, path: &str, status: u16, content_type: &'static str, body: impl Into<String>) -> &Self {
        let key = (method.to_string(), format!("/api{}", path));
        self.shared.routes.lock().insert(key, Canned { status, content_type, body: body.into() });
        self
    }

    pub fn requests(&self) -> Vec<Recorded> { self.shared.requests.lock().clone() }

    pub fn request_count(&self) -> usize { self.shared.requests.lock().len() }

    pub fn last(&self) -> Recorded { self.requests().last().cloned().expect("at least one request") }

    /// Client against this backend with an in-memory session and a recording navigator.
    pub fn client(&self) -> (ApiClient, RecordingNavigator) {
        self.client_with_session(SessionStore::in_memory())
    }

    pub fn client_with_session(&self, session: SessionStore) -> (ApiClient, RecordingNavigator) {
        let nav = RecordingNavigator::new();
        let config = ClientConfig::default().with_api_url(self.base.clone());
        let client = ApiClient::new(config, session, Arc::new(nav.clone())).expect("client");
        (client, nav)
    }
}

pub fn login_body() -> Value {
    json!({
        "token": "abc",
        "user": {"id": 1, "username": "admin", "student_id": "", "email": "admin@campus.ac.id", "name": "Administrator", "role": "admin"},
        "role": "admin",
        "message": "Login successful"
    })
}

pub fn complaint_json(id: u64, status: &str) -> Value {
    json!({
        "id": id,
        "ticket_id": format!("TKT-{:04}", id),
        "user_id": 2,
        "user": {"id": 2, "username": "budi", "name": "Budi", "role": "student", "student_id": "2021001"},
        "category_id": 1,
        "category": {"id": 1, "name": "Facilities", "slug": "facilities"},
        "title": "Broken AC",
        "description": "Room 204 AC is broken",
        "status": status,
        "admin_response": "",
        "evidence_path": "",
        "created_at": "2024-03-01T08:30:00Z",
        "updated_at": "2024-03-01T08:30:00Z"
    })
}

pub fn page_of(data: Vec<Value>, page: u32, limit: u32, total: u64) -> Value {
    let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit as u64) };
    json!({"data": data, "page": page, "limit": limit, "total": total, "total_pages": total_pages})
}
