//! Shared utilities for integration tests: a scripted mock upstream and a
//! gateway launcher.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::Response,
    Router,
};
use tokio::net::TcpListener;

use employee_gateway::config::GatewayConfig;
use employee_gateway::employee::EmployeeService;
use employee_gateway::http::HttpServer;
use employee_gateway::lifecycle::Shutdown;
use employee_gateway::upstream::UpstreamClient;

pub const COLLECTION_PATH: &str = "/api/v1/employee";

/// A request received by the mock upstream.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: String,
}

#[derive(Default)]
struct MockState {
    scripts: Mutex<HashMap<(Method, String), VecDeque<(u16, String)>>>,
    stalls: Mutex<HashMap<(Method, String), Duration>>,
    hits: Mutex<Vec<RecordedRequest>>,
}

/// Mock upstream employee API.
///
/// Responses are scripted per method and path. Each request pops the next
/// scripted response; the last one is repeated once the queue is down to it.
pub struct MockUpstream {
    pub addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockUpstream {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(respond).with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.addr, COLLECTION_PATH)
    }

    pub fn record_path(id: &str) -> String {
        format!("{COLLECTION_PATH}/{id}")
    }

    pub fn enqueue(&self, method: Method, path: &str, status: u16, body: impl Into<String>) {
        self.state
            .scripts
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back((status, body.into()));
    }

    /// Hold every response on this route for `delay` before answering.
    pub fn stall(&self, method: Method, path: &str, delay: Duration) {
        self.state
            .stalls
            .lock()
            .unwrap()
            .insert((method, path.to_string()), delay);
    }

    pub fn hits(&self) -> Vec<RecordedRequest> {
        self.state.hits.lock().unwrap().clone()
    }

    pub fn hit_count(&self, method: Method, path: &str) -> usize {
        self.hits()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

async fn respond(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    body: String,
) -> Response {
    let path = uri.path().to_string();
    state.hits.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        body,
    });

    let stall = state
        .stalls
        .lock()
        .unwrap()
        .get(&(method.clone(), path.clone()))
        .copied();
    if let Some(delay) = stall {
        tokio::time::sleep(delay).await;
    }

    let scripted = {
        let mut scripts = state.scripts.lock().unwrap();
        scripts.get_mut(&(method, path)).and_then(|queue| {
            if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            }
        })
    };

    let (status, body) =
        scripted.unwrap_or((404, r#"{"message":"no scripted response"}"#.to_string()));
    Response::builder()
        .status(StatusCode::from_u16(status).unwrap())
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

/// Config pointing at `base_url` with a short retry delay.
pub fn fast_config(base_url: &str) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.upstream.base_url = base_url.to_string();
    config.timeouts.connect_secs = 2;
    config.timeouts.request_secs = 5;
    config.retries.max_retries = 5;
    config.retries.delay_ms = 10;
    config
}

pub fn service_for(upstream: &MockUpstream) -> EmployeeService {
    let client = UpstreamClient::from_config(&fast_config(&upstream.base_url())).unwrap();
    EmployeeService::new(client)
}

/// A running gateway bound to an ephemeral port.
pub struct Gateway {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl Gateway {
    pub async fn start(config: GatewayConfig) -> Self {
        let client = UpstreamClient::from_config(&config).unwrap();
        let server = HttpServer::new(&config.listener, EmployeeService::new(client));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Shutdown::new();
        let server_shutdown = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = server.run(listener, server_shutdown).await;
        });
        Self { addr, shutdown }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for Gateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub fn employee_json(id: &str, name: &str, salary: u64) -> String {
    format!(
        r#"{{"id":"{id}","employee_name":"{name}","employee_salary":{salary},"employee_age":40,"employee_title":"Engineer","employee_email":"{id}@company.com"}}"#
    )
}

pub fn list_envelope(employees: &[(&str, &str, u64)]) -> String {
    let data: Vec<String> = employees
        .iter()
        .map(|(id, name, salary)| employee_json(id, name, *salary))
        .collect();
    format!(
        r#"{{"data":[{}],"status":"Successfully processed request."}}"#,
        data.join(",")
    )
}

pub fn single_envelope(id: &str, name: &str, salary: u64) -> String {
    format!(
        r#"{{"data":{},"status":"Successfully processed request."}}"#,
        employee_json(id, name, salary)
    )
}

/// The sample roster used across tests.
pub fn roster() -> Vec<(&'static str, &'static str, u64)> {
    vec![
        ("9250abc9", "Caroline Yundt V", 42711),
        ("b328f159", "Ariel Larkin", 244740),
        ("3d6728bc", "Miss Johna Farrell", 347496),
        ("62272440", "Cordie Cole", 459227),
        ("ab2d1a0b", "Delbert Olson", 184973),
        ("b7cf341e", "Cory Rice", 317790),
        ("fd9f73e1", "Enoch Thiel", 76845),
        ("514d3589", "Ezequiel Pfannerstill", 172488),
        ("f150bd7d", "Phil Beier", 275169),
        ("d1864937", "Shizue Ferry", 394944),
        ("0c1d2e3f", "Cory Lane", 98000),
        ("7a8b9c0d", "Ada Lovelace", 90000),
    ]
}
