pub mod mock;

use actix_web::dev::Server;
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use poller::telemetry;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::net::TcpListener;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;

/// A canned response for the heatmap endpoint.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    /// Hold the response back this long before answering.
    pub delay: Option<Duration>,
}

impl MockResponse {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn raw(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A request seen by the mock backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Lowercase header names to every value sent for them.
    pub headers: BTreeMap<String, Vec<String>>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

/// Shared state behind the mock routes.
pub struct MockState {
    /// Served in order before falling back to `default_response`.
    queue: Mutex<VecDeque<MockResponse>>,
    default_response: Mutex<MockResponse>,
    requests: Mutex<Vec<RecordedRequest>>,
    heatmap_hits: AtomicUsize,
}

impl MockState {
    fn new(default_response: MockResponse) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            default_response: Mutex::new(default_response),
            requests: Mutex::new(Vec::new()),
            heatmap_hits: AtomicUsize::new(0),
        }
    }

    fn next_heatmap_response(&self) -> MockResponse {
        self.heatmap_hits.fetch_add(1, Ordering::SeqCst);
        if let Some(response) = self.queue.lock().unwrap().pop_front() {
            return response;
        }
        self.default_response.lock().unwrap().clone()
    }

    fn record(&self, req: &HttpRequest, body: &str) -> RecordedRequest {
        let mut headers: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, value) in req.headers() {
            headers
                .entry(name.as_str().to_ascii_lowercase())
                .or_default()
                .push(value.to_str().unwrap_or_default().to_string());
        }
        let recorded = RecordedRequest {
            method: req.method().to_string(),
            path: req.path().to_string(),
            headers,
            body: body.to_string(),
        };
        self.requests.lock().unwrap().push(recorded.clone());
        recorded
    }
}

/// Build the mock backend, but not await it.
pub fn build(
    listener: TcpListener,
    state: web::Data<MockState>,
) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        App::new()
            .service(
                web::scope("/api")
                    .route("/health_check", web::get().to(health_check))
                    .route("/analysis/heatmap", web::get().to(heatmap))
                    .route("/echo", web::to(echo)),
            )
            .app_data(state.clone())
    })
    .workers(1)
    .listen(listener)?
    .run();
    Ok(server)
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().body("healthy")
}

async fn heatmap(
    req: HttpRequest,
    state: web::Data<MockState>,
) -> HttpResponse {
    state.record(&req, "");
    let response = state.next_heatmap_response();
    if let Some(delay) = response.delay {
        tokio::time::sleep(delay).await;
    }
    let status = StatusCode::from_u16(response.status)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status)
        .content_type("application/json")
        .body(response.body)
}

#[derive(Deserialize)]
struct EchoQuery {
    status: Option<u16>,
}

/// Answers with the request it received, using the status from the
/// `status` query parameter (200 by default).
async fn echo(
    req: HttpRequest,
    body: String,
    query: web::Query<EchoQuery>,
    state: web::Data<MockState>,
) -> HttpResponse {
    let recorded = state.record(&req, &body);
    let status = query
        .status
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::OK);
    HttpResponse::build(status).json(recorded)
}

pub struct MockBackend {
    pub port: u16,
    pub client: payloads::APIClient,
    state: web::Data<MockState>,
}

impl MockBackend {
    pub fn address(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// A fresh client pointed at this backend.
    pub fn new_client(&self) -> payloads::APIClient {
        payloads::APIClient {
            address: self.address(),
            inner_client: reqwest::Client::new(),
        }
    }

    /// Queue a response for the next heatmap request.
    pub fn push_response(&self, response: MockResponse) {
        self.state.queue.lock().unwrap().push_back(response);
    }

    /// Replace the response served once the queue is empty.
    pub fn set_default_response(&self, response: MockResponse) {
        *self.state.default_response.lock().unwrap() = response;
    }

    /// Number of heatmap requests received so far.
    pub fn heatmap_hits(&self) -> usize {
        self.state.heatmap_hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Wait until at least `count` heatmap requests have arrived.
    pub async fn wait_for_hits(
        &self,
        count: usize,
        timeout: Duration,
    ) -> anyhow::Result<()> {
        tokio::time::timeout(timeout, async {
            while self.heatmap_hits() < count {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .map_err(|_| {
            anyhow::anyhow!(
                "expected {} heatmap requests, got {}",
                count,
                self.heatmap_hits()
            )
        })
    }
}

pub async fn spawn_backend_on_port(port: u16) -> MockBackend {
    let subscriber = telemetry::get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();

    let state = web::Data::new(MockState::new(MockResponse::json(
        200,
        mock::sample_snapshot("2025-01-01T00:00:00Z"),
    )));

    // OS assigns the port if binding to 0
    let listener = TcpListener::bind(format!("127.0.0.1:{port}")).unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = build(listener, state.clone()).unwrap();
    tokio::spawn(server);

    MockBackend {
        port,
        client: payloads::APIClient {
            address: format!("http://127.0.0.1:{port}"),
            inner_client: reqwest::Client::new(),
        },
        state,
    }
}

/// Use OS-assigned port for parallel testing.
pub async fn spawn_backend() -> MockBackend {
    spawn_backend_on_port(0).await
}

/// Assert that the result of an API action results in a specific status code.
pub fn assert_status_code<T>(
    result: Result<T, payloads::ClientError>,
    expected: reqwest::StatusCode,
) {
    match result {
        Err(payloads::ClientError::APIError(code, _)) => {
            assert_eq!(code, expected)
        }
        _ => panic!("Expected APIError"),
    };
}
