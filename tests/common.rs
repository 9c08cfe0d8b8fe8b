#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Notify;

use seolma_client::config::ServicesConfig;
use seolma_client::gateway::{
    Gateway, GatewayParts, HttpRequest, HttpResponse, Transport, TransportError, REFRESH_PATH,
};
use seolma_client::models::SessionUser;
use seolma_client::navigation::Navigator;
use seolma_client::notify::{Notice, Notifier};
use seolma_client::session::memory_storage::MemoryStorage;
use seolma_client::session::SessionState;

pub const LOGIN_PATH: &str = "/login";

/// One request as the transport saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sent {
    pub method: String,
    pub path: String,
    pub bearer: Option<String>,
}

/// What the refresh endpoint answers.
#[derive(Debug, Clone)]
pub enum RefreshReply {
    Token(String),
    Reject { status: u16, code: String, message: String },
    Down,
}

/// In-process backend.
///
/// - `POST /api/v1/users/auth/refresh` answers with `refresh`, after waiting
///   for `gate` when one is set.
/// - paths under `/down` get no response.
/// - paths under `/fail` answer 400 with a coupon error.
/// - everything else succeeds only with `Bearer <accepted token>`, and
///   otherwise answers 401 + C0002.
pub struct FakeTransport {
    accepted: Mutex<String>,
    refresh: Mutex<RefreshReply>,
    gate: Option<Arc<Notify>>,
    log: Mutex<Vec<Sent>>,
}

impl FakeTransport {
    pub fn new(accepted: &str, refresh: RefreshReply) -> Self {
        Self {
            accepted: Mutex::new(accepted.to_string()),
            refresh: Mutex::new(refresh),
            gate: None,
            log: Mutex::new(Vec::new()),
        }
    }

    /// Hold refresh responses until the returned gate is notified.
    pub fn gated(accepted: &str, refresh: RefreshReply) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let mut transport = Self::new(accepted, refresh);
        transport.gate = Some(gate.clone());
        (transport, gate)
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.log.lock().unwrap().clone()
    }

    pub fn refresh_calls(&self) -> usize {
        self.sent().iter().filter(|s| s.path == REFRESH_PATH).count()
    }

    /// Requests to `path`, in the order they were sent.
    pub fn sent_to(&self, path: &str) -> Vec<Sent> {
        self.sent().into_iter().filter(|s| s.path == path).collect()
    }
}

fn reply(status: u16, body: serde_json::Value) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse {
        status,
        body: body.to_string(),
    })
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = url::Url::parse(&request.url).map_err(|e| TransportError::Build(e.to_string()))?;
        let path = url.path().to_string();
        let bearer = request
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::to_string);
        self.log.lock().unwrap().push(Sent {
            method: request.method.to_string(),
            path: path.clone(),
            bearer: bearer.clone(),
        });

        if path == REFRESH_PATH {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            let refresh = self.refresh.lock().unwrap().clone();
            return match refresh {
                RefreshReply::Token(token) => reply(
                    200,
                    json!({ "code": "C0000", "message": "", "data": { "accessToken": token } }),
                ),
                RefreshReply::Reject {
                    status,
                    code,
                    message,
                } => reply(status, json!({ "code": code, "message": message, "data": null })),
                RefreshReply::Down => Err(TransportError::NoResponse("connection refused".to_string())),
            };
        }

        if path.starts_with("/down") {
            return Err(TransportError::NoResponse("timed out".to_string()));
        }
        if path.starts_with("/fail") {
            return reply(400, json!({ "code": "CP1009", "message": "", "data": null }));
        }

        let accepted = self.accepted.lock().unwrap().clone();
        if bearer.as_deref() == Some(accepted.as_str()) {
            reply(200, json!({ "code": "C0000", "message": "", "data": { "path": path } }))
        } else {
            reply(
                401,
                json!({ "code": "C0002", "message": "token expired", "data": null }),
            )
        }
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

pub struct RecordingNavigator {
    current: Mutex<String>,
    navigations: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn at(path: &str) -> Self {
        Self {
            current: Mutex::new(path.to_string()),
            navigations: Mutex::new(Vec::new()),
        }
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.current.lock().unwrap().clone()
    }

    fn navigate(&self, target: &str) {
        *self.current.lock().unwrap() = target.to_string();
        self.navigations.lock().unwrap().push(target.to_string());
    }
}

pub fn services(base_url: &str) -> ServicesConfig {
    ServicesConfig {
        user: base_url.to_string(),
        product: base_url.to_string(),
        coupon: base_url.to_string(),
        order: base_url.to_string(),
    }
}

/// A session signed in with `token`, kept in memory.
pub fn signed_in_session(token: &str) -> Arc<SessionState> {
    let session = SessionState::load(Arc::new(MemoryStorage::new()));
    session
        .sign_in(token.to_string(), SessionUser::new("u1", "Kim", "USER"))
        .unwrap();
    Arc::new(session)
}

pub struct Harness {
    pub gateway: Gateway,
    pub session: Arc<SessionState>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
}

pub fn build_gateway(
    base_url: &str,
    transport: Arc<dyn Transport>,
    session: Arc<SessionState>,
    current_path: &str,
) -> Harness {
    let notifier = Arc::new(RecordingNotifier::default());
    let navigator = Arc::new(RecordingNavigator::at(current_path));
    let gateway = Gateway::new(GatewayParts {
        services: services(base_url),
        login_path: LOGIN_PATH.to_string(),
        session: session.clone(),
        transport,
        notifier: notifier.clone(),
        navigator: navigator.clone(),
    });
    Harness {
        gateway,
        session,
        notifier,
        navigator,
    }
}

/// Yield until `n` requests are queued behind the running refresh.
pub async fn wait_for_queue(gateway: &Gateway, n: usize) {
    for _ in 0..1000 {
        if gateway.coordinator().pending_len() == n {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!(
        "expected {} queued requests, found {}",
        n,
        gateway.coordinator().pending_len()
    );
}
