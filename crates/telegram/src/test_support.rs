//! In-process stand-in for the Bot API used by the delivery and handler tests.

use std::sync::{Arc, Mutex};

use {
    axum::{Json, Router, body::Bytes, extract::State, http::Uri, routing::post},
    serde_json::{Value, json},
    tokio::{net::TcpListener, sync::oneshot, task::JoinHandle},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TelegramApiMethod {
    SendMessage,
    SendChatAction,
    SendMediaGroup,
    SendAnimation,
    Other(String),
}

impl TelegramApiMethod {
    fn from_path(path: &str) -> Self {
        let method = path.rsplit('/').next().unwrap_or_default();
        match method {
            "SendMessage" => Self::SendMessage,
            "SendChatAction" => Self::SendChatAction,
            "SendMediaGroup" => Self::SendMediaGroup,
            "SendAnimation" => Self::SendAnimation,
            _ => Self::Other(method.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
struct CapturedRequest {
    method: TelegramApiMethod,
    raw_body: String,
}

#[derive(Clone)]
struct ApiState {
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    media_group_error: Option<String>,
}

fn message_result(text: &str) -> Value {
    json!({
        "message_id": 1,
        "date": 0,
        "chat": { "id": 42, "type": "private", "first_name": "Alice" },
        "text": text,
    })
}

async fn telegram_api_handler(
    State(state): State<ApiState>,
    uri: Uri,
    body: Bytes,
) -> Json<Value> {
    let method = TelegramApiMethod::from_path(uri.path());
    state
        .requests
        .lock()
        .expect("lock requests")
        .push(CapturedRequest {
            method: method.clone(),
            raw_body: String::from_utf8_lossy(&body).to_string(),
        });

    Json(match method {
        TelegramApiMethod::SendMediaGroup => match &state.media_group_error {
            Some(description) => json!({
                "ok": false,
                "error_code": 400,
                "description": description,
            }),
            None => json!({ "ok": true, "result": [message_result("media")] }),
        },
        TelegramApiMethod::SendMessage | TelegramApiMethod::SendAnimation => {
            json!({ "ok": true, "result": message_result("ok") })
        },
        TelegramApiMethod::SendChatAction | TelegramApiMethod::Other(_) => {
            json!({ "ok": true, "result": true })
        },
    })
}

pub(crate) struct MockTelegramApi {
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    api_url: reqwest::Url,
    shutdown_tx: oneshot::Sender<()>,
    server: JoinHandle<()>,
}

impl MockTelegramApi {
    /// Start the mock; media groups fail with `media_group_error` when set.
    pub(crate) async fn start(media_group_error: Option<&str>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/{*path}", post(telegram_api_handler))
            .with_state(ApiState {
                requests: Arc::clone(&requests),
                media_group_error: media_group_error.map(str::to_string),
            });

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("local addr");
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let server = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("serve mock telegram api");
        });
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        let api_url = reqwest::Url::parse(&format!("http://{addr}/")).expect("parse api url");
        Self {
            requests,
            api_url,
            shutdown_tx,
            server,
        }
    }

    pub(crate) fn bot(&self) -> teloxide::Bot {
        teloxide::Bot::new("test-token").set_api_url(self.api_url.clone())
    }

    pub(crate) fn methods(&self) -> Vec<TelegramApiMethod> {
        self.requests
            .lock()
            .expect("lock requests")
            .iter()
            .map(|r| r.method.clone())
            .collect()
    }

    /// Texts of every `sendMessage` call, in order.
    pub(crate) fn sent_texts(&self) -> Vec<String> {
        self.sent_messages()
            .into_iter()
            .filter_map(|body| body.get("text").and_then(Value::as_str).map(str::to_string))
            .collect()
    }

    /// JSON bodies of every `sendMessage` call, in order.
    pub(crate) fn sent_messages(&self) -> Vec<Value> {
        self.requests
            .lock()
            .expect("lock requests")
            .iter()
            .filter(|r| r.method == TelegramApiMethod::SendMessage)
            .filter_map(|r| serde_json::from_str(&r.raw_body).ok())
            .collect()
    }

    pub(crate) async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        let _ = self.server.await;
    }
}
