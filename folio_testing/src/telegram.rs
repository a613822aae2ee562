use std::{
    net::{IpAddr, Ipv4Addr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::Mutex};
use tracing::{error, info};
use url::Url;

const SEND_MESSAGE_ROUTE: &str = "/:bot/sendMessage";

/// A message accepted by the testing server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub chat_id: String,
    pub text: String,
}

#[derive(Debug)]
struct ServerState {
    bot_token: String,
    chat_id: String,
    messages: Mutex<Vec<SentMessage>>,
}

pub async fn start_server(
    host: IpAddr,
    port: u16,
    bot_token: String,
    chat_id: String,
) -> anyhow::Result<()> {
    info!("Starting telegram bot api testing server on {host}:{port}");
    info!("Telegram api endpoint: http://{host}:{port}");
    info!("Bot token: {bot_token:?}");
    info!("Chat id: {chat_id:?}");
    info!("Messages sent with any other token or to any other chat are rejected");

    let state = Arc::new(ServerState {
        bot_token,
        chat_id,
        messages: Default::default(),
    });

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router(state))
        .await
        .context("Failed to start HTTP server")
}

/// Testing server running in the background of the current tokio runtime.
#[derive(Debug)]
pub struct TelegramTestServer {
    endpoint: Url,
    state: Arc<ServerState>,
}

impl TelegramTestServer {
    /// Start a server on a random local port.
    pub async fn spawn(
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .context("Failed to bind to random port")?;
        let addr = listener.local_addr()?;

        let state = Arc::new(ServerState {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            messages: Default::default(),
        });

        let router = router(Arc::clone(&state));
        tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, router).await {
                error!("telegram testing server failed: {err}");
            }
        });

        Ok(Self {
            endpoint: format!("http://{addr}").parse()?,
            state,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// All messages accepted so far, in the order they were received.
    pub async fn messages(&self) -> Vec<SentMessage> {
        self.state.messages.lock().await.clone()
    }
}

fn router(state: Arc<ServerState>) -> Router<()> {
    Router::new()
        .route(SEND_MESSAGE_ROUTE, routing::post(send_message))
        .with_state(state)
}

#[derive(Deserialize)]
struct SendMessageRequest {
    chat_id: Value,
    #[serde(default)]
    text: String,
}

async fn send_message(
    state: State<Arc<ServerState>>,
    Path(bot): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Response {
    if bot.strip_prefix("bot") != Some(state.bot_token.as_str()) {
        return api_error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }

    let chat_id = match request.chat_id {
        Value::String(chat_id) => chat_id,
        Value::Number(chat_id) => chat_id.to_string(),
        _ => return api_error(StatusCode::BAD_REQUEST, "Bad Request: chat_id is empty"),
    };
    if chat_id != state.chat_id {
        return api_error(StatusCode::BAD_REQUEST, "Bad Request: chat not found");
    }

    if request.text.trim().is_empty() {
        return api_error(StatusCode::BAD_REQUEST, "Bad Request: message text is empty");
    }

    let mut messages = state.messages.lock().await;
    messages.push(SentMessage {
        chat_id: chat_id.clone(),
        text: request.text.clone(),
    });

    Json(json!({
        "ok": true,
        "result": {
            "message_id": messages.len(),
            "chat": {"id": chat_id},
            "text": request.text,
        },
    }))
    .into_response()
}

fn api_error(status: StatusCode, description: &str) -> Response {
    let body = json!({
        "ok": false,
        "error_code": status.as_u16(),
        "description": description,
    });
    (status, Json(body)).into_response()
}
