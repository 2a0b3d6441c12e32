//! WebSocket Handler
//!
//! Handles WebSocket upgrade requests and the session lifecycle: each
//! connection gets its own parameter object, receives the current chart
//! right away, and gets a recomputed overlay pushed after every accepted
//! parameter change.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::messages::{ClientMessage, ServerMessage};
use crate::app::AppState;
use crate::dashboard::params::{ParamPatch, SineWaveParams};

/// Per-connection reactive state: the parameter object and the publish
/// revision counter.
struct DashboardSession {
    params: SineWaveParams,
    revision: u64,
}

impl DashboardSession {
    fn new(state: &AppState) -> Self {
        Self {
            params: SineWaveParams::from_config(&state.config.dashboard),
            revision: 0,
        }
    }

    /// Compose the overlay at the current parameters and wrap it in a chart
    /// message with the next revision number.
    fn render(&mut self, state: &AppState) -> Result<ServerMessage, ServerMessage> {
        match state.composer.overlay(&self.params) {
            Ok(overlay) => {
                self.revision += 1;
                Ok(ServerMessage::Chart {
                    revision: self.revision,
                    params: self.params,
                    overlay,
                })
            }
            Err(e) => {
                tracing::error!(error = %e, "Chart composition failed");
                Err(ServerMessage::Error {
                    message: format!("Chart composition failed: {}", e),
                })
            }
        }
    }
}

/// WebSocket upgrade handler
///
/// Entry point for the dashboard's live channel.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an established WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Channel for pushing messages to this session
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    let session_id = match state.registry.register(tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(error = %e, "Refused dashboard session");
            // Tell the client why before dropping the socket
            let error_msg = ServerMessage::Error {
                message: e.to_string(),
            };
            let _ = sender
                .send(Message::Text(serde_json::to_string(&error_msg).unwrap()))
                .await;
            return;
        }
    };

    let mut session = DashboardSession::new(&state);

    // Greeting with the session id and initial parameter values
    let connected = ServerMessage::Connected {
        session_id: session_id.clone(),
        title: state.config.dashboard.title.clone(),
        params: session.params,
    };
    if sender
        .send(Message::Text(serde_json::to_string(&connected).unwrap()))
        .await
        .is_err()
    {
        tracing::error!(session_id = %session_id, "Failed to send connected message");
        state.registry.unregister(&session_id).await;
        return;
    }

    // First chart, so the page renders without any interaction
    let initial = match session.render(&state) {
        Ok(msg) => msg,
        Err(msg) => msg,
    };
    if sender
        .send(Message::Text(serde_json::to_string(&initial).unwrap()))
        .await
        .is_err()
    {
        state.registry.unregister(&session_id).await;
        return;
    }

    let conn_id_for_send = session_id.clone();

    // Task to forward messages from channel to WebSocket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(text) => {
                    if sender.send(Message::Text(text)).await.is_err() {
                        tracing::debug!(
                            session_id = %conn_id_for_send,
                            "WebSocket send failed, closing session"
                        );
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize message");
                }
            }
        }
    });

    let state_for_recv = Arc::clone(&state);
    let conn_id_for_recv = session_id.clone();

    // Task to receive messages from WebSocket and handle them
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(msg) => {
                    if !handle_ws_message(&state_for_recv, &mut session, &conn_id_for_recv, msg)
                        .await
                    {
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        session_id = %conn_id_for_recv,
                        error = %e,
                        "WebSocket receive error"
                    );
                    break;
                }
            }
        }
    });

    // Wait for either task to complete
    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    state.registry.unregister(&session_id).await;
}

/// Handle a received WebSocket message
///
/// Returns false if the connection should be closed.
async fn handle_ws_message(
    state: &Arc<AppState>,
    session: &mut DashboardSession,
    session_id: &str,
    message: Message,
) -> bool {
    match message {
        Message::Text(text) => {
            match serde_json::from_str::<ClientMessage>(&text) {
                Ok(client_msg) => {
                    handle_client_message(state, session, session_id, client_msg).await;
                }
                Err(e) => {
                    tracing::debug!(
                        session_id = %session_id,
                        error = %e,
                        text = %text,
                        "Invalid client message"
                    );
                    // Report the problem but keep the session open
                    let error_msg = ServerMessage::Error {
                        message: format!("Invalid message format: {}", e),
                    };
                    let _ = state.registry.send_to(session_id, error_msg).await;
                }
            }
            true
        }
        Message::Binary(_) => {
            let error_msg = ServerMessage::Error {
                message: "Binary messages not supported".to_string(),
            };
            let _ = state.registry.send_to(session_id, error_msg).await;
            true
        }
        Message::Ping(_) => {
            // Axum handles ping/pong automatically
            true
        }
        Message::Pong(_) => true,
        Message::Close(_) => {
            tracing::debug!(session_id = %session_id, "Client requested close");
            false
        }
    }
}

/// Handle a parsed client message
async fn handle_client_message(
    state: &Arc<AppState>,
    session: &mut DashboardSession,
    session_id: &str,
    message: ClientMessage,
) {
    match message {
        ClientMessage::SetParams {
            samples,
            year,
            cumulative,
        } => {
            let patch = ParamPatch {
                samples,
                year,
                cumulative,
            };

            match session.params.apply(&patch) {
                Ok(true) => {
                    tracing::debug!(
                        session_id = %session_id,
                        samples = session.params.samples,
                        year = session.params.year,
                        cumulative = session.params.cumulative,
                        "Parameters changed, recomputing chart"
                    );
                    publish_chart(state, session, session_id).await;
                }
                Ok(false) => {
                    tracing::trace!(session_id = %session_id, "Patch changed nothing");
                }
                Err(e) => {
                    let rejected = ServerMessage::Rejected {
                        message: e.to_string(),
                    };
                    let _ = state.registry.send_to(session_id, rejected).await;
                }
            }
        }
        ClientMessage::Refresh => {
            publish_chart(state, session, session_id).await;
        }
        ClientMessage::Ping => {
            let _ = state.registry.send_to(session_id, ServerMessage::Pong).await;
        }
    }
}

/// Recompute the overlay and push it (or the failure) to the session
async fn publish_chart(state: &Arc<AppState>, session: &mut DashboardSession, session_id: &str) {
    let msg = match session.render(state) {
        Ok(msg) => msg,
        Err(msg) => msg,
    };
    let _ = state.registry.send_to(session_id, msg).await;
}
