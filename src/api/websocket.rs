use actix_web::{get, web, Error, HttpRequest, HttpResponse};
use actix_ws::Message;
use futures_util::StreamExt as _;
use std::sync::Arc;
use tracing::{info, warn};

use crate::analyst::gateway::AnalystGateway;
use crate::api::models_ws::{WsClientMessage, WsServerMessage};
use crate::api::ChatState;

#[get("/ws/chat")]
pub async fn ws_chat(
    req: HttpRequest,
    body: web::Payload,
    chat: web::Data<ChatState>,
    gateway: web::Data<AnalystGateway>,
) -> Result<HttpResponse, Error> {
    let (response, mut session, mut msg_stream) = actix_ws::handle(&req, body)?;

    info!("WebSocket connection established");

    // web::Data<T> behaves like an Arc<T>; pull the inner Arcs out for the task.
    let chat = chat.into_inner();
    let gateway = gateway.into_inner();

    actix_web::rt::spawn(async move {
        while let Some(Ok(msg)) = msg_stream.next().await {
            match msg {
                Message::Ping(bytes) => {
                    if session.pong(&bytes).await.is_err() {
                        return;
                    }
                }
                Message::Text(text) => {
                    let client_msg: Result<WsClientMessage, _> = serde_json::from_str(&text);
                    if let Ok(msg) = client_msg {
                        match msg.r#type.as_str() {
                            "message" => {
                                handle_chat_message(msg.content, &chat, &gateway, &mut session)
                                    .await;
                            }
                            "reset" => {
                                chat.store.lock().unwrap().reset();
                                send(&mut session, "done", "").await;
                            }
                            _ => {}
                        }
                    }
                }
                Message::Close(reason) => {
                    let _ = session.close(reason).await;
                    break;
                }
                _ => {}
            }
        }
        info!("WebSocket connection closed");
    });

    Ok(response)
}

async fn handle_chat_message(
    content: String,
    chat: &Arc<ChatState>,
    gateway: &Arc<AnalystGateway>,
    session: &mut actix_ws::Session,
) {
    let text = content.trim();
    if text.is_empty() {
        return;
    }

    // Same single-slot guard as the HTTP path; the transcript is shared.
    let Some(_guard) = chat.begin_exchange() else {
        warn!("Rejected WebSocket message while an exchange is in flight");
        send(session, "error", "Analyst is busy with a previous message").await;
        return;
    };

    let history = {
        let mut store = chat.store.lock().unwrap();
        let history = store.transcript().to_vec();
        store.push_user(text);
        history
    };

    let reply = gateway.chat(text, &history).await;

    {
        let mut store = chat.store.lock().unwrap();
        store.push_assistant(reply.clone());
    }

    send(session, "reply", &reply).await;
    send(session, "done", "").await;
}

async fn send(session: &mut actix_ws::Session, r#type: &str, content: &str) {
    let msg = WsServerMessage {
        r#type: r#type.to_string(),
        content: content.to_string(),
    };
    let _ = session.text(serde_json::to_string(&msg).unwrap()).await;
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(ws_chat);
}
