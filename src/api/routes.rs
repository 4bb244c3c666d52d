use actix_web::{get, post, web, HttpResponse, Result as WebResult};
use tracing::warn;
use uuid::Uuid;

use crate::analyst::gateway::AnalystGateway;
use crate::api::models::{
    AnalysisResponse, ChatExchange, GenerateRuleRequest, GeneratedRuleResponse,
    SendMessageRequest,
};
use crate::api::ChatState;
use crate::threat::feed::BoardHandle;

// --- Chat ---

#[post("/messages")]
pub async fn send_message(
    chat: web::Data<ChatState>,
    gateway: web::Data<AnalystGateway>,
    req: web::Json<SendMessageRequest>,
) -> WebResult<HttpResponse> {
    let content = req.into_inner().content;
    let text = content.trim();
    if text.is_empty() {
        return Ok(HttpResponse::BadRequest().body("Message content is empty"));
    }

    // One exchange at a time for this transcript.
    let Some(_guard) = chat.begin_exchange() else {
        warn!("Rejected chat message while an exchange is in flight");
        return Ok(HttpResponse::Conflict().body("Analyst is busy with a previous message"));
    };

    // Snapshot the history before appending the user turn; the new utterance
    // travels separately from the history.
    let (user_msg, history) = {
        let mut store = chat.store.lock().unwrap();
        let history = store.transcript().to_vec();
        let user_msg = store.push_user(text).clone();
        (user_msg, history)
    };

    let reply = gateway.chat(text, &history).await;

    let assistant_msg = {
        let mut store = chat.store.lock().unwrap();
        store.push_assistant(reply).clone()
    };

    Ok(HttpResponse::Created().json(ChatExchange {
        user: user_msg,
        assistant: assistant_msg,
    }))
}

#[get("/transcript")]
pub async fn get_transcript(chat: web::Data<ChatState>) -> WebResult<HttpResponse> {
    let store = chat.store.lock().unwrap();
    Ok(HttpResponse::Ok().json(store.transcript()))
}

#[post("/reset")]
pub async fn reset_session(chat: web::Data<ChatState>) -> WebResult<HttpResponse> {
    let mut store = chat.store.lock().unwrap();
    store.reset();
    Ok(HttpResponse::NoContent().finish())
}

// --- Threats ---

#[get("")]
pub async fn list_threats(board: web::Data<BoardHandle>) -> WebResult<HttpResponse> {
    let board = board.lock().unwrap();
    Ok(HttpResponse::Ok().json(board.events()))
}

#[post("/{id}/analyze")]
pub async fn analyze_threat(
    board: web::Data<BoardHandle>,
    gateway: web::Data<AnalystGateway>,
    id: web::Path<Uuid>,
) -> WebResult<HttpResponse> {
    let id = id.into_inner();

    // Clone the event out so the board lock is not held across the network call.
    let event = { board.lock().unwrap().find_event(id).cloned() };

    match event {
        Some(event) => {
            let assessment = gateway.analyze_threat(&event).await;
            Ok(HttpResponse::Ok().json(AnalysisResponse {
                id: event.id,
                assessment,
            }))
        }
        None => Ok(HttpResponse::NotFound().body("Threat event not found")),
    }
}

// --- WAF ---

#[get("/rules")]
pub async fn list_rules(board: web::Data<BoardHandle>) -> WebResult<HttpResponse> {
    let board = board.lock().unwrap();
    Ok(HttpResponse::Ok().json(board.rules()))
}

#[post("/rules/generate")]
pub async fn generate_rule(
    gateway: web::Data<AnalystGateway>,
    req: web::Json<GenerateRuleRequest>,
) -> WebResult<HttpResponse> {
    let pattern = req.into_inner().pattern;
    let pattern = pattern.trim();
    if pattern.is_empty() {
        return Ok(HttpResponse::BadRequest().body("Attack pattern is empty"));
    }

    let rule = gateway.generate_waf_rule(pattern).await;
    Ok(HttpResponse::Ok().json(GeneratedRuleResponse {
        pattern: pattern.to_string(),
        rule,
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/chat")
            .service(send_message)
            .service(get_transcript)
            .service(reset_session),
    )
    .service(
        web::scope("/threats")
            .service(list_threats)
            .service(analyze_threat),
    )
    .service(
        web::scope("/waf")
            .service(list_rules)
            .service(generate_rule),
    );
}
