//! HTTP server exposing the engine over the JSON envelope contract
//!
//! Sessions are explicit: every request may name a `session`, and each
//! session owns its own board and engine behind the store's lock. There is
//! no process-wide game singleton to race on.

use std::collections::HashMap;
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use serde::Serialize;

use super::envelope::{AiRequest, MessageResponse, MoveRequest, SessionRequest};
use super::session::Session;
use crate::Result;

const DEFAULT_SESSION: &str = "default";

/// All live sessions, keyed by the client-supplied session id
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        SessionStore {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Run `f` against the named session, creating it on first use
    pub fn with_session<T>(&self, id: Option<&str>, f: impl FnOnce(&mut Session) -> T) -> T {
        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let session = sessions
            .entry(id.unwrap_or(DEFAULT_SESSION).to_string())
            .or_default();
        f(session)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server until shutdown.
///
/// CORS is fully permissive: the visualization frontend is served from a
/// different origin during development.
pub async fn run(bind: &str) -> std::io::Result<()> {
    let store = web::Data::new(SessionStore::new());
    log::info!("starting HTTP server on {bind}");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(store.clone())
            .app_data(json_config())
            .route("/api/reset", web::post().to(reset))
            .route("/api/make_move", web::post().to(make_move))
            .route("/api/get_ai_move", web::post().to(get_ai_move))
            .route("/api/ai_make_move", web::post().to(ai_make_move))
            .route("/api/game_state", web::get().to(game_state))
            .route("/api/decision_tree", web::post().to(decision_tree))
    })
    .bind(bind)?
    .run()
    .await
}

/// Malformed request bodies get the error envelope too, not actix's default
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        actix_web::error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(serde_json::json!({
                "status": "error",
                "message": message,
            })),
        )
        .into()
    })
}

/// Map a session result to the envelope with the contract's status codes
fn respond<T: Serialize>(result: Result<T>) -> HttpResponse {
    match result {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(err) => {
            let status = StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            HttpResponse::build(status).json(MessageResponse::error(&err))
        }
    }
}

async fn reset(
    store: web::Data<SessionStore>,
    req: Option<web::Json<SessionRequest>>,
) -> impl Responder {
    let req = req.map(web::Json::into_inner).unwrap_or_default();
    let body = store.with_session(req.session.as_deref(), |session| session.reset());
    HttpResponse::Ok().json(body)
}

async fn make_move(store: web::Data<SessionStore>, req: web::Json<MoveRequest>) -> impl Responder {
    let req = req.into_inner();
    respond(store.with_session(req.session.as_deref(), |session| {
        session.make_move(req.row, req.col)
    }))
}

async fn get_ai_move(store: web::Data<SessionStore>, req: web::Json<AiRequest>) -> impl Responder {
    let req = req.into_inner();
    respond(store.with_session(req.session.as_deref(), |session| {
        session.get_ai_move(req.use_alpha_beta, req.player)
    }))
}

async fn ai_make_move(store: web::Data<SessionStore>, req: web::Json<AiRequest>) -> impl Responder {
    let req = req.into_inner();
    respond(store.with_session(req.session.as_deref(), |session| {
        session.ai_make_move(req.use_alpha_beta, req.player)
    }))
}

async fn game_state(
    store: web::Data<SessionStore>,
    query: web::Query<SessionRequest>,
) -> impl Responder {
    let body = store.with_session(query.session.as_deref(), |session| session.game_state());
    HttpResponse::Ok().json(body)
}

async fn decision_tree(
    store: web::Data<SessionStore>,
    req: web::Json<AiRequest>,
) -> impl Responder {
    let req = req.into_inner();
    respond(store.with_session(req.session.as_deref(), |session| {
        session.decision_tree(req.use_alpha_beta, req.player)
    }))
}
