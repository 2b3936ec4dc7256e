use actix_web::{get, post, web, HttpResponse, Responder};
use serde_json::json;

use crate::app::chain::session::ChainSession;

#[get("/session")]
async fn current_session(session: web::Data<ChainSession>) -> impl Responder {
    session.refresh().await;
    HttpResponse::Ok().json(session.snapshot())
}

/// Connect a wallet
///
/// # API Endpoint
/// ```not_rust
/// POST /session/connect
/// ```
///
/// Prompts the wallet for its accounts and switches it to the
/// configured network, adding the network when the wallet does not
/// know it yet.
///
/// # Response
///
/// ## Success (200 OK)
///
/// ```json
/// {
///     "message": "Wallet connected",
///     "session": {
///         "walletDetected": true,
///         "account": "0x9a836494acb32fb1721ecbe976c13291dd91597f",
///         "chainId": 1313161894
///     }
/// }
/// ```
///
/// ## Error Responses
///
/// ### 400 Bad Request
///
/// ```json
/// {
///     "message": "Failed to connect wallet",
///     "Error": "No wallet endpoint available. Running in read-only mode"
/// }
/// ```
#[post("/session/connect")]
async fn connect(session: web::Data<ChainSession>) -> impl Responder {
    match session.connect().await {
        Ok(snapshot) => HttpResponse::Ok().json(json!({
            "message": "Wallet connected",
            "session": snapshot
        })),
        Err(e) => HttpResponse::BadRequest().json(json!({
            "message": "Failed to connect wallet",
            "Error": e.to_string()
        })),
    }
}

#[post("/session/disconnect")]
async fn disconnect(session: web::Data<ChainSession>) -> impl Responder {
    session.disconnect().await;
    HttpResponse::Ok().json(json!({
        "message": "Wallet disconnected",
    }))
}
