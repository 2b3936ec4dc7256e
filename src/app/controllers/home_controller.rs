use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;

use crate::app::{
    chain::{ballot::BallotContract, session::ChainSession},
    config::AppConfig,
    services::directory_service,
};

#[get("/")]
async fn landing(config: web::Data<AppConfig>, session: web::Data<ChainSession>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "name": "ChainBallot",
        "description": "Decentralized voting with NFT access passes",
        "network": {
            "chainId": config.chain_id,
            "chainName": config.chain_name,
            "currencySymbol": config.currency_symbol,
            "explorerUrl": config.explorer_url,
        },
        "session": session.snapshot(),
    }))
}

/// Voting directory
///
/// # API Endpoint
/// ```not_rust
/// GET /home
/// ```
///
/// Lists every ongoing and ended voting with links to the matching
/// page. Rows that could not be loaded carry their own error message.
#[get("/home")]
async fn home(config: web::Data<AppConfig>, ballot: web::Data<BallotContract>) -> impl Responder {
    let view = directory_service::directory(config, ballot).await;
    HttpResponse::Ok().json(view)
}
