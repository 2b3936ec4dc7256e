use actix_web::{get, post, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

use crate::app::{
    chain::{access_nft::AccessNft, ballot::BallotContract, session::ChainSession},
    config::AppConfig,
    dtos::profile_dto::{BatchMintDto, MintAccessDto},
    services::profile_service::{batch_mint_access, mint_access, profile_page},
};

/// Votings owned by the connected account
///
/// # API Endpoint
/// ```not_rust
/// GET /profile
/// ```
///
/// Requires a connected wallet. When ownership cannot be resolved the
/// page degrades to listing every ongoing voting.
#[get("/profile")]
async fn show(
    config: web::Data<AppConfig>,
    session: web::Data<ChainSession>,
    ballot: web::Data<BallotContract>,
    nft: web::Data<AccessNft>,
) -> impl Responder {
    session.refresh().await;
    let account = match session.account() {
        Some(account) => account,
        None => {
            return HttpResponse::BadRequest().json(json!({
                "message": "Wallet not connected",
            }));
        }
    };

    let view = profile_page(config, ballot, nft, account).await;
    HttpResponse::Ok().json(view)
}

#[post("/access/mint")]
async fn mint(
    session: web::Data<ChainSession>,
    nft: web::Data<AccessNft>,
    request: web::Json<MintAccessDto>,
) -> impl Responder {
    let request = request.into_inner();

    match mint_access(session, nft, request.address).await {
        Ok(receipt) => HttpResponse::Ok().json(json!({
            "message": "Minting access token",
            "transactionHash": receipt.transaction_hash
        })),
        Err(e) => HttpResponse::BadRequest().json(json!({
            "message": "Failed to mint access token",
            "Error": e.to_string()
        })),
    }
}

#[post("/access/mint-batch")]
async fn mint_batch(
    session: web::Data<ChainSession>,
    nft: web::Data<AccessNft>,
    request: web::Json<BatchMintDto>,
) -> impl Responder {
    let request = request.into_inner();

    if request.validate().is_err() {
        return HttpResponse::BadRequest().json(json!({
            "message": "Invalid input",
            "Error": request.validate().unwrap_err()
        }));
    }

    match batch_mint_access(session, nft, request.addresses).await {
        Ok(receipt) => HttpResponse::Ok().json(json!({
            "message": "Minting access tokens",
            "transactionHash": receipt.transaction_hash
        })),
        Err(e) => HttpResponse::BadRequest().json(json!({
            "message": "Failed to mint access tokens",
            "Error": e.to_string()
        })),
    }
}
