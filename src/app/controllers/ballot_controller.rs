use actix_web::{get, post, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

use crate::app::{
    chain::{access_nft::AccessNft, ballot::BallotContract, session::ChainSession},
    config::AppConfig,
    dtos::{
        ballot_dto::{AccessRequestDto, CastVoteDto},
        page_dto::PageQuery,
    },
    services::ballot_service::{ballot_page, cast_vote, request_access},
};

/// Ballot page for one voting
///
/// # API Endpoint
/// ```not_rust
/// GET /vote?id={identifier}
/// ```
///
/// Details, candidates and token holders load independently, a failed
/// section carries its own error instead of failing the page.
#[get("/vote")]
async fn show(
    config: web::Data<AppConfig>,
    session: web::Data<ChainSession>,
    ballot: web::Data<BallotContract>,
    nft: web::Data<AccessNft>,
    query: web::Query<PageQuery>,
) -> impl Responder {
    let identifier = match &query.id {
        Some(id) if !id.trim().is_empty() => id.trim().to_string(),
        _ => {
            return HttpResponse::BadRequest().json(json!({
                "message": "No identifier provided.",
            }));
        }
    };

    let view = ballot_page(config, session, ballot, nft, &identifier).await;
    HttpResponse::Ok().json(view)
}

/// Cast a vote
///
/// This endpoint submits a `vote` transaction for the connected
/// account
///
/// # API Endpoint
///
/// ```not_rust
/// POST /vote
/// Content-Type: application/json
/// ```
///
/// # Request Body
///
/// ```json
/// {
///    "identifier": "voting-2024",
///    "candidate": "Alice"
/// }
/// ```
///
/// The candidate must be one of the candidates registered on the
/// voting, anything else is rejected before a transaction is sent.
///
/// # Response
///
/// ## Success (200 OK)
///
/// ```json
/// {
///     "message": "Vote cast",
///     "transactionHash": "0x91b9..."
/// }
/// ```
///
/// ## Error Responses
///
/// ### 400 Bad Request
///
/// ```json
/// {
///     "message": "Failed to cast vote",
///     "Error": "Contract call failed: Invalid candidate selected."
/// }
/// ```
///
/// # Example Usage
///
/// ```bash
/// curl -X POST http://localhost:8080/vote \
///      -H "Content-Type: application/json" \
///      -d '{ "identifier": "voting-2024", "candidate": "Alice" }'
/// ```
#[post("/vote")]
async fn cast(
    session: web::Data<ChainSession>,
    ballot: web::Data<BallotContract>,
    vote: web::Json<CastVoteDto>,
) -> impl Responder {
    let vote = vote.into_inner();

    // Validate input
    if vote.validate().is_err() {
        return HttpResponse::BadRequest().json(json!({
            "message": "Invalid input",
            "Error": vote.validate().unwrap_err()
        }));
    }

    match cast_vote(session, ballot, vote).await {
        Ok(receipt) => HttpResponse::Ok().json(json!({
            "message": "Vote cast",
            "transactionHash": receipt.transaction_hash
        })),
        Err(e) => HttpResponse::BadRequest().json(json!({
            "message": "Failed to cast vote",
            "Error": e.to_string()
        })),
    }
}

#[post("/vote/access")]
async fn request(
    session: web::Data<ChainSession>,
    nft: web::Data<AccessNft>,
    access: web::Json<AccessRequestDto>,
) -> impl Responder {
    let access = access.into_inner();

    if access.validate().is_err() {
        return HttpResponse::BadRequest().json(json!({
            "message": "Invalid input",
            "Error": access.validate().unwrap_err()
        }));
    }

    match request_access(session, nft, &access.identifier).await {
        Ok(receipt) => HttpResponse::Ok().json(json!({
            "message": "Access requested",
            "transactionHash": receipt.transaction_hash
        })),
        Err(e) => HttpResponse::BadRequest().json(json!({
            "message": "Failed to request access",
            "Error": e.to_string()
        })),
    }
}
