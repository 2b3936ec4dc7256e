use actix_web::web::Path;
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

use crate::app::{
    chain::{access_nft::AccessNft, ballot::BallotContract, session::ChainSession},
    config::AppConfig,
    dtos::{
        page_dto::PageQuery,
        voting_dto::{CandidateActionDto, CreateVotingDto},
    },
    services::voting_service::{
        add_candidate, create_voting, delete_candidate, delete_voting, edit_page,
    },
};

/// Create a new voting
///
/// This endpoint submits a `createVoting` transaction through the
/// connected wallet
///
/// # API Endpoint
///
/// ```not_rust
/// POST /voting
/// Content-Type: application/json
/// ```
///
/// # Request Body
///
/// ```json
/// {
///    "identifier": "voting-2024",
///    "title": "Board election",
///    "description": "Annual board election",
///    "start_time": "2024-07-01T09:00:00Z",
///    "end_time": "2024-07-02T09:00:00Z",
///    "candidates": ["Alice", "Bob"]
/// }
/// ```
///
/// `identifier` and `nft_contract` are optional. A fresh identifier is
/// generated and the configured access contract is used when absent.
///
/// # Validation Rules
///
/// - `title`: non-empty, at most 100 characters
/// - `description`: non-empty, at most 500 characters
/// - `candidates`: at least one non-blank entry
/// - times: start before end, both in the future
///
/// # Response
///
/// ## Success (201 Created)
///
/// ```json
/// {
///     "message": "Creating voting",
///     "identifier": "voting-2024",
///     "transactionHash": "0x91b9..."
/// }
/// ```
///
/// ## Error Responses
///
/// ### 400 Bad Request
///
/// Returned when validation fails:
/// ```json
/// {
///     "message": "Invalid input",
///     "Error": {
///         "title": ["Title should not be empty and not greater than 100 characters"]
///     }
/// }
/// ```
///
/// Returned when the transaction fails:
/// ```json
/// {
///     "message": "Failed to create voting",
///     "Error": "Transaction was rejected by user: User denied transaction signature"
/// }
/// ```
///
/// # Example Usage
///
/// ```bash
/// curl -X POST http://localhost:8080/voting \
///      -H "Content-Type: application/json" \
///      -d '{
///           "title": "Board election",
///           "description": "Annual board election",
///           "start_time": "2024-07-01T09:00:00Z",
///           "end_time": "2024-07-02T09:00:00Z",
///           "candidates": ["Alice", "Bob"]
///          }'
/// ```
#[post("/voting")]
async fn create(
    config: web::Data<AppConfig>,
    session: web::Data<ChainSession>,
    ballot: web::Data<BallotContract>,
    voting: web::Json<CreateVotingDto>,
) -> impl Responder {
    let voting = voting.into_inner();

    // Validate input
    if voting.validate().is_err() {
        return HttpResponse::BadRequest().json(json!({
            "message": "Invalid input",
            "Error": voting.validate().unwrap_err()
        }));
    }

    match create_voting(config, session, ballot, voting).await {
        Ok((identifier, receipt)) => HttpResponse::Created().json(json!({
            "message": "Creating voting",
            "identifier": identifier,
            "transactionHash": receipt.transaction_hash
        })),
        Err(e) => HttpResponse::BadRequest().json(json!({
            "message": "Failed to create voting",
            "Error": e.to_string()
        })),
    }
}

/// Delete a voting
///
/// # API Endpoint
/// ```not_rust
/// DELETE /voting/{identifier}
/// ```
#[delete("/voting/{identifier}")]
async fn remove(
    session: web::Data<ChainSession>,
    ballot: web::Data<BallotContract>,
    path: Path<String>,
) -> impl Responder {
    let identifier = path.into_inner();
    if identifier.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "message": "No identifier provided.",
        }));
    }

    match delete_voting(session, ballot, &identifier).await {
        Ok(receipt) => HttpResponse::Ok().json(json!({
            "message": "Deleted voting",
            "transactionHash": receipt.transaction_hash
        })),
        Err(e) => HttpResponse::BadRequest().json(json!({
            "message": "Failed to delete voting",
            "Error": e.to_string()
        })),
    }
}

#[post("/voting/{identifier}/candidates")]
async fn push_candidate(
    session: web::Data<ChainSession>,
    ballot: web::Data<BallotContract>,
    path: Path<String>,
    action: web::Json<CandidateActionDto>,
) -> impl Responder {
    let identifier = path.into_inner();
    let action = action.into_inner();

    if action.validate().is_err() {
        return HttpResponse::BadRequest().json(json!({
            "message": "Invalid input",
            "Error": action.validate().unwrap_err()
        }));
    }

    match add_candidate(session, ballot, &identifier, action.candidate.trim()).await {
        Ok(receipt) => HttpResponse::Ok().json(json!({
            "message": "Candidate added",
            "transactionHash": receipt.transaction_hash
        })),
        Err(e) => HttpResponse::BadRequest().json(json!({
            "message": "Failed to add candidate",
            "Error": e.to_string()
        })),
    }
}

#[delete("/voting/{identifier}/candidates")]
async fn pull_candidate(
    session: web::Data<ChainSession>,
    ballot: web::Data<BallotContract>,
    path: Path<String>,
    action: web::Json<CandidateActionDto>,
) -> impl Responder {
    let identifier = path.into_inner();
    let action = action.into_inner();

    if action.validate().is_err() {
        return HttpResponse::BadRequest().json(json!({
            "message": "Invalid input",
            "Error": action.validate().unwrap_err()
        }));
    }

    match delete_candidate(session, ballot, &identifier, action.candidate.trim()).await {
        Ok(receipt) => HttpResponse::Ok().json(json!({
            "message": "Candidate removed",
            "transactionHash": receipt.transaction_hash
        })),
        Err(e) => HttpResponse::BadRequest().json(json!({
            "message": "Failed to remove candidate",
            "Error": e.to_string()
        })),
    }
}

/// Management page for one voting
///
/// # API Endpoint
/// ```not_rust
/// GET /vote-edit?id={identifier}
/// ```
///
/// Sections load independently; `isOwner` compares the connected
/// account with the voting owner on the access contract.
#[get("/vote-edit")]
async fn manage(
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

    let view = edit_page(config, session, ballot, nft, &identifier).await;
    HttpResponse::Ok().json(view)
}
