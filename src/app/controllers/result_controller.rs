use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;

use crate::app::{
    chain::{access_nft::AccessNft, ballot::BallotContract, error::ChainError},
    config::AppConfig,
    dtos::page_dto::PageQuery,
    services::result_service::result_page,
};

/// Result page for one voting
///
/// # API Endpoint
/// ```not_rust
/// GET /result?id={identifier}
/// ```
///
/// # Response
///
/// ## Success (200 OK)
///
/// The outcome, per-candidate tallies with the winner marked, voting
/// details and token holders.
///
/// ## Error Responses
///
/// ### 404 Not Found
///
/// ```json
/// {
///     "message": "Voting not found for identifier: voting-2024"
/// }
/// ```
#[get("/result")]
async fn show(
    config: web::Data<AppConfig>,
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

    match result_page(config, ballot, nft, &identifier).await {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => match e {
            ChainError::NotFound(_) => HttpResponse::NotFound().json(json!({
                "message": e.to_string(),
            })),
            _ => HttpResponse::BadRequest().json(json!({
                "message": "Failed to load results",
                "Error": e.to_string()
            })),
        },
    }
}
