use actix_web::{http::StatusCode, test, web, App};
use alloy_primitives::Address;
use chainballot_gateway::app::chain::access_nft::AccessNft;
use chainballot_gateway::app::chain::ballot::BallotContract;
use chainballot_gateway::app::chain::rpc::RpcClient;
use chainballot_gateway::app::chain::session::ChainSession;
use chainballot_gateway::app::config::AppConfig;
use chainballot_gateway::app::controllers::{
    ballot_controller, home_controller, profile_controller, result_controller, session_controller,
    voting_controller,
};
use chainballot_gateway::app::dtos::voting_dto::CreateVotingDto;
use chrono::{Duration, Utc};
use std::path::PathBuf;
use std::sync::Arc;

#[cfg(test)]
mod tests {
    use super::*;

    // No wallet endpoint and an unroutable read endpoint: only code
    // paths that never touch the network answer deterministically.
    fn offline_config() -> AppConfig {
        AppConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            allowed_origin: "http://localhost".to_string(),
            wallet_rpc_url: None,
            readonly_rpc_url: "http://127.0.0.1:1".to_string(),
            chain_id: 1313161894,
            chain_name: "Gyansetu AI".to_string(),
            currency_symbol: "GAI".to_string(),
            explorer_url: "http://localhost".to_string(),
            ballot_address: Address::ZERO,
            nft_address: Address::ZERO,
            session_file: std::env::temp_dir()
                .join(format!("page-guard-{}.json", rand::random::<u32>())),
            read_concurrency: 3,
            artifacts_dir: PathBuf::from("artifacts"),
            manifest_file: PathBuf::from("deployment-info.json"),
        }
    }

    fn chain_data(
        config: &AppConfig,
    ) -> (web::Data<BallotContract>, web::Data<AccessNft>, web::Data<ChainSession>) {
        let client = Arc::new(RpcClient::new(&config.readonly_rpc_url));
        (
            web::Data::new(BallotContract::new(config.ballot_address, Arc::clone(&client))),
            web::Data::new(AccessNft::new(config.nft_address, Arc::clone(&client))),
            web::Data::new(ChainSession::new(config)),
        )
    }

    #[actix_web::test]
    async fn vote_page_requires_an_identifier() {
        let config = offline_config();
        let (ballot, nft, session) = chain_data(&config);
        let mut app = test::init_service(
            App::new()
                .app_data(web::Data::new(config))
                .app_data(ballot)
                .app_data(nft)
                .app_data(session)
                .service(ballot_controller::show),
        )
        .await;

        let req = test::TestRequest::get().uri("/vote").to_request();
        let resp = test::call_service(&mut app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = test::read_body(resp).await;
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["message"], "No identifier provided.");

        let req = test::TestRequest::get().uri("/vote?id=%20").to_request();
        let resp = test::call_service(&mut app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn result_page_requires_an_identifier() {
        let config = offline_config();
        let (ballot, nft, session) = chain_data(&config);
        let mut app = test::init_service(
            App::new()
                .app_data(web::Data::new(config))
                .app_data(ballot)
                .app_data(nft)
                .app_data(session)
                .service(result_controller::show),
        )
        .await;

        let req = test::TestRequest::get().uri("/result").to_request();
        let resp = test::call_service(&mut app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = test::read_body(resp).await;
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["message"], "No identifier provided.");
    }

    #[actix_web::test]
    async fn edit_page_requires_an_identifier() {
        let config = offline_config();
        let (ballot, nft, session) = chain_data(&config);
        let mut app = test::init_service(
            App::new()
                .app_data(web::Data::new(config))
                .app_data(ballot)
                .app_data(nft)
                .app_data(session)
                .service(voting_controller::manage),
        )
        .await;

        let req = test::TestRequest::get().uri("/vote-edit").to_request();
        let resp = test::call_service(&mut app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = test::read_body(resp).await;
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["message"], "No identifier provided.");
    }

    #[actix_web::test]
    async fn landing_page_renders_without_a_wallet() {
        let config = offline_config();
        let (ballot, nft, session) = chain_data(&config);
        let mut app = test::init_service(
            App::new()
                .app_data(web::Data::new(config))
                .app_data(ballot)
                .app_data(nft)
                .app_data(session)
                .service(home_controller::landing),
        )
        .await;

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&mut app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["name"], "ChainBallot");
        assert_eq!(body["network"]["chainId"], 1313161894);
        assert_eq!(body["session"]["walletDetected"], false);
    }

    #[actix_web::test]
    async fn session_snapshot_reports_read_only_mode() {
        let config = offline_config();
        let (ballot, nft, session) = chain_data(&config);
        let mut app = test::init_service(
            App::new()
                .app_data(web::Data::new(config))
                .app_data(ballot)
                .app_data(nft)
                .app_data(session)
                .service(session_controller::current_session)
                .service(session_controller::connect),
        )
        .await;

        let req = test::TestRequest::get().uri("/session").to_request();
        let resp = test::call_service(&mut app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["walletDetected"], false);
        assert!(body["account"].is_null());

        let req = test::TestRequest::post().uri("/session/connect").to_request();
        let resp = test::call_service(&mut app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = test::read_body(resp).await;
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["message"], "Failed to connect wallet");
    }

    #[actix_web::test]
    async fn profile_requires_a_connected_wallet() {
        let config = offline_config();
        let (ballot, nft, session) = chain_data(&config);
        let mut app = test::init_service(
            App::new()
                .app_data(web::Data::new(config))
                .app_data(ballot)
                .app_data(nft)
                .app_data(session)
                .service(profile_controller::show),
        )
        .await;

        let req = test::TestRequest::get().uri("/profile").to_request();
        let resp = test::call_service(&mut app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = test::read_body(resp).await;
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["message"], "Wallet not connected");
    }

    #[actix_web::test]
    async fn create_voting_rejects_invalid_input() {
        let config = offline_config();
        let (ballot, nft, session) = chain_data(&config);
        let mut app = test::init_service(
            App::new()
                .app_data(web::Data::new(config))
                .app_data(ballot)
                .app_data(nft)
                .app_data(session)
                .service(voting_controller::create),
        )
        .await;

        let voting = CreateVotingDto {
            identifier: None,
            title: String::new(),
            description: "Annual board election".to_string(),
            start_time: Utc::now() + Duration::hours(1),
            end_time: Utc::now() + Duration::hours(25),
            nft_contract: None,
            candidates: vec!["   ".to_string()],
        };

        let req = test::TestRequest::post()
            .uri("/voting")
            .set_json(&voting)
            .to_request();
        let resp = test::call_service(&mut app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = test::read_body(resp).await;
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["message"], "Invalid input");
    }
}
