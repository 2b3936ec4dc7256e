use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use chainballot_gateway::app;
use chainballot_gateway::app::chain::access_nft::AccessNft;
use chainballot_gateway::app::chain::ballot::BallotContract;
use chainballot_gateway::app::chain::rpc::RpcClient;
use chainballot_gateway::app::chain::session::ChainSession;
use chainballot_gateway::app::config::AppConfig;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => panic!("Invalid configuration: {}", e),
    };

    let read_client = Arc::new(RpcClient::new(&config.readonly_rpc_url));
    let ballot = BallotContract::new(config.ballot_address, Arc::clone(&read_client));
    let nft = AccessNft::new(config.nft_address, Arc::clone(&read_client));
    let session = ChainSession::new(&config);
    session.detect().await;

    let bind_addr = config.bind_addr.clone();
    let allowed_origin = config.allowed_origin.clone();
    let config_data = web::Data::new(config);
    let ballot_data = web::Data::new(ballot);
    let nft_data = web::Data::new(nft);
    let session_data = web::Data::new(session);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&allowed_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                "Content-Type",
                "Origin",
                "X-Requested-With",
                "Accept",
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(config_data.clone())
            .app_data(ballot_data.clone())
            .app_data(nft_data.clone())
            .app_data(session_data.clone())
            .configure(app::init::initialize)
    })
    .bind(bind_addr.as_str())?
    .run()
    .await
}
