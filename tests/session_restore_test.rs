use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use alloy_primitives::Address;
use chainballot_gateway::app::chain::session::ChainSession;
use chainballot_gateway::app::config::AppConfig;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal wallet endpoint: answers eth_chainId with the configured
    // chain and eth_accounts with a fixed account list.
    async fn rpc_stub(accounts: web::Data<Vec<Address>>, body: web::Json<Value>) -> impl Responder {
        let result = match body["method"].as_str() {
            Some("eth_chainId") => json!("0x4e4542a6"),
            Some("eth_accounts") => json!(accounts.as_ref()),
            _ => Value::Null,
        };
        HttpResponse::Ok().json(json!({
            "jsonrpc": "2.0",
            "id": body["id"],
            "result": result,
        }))
    }

    fn spawn_wallet_stub(accounts: Vec<Address>) -> std::io::Result<String> {
        let accounts = web::Data::new(accounts);
        let server = HttpServer::new(move || {
            App::new()
                .app_data(accounts.clone())
                .route("/", web::post().to(rpc_stub))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))?;
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        Ok(format!("http://{}", addr))
    }

    fn wallet_config(wallet_rpc_url: String, session_file: PathBuf) -> AppConfig {
        AppConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            allowed_origin: "http://localhost".to_string(),
            wallet_rpc_url: Some(wallet_rpc_url),
            readonly_rpc_url: "http://127.0.0.1:1".to_string(),
            chain_id: 1313161894,
            chain_name: "Gyansetu AI".to_string(),
            currency_symbol: "GAI".to_string(),
            explorer_url: "http://localhost".to_string(),
            ballot_address: Address::ZERO,
            nft_address: Address::ZERO,
            session_file,
            read_concurrency: 3,
            artifacts_dir: PathBuf::from("artifacts"),
            manifest_file: PathBuf::from("deployment-info.json"),
        }
    }

    fn session_file(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("session-restore-{}-{}.json", tag, rand::random::<u32>()))
    }

    fn account() -> Address {
        "0x9a836494aCB32fb1721eCbe976C13291dd91597f".parse().unwrap()
    }

    #[actix_web::test]
    async fn stored_account_survives_while_the_wallet_lists_it() {
        let url = spawn_wallet_stub(vec![account()]).unwrap();
        let path = session_file("kept");
        fs::write(&path, json!({ "account": account() }).to_string()).unwrap();

        let session = ChainSession::new(&wallet_config(url, path.clone()));
        session.detect().await;

        let snapshot = session.snapshot();
        assert!(snapshot.wallet_detected);
        assert_eq!(snapshot.chain_id, Some(1313161894));
        assert_eq!(snapshot.account, Some(account()));
        fs::remove_file(&path).unwrap();
    }

    #[actix_web::test]
    async fn stale_stored_account_is_cleared() {
        let other = Address::repeat_byte(0x42);
        let url = spawn_wallet_stub(vec![other]).unwrap();
        let path = session_file("stale");
        fs::write(&path, json!({ "account": account() }).to_string()).unwrap();

        let session = ChainSession::new(&wallet_config(url, path.clone()));
        session.detect().await;

        let snapshot = session.snapshot();
        assert!(snapshot.wallet_detected);
        assert_eq!(snapshot.account, None);
        assert!(!path.exists());
    }
}
