pub mod access_nft;
pub mod ballot;
pub mod error;
pub mod rpc;
pub mod session;
