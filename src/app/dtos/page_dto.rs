use crate::app::chain::error::ChainError;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug)]
pub struct PageQuery {
    pub id: Option<String>,
}

/// One independently loaded page section. A failed section carries its
/// error message instead of blanking the whole page.
#[derive(Serialize, Debug)]
pub struct Section<T> {
    #[serde(rename = "data")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(rename = "error")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> From<Result<T, ChainError>> for Section<T> {
    fn from(result: Result<T, ChainError>) -> Section<T> {
        match result {
            Ok(data) => Section {
                data: Some(data),
                error: None,
            },
            Err(e) => Section {
                data: None,
                error: Some(e.to_string()),
            },
        }
    }
}
