mod category;
mod lap;
mod pair;
mod race;

pub use category::CategoryRepository;
pub use lap::LapRepository;
pub use pair::PairRepository;
pub use race::RaceRepository;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, StorageError};

fn decode<T: DeserializeOwned>(doc: Value) -> Result<T> {
    Ok(serde_json::from_value(doc)?)
}

fn decode_all<T: DeserializeOwned>(docs: Vec<Value>) -> Result<Vec<T>> {
    docs.into_iter().map(decode).collect()
}

/// Reads degrade to empty results when the backend is unavailable, so
/// display surfaces render "no data" instead of failing. Writes always
/// propagate the error.
fn read_or_empty(res: Result<Vec<Value>>) -> Result<Vec<Value>> {
    match res {
        Err(StorageError::Unavailable(reason)) => {
            tracing::warn!(%reason, "store unavailable, degrading read to empty");
            Ok(Vec::new())
        }
        other => other,
    }
}

fn read_or_missing(res: Result<Option<Value>>) -> Result<Option<Value>> {
    match res {
        Err(StorageError::Unavailable(reason)) => {
            tracing::warn!(%reason, "store unavailable, degrading read to missing");
            Ok(None)
        }
        other => other,
    }
}
