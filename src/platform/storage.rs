//! LocalStorage JSON helpers
//!
//! Only wasm builds have storage. Native builds load nothing and accept
//! every save, which keeps callers free of `cfg` branches.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("local storage unavailable")]
    Unavailable,

    #[error("could not encode data: {0}")]
    Encode(String),

    #[error("local storage is full or blocked")]
    Write,
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
}

/// Decode the value stored under `key`. Missing or unreadable data is `None`.
#[cfg(target_arch = "wasm32")]
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let json = local_storage()?.get_item(key).ok()??;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring unreadable `{}`: {}", key, e);
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn save_json<T: Serialize>(key: &str, value: &T) -> Result<(), StorageError> {
    let storage = local_storage().ok_or(StorageError::Unavailable)?;
    let json = serde_json::to_string(value).map_err(|e| StorageError::Encode(e.to_string()))?;
    storage
        .set_item(key, &json)
        .map_err(|_| StorageError::Write)
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load_json<T: DeserializeOwned>(_key: &str) -> Option<T> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_json<T: Serialize>(_key: &str, _value: &T) -> Result<(), StorageError> {
    Ok(())
}
