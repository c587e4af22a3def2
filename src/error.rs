//! Error type for collaborator failures
//!
//! The simulation itself never fails; these cover the platform around it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("DOM element `{0}` not found")]
    ElementMissing(String),
    #[error("2D rendering context unavailable")]
    ContextUnavailable,
    #[error("storage unavailable")]
    StorageUnavailable,
    #[error("failed to write `{key}` to storage: {reason}")]
    StorageWrite { key: String, reason: String },
    #[error("stored value could not be parsed")]
    Parse {
        #[from]
        source: serde_json::Error,
    },
    #[error("JavaScript error: {0}")]
    Js(String),
    #[error("frame callback could not be scheduled: {0}")]
    Schedule(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for GameError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        GameError::Js(format!("{:?}", value))
    }
}
