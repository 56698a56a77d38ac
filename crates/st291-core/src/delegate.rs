//! Boundary to the structured payload codec.
//!
//! Packets whose DID/SDID mark a delegated payload (SCTE-104 splice events)
//! hand their body bytes, minus the 2-byte descriptor, to a `PayloadCodec`.
//! The codec owns the structured model; this crate only moves bytes and asks
//! the codec for views.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::bits::hex;

/// Errors raised by a `PayloadCodec` implementation.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("unsupported payload: {0}")]
    Unsupported(String),
}

/// Structured decoder/encoder for the delegated payload kind.
pub trait PayloadCodec {
    type Model: Clone + fmt::Debug;

    fn decode(&self, body: &[u8]) -> Result<Self::Model, PayloadError>;

    fn encode(&self, model: &Self::Model) -> Result<Vec<u8>, PayloadError>;

    /// Project the model for presentation; `human_readable` asks for string
    /// renderings (e.g. UPIDs as text) instead of raw numbers.
    fn to_view(&self, model: &Self::Model, human_readable: bool) -> Value;
}

/// Pass-through codec keeping the delegated body verbatim.
///
/// The plain view is the byte list; the human-readable view is lowercase hex.
///
/// # Examples
/// ```
/// use st291_core::{OpaquePayload, PayloadCodec};
///
/// let model = OpaquePayload.decode(&[0x01, 0xab]).unwrap();
/// assert_eq!(OpaquePayload.encode(&model).unwrap(), vec![0x01, 0xab]);
/// assert_eq!(OpaquePayload.to_view(&model, true), "01ab");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OpaquePayload;

impl PayloadCodec for OpaquePayload {
    type Model = Vec<u8>;

    fn decode(&self, body: &[u8]) -> Result<Self::Model, PayloadError> {
        Ok(body.to_vec())
    }

    fn encode(&self, model: &Self::Model) -> Result<Vec<u8>, PayloadError> {
        Ok(model.clone())
    }

    fn to_view(&self, model: &Self::Model, human_readable: bool) -> Value {
        if human_readable {
            Value::String(hex::encode(model))
        } else {
            Value::from(model.clone())
        }
    }
}
