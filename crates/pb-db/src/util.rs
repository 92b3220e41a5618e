use pb_core::types::Postback;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("encode failed: {message}")]
    Encode { message: String },
    #[error("decode failed: {message}")]
    Decode { message: String },
}

pub fn encode_postback(postback: &Postback) -> Result<Vec<u8>, DbError> {
    serde_json::to_vec(postback).map_err(|err| DbError::Encode {
        message: err.to_string(),
    })
}

pub fn decode_postback(bytes: &[u8]) -> Result<Postback, DbError> {
    serde_json::from_slice(bytes).map_err(|err| DbError::Decode {
        message: err.to_string(),
    })
}
