use crate::payments::error::GatewayResult;
use crate::payments::types::Params;
use sha2::{Digest, Sha256};

/// `hex(sha256(merchant_id ‖ json(params) ‖ password))`.
///
/// The JSON is the compact serde encoding of `params`, the same bytes that end
/// up inside the request envelope, so field order matters.
pub fn sign(params: &Params, merchant_id: &str, password: &str) -> GatewayResult<String> {
    let serialized = serde_json::to_vec(params)?;
    Ok(sign_bytes(&serialized, merchant_id, password))
}

pub fn sign_bytes(serialized_params: &[u8], merchant_id: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(merchant_id.as_bytes());
    hasher.update(serialized_params);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
