//! Request signing for the Atlantic.Net Cloud API
//!
//! Every request carries a `Signature` parameter: the base64 encoded
//! HMAC-SHA256 of `Timestamp` followed by `Rndguid`, keyed with the
//! account's private key.

use base64::Engine;
use ring::hmac;

pub fn sign(private_key: &str, timestamp: i64, rndguid: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, private_key.as_bytes());
    let message = format!("{}{}", timestamp, rndguid);
    let signature = hmac::sign(&key, message.as_bytes());
    base64::engine::general_purpose::STANDARD.encode(signature.as_ref())
}
