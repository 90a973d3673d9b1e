use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::ApiError;

/// Response body that either nests the payload under `data` or is the payload
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(payload) => payload,
        }
    }
}

/// Decode a response body, unwrapping the optional `data` envelope
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::Format("empty response body".to_string()));
    }

    serde_json::from_slice::<Envelope<T>>(body)
        .map(Envelope::into_inner)
        .map_err(|e| ApiError::Format(e.to_string()))
}
