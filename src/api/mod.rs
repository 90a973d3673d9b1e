//! HTTP boundary: the authenticated client, its error type, and the
//! request/response encodings every resource service goes through.

mod client;
mod envelope;
mod error;
mod multipart;

pub use client::HttpClient;
pub use envelope::{decode, Envelope};
pub use error::ApiError;
pub use multipart::{FormFields, FormValue, MultipartPayload};
