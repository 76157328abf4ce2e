//! Computing AWS SigV4 authorization headers without an SDK.
//!
//! This crate derives the full header set an AWS-compatible signed
//! endpoint (API Gateway and friends) expects on an incoming request:
//! `Accept`, `Content-Type`, `Host`, `x-amz-date`,
//! `x-amz-security-token` and `Authorization`. The caller supplies a
//! fully resolved region, service, endpoint and key material per call;
//! sending the request is left to whatever HTTP client is in use.
//!
//! # Example
//!
//! ```no_run
//! use apigw_sigv4::{Signer, SigningRequest};
//! use serde_json::json;
//!
//! fn main() -> apigw_sigv4::Result<()> {
//!     let signed = Signer::new().sign(SigningRequest {
//!         method: Some("POST".to_string()),
//!         path: Some("/dev/foo/bar".to_string()),
//!         region: Some("us-east-1".to_string()),
//!         endpoint: Some("https://123abc.execute-api.us-east-1.amazonaws.com".to_string()),
//!         access_key: Some("AKIA...".to_string()),
//!         secret_key: Some("...".to_string()),
//!         session_token: Some("".to_string()),
//!         data: json!({"foo": "bar"}),
//!         ..Default::default()
//!     })?;
//!
//!     // Attach `signed.headers` to the outgoing request and send
//!     // `signed.body` verbatim; the signature binds both.
//!     println!("{:?}", signed.headers);
//!     Ok(())
//! }
//! ```
//!
//! Signing is synchronous and CPU-only. The canonical request and string
//! to sign are emitted at `debug` level through [`log`] for diagnosing
//! signature mismatches.

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod canonical;
mod constants;
mod credential;
mod hash;
mod request;
mod sign;
mod time;
mod utils;

mod error;
pub use error::Error;
pub use error::ErrorKind;
pub use error::Result;

pub use credential::Credential;
pub use request::SignedRequest;
pub use request::SigningRequest;
pub use sign::Signer;
