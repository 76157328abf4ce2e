//! SigV4 signer for API Gateway style endpoints.
//!
//! - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)

use std::fmt::Write;

use http::header;
use http::HeaderMap;
use http::HeaderName;
use http::HeaderValue;
use log::debug;
use serde_json::Value;

use crate::canonical::canonical_request;
use crate::canonical::signed_headers;
use crate::constants::AWS4;
use crate::constants::AWS4_HMAC_SHA256;
use crate::constants::AWS4_REQUEST;
use crate::constants::X_AMZ_DATE;
use crate::constants::X_AMZ_SECURITY_TOKEN;
use crate::hash::hex_hmac_sha256;
use crate::hash::hex_sha256;
use crate::hash::hmac_sha256;
use crate::request::ResolvedRequest;
use crate::time::format_date;
use crate::time::format_iso8601;
use crate::time::now;
use crate::time::DateTime;
use crate::Error;
use crate::Result;
use crate::SignedRequest;
use crate::SigningRequest;

/// Signer that implements AWS SigV4 header signing.
///
/// Stateless across calls: every invocation derives its own timestamp,
/// scope and signing key, so a `Signer` can be shared freely.
#[derive(Debug, Default)]
pub struct Signer {
    time: Option<DateTime>,
}

impl Signer {
    /// Create a new signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Sign one request, producing the header set and the transport body.
    ///
    /// Fails before any hashing if a required field is missing or the
    /// endpoint carries no host.
    pub fn sign(&self, req: SigningRequest) -> Result<SignedRequest> {
        let req = req.resolve()?;
        let now = self.time.unwrap_or_else(now);

        self.calculate(req, now)
    }

    fn calculate(&self, req: ResolvedRequest, now: DateTime) -> Result<SignedRequest> {
        let datetime = format_iso8601(now);

        // Headers that take part in canonicalization. The `host` header
        // keeps its lowercase spelling so byte-order sorting on the
        // original names yields the AWS ordering.
        let mut signing_headers: Vec<(&str, String)> = vec![
            ("Accept", req.accept_type.clone()),
            (X_AMZ_DATE, datetime.clone()),
            ("host", req.host.clone()),
        ];

        // GET carries its payload as query parameters and signs an empty
        // body; every other method signs the JSON text it will send.
        let (query, payload) = if req.method == "GET" {
            signing_headers.push(("Content-Type", req.content_type.clone()));
            (query_params(&req.data)?, String::new())
        } else {
            (Vec::new(), serde_json::to_string(&req.data)?)
        };

        let creq = canonical_request(&req.method, &req.path, &query, &signing_headers, &payload);
        debug!("calculated canonical request: {creq}");
        let encoded_req = hex_sha256(creq.as_bytes());

        // Scope: "20220313/<region>/<service>/aws4_request"
        let scope = format!(
            "{}/{}/{}/{}",
            format_date(now),
            req.region,
            req.service_name,
            AWS4_REQUEST
        );
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // AWS4-HMAC-SHA256
        // 20220313T072004Z
        // 20220313/<region>/<service>/aws4_request
        // <hashed_canonical_request>
        let string_to_sign = {
            let mut f = String::new();
            writeln!(f, "{AWS4_HMAC_SHA256}")?;
            writeln!(f, "{datetime}")?;
            writeln!(f, "{scope}")?;
            write!(f, "{encoded_req}")?;
            f
        };
        debug!("calculated string to sign: {string_to_sign}");

        let key = signing_key(
            &req.credential.secret_key,
            now,
            &req.region,
            &req.service_name,
        );
        let signature = hex_hmac_sha256(&key, string_to_sign.as_bytes());

        let mut authorization = HeaderValue::from_str(&format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            AWS4_HMAC_SHA256,
            req.credential.access_key,
            scope,
            signed_headers(&signing_headers),
            signature
        ))?;
        authorization.set_sensitive(true);

        let mut token = HeaderValue::from_str(&req.credential.session_token)?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::with_capacity(6);
        headers.insert(header::ACCEPT, HeaderValue::from_str(&req.accept_type)?);
        headers.insert(
            HeaderName::from_static(X_AMZ_DATE),
            HeaderValue::from_str(&datetime)?,
        );
        headers.insert(header::HOST, HeaderValue::from_str(&req.host)?);
        headers.insert(header::AUTHORIZATION, authorization);
        headers.insert(HeaderName::from_static(X_AMZ_SECURITY_TOKEN), token);
        // Both method branches converge on the default content type; it is
        // outside the signed header set for non-GET requests, so the
        // signature is unaffected either way.
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_str(&req.content_type)?,
        );

        Ok(SignedRequest {
            headers,
            body: payload,
        })
    }
}

/// Flatten a JSON object into the query parameter set of a GET request.
fn query_params(data: &Value) -> Result<Vec<(String, String)>> {
    match data {
        Value::Object(map) => Ok(map
            .iter()
            .map(|(k, v)| {
                let v = match v {
                    Value::String(s) => s.clone(),
                    v => v.to_string(),
                };
                (k.clone(), v)
            })
            .collect()),
        _ => Err(Error::request_invalid(
            "GET data must be an object of query parameters",
        )),
    }
}

/// Derive the request-scoped signing key.
///
/// Four chained HMAC-SHA256 steps; each output feeds the next step as its
/// raw binary key, never hex-encoded mid-chain.
fn signing_key(secret: &str, time: DateTime, region: &str, service: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("{AWS4}{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), format_date(time).as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), AWS4_REQUEST.as_bytes())
}
