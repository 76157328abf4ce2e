use std::fmt::Debug;
use std::fmt::Formatter;

use http::HeaderMap;
use http::Uri;
use serde_json::Value;

use crate::constants::DEFAULT_ACCEPT_TYPE;
use crate::constants::DEFAULT_CONTENT_TYPE;
use crate::constants::DEFAULT_SERVICE_NAME;
use crate::credential::Credential;
use crate::utils::Redact;
use crate::Error;
use crate::Result;

/// Input for one signing call.
///
/// `method`, `path`, `region`, `endpoint`, `access_key`, `secret_key` and
/// `session_token` are required; signing fails fast with a configuration
/// error naming the first missing one. The remaining fields are defaulted
/// at validation time. An empty `session_token` is valid and is passed
/// through to the output headers unchanged.
#[derive(Clone, Default)]
pub struct SigningRequest {
    /// HTTP verb, case-insensitive on input.
    pub method: Option<String>,
    /// URL path, not yet percent-encoded.
    pub path: Option<String>,
    /// AWS region, e.g. `us-east-1`.
    pub region: Option<String>,
    /// Full endpoint URL; only its host feeds the `host` header.
    pub endpoint: Option<String>,
    /// Access key id.
    pub access_key: Option<String>,
    /// Secret access key.
    pub secret_key: Option<String>,
    /// Session token; empty string for permanent credentials.
    pub session_token: Option<String>,
    /// Payload. For GET requests this object becomes the query parameter
    /// set; for other methods its JSON text is the signed body.
    /// `Null` is treated as an empty object.
    pub data: Value,
    /// Signing service name, defaults to `execute-api`.
    pub service_name: Option<String>,
    /// Value of the `Accept` header, defaults to `application/json`.
    pub accept_type: Option<String>,
    /// Value of the `Content-Type` header, defaults to `application/json`.
    pub content_type: Option<String>,
}

impl SigningRequest {
    /// Validate required fields and apply defaults.
    ///
    /// No hashing has happened yet when this fails, so an error never
    /// leaves partial work behind.
    pub(crate) fn resolve(self) -> Result<ResolvedRequest> {
        let method = self.method.ok_or_else(|| Error::missing_config("method"))?;
        let path = self.path.ok_or_else(|| Error::missing_config("path"))?;
        let region = self.region.ok_or_else(|| Error::missing_config("region"))?;
        let endpoint = self
            .endpoint
            .ok_or_else(|| Error::missing_config("endpoint"))?;
        let access_key = self
            .access_key
            .ok_or_else(|| Error::missing_config("access_key"))?;
        let secret_key = self
            .secret_key
            .ok_or_else(|| Error::missing_config("secret_key"))?;
        let session_token = self
            .session_token
            .ok_or_else(|| Error::missing_config("session_token"))?;

        let uri: Uri = endpoint.parse()?;
        let host = uri
            .host()
            .ok_or_else(|| {
                Error::endpoint_invalid(format!("endpoint '{endpoint}' carries no host"))
            })?
            .to_string();

        Ok(ResolvedRequest {
            method: method.to_uppercase(),
            path,
            region,
            host,
            credential: Credential {
                access_key,
                secret_key,
                session_token,
            },
            data: match self.data {
                Value::Null => Value::Object(Default::default()),
                data => data,
            },
            service_name: self
                .service_name
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
            accept_type: self
                .accept_type
                .unwrap_or_else(|| DEFAULT_ACCEPT_TYPE.to_string()),
            content_type: self
                .content_type
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
        })
    }
}

impl Debug for SigningRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("access_key", &Redact::from(&self.access_key))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("session_token", &Redact::from(&self.session_token))
            .field("service_name", &self.service_name)
            .finish_non_exhaustive()
    }
}

/// A validated request with defaults applied, host extracted and the
/// method normalized to uppercase.
#[derive(Debug)]
pub(crate) struct ResolvedRequest {
    pub method: String,
    pub path: String,
    pub region: String,
    pub host: String,
    pub credential: Credential,
    pub data: Value,
    pub service_name: String,
    pub accept_type: String,
    pub content_type: String,
}

/// Output of one signing call.
///
/// The body is the exact transport payload bound into the signature:
/// empty for GET, the serialized JSON text otherwise. It must be sent
/// verbatim for the signature to validate server side.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// The six headers to attach to the outgoing request.
    pub headers: HeaderMap,
    /// The request body matching the signed payload.
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;

    fn full_request() -> SigningRequest {
        SigningRequest {
            method: Some("post".to_string()),
            path: Some("/dev/foo/bar".to_string()),
            region: Some("us-east-1".to_string()),
            endpoint: Some(
                "https://123abc.execute-api.us-east-1.amazonaws.com:8443/prod".to_string(),
            ),
            access_key: Some("X".to_string()),
            secret_key: Some("Y".to_string()),
            session_token: Some("Z".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_applies_defaults_and_normalizes() {
        let resolved = full_request().resolve().unwrap();
        assert_eq!(resolved.method, "POST");
        assert_eq!(resolved.service_name, "execute-api");
        assert_eq!(resolved.accept_type, "application/json");
        assert_eq!(resolved.content_type, "application/json");
        // Scheme, port and path are all excluded from the host.
        assert_eq!(resolved.host, "123abc.execute-api.us-east-1.amazonaws.com");
    }

    #[test]
    fn test_resolve_reports_missing_field_by_name() {
        let mut req = full_request();
        req.session_token = None;

        let err = req.resolve().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.to_string(), "missing config property 'session_token'");
    }

    #[test]
    fn test_resolve_rejects_endpoint_without_host() {
        let mut req = full_request();
        req.endpoint = Some("/not-a-url".to_string());

        let err = req.resolve().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EndpointInvalid);
    }

    #[test]
    fn test_resolved_debug_redacts_key_material() {
        let mut req = full_request();
        req.secret_key = Some("wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY".to_string());

        let resolved = req.resolve().unwrap();
        let out = format!("{resolved:?}");
        assert!(!out.contains("wJalrXUtnFEMI"));
        assert!(out.contains("POST"));
    }

    #[test]
    fn test_debug_redacts_key_material() {
        let mut req = full_request();
        req.secret_key = Some("wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY".to_string());

        let out = format!("{req:?}");
        assert!(!out.contains("wJalrXUtnFEMI"));
    }
}
