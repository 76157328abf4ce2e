use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

/// Algorithm tag used in the string to sign and the authorization header.
pub const AWS4_HMAC_SHA256: &str = "AWS4-HMAC-SHA256";

/// Prefix applied to the secret key at the root of the key derivation chain.
pub const AWS4: &str = "AWS4";

/// Terminator of the credential scope and the key derivation chain.
pub const AWS4_REQUEST: &str = "aws4_request";

// Headers produced by the signer.
pub const X_AMZ_DATE: &str = "x-amz-date";
pub const X_AMZ_SECURITY_TOKEN: &str = "x-amz-security-token";

// Defaults applied when the caller leaves the fields unset.
pub const DEFAULT_SERVICE_NAME: &str = "execute-api";
pub const DEFAULT_ACCEPT_TYPE: &str = "application/json";
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// AsciiSet for [AWS UriEncode](https://docs.aws.amazon.com/AmazonS3/latest/API/sig-v4-header-based-auth.html)
///
/// - URI encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
/// - Path segments keep their '/' separators literal.
pub static URI_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// AsciiSet for [AWS UriEncode](https://docs.aws.amazon.com/AmazonS3/latest/API/sig-v4-header-based-auth.html)
///
/// But used in query values. Escapes everything outside the unreserved set,
/// including `!`, `'`, `(`, `)` and `*` that lax encoders leave alone.
pub static QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
