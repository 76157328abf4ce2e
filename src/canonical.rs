//! AWS canonical forms of query strings, headers and requests.
//!
//! Signing is only stable if both sides derive byte-identical canonical
//! strings, so everything here is deterministic regardless of input order.
//!
//! - [Create a canonical request](https://docs.aws.amazon.com/general/latest/gr/sigv4-create-canonical-request.html)

use percent_encoding::utf8_percent_encode;

use crate::constants::QUERY_ENCODE_SET;
use crate::constants::URI_ENCODE_SET;
use crate::hash::hex_sha256;

/// Build the canonical query string from `key=value` pairs.
///
/// Keys are sorted by Unicode code point and kept as-is; values are
/// percent-encoded with [`QUERY_ENCODE_SET`]. An empty map produces an
/// empty string, not a stray separator.
pub(crate) fn canonical_query_string(params: &[(String, String)]) -> String {
    if params.is_empty() {
        return String::new();
    }

    let mut sorted: Vec<&(String, String)> = params.iter().collect();
    sorted.sort_by(|l, r| l.0.cmp(&r.0));

    sorted
        .iter()
        .map(|(k, v)| format!("{k}={}", utf8_percent_encode(v, &QUERY_ENCODE_SET)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the canonical headers block: `name:value\n` per entry.
///
/// Entries are sorted by the original header name before lower-casing, so
/// the block ends with a newline and has no separator of its own.
pub(crate) fn canonical_headers(headers: &[(&str, String)]) -> String {
    let mut sorted: Vec<&(&str, String)> = headers.iter().collect();
    sorted.sort_by(|l, r| l.0.cmp(r.0));

    let mut out = String::new();
    for (name, value) in sorted {
        out.push_str(&name.to_lowercase());
        out.push(':');
        out.push_str(value);
        out.push('\n');
    }
    out
}

/// Build the signed headers list: lower-cased names, sorted, `;`-joined.
///
/// Enumerates exactly the header map passed to canonicalization.
pub(crate) fn signed_headers(headers: &[(&str, String)]) -> String {
    let mut names: Vec<String> = headers.iter().map(|(n, _)| n.to_lowercase()).collect();
    names.sort_unstable();

    names.join(";")
}

/// Build the canonical request: six fields joined by `\n`, no trailing
/// newline.
///
/// The path is percent-encoded with [`URI_ENCODE_SET`], which keeps `/`
/// literal; the payload appears as its hex SHA-256 digest.
pub(crate) fn canonical_request(
    method: &str,
    path: &str,
    query: &[(String, String)],
    headers: &[(&str, String)],
    payload: &str,
) -> String {
    format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        method,
        utf8_percent_encode(path, &URI_ENCODE_SET),
        canonical_query_string(query),
        canonical_headers(headers),
        signed_headers(headers),
        hex_sha256(payload.as_bytes())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(input: &[(&str, &str)]) -> Vec<(String, String)> {
        input
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_canonical_query_string_empty() {
        assert_eq!(canonical_query_string(&[]), "");
    }

    #[test]
    fn test_canonical_query_string_sorts_keys() {
        let params = pairs(&[("zebra", "3"), ("alpha", "1"), ("mid", "2")]);
        assert_eq!(canonical_query_string(&params), "alpha=1&mid=2&zebra=3");
    }

    #[test]
    fn test_canonical_query_string_permutation_invariant() {
        let a = pairs(&[("b", "2"), ("a", "1"), ("c", "3")]);
        let b = pairs(&[("c", "3"), ("a", "1"), ("b", "2")]);
        assert_eq!(canonical_query_string(&a), canonical_query_string(&b));
    }

    #[test]
    fn test_canonical_query_string_escapes_sub_delims() {
        // '!', '\'', '(', ')' and '*' must not survive unescaped.
        let params = pairs(&[("q", "a!b'c(d)e*f g")]);
        assert_eq!(
            canonical_query_string(&params),
            "q=a%21b%27c%28d%29e%2Af%20g"
        );
    }

    #[test]
    fn test_canonical_headers_sorted_and_lowercased() {
        let headers = vec![
            ("x-amz-date", "20220313T072004Z".to_string()),
            ("Accept", "application/json".to_string()),
            ("host", "example.com".to_string()),
        ];
        assert_eq!(
            canonical_headers(&headers),
            "accept:application/json\nhost:example.com\nx-amz-date:20220313T072004Z\n"
        );
    }

    #[test]
    fn test_signed_headers_matches_canonical_block() {
        let headers = vec![
            ("x-amz-date", "20220313T072004Z".to_string()),
            ("Content-Type", "application/json".to_string()),
            ("Accept", "application/json".to_string()),
            ("host", "example.com".to_string()),
        ];
        let signed = signed_headers(&headers);
        assert_eq!(signed, "accept;content-type;host;x-amz-date");

        // Every name in the signed list appears as a line in the block,
        // and nothing else does.
        let block = canonical_headers(&headers);
        let block_names: Vec<&str> = block
            .lines()
            .map(|l| l.split(':').next().unwrap())
            .collect();
        assert_eq!(block_names.join(";"), signed);
    }

    #[test]
    fn test_canonical_request_shape() {
        let headers = vec![
            ("Accept", "application/json".to_string()),
            ("host", "example.com".to_string()),
        ];
        let creq = canonical_request("GET", "/dev/foo bar", &[], &headers, "");
        assert_eq!(
            creq,
            "GET\n\
             /dev/foo%20bar\n\
             \n\
             accept:application/json\nhost:example.com\n\
             \n\
             accept;host\n\
             e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_canonical_request_preserves_path_slashes() {
        let creq = canonical_request("GET", "/a/b/c", &[], &[], "");
        assert!(creq.lines().nth(1) == Some("/a/b/c"));
    }

    #[test]
    fn test_canonical_request_escapes_reserved_path_chars() {
        // Only the unreserved set and '/' survive in the path; reserved
        // characters like ':' and '@' are escaped per AWS UriEncode.
        let creq = canonical_request("GET", "/dev/a:b@c", &[], &[], "");
        assert_eq!(creq.lines().nth(1), Some("/dev/a%3Ab%40c"));
    }
}
