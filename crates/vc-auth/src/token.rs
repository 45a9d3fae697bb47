//! Extraction of bearer tokens from the redirect URI returned on a
//! successful login.
//!
//! The provider answers with a URI such as
//! `http://localhost/redirect#access_token=..&scope=..&id_token=..&token_type=Bearer&expires_in=3600`.
//! Only the fragment is inspected; the query string is ignored.

use std::collections::HashMap;

use percent_encoding::percent_decode_str;

use crate::errors::{Result, RiotAuthError};
use crate::session::SessionTokens;

/// Parse the redirect URI fragment into [`SessionTokens`]
pub fn parse_redirect_uri(uri: &str) -> Result<SessionTokens> {
    let (_, fragment) = uri
        .split_once('#')
        .ok_or_else(|| RiotAuthError::MalformedRedirectUri("missing '#' fragment".to_string()))?;

    // Split on '&', then on the first '='. Only percent escapes are decoded; '+' stays literal.
    let params: HashMap<String, String> = fragment
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key), decode(value))
        })
        .collect();

    let access_token = required(&params, "access_token")?;
    let id_token = required(&params, "id_token")?;

    let raw_expires_in = required(&params, "expires_in")?;
    let expires_in = raw_expires_in.parse::<u64>().map_err(|_| {
        RiotAuthError::MalformedRedirectUri(format!(
            "expires_in '{}' is not a number",
            raw_expires_in
        ))
    })?;

    Ok(SessionTokens {
        access_token,
        id_token,
        expires_in,
    })
}

fn decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

fn required(params: &HashMap<String, String>, key: &str) -> Result<String> {
    match params.get(key) {
        Some(value) if !value.is_empty() => Ok(value.clone()),
        _ => Err(RiotAuthError::MalformedRedirectUri(format!(
            "missing {} in fragment",
            key
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_malformed(uri: &str) {
        assert!(
            matches!(parse_redirect_uri(uri), Err(RiotAuthError::MalformedRedirectUri(_))),
            "expected MalformedRedirectUri for {}",
            uri
        );
    }

    #[test]
    fn test_parse_provider_uri() {
        let tokens = parse_redirect_uri(
            "http://localhost/redirect#access_token=eyJhbGci.A&scope=openid+link&iss=https%3A%2F%2Fauth.riotgames.com&id_token=eyJhbGci.I&token_type=Bearer&session_state=abc&expires_in=3600",
        )
        .unwrap();

        assert_eq!(tokens.access_token, "eyJhbGci.A");
        assert_eq!(tokens.id_token, "eyJhbGci.I");
        assert_eq!(tokens.expires_in, 3600);
    }

    #[test]
    fn test_key_order_does_not_matter() {
        let orders = [
            "https://x/#access_token=A&id_token=I&expires_in=3600",
            "https://x/#id_token=I&expires_in=3600&access_token=A",
            "https://x/#expires_in=3600&access_token=A&id_token=I",
            "https://x/#expires_in=3600&id_token=I&token_type=Bearer&access_token=A",
        ];

        let expected = parse_redirect_uri(orders[0]).unwrap();
        for uri in &orders[1..] {
            assert_eq!(parse_redirect_uri(uri).unwrap(), expected);
        }
    }

    #[test]
    fn test_query_string_is_ignored() {
        let tokens = parse_redirect_uri(
            "https://x/?access_token=Q&id_token=Q#access_token=A&id_token=I&expires_in=60",
        )
        .unwrap();
        assert_eq!(tokens.access_token, "A");
        assert_eq!(tokens.id_token, "I");
        assert_eq!(tokens.expires_in, 60);
    }

    #[test]
    fn test_values_are_percent_decoded() {
        let tokens = parse_redirect_uri("https://x/#access_token=a%2Eb&id_token=c%3Dd&expires_in=1").unwrap();
        assert_eq!(tokens.access_token, "a.b");
        assert_eq!(tokens.id_token, "c=d");
    }

    #[test]
    fn test_plus_is_kept_literally() {
        let tokens =
            parse_redirect_uri("http://x/#access_token=ab+cd&id_token=I%2BJ&expires_in=1").unwrap();
        assert_eq!(tokens.access_token, "ab+cd");
        assert_eq!(tokens.id_token, "I+J");
    }

    #[test]
    fn test_missing_fragment_delimiter() {
        assert_malformed("http://localhost/redirect?access_token=A&id_token=I&expires_in=1");
    }

    #[test]
    fn test_missing_required_keys() {
        assert_malformed("https://x/#id_token=I&expires_in=3600");
        assert_malformed("https://x/#access_token=A&expires_in=3600");
        assert_malformed("https://x/#access_token=A&id_token=I");
        assert_malformed("https://x/#access_token=&id_token=I&expires_in=3600");
        assert_malformed("https://x/#");
    }

    #[test]
    fn test_bad_expires_in() {
        assert_malformed("https://x/#access_token=A&id_token=I&expires_in=-5");
        assert_malformed("https://x/#access_token=A&id_token=I&expires_in=soon");
    }
}
