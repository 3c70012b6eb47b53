//! Default request headers from `"Name:Value"` strings.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{ClientError, ClientResult};

/// Convert configured header strings into a header map.
///
/// Entries without a colon are skipped. Everything after the first colon is
/// the value, surrounding whitespace trimmed.
pub fn parse_default_headers<S: AsRef<str>>(entries: &[S]) -> ClientResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    for entry in entries {
        let entry = entry.as_ref();
        let Some((name, value)) = entry.split_once(':') else {
            tracing::warn!(header = %entry, "Ignoring default header without ':' separator");
            continue;
        };

        let name = HeaderName::from_bytes(name.trim().as_bytes()).map_err(|e| {
            ClientError::InvalidConfiguration(format!("invalid header name in '{}': {}", entry, e))
        })?;
        let value = HeaderValue::from_str(value.trim()).map_err(|e| {
            ClientError::InvalidConfiguration(format!("invalid header value in '{}': {}", entry, e))
        })?;
        headers.append(name, value);
    }

    Ok(headers)
}
