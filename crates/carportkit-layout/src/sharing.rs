//! Share links.
//!
//! A configuration travels as camelCase JSON, base64 encoded with the
//! URL-safe alphabet and no padding, in a single query parameter. Decoding
//! is lenient about padding, the standard alphabet and percent-escaped
//! input so links produced by older clients still load. Anything that fails
//! to decode or lacks the required fields yields no configuration.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use carportkit_core::ShareError;
use serde_json::Value;
use tracing::{debug, warn};

use crate::model::Configuration;

/// Query parameter carrying the encoded configuration.
pub const DEFAULT_PARAM: &str = "config";

const SHARE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const LEGACY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const NUMBER_FIELDS: [&str; 3] = ["width", "depth", "height"];
const STRING_FIELDS: [&str; 2] = ["color", "roofType"];

/// Encodes a configuration into the text carried by a share link.
pub fn encode_config(config: &Configuration) -> Result<String, ShareError> {
    let json = serde_json::to_string(config).map_err(|e| ShareError::EncodeFailed {
        reason: e.to_string(),
    })?;
    Ok(SHARE_ENGINE.encode(json.as_bytes()))
}

/// Decodes share link text, reporting why it was rejected.
pub fn try_decode_config(encoded: &str) -> Result<Configuration, ShareError> {
    let encoded = percent_decode(encoded.trim());
    let bytes = SHARE_ENGINE
        .decode(encoded.as_bytes())
        .or_else(|_| LEGACY_ENGINE.decode(encoded.as_bytes()))
        .map_err(|e| ShareError::InvalidEncoding {
            reason: e.to_string(),
        })?;
    let text = String::from_utf8(bytes).map_err(|e| ShareError::InvalidEncoding {
        reason: e.to_string(),
    })?;
    let json = if text.trim_start().starts_with('{') {
        text
    } else {
        percent_decode(&text)
    };

    let value: Value = serde_json::from_str(&json).map_err(|e| ShareError::InvalidJson {
        reason: e.to_string(),
    })?;
    check_shape(&value)?;
    serde_json::from_value(value).map_err(|e| ShareError::InvalidJson {
        reason: e.to_string(),
    })
}

/// Decodes share link text; any failure is logged and yields `None`.
pub fn decode_config(encoded: &str) -> Option<Configuration> {
    match try_decode_config(encoded) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Ignoring shared configuration: {}", e);
            None
        }
    }
}

fn check_shape(value: &Value) -> Result<(), ShareError> {
    let Some(object) = value.as_object() else {
        return Err(ShareError::InvalidShape {
            field: "configuration",
            reason: "must be an object",
        });
    };
    for field in NUMBER_FIELDS {
        if !object.get(field).is_some_and(Value::is_number) {
            return Err(ShareError::InvalidShape {
                field,
                reason: "must be a number",
            });
        }
    }
    for field in STRING_FIELDS {
        if !object.get(field).is_some_and(Value::is_string) {
            return Err(ShareError::InvalidShape {
                field,
                reason: "must be a string",
            });
        }
    }
    Ok(())
}

/// Builds a share link by setting `param` on `base_url`, replacing any
/// previous value and keeping the other parameters and the fragment.
pub fn generate_share_url(
    base_url: &str,
    param: &str,
    config: &Configuration,
) -> Result<String, ShareError> {
    let encoded = encode_config(config)?;
    Ok(rewrite_query(base_url, param, Some(&encoded)))
}

/// Extracts and decodes the configuration carried by `url`.
pub fn try_parse_config_from_url(url: &str, param: &str) -> Result<Configuration, ShareError> {
    let encoded = query_param(url, param).ok_or_else(|| ShareError::MissingParameter {
        param: param.to_string(),
    })?;
    try_decode_config(&encoded)
}

/// Extracts the configuration carried by `url`, or `None` when there is
/// none or it does not decode.
pub fn parse_config_from_url(url: &str, param: &str) -> Option<Configuration> {
    let encoded = query_param(url, param)?;
    decode_config(&encoded)
}

/// Returns `url` with `param` removed.
pub fn clear_config_from_url(url: &str, param: &str) -> String {
    let cleaned = rewrite_query(url, param, None);
    debug!("Stripped '{}' from link", param);
    cleaned
}

struct UrlParts<'a> {
    base: &'a str,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

fn split_url(url: &str) -> UrlParts<'_> {
    let (rest, fragment) = match url.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (url, None),
    };
    let (base, query) = match rest.split_once('?') {
        Some((base, query)) => (base, Some(query)),
        None => (rest, None),
    };
    UrlParts {
        base,
        query,
        fragment,
    }
}

fn query_pairs(query: &str) -> impl Iterator<Item = (&str, &str)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
}

/// First value of `name` in the query string of `url`, percent-decoded.
pub fn query_param(url: &str, name: &str) -> Option<String> {
    let query = split_url(url).query?;
    query_pairs(query)
        .find(|(key, _)| percent_decode(key) == name)
        .map(|(_, value)| percent_decode(value))
        .filter(|value| !value.is_empty())
}

fn rewrite_query(url: &str, name: &str, value: Option<&str>) -> String {
    let parts = split_url(url);
    let mut pairs: Vec<String> = parts
        .query
        .map(|q| {
            query_pairs(q)
                .filter(|(key, _)| percent_decode(key) != name)
                .map(|(key, v)| {
                    if v.is_empty() {
                        key.to_string()
                    } else {
                        format!("{}={}", key, v)
                    }
                })
                .collect()
        })
        .unwrap_or_default();
    if let Some(value) = value {
        pairs.push(format!("{}={}", name, value));
    }

    let mut out = parts.base.to_string();
    if !pairs.is_empty() {
        out.push('?');
        out.push_str(&pairs.join("&"));
    }
    if let Some(fragment) = parts.fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

/// Decodes `%XX` escapes; `+` stays literal. Malformed escapes pass through.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3])
                    .ok()
                    .and_then(|h| u8::from_str_radix(h, 16).ok());
                match hex {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}
