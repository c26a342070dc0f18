#[cfg(test)]
mod tests;

use crate::error::SplitError;
use encoding_rs::{Encoding, GB18030, GBK, UTF_8};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Encodings tried, in order, after the declared one fails strict decoding
pub const FALLBACK_ENCODINGS: [&str; 4] = ["utf-8-sig", "utf-8", "gb18030", "cp936"];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Result of decoding a source document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    /// Decoded text, line endings untouched
    pub text: String,
    /// Label of the encoding that produced `text`
    pub encoding: String,
    /// Whether malformed input was replaced with U+FFFD
    pub lossy: bool,
}

/// Map declared encoding aliases onto the label actually used for decoding.
///
/// The GB2312 family is widened to GB18030 so characters outside strict
/// GB2312 still decode.
pub fn normalize_encoding(declared: &str) -> String {
    let label = declared.trim().to_ascii_lowercase();
    match label.as_str() {
        "gb2312" | "gbk" | "gb-2312" => "gb18030".to_string(),
        _ => label,
    }
}

/// Resolve a normalized label to an `encoding_rs` encoding
fn lookup(label: &str) -> Option<&'static Encoding> {
    match label {
        "utf-8-sig" | "utf8-sig" => Some(UTF_8),
        "gb18030" => Some(GB18030),
        "cp936" => Some(GBK),
        other => Encoding::for_label(other.as_bytes()),
    }
}

/// Strict decode: `None` on any malformed sequence or unknown label.
///
/// Only the `utf-8-sig` label strips a leading byte-order mark.
fn decode_strict(bytes: &[u8], label: &str) -> Option<String> {
    let (bytes, encoding) = match label {
        "utf-8-sig" | "utf8-sig" => (bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes), UTF_8),
        other => (bytes, lookup(other)?),
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(Cow::into_owned)
}

/// Decode raw bytes using the declared encoding, then the fallback list,
/// then a lossy decode of the declared encoding.
///
/// Never fails: undecodable input yields replacement characters.
pub fn decode(bytes: &[u8], declared_encoding: &str) -> DecodedText {
    let normalized = normalize_encoding(declared_encoding);

    if let Some(text) = decode_strict(bytes, &normalized) {
        return DecodedText {
            text,
            encoding: normalized,
            lossy: false,
        };
    }
    debug!(encoding = %normalized, "strict decode failed, trying fallbacks");

    for candidate in FALLBACK_ENCODINGS {
        if candidate == normalized {
            continue;
        }
        if let Some(text) = decode_strict(bytes, candidate) {
            warn!(
                declared = %declared_encoding,
                used = candidate,
                "declared encoding did not fit, decoded with fallback"
            );
            return DecodedText {
                text,
                encoding: candidate.to_string(),
                lossy: false,
            };
        }
    }

    // Unknown labels degrade to UTF-8 so there is always something to replace into
    let encoding = lookup(&normalized).unwrap_or(UTF_8);
    let (text, _had_errors) = encoding.decode_without_bom_handling(bytes);
    warn!(
        declared = %declared_encoding,
        used = encoding.name(),
        "no encoding decoded cleanly, substituting replacement characters"
    );

    DecodedText {
        text: text.into_owned(),
        encoding: normalized,
        lossy: true,
    }
}

/// Read a source file once and decode it
pub fn read_text(path: &Path, declared_encoding: &str) -> Result<DecodedText, SplitError> {
    let bytes = fs::read(path).map_err(|e| SplitError::io(path, e))?;
    Ok(decode(&bytes, declared_encoding))
}

/// Normalize `\r\n` and `\r` to `\n`, then split on every `\n`.
///
/// A leading U+FEFF left by a strict UTF-8 decode is dropped so the first
/// line can still be a heading. A trailing newline produces a final empty
/// line, so the result is never empty.
pub fn split_lines(text: &str) -> Vec<String> {
    text.strip_prefix('\u{FEFF}')
        .unwrap_or(text)
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .split('\n')
        .map(str::to_owned)
        .collect()
}
