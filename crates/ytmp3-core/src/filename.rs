//! Artifact filename resolution from Content-Disposition headers.

use crate::api::JobKind;

/// Fallback filename when the backend sends no usable Content-Disposition.
pub fn default_filename(kind: JobKind) -> &'static str {
    match kind {
        JobKind::Single => "youtube-download.mp3",
        JobKind::Batch => "playlist_canciones.zip",
    }
}

/// Extracts the filename from a raw Content-Disposition header value.
///
/// Accepts both `filename="value"` and the bare-token `filename=value` form,
/// percent-decoding the result (the backend encodes non-ASCII titles).
/// Returns None when no non-empty filename parameter is present.
pub fn parse_attachment_filename(header_value: &str) -> Option<String> {
    for param in header_value.split(';') {
        let param = param.trim();
        let Some((name, raw)) = param.split_once('=') else {
            continue;
        };
        if !name.trim().eq_ignore_ascii_case("filename") {
            continue;
        }
        let raw = raw.trim();
        let unquoted = raw
            .strip_prefix('"')
            .and_then(|r| r.strip_suffix('"'))
            .unwrap_or(raw);
        if unquoted.is_empty() {
            continue;
        }
        return Some(percent_decode(unquoted));
    }
    None
}

/// Lossy percent-decode; malformed escapes pass through untouched.
fn percent_decode(input: &str) -> String {
    let mut out = Vec::with_capacity(input.len());
    let mut bytes = input.as_bytes().iter().copied();
    while let Some(b) = bytes.next() {
        if b != b'%' {
            out.push(b);
            continue;
        }
        let high = bytes.next();
        let low = bytes.next();
        match (high.and_then(hex_digit), low.and_then(hex_digit)) {
            (Some(h), Some(l)) => out.push(h << 4 | l),
            _ => {
                out.push(b'%');
                out.extend(high);
                out.extend(low);
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
