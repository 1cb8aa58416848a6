use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::{engine::general_purpose, Engine as _};

/// Standard alphabet engine that tolerates missing padding and non-zero trailing bits,
/// which is how subscription providers tend to emit base64 in practice.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encodes a string to Base64 format.
pub fn base64_encode(input: &str) -> String {
    general_purpose::STANDARD.encode(input)
}

/// Pads a Base64 string with `=` up to a multiple of four characters.
pub fn base64_pad(input: &str) -> String {
    let mut padded = input.to_string();
    while padded.len() % 4 != 0 {
        padded.push('=');
    }
    padded
}

/// Decodes a Base64 string to UTF-8 text.
///
/// Both the standard and the URL-safe alphabet are accepted, embedded whitespace is
/// ignored and padding is restored before decoding.
///
/// # Returns
/// `None` if the input is not Base64 or the decoded bytes are not valid UTF-8.
pub fn base64_decode(input: &str) -> Option<String> {
    let cleaned: String = url_safe_base64_reverse(input)
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let cleaned = cleaned.trim_end_matches('=');
    if cleaned.is_empty() {
        return None;
    }

    let decoded = LENIENT.decode(base64_pad(cleaned)).ok()?;
    String::from_utf8(decoded).ok()
}

/// Reverses a URL-safe Base64 string to standard Base64 format.
pub fn url_safe_base64_reverse(input: &str) -> String {
    input.replace('-', "+").replace('_', "/")
}

/// Converts a Base64 string to URL-safe Base64 format by replacing specific characters.
pub fn url_safe_base64_apply(input: &str) -> String {
    input
        .replace('+', "-")
        .replace('/', "_")
        .replace('=', "") // Remove padding
}

/// Encodes a string to URL-safe Base64 format.
pub fn url_safe_base64_encode(input: &str) -> String {
    url_safe_base64_apply(&base64_encode(input))
}
