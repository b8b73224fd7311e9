use ::base64::alphabet;
use ::base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use ::base64::engine::DecodePaddingMode;
use ::base64::{DecodeError, Engine};

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_allow_trailing_bits(true)
    .with_decode_padding_mode(DecodePaddingMode::Indifferent);

const STANDARD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Decodes a Base64 string, choosing the URL-safe alphabet as soon as one of its specific
/// characters is found.
pub fn decode(s: &str) -> Result<Vec<u8>, DecodeError> {
    if s.bytes().any(|b| b == b'-' || b == b'_') {
        URL_SAFE.decode(s)
    } else {
        STANDARD.decode(s)
    }
}
