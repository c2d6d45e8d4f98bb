use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use rand::{rng, RngCore};

/// Six random bytes encode to exactly eight base64 characters, so the
/// truncation below never cuts mid-byte.
const CODE_BYTES: usize = 6;

/// Length of every generated short code.
pub const CODE_LENGTH: usize = 8;

/// Generates a short code from random bytes, URL-safe base64 encoded.
///
/// Codes are not checked for uniqueness here; the shortener service retries
/// on the (astronomically unlikely) collision.
pub fn generate_short_code() -> String {
    let mut bytes = [0u8; CODE_BYTES];
    rng().fill_bytes(&mut bytes);

    let mut encoded = URL_SAFE.encode(bytes);
    encoded.truncate(CODE_LENGTH);
    encoded
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_code_length() {
        for _ in 0..100 {
            assert_eq!(generate_short_code().len(), CODE_LENGTH);
        }
    }

    #[test]
    fn test_code_uses_url_safe_alphabet() {
        for _ in 0..100 {
            let code = generate_short_code();
            assert!(
                code.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
                "unexpected character in code: {}",
                code
            );
        }
    }

    #[test]
    fn test_codes_are_effectively_unique() {
        // 1000 draws from a 2^48 space; a collision here means the
        // generator is broken, not unlucky
        let codes: HashSet<String> = (0..1000).map(|_| generate_short_code()).collect();
        assert_eq!(codes.len(), 1000);
    }
}
