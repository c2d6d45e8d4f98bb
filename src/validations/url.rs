use url::Url;
use validator::ValidationError;

/// Validates that a string is an absolute URL with a scheme and host.
///
/// Any scheme is accepted; reachability and content are not checked.
pub fn validate_url(url_str: &str) -> Result<(), ValidationError> {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.scheme().is_empty() || url.host_str().map_or(true, str::is_empty) {
                return Err(ValidationError::new("URL must have a scheme and host"));
            }

            Ok(())
        }
        Err(_) => Err(ValidationError::new("Invalid URL format")),
    }
}
