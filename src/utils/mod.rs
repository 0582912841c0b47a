pub mod url_validation;
pub use url_validation::{UrlValidationError, redact_query, validate_upstream_url};
