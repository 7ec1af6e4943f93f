//! Shared HTTP building blocks: error responses and validated extractors

pub mod error;
pub mod extract;
pub mod validated_json;

pub use error::{ApiError, ErrorBody};
pub use extract::{ApiPath, ApiQuery};
pub use validated_json::{ValidatedForm, ValidatedJson, ValidationRejection};
