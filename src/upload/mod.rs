//! Upload validation pipeline: typed request, content-type policy, size
//! ceiling and the business error taxonomy.

mod error;
mod pipeline;
mod request;

pub use error::{UploadError, UploadErrorKind};
pub use pipeline::{is_allowed_content_type, UploadPipeline, UploadReceipt, ALLOWED_CONTENT_TYPES};
pub use request::{Content, ContentStream, InvalidUploadRequest, UploadRequest};
