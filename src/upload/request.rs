use std::pin::Pin;

use bytes::Bytes;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Rejected call shape. Not part of the business error taxonomy: a request
/// that fails here never reaches the pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidUploadRequest {
    #[error("file name must not be empty")]
    EmptyFileName,
    #[error("content type must not be empty")]
    EmptyContentType,
}

/// A single upload, consumed by one pipeline invocation.
pub struct UploadRequest<'a> {
    file_name: String,
    content_type: String,
    content_stream: ContentStream<'a>,
}

impl<'a> UploadRequest<'a> {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        content_stream: ContentStream<'a>,
    ) -> Result<Self, InvalidUploadRequest> {
        let file_name = file_name.into();
        let content_type = content_type.into();

        if file_name.is_empty() {
            return Err(InvalidUploadRequest::EmptyFileName);
        }
        if content_type.is_empty() {
            return Err(InvalidUploadRequest::EmptyContentType);
        }

        Ok(Self {
            file_name,
            content_type,
            content_stream,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn into_parts(self) -> (String, String, ContentStream<'a>) {
        (self.file_name, self.content_type, self.content_stream)
    }
}

/// Bytes read from a [`ContentStream`].
#[derive(Debug, Clone)]
pub struct Content {
    pub bytes: Bytes,
    /// The producer had more bytes than the ceiling allowed; `bytes` holds
    /// only the first `limit` of them.
    pub truncated: bool,
}

/// Single-pass byte source with a size ceiling.
///
/// The stream must be handed over unread. Reading consumes it; reading the
/// upload again requires a new stream.
pub struct ContentStream<'a> {
    reader: Pin<Box<dyn AsyncRead + Send + 'a>>,
    limit: u64,
}

impl<'a> ContentStream<'a> {
    pub fn new<R>(reader: R, limit: u64) -> Self
    where
        R: AsyncRead + Send + 'a,
    {
        Self {
            reader: Box::pin(reader),
            limit,
        }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Read the stream to its end, stopping one byte past the ceiling.
    ///
    /// An I/O error (a client abort, a malformed body) is returned as-is and
    /// the partial data is discarded.
    pub async fn read_to_end(self) -> std::io::Result<Content> {
        let limit = self.limit;
        let mut buf = Vec::new();
        self.reader
            .take(limit.saturating_add(1))
            .read_to_end(&mut buf)
            .await?;

        let truncated = buf.len() as u64 > limit;
        if truncated {
            buf.truncate(limit as usize);
        }

        Ok(Content {
            bytes: Bytes::from(buf),
            truncated,
        })
    }
}

impl ContentStream<'static> {
    /// Stream over an in-memory buffer.
    pub fn from_bytes(data: impl Into<Bytes>, limit: u64) -> Self {
        Self::new(std::io::Cursor::new(data.into()), limit)
    }
}

impl std::fmt::Debug for ContentStream<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentStream")
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}
