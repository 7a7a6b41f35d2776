//! Error types for the PDF generator.
//!
//! Drawing primitives never fail: malformed colors and unreadable image
//! headers degrade to skipped paint or zero dimensions. Errors are reserved
//! for byte assembly and for misuse of a finalized document.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while generating a PDF.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error raised by an in-memory sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Deflate encoder failed for a stream object
    #[error("Compression error in object {id}: {reason}")]
    Compression {
        /// Object number of the stream being compressed
        id: u32,
        /// Reason reported by the encoder
        reason: String,
    },

    /// The document was already finalized by `build()`
    #[error("Document already finalized; no further pages or objects can be added")]
    DocumentFinalized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_error() {
        let err = Error::Compression {
            id: 7,
            reason: "stream closed".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("object 7"));
        assert!(msg.contains("stream closed"));
    }

    #[test]
    fn test_finalized_error() {
        let msg = format!("{}", Error::DocumentFinalized);
        assert!(msg.contains("already finalized"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::WriteZero, "sink full");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(format!("{}", err).contains("sink full"));
    }

    #[test]
    fn test_result_type() {
        fn finalized() -> Result<()> {
            Err(Error::DocumentFinalized)
        }
        assert!(finalized().is_err());
    }
}
