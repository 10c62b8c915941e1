//! Export/share collaborator contract
//!
//! Two opaque operations with no further contract than success or
//! failure. A failure is surfaced to the user once and never touches
//! session state.

use thiserror::Error;

/// Errors reported by an export collaborator
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("report sharing failed: {0}")]
    Share(String),

    #[error("export is not available in this build")]
    Unavailable,
}

/// External collaborator producing and distributing the report
pub trait Exporter {
    fn generate_pdf(&self) -> Result<(), ExportError>;

    fn share_report(&self) -> Result<(), ExportError>;
}

/// Stub exporter used when no real collaborator is wired in
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopExporter;

impl Exporter for NoopExporter {
    fn generate_pdf(&self) -> Result<(), ExportError> {
        Err(ExportError::Unavailable)
    }

    fn share_report(&self) -> Result<(), ExportError> {
        Err(ExportError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_exporter_fails_gracefully() {
        let exporter = NoopExporter;
        assert!(matches!(
            exporter.generate_pdf(),
            Err(ExportError::Unavailable)
        ));
        assert!(matches!(
            exporter.share_report(),
            Err(ExportError::Unavailable)
        ));
    }
}
