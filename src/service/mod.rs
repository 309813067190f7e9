//! Boundary with the external text-to-diagram service.
//!
//! Failures here never touch the live diagram: a result is only loaded into
//! the surface once it has been fully parsed.

#[cfg(feature = "service")]
pub mod http;
pub mod input;
pub mod payload;

#[cfg(feature = "service")]
pub use http::HttpService;
pub use input::{ALLOWED_EXTENSIONS, ServiceInput};
pub use payload::ServiceResult;

use crate::diagram::Diagram;
use crate::editor::DiagramSurface;
use crate::error::{Error, ServiceError};

/// Anything that can turn PRD input into a diagram.
pub trait DiagramService {
    fn transform(&self, input: &ServiceInput) -> Result<ServiceResult, ServiceError>;
}

/// What to do when the service fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fallback {
    /// Report the error and leave the surface as it was.
    #[default]
    Propagate,
    /// Load [`Diagram::sample`] and report the error alongside.
    Sample,
}

#[derive(Debug)]
pub enum IngestOutcome {
    Loaded {
        gaps_detected: Vec<String>,
        input_length: usize,
    },
    FellBack {
        error: Error,
    },
}

/// Run `input` through `service` and load the result into `surface`.
///
/// `input` is validated when it is built, so only service failures reach
/// the fallback.
pub fn ingest(
    surface: &mut DiagramSurface,
    service: &dyn DiagramService,
    input: &ServiceInput,
    fallback: Fallback,
) -> crate::Result<IngestOutcome> {
    match service.transform(input) {
        Ok(result) => {
            surface.load(result.diagram);
            Ok(IngestOutcome::Loaded {
                gaps_detected: result.gaps_detected,
                input_length: result.input_length,
            })
        }
        Err(err) => match fallback {
            Fallback::Propagate => Err(err.into()),
            Fallback::Sample => {
                tracing::warn!(error = %err, "service failed, loading the sample diagram");
                surface.load(Diagram::sample());
                Ok(IngestOutcome::FellBack { error: err.into() })
            }
        },
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_service.rs"]
mod tests;
