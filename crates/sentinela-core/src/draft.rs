//! In-progress occurrence report assembled by the wizard.

use crate::catalog::OccurrenceKind;
use crate::occurrence::Coordinate;

/// Attachment filename shown on the confirmation view until media capture exists.
pub const ATTACHMENT_PLACEHOLDER: &str = "300820241330.JPEG";

/// Media step payload. The step is shown but nothing is captured yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediaAttachment;

impl MediaAttachment {
    pub fn display_name(&self) -> &'static str {
        ATTACHMENT_PLACEHOLDER
    }
}

/// A not-yet-submitted occurrence report.
///
/// Nothing here is validated: an empty address or an unset kind is carried
/// through to submission as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OccurrenceDraft {
    pub address: String,
    /// Only ever set by a successful address search.
    pub resolved_coordinate: Option<Coordinate>,
    pub kind: Option<OccurrenceKind>,
    pub description: String,
    pub media: MediaAttachment,
}

impl OccurrenceDraft {
    pub fn new() -> Self {
        Self::default()
    }
}
