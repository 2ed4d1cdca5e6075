pub mod alerts;
pub mod catalog;
pub mod confirm;
pub mod draft;
mod error;
pub mod occurrence;
pub mod shell;
pub mod wizard;

pub use alerts::{AlertList, AlertRow};
pub use catalog::{IconKey, OccurrenceKind};
pub use confirm::{Confirmation, ConfirmationExit, ConfirmationSummary, Notice, SubmitOutcome};
pub use draft::OccurrenceDraft;
pub use error::CoreError;
pub use occurrence::{Coordinate, NewOccurrence, Occurrence};
pub use shell::{MapShell, Overlay};
pub use wizard::{ReportWizard, SearchRequest, SearchTicket, WizardStep};
