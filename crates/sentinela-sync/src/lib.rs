//! Sync layer: the occurrence API, the place search service, and the
//! adapters that connect them to the reporting workflow.

mod alerts;
mod api;
mod error;
mod search;
mod submit;

#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "http")]
pub mod places;

#[cfg(test)]
mod testing;

pub use alerts::{load_alerts, load_alerts_once};
pub use api::{OccurrenceApi, PlaceLookup};
pub use error::SyncError;
pub use search::{AddressSearch, SearchOutcome};
pub use submit::{Submission, Submitter};

#[cfg(feature = "http")]
pub use http::{ClientConfig, OccurrenceClient};
#[cfg(feature = "http")]
pub use places::{PlacesClient, PlacesConfig};
