//! Seams between the workflow and the services it talks to.

use async_trait::async_trait;
use sentinela_core::{Coordinate, NewOccurrence, Occurrence};

use crate::SyncError;

/// The occurrence API: list existing records and create new ones.
#[async_trait]
pub trait OccurrenceApi: Send + Sync {
    async fn list_occurrences(&self) -> Result<Vec<Occurrence>, SyncError>;

    /// Create one record. Any non-success status is an error.
    async fn create_occurrence(&self, occurrence: &NewOccurrence) -> Result<(), SyncError>;
}

/// Free-text place search.
#[async_trait]
pub trait PlaceLookup: Send + Sync {
    /// Coordinates of every match, best first.
    async fn text_search(&self, query: &str) -> Result<Vec<Coordinate>, SyncError>;
}
