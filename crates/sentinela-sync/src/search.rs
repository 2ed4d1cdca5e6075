//! Address search adapter.
//!
//! Turns free text into at most one coordinate. Failures never reach the
//! caller: they are logged and reported as "no match", so the wizard keeps
//! moving regardless of what the place service does.

use std::sync::Arc;

use sentinela_core::{Coordinate, SearchRequest, SearchTicket};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::PlaceLookup;

/// A finished background search, tagged with the ticket it was issued for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    pub ticket: SearchTicket,
    pub coordinate: Option<Coordinate>,
}

pub struct AddressSearch<P: ?Sized> {
    places: Arc<P>,
}

impl<P: ?Sized> Clone for AddressSearch<P> {
    fn clone(&self) -> Self {
        Self {
            places: Arc::clone(&self.places),
        }
    }
}

impl<P: PlaceLookup + ?Sized + 'static> AddressSearch<P> {
    pub fn new(places: Arc<P>) -> Self {
        Self { places }
    }

    /// Best match for `text`, or `None`.
    ///
    /// Blank text returns `None` without contacting the place service.
    pub async fn search(&self, text: &str) -> Option<Coordinate> {
        let query = text.trim();
        if query.is_empty() {
            debug!("skipping address search for blank input");
            return None;
        }
        match self.places.text_search(query).await {
            Ok(matches) => {
                let best = matches.into_iter().next();
                if best.is_none() {
                    debug!(query, "address search found no match");
                }
                best
            }
            Err(e) => {
                warn!(query, error = %e, "address search failed");
                None
            }
        }
    }

    /// Run `request` on the runtime and send the outcome to `results`.
    ///
    /// The caller does not wait; if the receiver is gone by the time the
    /// search finishes, the outcome is dropped.
    pub fn spawn(
        &self,
        request: SearchRequest,
        results: mpsc::UnboundedSender<SearchOutcome>,
    ) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            let coordinate = this.search(&request.query).await;
            let outcome = SearchOutcome {
                ticket: request.ticket,
                coordinate,
            };
            if results.send(outcome).is_err() {
                debug!("search outcome receiver closed");
            }
        })
    }
}
