//! Three-step report wizard.
//!
//! Steps run strictly in order: location, description/type, media. There is
//! no skipping and no persistence; every opening of the wizard starts at the
//! location step with an empty draft.
//!
//! Leaving the location step hands back a [`SearchRequest`] for the address
//! typed so far. The caller runs it in the background and later feeds the
//! result to [`ReportWizard::apply_search`]. Each request carries a
//! [`SearchTicket`] made of the draft's generation and a per-draft sequence
//! number, so a result for a closed draft or a superseded search is dropped.

use tracing::debug;

use crate::catalog::OccurrenceKind;
use crate::draft::OccurrenceDraft;
use crate::occurrence::Coordinate;

pub const STEP_COUNT: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    Location,
    DescriptionType,
    Media,
}

impl WizardStep {
    /// One-based position.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Location => 1,
            WizardStep::DescriptionType => 2,
            WizardStep::Media => 3,
        }
    }

    fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Location => Some(WizardStep::DescriptionType),
            WizardStep::DescriptionType => Some(WizardStep::Media),
            WizardStep::Media => None,
        }
    }

    fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::Location => None,
            WizardStep::DescriptionType => Some(WizardStep::Location),
            WizardStep::Media => Some(WizardStep::DescriptionType),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Location => "Local da Ocorrência",
            WizardStep::DescriptionType => "Descrição",
            WizardStep::Media => "Mídia",
        }
    }

    /// Caption of the step's primary button.
    pub fn action_label(self) -> &'static str {
        match self {
            WizardStep::Location => "Confirmar Local",
            WizardStep::DescriptionType => "Confirmar Descrição",
            WizardStep::Media => "Registrar Ocorrência",
        }
    }
}

/// Identifies one address search against one draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchTicket {
    pub generation: u64,
    pub seq: u32,
}

/// Address search the caller should fire without waiting on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub ticket: SearchTicket,
    pub query: String,
}

#[derive(Debug, Clone)]
pub struct ReportWizard {
    generation: u64,
    step: WizardStep,
    draft: OccurrenceDraft,
    search_seq: u32,
    pending_search: Option<SearchTicket>,
}

impl ReportWizard {
    /// Open a wizard on a fresh draft. `generation` must be unique per opening.
    pub fn open(generation: u64) -> Self {
        Self {
            generation,
            step: WizardStep::Location,
            draft: OccurrenceDraft::new(),
            search_seq: 0,
            pending_search: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &OccurrenceDraft {
        &self.draft
    }

    pub fn into_draft(self) -> OccurrenceDraft {
        self.draft
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.draft.address = address.into();
    }

    pub fn select_kind(&mut self, kind: Option<OccurrenceKind>) {
        self.draft.kind = kind;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    /// Move forward one step. A no-op on the media step.
    ///
    /// Returns the address search to run when leaving the location step with
    /// a non-blank address. The transition itself never waits on it. Issuing
    /// a search drops any coordinate resolved for an earlier address.
    pub fn advance(&mut self) -> Option<SearchRequest> {
        let next = self.step.next()?;
        let leaving = self.step;
        self.step = next;
        debug!(step = next.number(), "wizard advanced");

        if leaving != WizardStep::Location {
            return None;
        }
        let query = self.draft.address.trim();
        if query.is_empty() {
            return None;
        }
        self.draft.resolved_coordinate = None;
        self.search_seq += 1;
        let ticket = SearchTicket {
            generation: self.generation,
            seq: self.search_seq,
        };
        self.pending_search = Some(ticket);
        Some(SearchRequest {
            ticket,
            query: query.to_string(),
        })
    }

    /// Move back one step. A no-op on the location step.
    pub fn retreat(&mut self) {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
            debug!(step = previous.number(), "wizard retreated");
        }
    }

    /// The back control is disabled on the first step.
    pub fn can_retreat(&self) -> bool {
        self.step.previous().is_some()
    }

    /// True on the media step, where the primary action opens the confirmation.
    pub fn is_last_step(&self) -> bool {
        self.step.next().is_none()
    }

    /// Fraction of the progress bar to fill.
    pub fn progress(&self) -> f32 {
        f32::from(self.step.number()) / f32::from(STEP_COUNT)
    }

    /// Progress bar width for a track `track_width` wide.
    pub fn progress_width(&self, track_width: f32) -> f32 {
        self.progress() * track_width
    }

    /// Step counter such as `"2 de 3"`.
    pub fn step_label(&self) -> String {
        format!("{} de {}", self.step.number(), STEP_COUNT)
    }

    pub fn pending_search(&self) -> Option<SearchTicket> {
        self.pending_search
    }

    /// Record the result of an address search.
    ///
    /// Returns `true` when the ticket belongs to this draft's latest search;
    /// the coordinate (if any) is then stored. Stale tickets change nothing.
    pub fn apply_search(&mut self, ticket: SearchTicket, coordinate: Option<Coordinate>) -> bool {
        if self.pending_search != Some(ticket) {
            debug!(
                generation = ticket.generation,
                seq = ticket.seq,
                "dropping stale address search result"
            );
            return false;
        }
        self.pending_search = None;
        if let Some(coordinate) = coordinate {
            self.draft.resolved_coordinate = Some(coordinate);
        }
        true
    }
}
