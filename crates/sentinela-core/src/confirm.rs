//! Read-only review of a finished draft and the create request built from it.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::catalog::{IconKey, kind_label};
use crate::draft::OccurrenceDraft;
use crate::occurrence::{NewOccurrence, type_code};

/// Shown in the summary and sent as `descricao` when the description is empty.
pub const EMPTY_DESCRIPTION: &str = "Sem descrição";

pub const SUCCESS_MESSAGE: &str = "Ocorrência registrada com sucesso!";
pub const FAILURE_MESSAGE: &str = "Não foi possível registrar a ocorrência.";

/// What the confirmation view displays.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationSummary {
    pub address: String,
    /// `None` when no kind was chosen; the view then shows only the label.
    pub icon: Option<IconKey>,
    pub kind_label: &'static str,
    pub description: String,
    pub attachment: &'static str,
}

/// Result of a create request, as seen by the confirmation view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Failed { reason: String },
}

impl SubmitOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, SubmitOutcome::Created)
    }
}

/// Acknowledgement shown to the user after a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Success,
    Failure,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::Success => SUCCESS_MESSAGE,
            Notice::Failure => FAILURE_MESSAGE,
        }
    }
}

/// Why the confirmation view went away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationExit {
    /// The create request succeeded; the wizard closes with it.
    Confirmed,
    /// The user backed out; the draft is discarded.
    Cancelled,
}

/// Confirmation dialog over a snapshot of the finished draft.
#[derive(Debug, Clone)]
pub struct Confirmation {
    draft: OccurrenceDraft,
    notice: Option<Notice>,
}

impl Confirmation {
    pub fn new(draft: OccurrenceDraft) -> Self {
        Self {
            draft,
            notice: None,
        }
    }

    pub fn draft(&self) -> &OccurrenceDraft {
        &self.draft
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    pub fn summary(&self) -> ConfirmationSummary {
        ConfirmationSummary {
            address: self.draft.address.clone(),
            icon: self.draft.kind.map(|k| k.icon()),
            kind_label: kind_label(self.draft.kind),
            description: description_or_placeholder(&self.draft.description),
            attachment: self.draft.media.display_name(),
        }
    }

    /// Build the create request body, stamping both timestamps with `now`.
    pub fn request(&self, now: DateTime<Utc>, user_id: i64) -> NewOccurrence {
        let stamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        let coordinate = self.draft.resolved_coordinate;
        NewOccurrence {
            tipo: type_code(self.draft.kind).to_string(),
            bairro: self.draft.address.clone(),
            descricao: description_or_placeholder(&self.draft.description),
            data_registro: stamp.clone(),
            ultima_atualizacao: stamp,
            user_id,
            latitude: coordinate.map(|c| c.latitude),
            longitude: coordinate.map(|c| c.longitude),
        }
    }

    /// Record the acknowledgement for a submit attempt.
    pub fn record_outcome(&mut self, outcome: &SubmitOutcome) -> Notice {
        let notice = match outcome {
            SubmitOutcome::Created => Notice::Success,
            SubmitOutcome::Failed { .. } => Notice::Failure,
        };
        self.notice = Some(notice);
        notice
    }
}

fn description_or_placeholder(description: &str) -> String {
    if description.trim().is_empty() {
        EMPTY_DESCRIPTION.to_string()
    } else {
        description.to_string()
    }
}
