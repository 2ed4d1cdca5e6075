//! Confirmation submitter: turns a confirmed draft into one create request.

use std::sync::Arc;

use chrono::Utc;
use sentinela_core::{Confirmation, ConfirmationExit, MapShell, SubmitOutcome};
use tracing::{info, warn};

use crate::OccurrenceApi;

/// What happened when the user pressed confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub outcome: SubmitOutcome,
    /// `Some(Confirmed)` when the confirmation and wizard closed.
    pub exit: Option<ConfirmationExit>,
}

pub struct Submitter<A: ?Sized> {
    api: Arc<A>,
    user_id: i64,
}

impl<A: OccurrenceApi + ?Sized> Submitter<A> {
    pub fn new(api: Arc<A>, user_id: i64) -> Self {
        Self { api, user_id }
    }

    /// Send the create request for `confirmation`. Never retries.
    pub async fn submit(&self, confirmation: &Confirmation) -> SubmitOutcome {
        let body = confirmation.request(Utc::now(), self.user_id);
        match self.api.create_occurrence(&body).await {
            Ok(()) => {
                info!(tipo = %body.tipo, bairro = %body.bairro, "occurrence registered");
                SubmitOutcome::Created
            }
            Err(e) => {
                warn!(error = %e, "occurrence registration failed");
                SubmitOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Submit the shell's open confirmation and apply the result to it.
    ///
    /// Returns `None` when no confirmation is open.
    pub async fn confirm(&self, shell: &mut MapShell) -> Option<Submission> {
        let outcome = self.submit(shell.confirmation()?).await;
        let exit = shell.apply_submit_outcome(&outcome);
        Some(Submission { outcome, exit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AddressSearch;
    use crate::testing::{FakeApi, FakePlaces};
    use sentinela_core::confirm::EMPTY_DESCRIPTION;
    use sentinela_core::{Coordinate, Notice, OccurrenceKind, Overlay};
    use tokio::sync::mpsc;

    fn shell_with(kind: Option<OccurrenceKind>, description: &str) -> MapShell {
        let mut shell = MapShell::new();
        let wizard = shell.open_report();
        wizard.set_address("Av. Fernandes Lima");
        shell.advance_wizard();
        let wizard = shell.wizard_mut().unwrap();
        wizard.select_kind(kind);
        wizard.set_description(description);
        shell.advance_wizard();
        shell.finish_wizard().unwrap();
        shell
    }

    #[tokio::test]
    async fn flood_submits_tipo1() {
        let api = Arc::new(FakeApi::new(Vec::new()));
        let submitter = Submitter::new(api.clone(), 1);
        let mut shell = shell_with(Some(OccurrenceKind::Flood), "");
        submitter.confirm(&mut shell).await.unwrap();
        let created = api.created();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].tipo, "tipo1");
        assert_eq!(created[0].descricao, EMPTY_DESCRIPTION);
    }

    #[tokio::test]
    async fn success_confirms_exactly_once() {
        let api = Arc::new(FakeApi::new(Vec::new()));
        let submitter = Submitter::new(api.clone(), 1);
        let mut shell = shell_with(Some(OccurrenceKind::Landslide), "barreira caiu");

        let first = submitter.confirm(&mut shell).await.unwrap();
        assert_eq!(first.outcome, SubmitOutcome::Created);
        assert_eq!(first.exit, Some(ConfirmationExit::Confirmed));
        assert!(shell.wizard().is_none());
        assert_eq!(shell.active_overlay(), Overlay::None);

        assert!(submitter.confirm(&mut shell).await.is_none());
        assert_eq!(api.created().len(), 1);
    }

    #[tokio::test]
    async fn failure_keeps_confirmation_open() {
        let api = Arc::new(FakeApi::new(Vec::new()));
        api.set_create_status(400);
        let submitter = Submitter::new(api.clone(), 1);
        let mut shell = shell_with(Some(OccurrenceKind::Fire), "fumaça");

        let submission = submitter.confirm(&mut shell).await.unwrap();
        assert!(matches!(submission.outcome, SubmitOutcome::Failed { .. }));
        assert!(submission.exit.is_none());
        assert_eq!(shell.active_overlay(), Overlay::Confirmation);
        let confirmation = shell.confirmation().unwrap();
        assert_eq!(confirmation.notice(), Some(Notice::Failure));
        assert_eq!(confirmation.draft().description, "fumaça");

        // Re-pressing after the server recovers goes through.
        api.set_create_status(201);
        let retry = submitter.confirm(&mut shell).await.unwrap();
        assert_eq!(retry.exit, Some(ConfirmationExit::Confirmed));
        assert_eq!(api.created().len(), 2);
    }

    /// Leave the location step for `address` and apply its search result.
    async fn search_address(shell: &mut MapShell, places: Arc<FakePlaces>, address: &str) {
        let search = AddressSearch::new(places);
        let (tx, mut rx) = mpsc::unbounded_channel();
        shell.wizard_mut().unwrap().set_address(address);
        let request = shell.advance_wizard().expect("search request");
        search.spawn(request, tx).await.unwrap();
        let outcome = rx.recv().await.unwrap();
        assert!(shell.apply_search(outcome.ticket, outcome.coordinate));
    }

    #[tokio::test]
    async fn fire_report_end_to_end() {
        let api = Arc::new(FakeApi::new(Vec::new()));
        let places = Arc::new(FakePlaces::with_matches(vec![
            Coordinate::new(-9.6432, -35.7222),
            Coordinate::new(-9.60, -35.70),
        ]));
        let submitter = Submitter::new(api.clone(), 7);

        let mut shell = MapShell::new();
        shell.open_report();
        search_address(&mut shell, places.clone(), "Av. Fernandes Lima").await;
        assert_eq!(places.queries(), vec!["Av. Fernandes Lima".to_string()]);

        let wizard = shell.wizard_mut().unwrap();
        wizard.select_kind(OccurrenceKind::from_value("incendio"));
        wizard.set_description("fogo no telhado");
        shell.advance_wizard();
        shell.finish_wizard().unwrap();

        let summary = shell.confirmation().unwrap().summary();
        assert_eq!(summary.kind_label, "Incêndio");
        assert_eq!(summary.description, "fogo no telhado");

        let submission = submitter.confirm(&mut shell).await.unwrap();
        assert_eq!(submission.exit, Some(ConfirmationExit::Confirmed));
        let created = api.created();
        let created = &created[0];
        assert_eq!(created.tipo, "tipo2");
        assert_eq!(created.bairro, "Av. Fernandes Lima");
        assert_eq!(created.descricao, "fogo no telhado");
        assert_eq!(created.user_id, 7);
        assert_eq!(created.data_registro, created.ultima_atualizacao);
        assert_eq!(created.latitude, Some(-9.6432));
        assert_eq!(created.longitude, Some(-35.7222));
    }

    #[tokio::test]
    async fn research_without_match_sends_no_coordinate() {
        let api = Arc::new(FakeApi::new(Vec::new()));
        let submitter = Submitter::new(api.clone(), 1);

        let mut shell = MapShell::new();
        shell.open_report();
        let found = Arc::new(FakePlaces::with_matches(vec![Coordinate::new(-9.63, -35.73)]));
        search_address(&mut shell, found, "Farol").await;
        assert!(shell.wizard().unwrap().draft().resolved_coordinate.is_some());

        shell.wizard_mut().unwrap().retreat();
        let nothing = Arc::new(FakePlaces::with_matches(Vec::new()));
        search_address(&mut shell, nothing, "lugar nenhum").await;

        shell.advance_wizard();
        shell.finish_wizard().unwrap();
        submitter.confirm(&mut shell).await.unwrap();

        let created = api.created();
        assert_eq!(created[0].bairro, "lugar nenhum");
        assert!(created[0].latitude.is_none());
        assert!(created[0].longitude.is_none());
    }
}
