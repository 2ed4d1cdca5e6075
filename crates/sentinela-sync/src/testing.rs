//! In-memory stand-ins for the occurrence API and the place service.

use std::sync::Mutex;

use async_trait::async_trait;
use sentinela_core::{Coordinate, NewOccurrence, Occurrence};

use crate::{OccurrenceApi, PlaceLookup, SyncError};

fn clone_error(e: &SyncError) -> SyncError {
    match e {
        SyncError::Server { status, body } => SyncError::Server {
            status: *status,
            body: body.clone(),
        },
        SyncError::PlaceSearch { status, message } => SyncError::PlaceSearch {
            status: status.clone(),
            message: message.clone(),
        },
        other => SyncError::PlaceSearch {
            status: "FAKE".into(),
            message: other.to_string(),
        },
    }
}

pub struct FakePlaces {
    result: Result<Vec<Coordinate>, SyncError>,
    queries: Mutex<Vec<String>>,
}

impl FakePlaces {
    pub fn with_matches(matches: Vec<Coordinate>) -> Self {
        Self {
            result: Ok(matches),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: SyncError) -> Self {
        Self {
            result: Err(error),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaceLookup for FakePlaces {
    async fn text_search(&self, query: &str) -> Result<Vec<Coordinate>, SyncError> {
        self.queries.lock().unwrap().push(query.to_string());
        match &self.result {
            Ok(matches) => Ok(matches.clone()),
            Err(e) => Err(clone_error(e)),
        }
    }
}

pub struct FakeApi {
    list: Result<Vec<Occurrence>, SyncError>,
    /// Status returned by create; anything outside 2xx fails.
    create_status: Mutex<u16>,
    created: Mutex<Vec<NewOccurrence>>,
    list_calls: Mutex<usize>,
}

impl FakeApi {
    pub fn new(list: Vec<Occurrence>) -> Self {
        Self {
            list: Ok(list),
            create_status: Mutex::new(201),
            created: Mutex::new(Vec::new()),
            list_calls: Mutex::new(0),
        }
    }

    pub fn failing_list(error: SyncError) -> Self {
        Self {
            list: Err(error),
            ..Self::new(Vec::new())
        }
    }

    pub fn set_create_status(&self, status: u16) {
        *self.create_status.lock().unwrap() = status;
    }

    pub fn created(&self) -> Vec<NewOccurrence> {
        self.created.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }
}

#[async_trait]
impl OccurrenceApi for FakeApi {
    async fn list_occurrences(&self) -> Result<Vec<Occurrence>, SyncError> {
        *self.list_calls.lock().unwrap() += 1;
        match &self.list {
            Ok(items) => Ok(items.clone()),
            Err(e) => Err(clone_error(e)),
        }
    }

    async fn create_occurrence(&self, occurrence: &NewOccurrence) -> Result<(), SyncError> {
        self.created.lock().unwrap().push(occurrence.clone());
        let status = *self.create_status.lock().unwrap();
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(SyncError::Server {
                status,
                body: "{\"detail\":\"invalid\"}".into(),
            })
        }
    }
}

pub fn occurrence(id: i64, tipo: &str, bairro: &str, descricao: &str) -> Occurrence {
    Occurrence {
        id,
        tipo: tipo.into(),
        bairro: bairro.into(),
        descricao: descricao.into(),
        data_registro: "2026-10-17T12:00:00.000Z".into(),
        ultima_atualizacao: "2026-10-17T12:00:00.000Z".into(),
        user_id: Some(1),
        latitude: Some(-9.65),
        longitude: Some(-35.71),
    }
}
