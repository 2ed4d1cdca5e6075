//! Occurrence wire types shared between the client and the occurrence API.

use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::{IconKey, OccurrenceKind};

/// Type code sent for flood reports.
pub const FLOOD_TYPE_CODE: &str = "tipo1";
/// Type code sent for every other report, including ones with no kind set.
pub const OTHER_TYPE_CODE: &str = "tipo2";

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A server-recorded occurrence, as returned by the list endpoint.
///
/// Read-only from the client's side: it is never updated or deleted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tipo: String,
    /// Neighbourhood or street address entered by the reporter.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bairro: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub descricao: String,
    /// ISO 8601 timestamp string.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data_registro: String,
    /// ISO 8601 timestamp string.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ultima_atualizacao: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Occurrence {
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
            _ => None,
        }
    }

    /// Icon for a list row, keyed off the record's `tipo`.
    pub fn icon(&self) -> IconKey {
        icon_for_type_code(&self.tipo)
    }
}

/// Text fields may come back as `null`; read those as empty.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of a create-occurrence request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOccurrence {
    pub tipo: String,
    pub bairro: String,
    pub descricao: String,
    pub data_registro: String,
    pub ultima_atualizacao: String,
    pub user_id: i64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Map a draft kind to the API type code.
///
/// Only floods get their own code; fire, landslide and unset all share
/// [`OTHER_TYPE_CODE`].
pub fn type_code(kind: Option<OccurrenceKind>) -> &'static str {
    match kind {
        Some(OccurrenceKind::Flood) => FLOOD_TYPE_CODE,
        _ => OTHER_TYPE_CODE,
    }
}

/// Resolve a list-row icon from a server `tipo`.
///
/// Accepts both the API codes and the picker values, since older records
/// were stored with the latter.
pub fn icon_for_type_code(tipo: &str) -> IconKey {
    match tipo.trim() {
        FLOOD_TYPE_CODE => IconKey::Rain,
        OTHER_TYPE_CODE => IconKey::Fire,
        other => OccurrenceKind::from_value(other)
            .map(OccurrenceKind::icon)
            .unwrap_or(IconKey::Alert),
    }
}
