//! Occurrence type catalog.
//!
//! The three civil-defense incident kinds a citizen can report. Each kind
//! carries the picker value sent around inside the client, the label shown
//! to the user, and the icon key used by markers and list rows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Label shown wherever a draft has no kind selected.
pub const UNSET_KIND_LABEL: &str = "Tipo não informado";

/// Icon keys resolved to image assets by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKey {
    Rain,
    Fire,
    Earth,
    /// Generic warning triangle for records whose type is not recognised.
    Alert,
}

impl IconKey {
    pub fn as_str(self) -> &'static str {
        match self {
            IconKey::Rain => "rain",
            IconKey::Fire => "fire",
            IconKey::Earth => "earth",
            IconKey::Alert => "alert",
        }
    }
}

/// A reportable occurrence kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OccurrenceKind {
    #[serde(rename = "chuvas")]
    Flood,
    #[serde(rename = "incendio")]
    Fire,
    #[serde(rename = "deslizamento")]
    Landslide,
}

impl OccurrenceKind {
    /// Every kind, in picker order.
    pub const fn all() -> [OccurrenceKind; 3] {
        [
            OccurrenceKind::Flood,
            OccurrenceKind::Fire,
            OccurrenceKind::Landslide,
        ]
    }

    /// Picker value carried by the draft.
    pub fn value(self) -> &'static str {
        match self {
            OccurrenceKind::Flood => "chuvas",
            OccurrenceKind::Fire => "incendio",
            OccurrenceKind::Landslide => "deslizamento",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OccurrenceKind::Flood => "Chuvas intensas",
            OccurrenceKind::Fire => "Incêndio",
            OccurrenceKind::Landslide => "Deslizamento",
        }
    }

    pub fn icon(self) -> IconKey {
        match self {
            OccurrenceKind::Flood => IconKey::Rain,
            OccurrenceKind::Fire => IconKey::Fire,
            OccurrenceKind::Landslide => IconKey::Earth,
        }
    }

    /// Look up a kind by its picker value, ignoring case and surrounding whitespace.
    pub fn from_value(value: &str) -> Option<OccurrenceKind> {
        let value = value.trim();
        Self::all()
            .into_iter()
            .find(|kind| kind.value().eq_ignore_ascii_case(value))
    }
}

/// Label for an optional kind, falling back to [`UNSET_KIND_LABEL`].
pub fn kind_label(kind: Option<OccurrenceKind>) -> &'static str {
    kind.map(OccurrenceKind::label).unwrap_or(UNSET_KIND_LABEL)
}

impl fmt::Display for OccurrenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for OccurrenceKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_value(s).ok_or_else(|| CoreError::UnknownKind(s.trim().to_string()))
    }
}
