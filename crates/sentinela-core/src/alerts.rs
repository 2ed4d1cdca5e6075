//! Alert list: previously reported occurrences with per-row expansion.

use std::time::Duration;

use crate::CoreError;
use crate::catalog::IconKey;
use crate::occurrence::Occurrence;

/// Duration of the expand/collapse height and chevron transition.
pub const EXPAND_TRANSITION: Duration = Duration::from_millis(300);

/// Screen heading.
pub const ALERTS_TITLE: &str = "Alertas Ativos";

#[derive(Debug, Clone, PartialEq)]
pub struct AlertRow {
    occurrence: Occurrence,
    expanded: bool,
}

impl AlertRow {
    fn new(occurrence: Occurrence) -> Self {
        Self {
            occurrence,
            expanded: false,
        }
    }

    pub fn occurrence(&self) -> &Occurrence {
        &self.occurrence
    }

    pub fn title(&self) -> &str {
        &self.occurrence.bairro
    }

    pub fn description(&self) -> &str {
        &self.occurrence.descricao
    }

    pub fn icon(&self) -> IconKey {
        self.occurrence.icon()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Chevron rotation at rest: pointing down when collapsed, up when expanded.
    pub fn chevron_rotation_deg(&self) -> f32 {
        if self.expanded { 180.0 } else { 0.0 }
    }

    fn toggle(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }
}

/// The list behind the alerts screen.
///
/// Contents are replaced wholesale by each load; there is no merging,
/// paging, or caching.
#[derive(Debug, Clone, Default)]
pub struct AlertList {
    rows: Vec<AlertRow>,
    loaded: bool,
}

impl AlertList {
    pub fn new() -> Self {
        Self::default()
    }

    /// True until the first load has been applied.
    pub fn needs_load(&self) -> bool {
        !self.loaded
    }

    /// Replace every row with `occurrences`, all collapsed.
    pub fn replace(&mut self, occurrences: Vec<Occurrence>) {
        self.rows = occurrences.into_iter().map(AlertRow::new).collect();
        self.loaded = true;
    }

    pub fn rows(&self) -> &[AlertRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Flip one row's expansion, leaving its siblings untouched.
    ///
    /// Returns the row's new state.
    pub fn toggle(&mut self, index: usize) -> Result<bool, CoreError> {
        let len = self.rows.len();
        self.rows
            .get_mut(index)
            .map(AlertRow::toggle)
            .ok_or(CoreError::RowOutOfRange { index, len })
    }
}
