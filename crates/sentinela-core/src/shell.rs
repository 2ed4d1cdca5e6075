//! Map screen shell: camera, markers, and the overlays drawn above the map.
//!
//! The shell is the single owner of everything the map screen shows. The
//! camera handle lives here rather than in any global so that each shell
//! instance commands only its own map.

use std::time::Duration;

use tracing::{debug, info};

use crate::CoreError;
use crate::catalog::IconKey;
use crate::confirm::{Confirmation, ConfirmationExit, SubmitOutcome};
use crate::occurrence::{Coordinate, Occurrence};
use crate::wizard::{ReportWizard, SearchRequest, SearchTicket};

/// Camera move duration when jumping to a searched address.
pub const MARKER_ANIMATION: Duration = Duration::from_millis(1000);
/// Zoom used when focusing a single marker.
pub const MARKER_ZOOM_DELTA: f64 = 0.01;

/// Slide duration of the marker detail panel.
pub const DETAIL_SLIDE: Duration = Duration::from_millis(300);
pub const DETAIL_VISIBLE_OFFSET: f32 = 0.0;
pub const DETAIL_HIDDEN_OFFSET: f32 = -250.0;

/// Maceió, Alagoas.
pub const INITIAL_REGION: Region = Region {
    center: Coordinate::new(-9.6498, -35.7089),
    latitude_delta: 0.0922,
    longitude_delta: 0.0421,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub center: Coordinate,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Region {
    /// Tight region around one point.
    pub fn around(center: Coordinate) -> Self {
        Self {
            center,
            latitude_delta: MARKER_ZOOM_DELTA,
            longitude_delta: MARKER_ZOOM_DELTA,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraAnimation {
    pub target: Region,
    pub duration: Duration,
}

/// Handle to the map view owned by one shell.
#[derive(Debug, Clone)]
pub struct MapCamera {
    region: Region,
    animations: Vec<CameraAnimation>,
}

impl MapCamera {
    fn new(region: Region) -> Self {
        Self {
            region,
            animations: Vec::new(),
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Animate to `target`. The renderer drains queued moves with [`take_animations`](Self::take_animations).
    pub fn animate_to(&mut self, target: Region, duration: Duration) {
        self.region = target;
        self.animations.push(CameraAnimation { target, duration });
    }

    pub fn take_animations(&mut self) -> Vec<CameraAnimation> {
        std::mem::take(&mut self.animations)
    }
}

/// Content of the panel that slides down when a marker is tapped.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDetail {
    pub title: String,
    pub description: String,
    pub icon: IconKey,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub coordinate: Coordinate,
    pub icon: IconKey,
    pub detail: Option<MarkerDetail>,
}

/// The topmost thing drawn over the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Detail(usize),
    Wizard,
    /// Drawn on top of the still-open wizard.
    Confirmation,
}

#[derive(Debug, Clone)]
pub struct MapShell {
    camera: MapCamera,
    markers: Vec<Marker>,
    detail: Option<usize>,
    wizard: Option<ReportWizard>,
    confirmation: Option<Confirmation>,
    generation: u64,
}

impl Default for MapShell {
    fn default() -> Self {
        Self::new()
    }
}

impl MapShell {
    pub fn new() -> Self {
        Self {
            camera: MapCamera::new(INITIAL_REGION),
            markers: Vec::new(),
            detail: None,
            wizard: None,
            confirmation: None,
            generation: 0,
        }
    }

    pub fn camera(&self) -> &MapCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut MapCamera {
        &mut self.camera
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn active_overlay(&self) -> Overlay {
        if self.confirmation.is_some() {
            Overlay::Confirmation
        } else if self.wizard.is_some() {
            Overlay::Wizard
        } else if let Some(index) = self.detail {
            Overlay::Detail(index)
        } else {
            Overlay::None
        }
    }

    /// Pin reported occurrences that carry a location, each with a detail panel.
    ///
    /// Returns the number of markers added.
    pub fn show_occurrences(&mut self, occurrences: &[Occurrence]) -> usize {
        let before = self.markers.len();
        self.markers
            .extend(occurrences.iter().filter_map(|occurrence| {
                let coordinate = occurrence.coordinate()?;
                let icon = occurrence.icon();
                Some(Marker {
                    coordinate,
                    icon,
                    detail: Some(MarkerDetail {
                        title: occurrence.bairro.clone(),
                        description: occurrence.descricao.clone(),
                        icon,
                    }),
                })
            }));
        self.markers.len() - before
    }

    // ── Marker detail panel ──

    pub fn open_detail(&mut self, index: usize) -> Result<&MarkerDetail, CoreError> {
        let detail = self
            .markers
            .get(index)
            .and_then(|m| m.detail.as_ref())
            .ok_or(CoreError::MarkerOutOfRange(index))?;
        self.detail = Some(index);
        Ok(detail)
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Resting vertical offset of the detail panel.
    pub fn detail_offset(&self) -> f32 {
        if self.detail.is_some() {
            DETAIL_VISIBLE_OFFSET
        } else {
            DETAIL_HIDDEN_OFFSET
        }
    }

    // ── Report wizard ──

    /// Open the report wizard on a fresh draft, replacing any open one.
    pub fn open_report(&mut self) -> &mut ReportWizard {
        self.generation += 1;
        self.confirmation = None;
        self.detail = None;
        info!(generation = self.generation, "report wizard opened");
        self.wizard.insert(ReportWizard::open(self.generation))
    }

    /// Close the wizard and anything stacked on it, discarding the draft.
    pub fn close_report(&mut self) {
        if self.wizard.take().is_some() {
            info!("report wizard closed");
        }
        self.confirmation = None;
    }

    pub fn wizard(&self) -> Option<&ReportWizard> {
        self.wizard.as_ref()
    }

    pub fn wizard_mut(&mut self) -> Option<&mut ReportWizard> {
        self.wizard.as_mut()
    }

    /// Advance the open wizard; see [`ReportWizard::advance`].
    pub fn advance_wizard(&mut self) -> Option<SearchRequest> {
        self.wizard.as_mut()?.advance()
    }

    /// Apply a finished address search.
    ///
    /// A match for the current draft is stored on it, pinned, and the camera
    /// moves there. Results for a closed or superseded draft are dropped.
    pub fn apply_search(&mut self, ticket: SearchTicket, coordinate: Option<Coordinate>) -> bool {
        let Some(wizard) = self.wizard.as_mut() else {
            debug!(generation = ticket.generation, "address search finished after wizard closed");
            return false;
        };
        if !wizard.apply_search(ticket, coordinate) {
            return false;
        }
        if let Some(coordinate) = coordinate {
            let icon = wizard
                .draft()
                .kind
                .map(|k| k.icon())
                .unwrap_or(IconKey::Alert);
            self.add_marker(coordinate, icon);
        }
        true
    }

    fn add_marker(&mut self, coordinate: Coordinate, icon: IconKey) {
        info!(
            latitude = coordinate.latitude,
            longitude = coordinate.longitude,
            "adding marker"
        );
        self.markers.push(Marker {
            coordinate,
            icon,
            detail: None,
        });
        self.camera
            .animate_to(Region::around(coordinate), MARKER_ANIMATION);
    }

    /// Press the media step's action: open the confirmation over the wizard.
    ///
    /// Does nothing unless the wizard is on its last step.
    pub fn finish_wizard(&mut self) -> Option<&Confirmation> {
        let wizard = self.wizard.as_ref().filter(|w| w.is_last_step())?;
        let draft = wizard.draft().clone();
        Some(self.confirmation.insert(Confirmation::new(draft)))
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    /// Apply the result of the create request.
    ///
    /// On success the confirmation and the wizard both close and
    /// `Some(Confirmed)` is returned; this happens at most once per
    /// confirmation. On failure the notice is set and everything stays open.
    pub fn apply_submit_outcome(&mut self, outcome: &SubmitOutcome) -> Option<ConfirmationExit> {
        let confirmation = self.confirmation.as_mut()?;
        confirmation.record_outcome(outcome);
        if !outcome.is_created() {
            return None;
        }
        self.confirmation = None;
        self.wizard = None;
        info!("occurrence confirmed, report closed");
        Some(ConfirmationExit::Confirmed)
    }

    /// Back out of the confirmation, discarding the draft without submitting.
    pub fn cancel_confirmation(&mut self) -> Option<ConfirmationExit> {
        self.confirmation.take()?;
        self.wizard = None;
        info!("occurrence report cancelled");
        Some(ConfirmationExit::Cancelled)
    }

    /// Crosshairs button: return the camera to the starting region.
    pub fn recenter(&mut self) {
        self.camera.animate_to(INITIAL_REGION, MARKER_ANIMATION);
    }
}
