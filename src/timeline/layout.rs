use serde::Serialize;

use crate::models::EntryKind;
use crate::settings::TimelineSettings;

/// Vertical geometry of the timeline canvas.
///
/// ```text
/// 0            ruler strip (ruler_height)
/// tagged_top   tagged band (band_height)
///              gap (ruler_height)
/// logged_top   logged band (band_height)
///              bottom margin (band_margin)
/// ```
///
/// Activity spans the full canvas height behind everything else. Drawing and
/// hit-testing both read from this struct so they cannot disagree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BandLayout {
    pub canvas_height: f64,
    pub ruler_height: f64,
    pub tagged_top: f64,
    pub logged_top: f64,
    pub band_height: f64,
}

impl BandLayout {
    pub fn new(canvas_height: f64, ruler_height: f64, band_margin: f64) -> Self {
        let canvas_height = canvas_height.max(0.0);
        let tagged_top = ruler_height + band_margin;
        let gap = ruler_height;
        let band_height = ((canvas_height - tagged_top - gap - band_margin) / 2.0).max(0.0);

        Self {
            canvas_height,
            ruler_height,
            tagged_top,
            logged_top: tagged_top + band_height + gap,
            band_height,
        }
    }

    pub fn from_settings(canvas_height: f64, settings: &TimelineSettings) -> Self {
        Self::new(canvas_height, settings.ruler_height, settings.band_margin)
    }

    /// Band under `y`, edges inclusive. Only the tagged and logged bands are
    /// pointer targets.
    pub fn band_at(&self, y: f64) -> Option<EntryKind> {
        if self.band_height <= 0.0 {
            return None;
        }
        if self.tagged_top <= y && y <= self.tagged_top + self.band_height {
            Some(EntryKind::Tagged)
        } else if self.logged_top <= y && y <= self.logged_top + self.band_height {
            Some(EntryKind::Logged)
        } else {
            None
        }
    }

    pub fn band_top(&self, kind: EntryKind) -> f64 {
        match kind {
            EntryKind::Tagged => self.tagged_top,
            EntryKind::Logged => self.logged_top,
            EntryKind::Activity => 0.0,
        }
    }

    pub fn band_height(&self, kind: EntryKind) -> f64 {
        match kind {
            EntryKind::Tagged | EntryKind::Logged => self.band_height,
            EntryKind::Activity => self.canvas_height,
        }
    }
}
