use chrono::NaiveDate;
use tokio_util::sync::CancellationToken;

use crate::api::DayEntries;
use crate::categories::DaySummary;
use crate::gesture::{GestureContext, GestureOutcome, GestureStateMachine, PointerEvent};
use crate::minimap::{Minimap, MinimapPointer};
use crate::models::{CalendarDay, EntryKind, IntervalRecord};
use crate::render::{self, DrawSurface, OverlayScene, TimelineScene};
use crate::settings::TimelineSettings;
use crate::timeline::{minute_increment, BandLayout, IntervalSeries, TimeAxis, ViewportController};
use crate::{log_debug, log_info, log_warn};

const ENABLE_LOGS: bool = true;

/// Everything one timeline page shows, mutated only from the host's event
/// handlers.
///
/// Loads are tagged with a generation. Changing the date, or starting a
/// reload, bumps it and cancels the previous load's token; entries that
/// arrive for an older generation are dropped.
#[derive(Debug, Clone)]
pub struct TimelineState {
    settings: TimelineSettings,
    viewport: ViewportController,
    day: CalendarDay,
    axis: TimeAxis,
    layout: BandLayout,
    activity: IntervalSeries,
    tagged: IntervalSeries,
    logged: IntervalSeries,
    gesture: GestureStateMachine,
    minimap: Minimap,
    label_width: f64,
    minute_increment: i64,
    generation: u64,
    in_flight: Option<CancellationToken>,
}

/// Handle for one load: the generation its entries must carry and the token
/// cancelled once a newer load starts.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    pub generation: u64,
    pub token: CancellationToken,
}

impl TimelineState {
    /// A state with no canvas yet. Call [`TimelineState::resize`] once the
    /// host knows its canvas size.
    pub fn new(settings: TimelineSettings, date: NaiveDate) -> Self {
        let day = CalendarDay::new(date);
        let padding = settings.side_padding;
        let axis = TimeAxis::full_day(day, 0.0, padding);
        Self {
            viewport: ViewportController::new(&settings),
            layout: BandLayout::from_settings(0.0, &settings),
            activity: IntervalSeries::new(EntryKind::Activity),
            tagged: IntervalSeries::new(EntryKind::Tagged),
            logged: IntervalSeries::new(EntryKind::Logged),
            gesture: GestureStateMachine::new(),
            minimap: Minimap::new(day, 0.0, 0.0, padding),
            label_width: 0.0,
            minute_increment: minute_increment(
                0.0,
                settings.label_padding,
                axis.canvas_width(),
                axis.boundary_delta(),
            ),
            generation: 0,
            in_flight: None,
            settings,
            day,
            axis,
        }
    }

    pub fn settings(&self) -> &TimelineSettings {
        &self.settings
    }

    pub fn day(&self) -> CalendarDay {
        self.day
    }

    pub fn axis(&self) -> &TimeAxis {
        &self.axis
    }

    pub fn layout(&self) -> &BandLayout {
        &self.layout
    }

    pub fn activity(&self) -> &IntervalSeries {
        &self.activity
    }

    pub fn tagged(&self) -> &IntervalSeries {
        &self.tagged
    }

    pub fn logged(&self) -> &IntervalSeries {
        &self.logged
    }

    pub fn gesture(&self) -> &GestureStateMachine {
        &self.gesture
    }

    pub fn minimap(&self) -> &Minimap {
        &self.minimap
    }

    pub fn minute_increment(&self) -> i64 {
        self.minute_increment
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Switch to `date`: full-day viewport, empty series, no gesture.
    /// Returns the ticket the new load must carry.
    pub fn set_date(&mut self, date: NaiveDate) -> LoadTicket {
        self.day = CalendarDay::new(date);
        self.activity.clear();
        self.tagged.clear();
        self.logged.clear();
        self.gesture.reset();
        self.minimap.set_day(self.day);
        self.set_axis(TimeAxis::full_day(
            self.day,
            self.axis.canvas_width(),
            self.settings.side_padding,
        ));
        log_info!("Showing {}", self.day.path_segment());
        self.begin_load()
    }

    pub fn shift_days(&mut self, days: i64) -> LoadTicket {
        self.set_date(self.day.shift_days(days).date())
    }

    /// Invalidate whatever load is in flight and return the ticket for a new
    /// one. The series keep their records until the new ones arrive.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation = self.generation.wrapping_add(1);
        let token = CancellationToken::new();
        if let Some(previous) = self.in_flight.replace(token.clone()) {
            previous.cancel();
        }
        LoadTicket {
            generation: self.generation,
            token,
        }
    }

    /// Forget the token of `generation` once its load has ended. Tokens of
    /// newer loads stay.
    pub fn finish_load(&mut self, generation: u64) {
        if self.is_current(generation) {
            self.in_flight = None;
        }
    }

    pub fn has_load_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Replace every series with freshly loaded entries. Returns `false`, and
    /// changes nothing, when `generation` is no longer current.
    pub fn apply_entries(&mut self, generation: u64, entries: DayEntries) -> bool {
        if !self.is_current(generation) {
            log_warn!(
                "Dropping entries of load {generation}, current load is {}",
                self.generation
            );
            return false;
        }

        self.activity = IntervalSeries::from_records(EntryKind::Activity, entries.activity);
        self.tagged = IntervalSeries::from_records(EntryKind::Tagged, entries.tagged);
        self.logged = IntervalSeries::from_records(EntryKind::Logged, entries.logged);
        self.minimap.set_entries(&self.tagged, &self.logged);
        self.recompute_visible();
        self.refresh_pointer();
        true
    }

    /// Show a just-saved tagged entry until the next load replaces it.
    /// Records outside the current day are refused.
    pub fn append_tagged(&mut self, record: IntervalRecord) -> bool {
        if !self.day.contains(record.start()) {
            log_warn!(
                "Not showing tagged entry starting {} on {}",
                record.start(),
                self.day.path_segment()
            );
            return false;
        }
        if self.tagged.insert_sorted(record).is_none() {
            return false;
        }
        self.minimap.set_entries(&self.tagged, &self.logged);
        self.recompute_visible();
        self.refresh_pointer();
        true
    }

    /// The canvas changed size. Axis, visible subsets, band layout and tick
    /// spacing are recomputed in that order.
    pub fn resize(&mut self, surface: &dyn DrawSurface) {
        let (width, height) = surface.size();
        self.label_width = surface.measure_text(&self.settings.label_sample).width;
        self.axis = self.axis.with_canvas_width(width);
        self.recompute_visible();
        self.layout = BandLayout::from_settings(height, &self.settings);
        self.update_minute_increment();
        self.refresh_pointer();
    }

    pub fn resize_minimap(&mut self, width: f64, height: f64) {
        self.minimap.resize(width, height);
    }

    /// Feed a pointer event through the gesture machine and apply any
    /// viewport change it asks for. Tag creation and editing are returned
    /// for the host to open its dialogs.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<GestureOutcome> {
        let context = GestureContext {
            axis: &self.axis,
            layout: &self.layout,
            tagged: &self.tagged,
            logged: &self.logged,
        };
        let outcome = self.gesture.handle(event, &context)?;

        let next = match outcome {
            GestureOutcome::Zoom { zooming_in, anchor } => {
                self.viewport.zoom(&self.axis, zooming_in, anchor)
            }
            GestureOutcome::Pan { moving_left } => self.viewport.pan(&self.axis, moving_left),
            GestureOutcome::SetBoundaries { start, stop } => {
                self.viewport.set_boundaries(&self.axis, start, stop)
            }
            GestureOutcome::CreateTaggedEntry { .. } | GestureOutcome::EditTaggedEntry { .. } => {
                return Some(outcome);
            }
        };

        match next {
            Some(axis) => self.set_axis(axis),
            None => log_debug!("Viewport kept for {outcome:?}"),
        }
        Some(outcome)
    }

    /// Re-centre the main viewport from a minimap press or drag. Returns
    /// whether the viewport moved.
    pub fn minimap_pointer(&mut self, event: MinimapPointer) -> bool {
        let Some(time) = self.minimap.pointer(event) else {
            return false;
        };
        let axis = self.viewport.centre_on(&self.axis, time);
        if axis == self.axis {
            return false;
        }
        self.set_axis(axis);
        true
    }

    pub fn summary(&self) -> DaySummary {
        DaySummary::from_tagged(self.day, &self.tagged)
    }

    pub fn render_timeline(&self, surface: &mut dyn DrawSurface) {
        render::render_timeline(
            surface,
            &TimelineScene {
                axis: &self.axis,
                layout: &self.layout,
                activity: &self.activity,
                tagged: &self.tagged,
                logged: &self.logged,
                minute_increment: self.minute_increment,
            },
        );
    }

    pub fn render_overlay(&self, surface: &mut dyn DrawSurface) {
        render::render_overlay(
            surface,
            &OverlayScene {
                axis: &self.axis,
                layout: &self.layout,
                gesture: &self.gesture,
                tagged: &self.tagged,
                logged: &self.logged,
            },
        );
    }

    pub fn render_minimap(&self, surface: &mut dyn DrawSurface) {
        render::render_minimap(surface, &self.minimap, &self.axis);
    }

    fn set_axis(&mut self, axis: TimeAxis) {
        self.axis = axis;
        self.recompute_visible();
        self.update_minute_increment();
        self.refresh_pointer();
    }

    fn recompute_visible(&mut self) {
        self.activity.recompute_visible(&self.axis);
        self.tagged.recompute_visible(&self.axis);
        self.logged.recompute_visible(&self.axis);
    }

    fn update_minute_increment(&mut self) {
        self.minute_increment = minute_increment(
            self.label_width,
            self.settings.label_padding,
            self.axis.canvas_width(),
            self.axis.boundary_delta(),
        );
    }

    fn refresh_pointer(&mut self) {
        let context = GestureContext {
            axis: &self.axis,
            layout: &self.layout,
            tagged: &self.tagged,
            logged: &self.logged,
        };
        self.gesture.refresh_pointer(&context);
    }
}
