use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mtag_timeline::gesture::{GestureContext, HeldRange};
use mtag_timeline::models::MAX_BOUNDARY_MS;
use mtag_timeline::render::{DrawCall, RecordingSurface};
use mtag_timeline::timeline::BandLayout;
use mtag_timeline::{
    CalendarDay, EntryKind, EntryPayload, GestureOutcome, GestureState, GestureStateMachine,
    HttpTimelineApi, IntervalRecord, IntervalSeries, LoadOutcome, PointerButton, PointerEvent,
    TimeAxis, TimelineController, TimelineSettings, TimelineState, ViewportController,
};

fn day() -> CalendarDay {
    CalendarDay::new(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
}

fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    day().date().and_hms_opt(h, m, s).unwrap()
}

fn tagged(start: NaiveDateTime, stop: NaiveDateTime) -> IntervalRecord {
    IntervalRecord::new(
        start,
        stop,
        EntryPayload::Tagged {
            id: None,
            category: "focus".into(),
            category_str: "focus".into(),
            url: None,
        },
    )
    .unwrap()
}

#[test]
fn pixel_round_trip_stays_within_one_pixel() {
    let axis = TimeAxis::new(day(), at(8, 0, 0), at(17, 30, 0), 1200.0, 29.0).unwrap();
    let resolution_ms = axis.ms_per_pixel().ceil() as i64;

    let mut time = axis.boundary_start();
    while time <= axis.boundary_stop() {
        let back = axis.pixel_to_time(axis.time_to_pixel(time));
        assert!(
            (back - time).num_milliseconds().abs() <= resolution_ms,
            "{time} came back as {back}"
        );
        time += Duration::seconds(613);
    }
}

#[test]
fn pixel_to_time_clamps_at_the_padding() {
    let axis = TimeAxis::new(day(), at(8, 0, 0), at(9, 0, 0), 800.0, 29.0).unwrap();
    for x in [-1.0e9, -5.0, 0.0, 29.0] {
        assert_eq!(axis.pixel_to_time(x), at(8, 0, 0));
    }
    for x in [771.0, 800.0, 1.0e9] {
        assert_eq!(axis.pixel_to_time(x), at(9, 0, 0));
    }
}

#[test]
fn zoom_is_idempotent_at_floor_and_ceiling() {
    let viewport = ViewportController::default();
    let mut axis = TimeAxis::new(day(), at(11, 0, 0), at(13, 0, 0), 1000.0, 29.0).unwrap();

    let mut steps = 0;
    while let Some(next) = viewport.zoom(&axis, true, at(12, 0, 0)) {
        axis = next;
        steps += 1;
        assert!(steps < 1_000);
    }
    let floor = axis;
    assert!(floor.boundary_delta() >= Duration::seconds(5));
    assert_eq!(viewport.zoom(&floor, true, at(12, 0, 0)), None);

    while let Some(next) = viewport.zoom(&axis, false, at(12, 0, 0)) {
        axis = next;
        steps += 1;
        assert!(steps < 2_000);
    }
    assert_eq!(axis.boundary_delta(), Duration::milliseconds(MAX_BOUNDARY_MS));
    assert_eq!(viewport.zoom(&axis, false, at(12, 0, 0)), None);
}

#[test]
fn zoom_keeps_the_anchor_under_the_pointer() {
    let viewport = ViewportController::default();
    let axis = TimeAxis::new(day(), at(9, 0, 0), at(15, 0, 0), 1058.0, 29.0).unwrap();

    for anchor in [at(9, 30, 0), at(12, 0, 0), at(14, 17, 23)] {
        for zooming_in in [true, false] {
            let next = viewport.zoom(&axis, zooming_in, anchor).unwrap();
            let moved = (next.time_to_pixel(anchor) - axis.time_to_pixel(anchor)).abs();
            assert!(moved < 1.0, "anchor {anchor} moved {moved}px");
        }
    }
}

#[test]
fn zooming_in_ten_thousand_seconds() {
    let viewport = ViewportController::default();
    let start = at(6, 0, 0);
    let axis = TimeAxis::new(day(), start, start + Duration::seconds(10_000), 1058.0, 29.0).unwrap();
    let anchor = start + Duration::seconds(5_000);

    let next = viewport.zoom(&axis, true, anchor).unwrap();
    assert_eq!(next.boundary_delta(), Duration::seconds(9_700));
    assert_eq!(next.boundary_start(), start + Duration::seconds(150));
}

#[test]
fn pan_never_leaves_the_day() {
    let viewport = ViewportController::default();
    let mut axis = TimeAxis::new(day(), at(1, 0, 0), at(5, 0, 0), 1000.0, 29.0).unwrap();

    for _ in 0..200 {
        if let Some(next) = viewport.pan(&axis, true) {
            axis = next;
        }
        assert!(axis.boundary_start() >= day().start_of_day());
    }
    assert_eq!(axis.boundary_start(), day().start_of_day());

    for _ in 0..600 {
        if let Some(next) = viewport.pan(&axis, false) {
            axis = next;
        }
        assert!(axis.boundary_stop() <= day().end_of_day());
    }
    assert_eq!(axis.boundary_stop(), day().end_of_day());
    assert_eq!(axis.boundary_delta(), Duration::hours(4));
}

#[test]
fn visible_subset_matches_overlap_for_any_window() {
    let records: Vec<IntervalRecord> = (0..24)
        .map(|h| tagged(at(h, 10, 0), at(h, 40, 0)))
        .collect();
    let mut series = IntervalSeries::from_records(EntryKind::Tagged, records);

    for (start, stop) in [
        (at(0, 0, 0), at(23, 59, 59)),
        (at(3, 40, 0), at(5, 10, 0)),
        (at(3, 41, 0), at(4, 9, 0)),
        (at(12, 0, 0), at(12, 5, 0)),
    ] {
        let axis = TimeAxis::new(day(), start, stop, 20_000.0, 29.0).unwrap();
        series.recompute_visible(&axis);
        let expected: Vec<usize> = series
            .records()
            .iter()
            .enumerate()
            .filter(|(_, record)| !(record.stop() < start || stop < record.start()))
            .map(|(index, _)| index)
            .collect();
        assert_eq!(series.visible_indices(), expected.as_slice());
    }
}

struct Page {
    axis: TimeAxis,
    layout: BandLayout,
    tagged: IntervalSeries,
    logged: IntervalSeries,
    gesture: GestureStateMachine,
}

impl Page {
    fn new(tagged_records: Vec<IntervalRecord>) -> Self {
        let axis = TimeAxis::full_day(day(), 1469.0, 29.0);
        let mut tagged = IntervalSeries::from_records(EntryKind::Tagged, tagged_records);
        tagged.recompute_visible(&axis);
        Self {
            axis,
            layout: BandLayout::new(300.0, 30.0, 10.0),
            tagged,
            logged: IntervalSeries::new(EntryKind::Logged),
            gesture: GestureStateMachine::new(),
        }
    }

    fn send(&mut self, event: PointerEvent) -> Option<GestureOutcome> {
        let context = GestureContext {
            axis: &self.axis,
            layout: &self.layout,
            tagged: &self.tagged,
            logged: &self.logged,
        };
        self.gesture.handle(event, &context)
    }

    fn x(&self, time: NaiveDateTime) -> f64 {
        self.axis.time_to_pixel(time)
    }
}

#[test]
fn tag_drag_is_clamped_between_neighbours() {
    let mut page = Page::new(vec![
        tagged(at(10, 0, 0), at(10, 30, 0)),
        tagged(at(11, 0, 0), at(11, 15, 0)),
    ]);
    assert_eq!(
        page.tagged
            .free_range_around(at(10, 45, 0), day().start_of_day(), day().end_of_day()),
        (at(10, 30, 0), at(11, 0, 0))
    );

    let x = page.x(at(10, 45, 0));
    page.send(PointerEvent::Down {
        x,
        y: 100.0,
        button: PointerButton::Primary,
        modifier: false,
    });
    page.send(PointerEvent::Move {
        x: page.x(at(11, 40, 0)),
        y: 100.0,
    });

    let GestureState::TagDragging(drag) = *page.gesture.state() else {
        panic!("expected a tag drag, got {:?}", page.gesture.state());
    };
    assert_eq!((drag.range_start, drag.range_stop), (at(10, 30, 0), at(11, 0, 0)));
    assert_eq!(drag.stop, at(11, 0, 0));

    let outcome = page.send(PointerEvent::Up {
        x: page.x(at(11, 40, 0)),
        y: 100.0,
    });
    assert_eq!(
        outcome,
        Some(GestureOutcome::CreateTaggedEntry {
            start: drag.start,
            stop: at(11, 0, 0),
        })
    );
}

#[test]
fn click_then_double_click_uses_the_clamp_range() {
    let mut page = Page::new(vec![
        tagged(at(13, 0, 0), at(13, 30, 0)),
        tagged(at(15, 0, 0), at(15, 45, 0)),
    ]);
    let x = page.x(at(14, 0, 0));

    let down = page.send(PointerEvent::Down {
        x,
        y: 100.0,
        button: PointerButton::Primary,
        modifier: false,
    });
    let up = page.send(PointerEvent::Up { x, y: 100.0 });
    assert_eq!(down, None);
    assert_eq!(up, None);
    assert_eq!(
        page.gesture.state(),
        &GestureState::TagDragHeldForDoubleClick(HeldRange {
            start: at(13, 30, 0),
            stop: at(15, 0, 0),
        })
    );

    let outcome = page.send(PointerEvent::DoubleClick { x, y: 100.0 });
    assert_eq!(
        outcome,
        Some(GestureOutcome::CreateTaggedEntry {
            start: at(13, 30, 0),
            stop: at(15, 0, 0),
        })
    );
    assert_eq!(page.gesture.state(), &GestureState::Idle);
}

fn filled_rect(calls: &[DrawCall], y: f64) -> (f64, f64) {
    calls
        .iter()
        .find_map(|call| match call {
            DrawCall::FillRect {
                x,
                y: top,
                width,
                ..
            } if *top == y => Some((*x, *width)),
            _ => None,
        })
        .unwrap()
}

#[tokio::test]
async fn fetched_day_renders_proportional_spans() {
    let server = MockServer::start().await;
    let body = json!({
        "logged_entries": [{
            "db_id": 1,
            "start": "2025-01-15T09:00:00",
            "stop": "2025-01-15T09:45:00",
            "application_window": {
                "db_id": 1,
                "title": "Inbox",
                "application": {"db_id": 1, "name": "mail client"}
            }
        }],
        "tagged_entries": [{
            "db_id": 1,
            "start": "2025-01-15T09:10:00",
            "stop": "2025-01-15T09:20:00",
            "category": {"db_id": 2, "name": "mail", "url": null, "parent_id": 1},
            "category_str": "work >> mail"
        }],
        "activity_entries": []
    });
    Mock::given(method("GET"))
        .and(path("/entries/2025-01-15"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_string(), "application/json"))
        .mount(&server)
        .await;

    let api = Arc::new(HttpTimelineApi::new(server.uri(), StdDuration::from_secs(5)));
    let controller = TimelineController::new(
        TimelineState::new(TimelineSettings::default(), day().date()),
        api,
    );
    controller
        .lock()
        .await
        .resize(&RecordingSurface::new(1058.0, 300.0));

    assert_eq!(controller.set_date(day().date()).await, LoadOutcome::Applied);

    let state = controller.lock().await;
    let axis = *state.axis();
    assert_eq!(axis.boundary_start(), day().start_of_day());
    assert_eq!(axis.boundary_stop(), day().end_of_day());

    let mut surface = RecordingSurface::new(1058.0, 300.0);
    state.render_timeline(&mut surface);
    let layout = *state.layout();

    let (tagged_x, tagged_width) = filled_rect(surface.calls(), layout.tagged_top);
    let (logged_x, logged_width) = filled_rect(surface.calls(), layout.logged_top);

    assert!(layout.tagged_top + layout.band_height < layout.logged_top);

    let px_per_minute = axis.drawable_width() / (24.0 * 60.0);
    assert!((tagged_x - axis.time_to_pixel(at(9, 10, 0)).floor()).abs() < 1.0);
    assert!((logged_x - axis.time_to_pixel(at(9, 0, 0)).floor()).abs() < 1.0);
    assert!((tagged_width - 10.0 * px_per_minute).abs() <= 2.0);
    assert!((logged_width - 45.0 * px_per_minute).abs() <= 2.0);
    assert!(logged_x < tagged_x);
    assert!(tagged_x + tagged_width <= logged_x + logged_width);
}
