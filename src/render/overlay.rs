use crate::gesture::{GestureState, GestureStateMachine, PointerState};
use crate::models::{EntryKind, IntervalRecord};
use crate::timeline::{BandLayout, IntervalSeries, TimeAxis};
use crate::utils::time_text::hour_minute_second_text;

use super::palette;
use super::surface::{DrawSurface, TextAlign, TextMetrics};

const TOOLTIP_OFFSET: f64 = 10.0;
const TOOLTIP_PADDING: f64 = 5.0;
const TOOLTIP_SEPARATOR: &str = " || ";

#[derive(Debug, Clone, Copy)]
pub struct OverlayScene<'a> {
    pub axis: &'a TimeAxis,
    pub layout: &'a BandLayout,
    pub gesture: &'a GestureStateMachine,
    pub tagged: &'a IntervalSeries,
    pub logged: &'a IntervalSeries,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub text: String,
}

/// Place a tooltip below-right of the pointer, pulled back inside the canvas.
pub fn tooltip_box(
    text: String,
    metrics: TextMetrics,
    pointer: (f64, f64),
    canvas: (f64, f64),
) -> TooltipBox {
    let width = metrics.width + TOOLTIP_PADDING * 2.0;
    let height = metrics.height + TOOLTIP_PADDING * 2.0;
    TooltipBox {
        x: (pointer.0 + TOOLTIP_OFFSET).min(canvas.0 - width),
        y: (pointer.1 + TOOLTIP_OFFSET).min(canvas.1 - height),
        width,
        height,
        text,
    }
}

/// Redraw the overlay layer from the gesture state.
pub fn render_overlay(surface: &mut dyn DrawSurface, scene: &OverlayScene<'_>) {
    let (width, height) = surface.size();
    let axis = scene.axis;
    surface.clear();

    match scene.gesture.state() {
        GestureState::ZoomDragging(drag) => {
            let left = drag.initial_x.min(drag.current_x);
            let right = drag.initial_x.max(drag.current_x);
            surface.fill_rect(left, 0.0, right - left, height, palette::ZOOM_SELECTION);
        }
        GestureState::TagDragging(drag) => {
            let left = axis.time_to_pixel(drag.start);
            let right = axis.time_to_pixel(drag.stop);
            surface.fill_rect(left, 0.0, right - left, height, palette::TAG_SELECTION);
        }
        _ => {}
    }

    let Some(pointer) = scene.gesture.pointer() else {
        return;
    };

    let crosshair_x = axis.time_to_pixel(pointer.crosshair);
    surface.line((crosshair_x, 0.0), (crosshair_x, height), palette::CROSSHAIR);

    let mut texts = vec![hour_minute_second_text(pointer.time)];
    if let Some((kind, record)) = hovered_record(scene, pointer) {
        surface.fill_rect(
            record.start_pixel() as f64,
            scene.layout.band_top(kind),
            record.pixel_width() as f64,
            scene.layout.band_height(kind),
            palette::HOVER_HIGHLIGHT,
        );
        texts.extend(record.texts());
    }

    let text = texts.join(TOOLTIP_SEPARATOR);
    let metrics = surface.measure_text(&text);
    let tooltip = tooltip_box(text, metrics, (pointer.x, pointer.y), (width, height));
    surface.fill_rect(
        tooltip.x,
        tooltip.y,
        tooltip.width,
        tooltip.height,
        palette::TOOLTIP_BACKGROUND,
    );
    surface.stroke_rect(
        tooltip.x,
        tooltip.y,
        tooltip.width,
        tooltip.height,
        palette::TOOLTIP_BORDER,
    );
    surface.text(
        &tooltip.text,
        tooltip.x + TOOLTIP_PADDING,
        tooltip.y + TOOLTIP_PADDING,
        TextAlign::Left,
        palette::TOOLTIP_TEXT,
    );
}

fn hovered_record<'a>(
    scene: &OverlayScene<'a>,
    pointer: &PointerState,
) -> Option<(EntryKind, &'a IntervalRecord)> {
    let hovered = pointer.hovered?;
    let series = match hovered.kind {
        EntryKind::Tagged => scene.tagged,
        EntryKind::Logged => scene.logged,
        EntryKind::Activity => return None,
    };
    series.get(hovered.index).map(|record| (hovered.kind, record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{GestureContext, PointerButton, PointerEvent};
    use crate::models::{CalendarDay, EntryPayload};
    use crate::render::surface::{DrawCall, RecordingSurface};
    use chrono::{NaiveDate, NaiveDateTime};
    use pretty_assertions::assert_eq;

    fn day() -> CalendarDay {
        CalendarDay::new(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        day().date().and_hms_opt(h, m, 0).unwrap()
    }

    struct Scene {
        axis: TimeAxis,
        layout: BandLayout,
        tagged: IntervalSeries,
        logged: IntervalSeries,
        gesture: GestureStateMachine,
    }

    impl Scene {
        fn new() -> Self {
            let axis = TimeAxis::new(day(), at(9, 0), at(10, 0), 660.0, 30.0).unwrap();
            let mut logged = IntervalSeries::from_records(
                EntryKind::Logged,
                vec![IntervalRecord::new(
                    at(9, 0),
                    at(9, 30),
                    EntryPayload::Logged {
                        application: "shell".into(),
                        title: "htop".into(),
                    },
                )
                .unwrap()],
            );
            logged.recompute_visible(&axis);
            Self {
                axis,
                layout: BandLayout::new(300.0, 30.0, 10.0),
                tagged: IntervalSeries::new(EntryKind::Tagged),
                logged,
                gesture: GestureStateMachine::new(),
            }
        }

        fn send(&mut self, event: PointerEvent) {
            let context = GestureContext {
                axis: &self.axis,
                layout: &self.layout,
                tagged: &self.tagged,
                logged: &self.logged,
            };
            self.gesture.handle(event, &context);
        }

        fn render(&self) -> RecordingSurface {
            let mut surface = RecordingSurface::new(660.0, 300.0);
            render_overlay(
                &mut surface,
                &OverlayScene {
                    axis: &self.axis,
                    layout: &self.layout,
                    gesture: &self.gesture,
                    tagged: &self.tagged,
                    logged: &self.logged,
                },
            );
            surface
        }
    }

    #[test]
    fn tooltip_stays_inside_canvas() {
        let metrics = TextMetrics {
            width: 100.0,
            height: 16.0,
        };
        let inside = tooltip_box("a".into(), metrics, (50.0, 40.0), (400.0, 200.0));
        assert_eq!((inside.x, inside.y), (60.0, 50.0));
        assert_eq!((inside.width, inside.height), (110.0, 26.0));

        let corner = tooltip_box("a".into(), metrics, (395.0, 190.0), (400.0, 200.0));
        assert_eq!((corner.x, corner.y), (290.0, 174.0));
    }

    #[test]
    fn hover_draws_crosshair_highlight_and_tooltip() {
        let mut scene = Scene::new();
        scene.send(PointerEvent::Move { x: 180.0, y: 200.0 });
        let surface = scene.render();

        assert_eq!(surface.calls()[0], DrawCall::Clear);
        assert!(surface.calls().contains(&DrawCall::Line {
            from: (180.0, 0.0),
            to: (180.0, 300.0),
            color: palette::CROSSHAIR,
        }));

        let record = &scene.logged.records()[0];
        assert_eq!(
            surface.fills_with(palette::HOVER_HIGHLIGHT),
            vec![(
                record.start_pixel() as f64,
                180.0,
                record.pixel_width() as f64,
                110.0
            )]
        );
        assert_eq!(surface.texts(), vec!["09:15:00 || shell || htop"]);
    }

    #[test]
    fn zoom_drag_selection_spans_raw_pixels() {
        let mut scene = Scene::new();
        scene.send(PointerEvent::Down {
            x: 400.0,
            y: 100.0,
            button: PointerButton::Primary,
            modifier: true,
        });
        scene.send(PointerEvent::Move { x: 250.0, y: 100.0 });
        let surface = scene.render();

        assert_eq!(
            surface.fills_with(palette::ZOOM_SELECTION),
            vec![(250.0, 0.0, 150.0, 300.0)]
        );
    }

    #[test]
    fn tag_drag_selection_spans_clamped_times() {
        let mut scene = Scene::new();
        scene.send(PointerEvent::Down {
            x: 330.0,
            y: 100.0,
            button: PointerButton::Primary,
            modifier: false,
        });
        scene.send(PointerEvent::Move { x: 480.0, y: 100.0 });
        let surface = scene.render();

        assert_eq!(
            surface.fills_with(palette::TAG_SELECTION),
            vec![(330.0, 0.0, 150.0, 300.0)]
        );
    }

    #[test]
    fn leaving_clears_the_overlay() {
        let mut scene = Scene::new();
        scene.send(PointerEvent::Move { x: 180.0, y: 200.0 });
        scene.send(PointerEvent::Leave);
        assert_eq!(scene.render().calls(), &[DrawCall::Clear]);
    }
}
