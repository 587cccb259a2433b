use crate::models::IntervalRecord;
use crate::timeline::{ticks, BandLayout, IntervalSeries, TimeAxis};

use super::palette;
use super::surface::{DrawSurface, Rgba, TextAlign};

/// Everything the static timeline layer is drawn from.
#[derive(Debug, Clone, Copy)]
pub struct TimelineScene<'a> {
    pub axis: &'a TimeAxis,
    pub layout: &'a BandLayout,
    pub activity: &'a IntervalSeries,
    pub tagged: &'a IntervalSeries,
    pub logged: &'a IntervalSeries,
    pub minute_increment: i64,
}

/// Paint order: background, activity, ruler, tagged band, logged band,
/// side padding strips.
pub fn render_timeline(surface: &mut dyn DrawSurface, scene: &TimelineScene<'_>) {
    let (width, height) = surface.size();
    let layout = scene.layout;

    surface.fill_rect(0.0, 0.0, width, height, palette::BACKGROUND);

    for record in scene.activity.visible() {
        surface.fill_rect(
            record.start_pixel() as f64,
            0.0,
            record.pixel_width() as f64,
            height,
            record_color(record),
        );
    }

    render_ruler(surface, scene, width);

    for (series, top) in [
        (scene.tagged, layout.tagged_top),
        (scene.logged, layout.logged_top),
    ] {
        for record in series.visible() {
            surface.fill_rect(
                record.start_pixel() as f64,
                top,
                record.pixel_width() as f64,
                layout.band_height,
                record_color(record),
            );
        }
    }

    let padding = scene.axis.side_padding();
    surface.fill_rect(0.0, 0.0, padding, height, palette::SIDE_PADDING);
    surface.fill_rect(width - padding, 0.0, padding, height, palette::SIDE_PADDING);
}

fn render_ruler(surface: &mut dyn DrawSurface, scene: &TimelineScene<'_>, width: f64) {
    let ruler_height = scene.layout.ruler_height;
    surface.fill_rect(0.0, 0.0, width, ruler_height, palette::RULER_BACKGROUND);

    let tick_top = ruler_height - 10.0;
    for tick in ticks(scene.axis, scene.minute_increment) {
        surface.line((tick.x, tick_top), (tick.x, ruler_height), palette::RULER_TICK);
        let color = if tick.is_hour {
            palette::RULER_HOUR_LABEL
        } else {
            palette::RULER_LABEL
        };
        surface.text(&tick.label, tick.x, 5.0, TextAlign::Center, color);
    }
}

pub(crate) fn record_color(record: &IntervalRecord) -> Rgba {
    Rgba::from_hex(record.color()).unwrap_or(palette::FALLBACK_ENTRY)
}
