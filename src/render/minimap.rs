use chrono::{Duration, Timelike};

use crate::minimap::{Block, Minimap};
use crate::timeline::TimeAxis;

use super::palette;
use super::surface::{DrawSurface, Rgba, TextAlign};

/// Draw the overview: hour labels, merged tagged and logged blocks, and the
/// main viewport as a translucent window.
pub fn render_minimap(surface: &mut dyn DrawSurface, minimap: &Minimap, viewport: &TimeAxis) {
    let (width, height) = surface.size();
    let axis = minimap.axis();
    let band_height = height / 5.0;

    surface.fill_rect(0.0, 0.0, width, height, palette::BACKGROUND);

    let day = axis.day();
    let mut hour = day.start_of_day();
    while hour < day.end_of_day() {
        surface.text(
            &format!("{:02}", hour.hour()),
            axis.time_to_pixel(hour),
            height / 2.0,
            TextAlign::Center,
            palette::MINIMAP_HOUR_LABEL,
        );
        hour += Duration::hours(1);
    }

    draw_blocks(
        surface,
        axis,
        minimap.tagged_blocks(),
        band_height,
        band_height,
        palette::MINIMAP_TAGGED,
    );
    draw_blocks(
        surface,
        axis,
        minimap.logged_blocks(),
        band_height * 3.5,
        band_height,
        palette::MINIMAP_LOGGED,
    );

    let left = axis.time_to_pixel(viewport.boundary_start());
    let right = axis.time_to_pixel(viewport.boundary_stop());
    surface.fill_rect(left, 0.0, right - left, height, palette::MINIMAP_VIEWPORT);
}

fn draw_blocks(
    surface: &mut dyn DrawSurface,
    axis: &TimeAxis,
    blocks: &[Block],
    top: f64,
    height: f64,
    color: Rgba,
) {
    for block in blocks {
        let left = axis.time_to_pixel(block.start);
        let right = axis.time_to_pixel(block.stop);
        surface.fill_rect(left, top, right - left, height, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CalendarDay, EntryKind, EntryPayload, IntervalRecord};
    use crate::render::surface::RecordingSurface;
    use crate::timeline::IntervalSeries;
    use chrono::NaiveDate;

    #[test]
    fn draws_hours_blocks_and_viewport() {
        let day = CalendarDay::new(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        let at = |h: u32| day.date().and_hms_opt(h, 0, 0).unwrap();

        let tagged = IntervalSeries::from_records(
            EntryKind::Tagged,
            vec![
                IntervalRecord::new(
                    at(9),
                    at(10),
                    EntryPayload::Tagged {
                        id: None,
                        category: "planning".into(),
                        category_str: "planning".into(),
                        url: None,
                    },
                )
                .unwrap(),
                IntervalRecord::new(
                    at(10),
                    at(11),
                    EntryPayload::Tagged {
                        id: None,
                        category: "meeting".into(),
                        category_str: "meeting".into(),
                        url: None,
                    },
                )
                .unwrap(),
            ],
        );
        let mut minimap = Minimap::new(day, 1058.0, 50.0, 29.0);
        minimap.set_entries(&tagged, &IntervalSeries::new(EntryKind::Logged));
        let viewport = TimeAxis::new(day, at(8), at(12), 1058.0, 29.0).unwrap();

        let mut surface = RecordingSurface::new(1058.0, 50.0);
        render_minimap(&mut surface, &minimap, &viewport);

        assert_eq!(surface.texts().len(), 24);
        assert_eq!(surface.texts()[13], "13");

        let blocks = surface.fills_with(palette::MINIMAP_TAGGED);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].1, 10.0);

        let window = surface.fills_with(palette::MINIMAP_VIEWPORT);
        assert_eq!(window.len(), 1);
        let expected_left = minimap.axis().time_to_pixel(at(8));
        assert_eq!(window[0].0, expected_left);
    }
}
