//! Whole-day overview strip.
//!
//! The minimap owns its own full-day [`TimeAxis`] so it never shares pixel
//! state with the main timeline. Pressing, or dragging with the primary
//! button held, asks the main viewport to centre on the time under the
//! pointer.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::{CalendarDay, IntervalRecord};
use crate::timeline::{IntervalSeries, TimeAxis};

/// A run of records where each one stops exactly where the next starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub start: NaiveDateTime,
    pub stop: NaiveDateTime,
}

pub fn merge_blocks(records: &[IntervalRecord]) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    for record in records {
        if let Some(block) = blocks
            .last_mut()
            .filter(|block| block.stop == record.start())
        {
            block.stop = record.stop();
            continue;
        }
        blocks.push(Block {
            start: record.start(),
            stop: record.stop(),
        });
    }
    blocks
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MinimapPointer {
    Down { x: f64 },
    Move { x: f64, primary_held: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Minimap {
    axis: TimeAxis,
    height: f64,
    tagged_blocks: Vec<Block>,
    logged_blocks: Vec<Block>,
}

impl Minimap {
    pub fn new(day: CalendarDay, width: f64, height: f64, side_padding: f64) -> Self {
        Self {
            axis: TimeAxis::full_day(day, width, side_padding),
            height,
            tagged_blocks: Vec::new(),
            logged_blocks: Vec::new(),
        }
    }

    pub fn axis(&self) -> &TimeAxis {
        &self.axis
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn tagged_blocks(&self) -> &[Block] {
        &self.tagged_blocks
    }

    pub fn logged_blocks(&self) -> &[Block] {
        &self.logged_blocks
    }

    /// Switch to another day; blocks are cleared until new entries arrive.
    pub fn set_day(&mut self, day: CalendarDay) {
        self.axis = TimeAxis::full_day(day, self.axis.canvas_width(), self.axis.side_padding());
        self.tagged_blocks.clear();
        self.logged_blocks.clear();
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.axis = self.axis.with_canvas_width(width);
        self.height = height.max(0.0);
    }

    pub fn set_entries(&mut self, tagged: &IntervalSeries, logged: &IntervalSeries) {
        self.tagged_blocks = merge_blocks(tagged.records());
        self.logged_blocks = merge_blocks(logged.records());
    }

    /// Time the main viewport should centre on, if this pointer event asks
    /// for one.
    pub fn pointer(&self, event: MinimapPointer) -> Option<NaiveDateTime> {
        match event {
            MinimapPointer::Down { x } => Some(self.axis.pixel_to_time(x)),
            MinimapPointer::Move {
                x,
                primary_held: true,
            } => Some(self.axis.pixel_to_time(x)),
            MinimapPointer::Move { .. } => None,
        }
    }
}
