//! One ordered series of interval records and its visible subset.

use chrono::NaiveDateTime;

use crate::models::{EntryKind, IntervalRecord};
use crate::timeline::axis::TimeAxis;

#[derive(Debug, Clone, PartialEq)]
pub struct IntervalSeries {
    kind: EntryKind,
    records: Vec<IntervalRecord>,
    /// Indices into `records`, in record order.
    visible: Vec<usize>,
}

impl IntervalSeries {
    pub fn new(kind: EntryKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
            visible: Vec::new(),
        }
    }

    /// Build a series from freshly loaded records, sorted by start.
    /// Records of another kind are dropped.
    pub fn from_records(kind: EntryKind, records: Vec<IntervalRecord>) -> Self {
        let mut records: Vec<IntervalRecord> = records
            .into_iter()
            .filter(|record| {
                let matches = record.kind() == kind;
                if !matches {
                    log::warn!(
                        "Dropping {:?} record from the {:?} series",
                        record.kind(),
                        kind
                    );
                }
                matches
            })
            .collect();
        records.sort_by_key(IntervalRecord::start);

        Self {
            kind,
            records,
            visible: Vec::new(),
        }
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn records(&self) -> &[IntervalRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&IntervalRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.visible.clear();
    }

    /// Insert keeping start order. Returns the index of the new record.
    /// The visible subset must be recomputed afterwards.
    pub fn insert_sorted(&mut self, record: IntervalRecord) -> Option<usize> {
        if record.kind() != self.kind {
            log::warn!(
                "Refusing to insert a {:?} record into the {:?} series",
                record.kind(),
                self.kind
            );
            return None;
        }
        let index = self
            .records
            .partition_point(|existing| existing.start() <= record.start());
        self.records.insert(index, record);
        Some(index)
    }

    /// Refresh every record's pixel span for `axis` and rebuild the visible
    /// subset.
    ///
    /// Records entirely outside the viewport are left out, as is any record
    /// whose `stop_pixel` equals the previous visible record's: at that
    /// density the two would paint the same column.
    pub fn recompute_visible(&mut self, axis: &TimeAxis) {
        self.visible.clear();
        let start = axis.boundary_start();
        let stop = axis.boundary_stop();

        let mut last_stop_pixel = None;
        for (index, record) in self.records.iter_mut().enumerate() {
            record.update_pixels(axis);

            if !record.overlaps(start, stop) {
                continue;
            }
            if last_stop_pixel == Some(record.stop_pixel()) {
                continue;
            }
            last_stop_pixel = Some(record.stop_pixel());
            self.visible.push(index);
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = &IntervalRecord> + '_ {
        self.visible.iter().map(move |&index| &self.records[index])
    }

    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    /// Index of the visible record whose pixel span contains `x`.
    pub fn hit_test(&self, x: f64) -> Option<usize> {
        match self.kind {
            EntryKind::Logged => self.hit_test_binary(x),
            EntryKind::Tagged | EntryKind::Activity => self.hit_test_linear(x),
        }
    }

    fn hit_test_binary(&self, x: f64) -> Option<usize> {
        let mut low = 0usize;
        let mut high = self.visible.len();
        while low < high {
            let middle = low + (high - low) / 2;
            let index = self.visible[middle];
            let record = &self.records[index];
            if record.contains_x(x) {
                return Some(index);
            }
            if x < record.start_pixel() as f64 {
                high = middle;
            } else {
                low = middle + 1;
            }
        }
        None
    }

    fn hit_test_linear(&self, x: f64) -> Option<usize> {
        for &index in &self.visible {
            let record = &self.records[index];
            if x < record.start_pixel() as f64 {
                break;
            }
            if (record.stop_pixel() as f64) < x {
                continue;
            }
            return Some(index);
        }
        None
    }

    /// If `time` falls inside a record, the nearer of that record's edges.
    pub fn snap_time(&self, time: NaiveDateTime) -> Option<NaiveDateTime> {
        for record in &self.records {
            if time < record.start() {
                break;
            }
            if record.stop() < time {
                continue;
            }
            let to_start = time - record.start();
            let to_stop = record.stop() - time;
            return Some(if to_start < to_stop {
                record.start()
            } else {
                record.stop()
            });
        }
        None
    }

    /// Largest range within `[lower, upper]` around `time` that touches no
    /// record: bounded by the closest stop at or before `time` and the closest
    /// start at or after it. Collapses to `(time, time)` when `time` lies
    /// strictly inside a record.
    pub fn free_range_around(
        &self,
        time: NaiveDateTime,
        lower: NaiveDateTime,
        upper: NaiveDateTime,
    ) -> (NaiveDateTime, NaiveDateTime) {
        let mut start = lower.min(time);
        let mut stop = upper.max(time);

        for record in &self.records {
            if record.start() < time && time < record.stop() {
                return (time, time);
            }
            if record.stop() <= time {
                start = start.max(record.stop());
            } else if time <= record.start() {
                stop = stop.min(record.start());
                break;
            }
        }
        (start, stop)
    }
}
