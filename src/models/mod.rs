pub mod category;
pub mod day;
pub mod entry;

pub use category::{Category, CategoryDetail, CategoryTree};
pub use day::{CalendarDay, MAX_BOUNDARY_MS};
pub use entry::{EntryKind, EntryPayload, IntervalRecord};
