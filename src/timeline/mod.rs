pub mod axis;
pub mod layout;
pub mod series;
pub mod ticks;
pub mod viewport;

pub use axis::TimeAxis;
pub use layout::BandLayout;
pub use series::IntervalSeries;
pub use ticks::{minute_increment, ticks, Tick};
pub use viewport::ViewportController;
