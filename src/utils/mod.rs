pub mod color;
pub mod logging;
pub mod time_text;

pub use color::string_to_color;
pub use logging::init_logging;
