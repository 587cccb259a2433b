pub mod input;
pub mod summary;

pub use input::{
    category_options, filter_options, parse_category_input, parse_database_id, statistics_query,
    CategoryEditForm, CategoryInput, CategoryInputError, CATEGORY_SEPARATOR,
};
pub use summary::{expand_url, CategorySummary, DaySummary, DATE_PLACEHOLDER};
