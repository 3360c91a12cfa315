pub mod descriptions;
pub mod formatter;

pub use descriptions::{category_blurb, category_name};
pub use formatter::{format_outcome, format_profile_chart, format_progress, should_use_colors};
