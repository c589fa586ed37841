pub mod file_size;
pub mod name_format;

pub use file_size::human_size;
pub use name_format::truncate_display_name;
