pub mod file;
pub mod text;
pub mod time;

pub use file::{ensure_dir, list_csv_files, FileEntry};
pub use text::{format_amount, format_size, truncate_to_width};
pub use time::{export_date_stamp, format_file_modified};
