pub mod table;
pub mod terminal;
pub mod utils;

pub use table::{skeleton_table, transaction_table, TableLayout};
pub use terminal::TerminalGuard;
