pub mod dashboard;
pub mod modals;

pub use dashboard::{render_dashboard, NARROW_WIDTH};
