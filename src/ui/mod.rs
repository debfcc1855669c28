pub mod components;
pub mod keymap;
pub mod screens;
pub mod styles;

pub use components::TerminalGuard;
pub use keymap::map_key;
pub use screens::render_dashboard;
