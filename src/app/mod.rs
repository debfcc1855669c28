pub mod bootstrap;
pub mod controller;
pub mod effects;
pub mod event;
pub mod exports;
pub mod loader;
pub mod pagination;
pub mod state;

pub use controller::DashboardController;
pub use effects::EffectRunner;
pub use event::{Effect, Event, Focus, Modal, NavItem};
pub use state::DashboardState;
