//! # ps-app
//!
//! Application layer for PromptShelf: per-list cache synchronization,
//! scroll-driven fetch scheduling, the virtualized render window, preview
//! link cycling and the use cases that drive them.

pub mod list;
pub mod preview;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod usecases;
pub mod window;

pub use list::{FetchOutcome, ListController, ListSnapshot, PersistHandle};
pub use scheduler::FetchScheduler;
pub use session::{ActionEffect, ListSession};
pub use settings::ListSettings;
pub use window::{ActionTarget, ItemAction, Slot, VirtualWindow, WindowLayout};
