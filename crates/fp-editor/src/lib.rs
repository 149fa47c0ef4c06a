pub mod commands;
pub mod config;
pub mod controller;
pub mod dialogs;
pub mod editor;
pub mod input;
pub mod persistence;
pub mod shortcuts;
pub mod store;

pub use config::EditorConfig;
pub use dialogs::Dialogs;
pub use editor::FloorPlanEditor;
