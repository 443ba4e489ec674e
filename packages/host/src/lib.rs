pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod installer;
pub mod launcher;
pub mod registry;
pub mod store;

pub use config::AppConfig;
pub use error::HostError;
pub use installer::Installer;
pub use launcher::{GameFactories, LaunchReport, Launcher};
pub use registry::{InstalledGame, Registry};
pub use store::Store;
