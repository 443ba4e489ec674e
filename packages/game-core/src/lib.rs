pub mod error;
pub mod manifest;
pub mod session;
pub mod traits;

pub use error::GameError;
pub use manifest::{GAME_MANIFEST, GameManifest, ManifestError};
pub use session::{
    EventSource, FixedStep, FrameClock, QueuedEvents, Session, SessionPhase, SessionReport,
};
pub use traits::{Game, GameContext, GameFactory, InputEvent, Tick};
