use serde_json::{Value, json};

use crate::error::GameError;

/// One host-delivered input event.
///
/// `Quit`, `Pause` and `Resume` are interpreted by the session itself;
/// everything else is forwarded to the running game.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(char),
    Pointer { x: f32, y: f32 },
    Pause,
    Resume,
    Quit,
}

/// What a game wants the drive loop to do after an update step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    /// Internal quit signal: the session ends after this iteration.
    Exit,
}

/// Construction context handed to a game factory.
#[derive(Debug, Clone)]
pub struct GameContext {
    pub user_id: i32,
    pub game_name: String,
    /// BCP 47-ish language tag, e.g. "en". Games may ignore it.
    pub language: String,
}

/// Lifecycle contract every game plugin implements.
///
/// The host drives a game through `CREATED → INITIALIZING →
/// (RUNNING ⇄ PAUSED) → ENDED → CLEANED_UP` (see
/// [`crate::session::Session`]). `update` and `render` are never
/// called before `initialize` succeeds or after the session ended, and
/// `cleanup` runs exactly once on every exit path.
pub trait Game: Send {
    /// Allocates resources. `Ok(false)` aborts the session before the
    /// drive loop starts; `cleanup` is still invoked.
    fn initialize(&mut self) -> Result<bool, GameError>;

    /// Consumes one input event. Must not block.
    fn handle_input(&mut self, event: &InputEvent) -> Result<(), GameError>;

    /// Advances simulation state by `dt` seconds. Skipped while the
    /// session is paused.
    fn update(&mut self, dt: f32) -> Result<Tick, GameError>;

    /// Produces one frame of output. Called even while paused so a
    /// pause overlay can be drawn. Must not mutate simulation state.
    fn render(&mut self) -> Result<(), GameError>;

    /// Releases resources. Must be idempotent and safe to call after a
    /// partial `initialize`.
    fn cleanup(&mut self);

    /// Session score, queried once the drive loop has ended.
    fn score(&self) -> u64;

    fn save_state(&self) -> Value {
        json!({ "score": self.score() })
    }

    fn restore_state(&mut self, _state: &Value) {}
}

/// Constructor for a game, resolved from a manifest's entry-point
/// identifier at launch time.
pub type GameFactory = Box<dyn Fn(GameContext) -> Box<dyn Game> + Send + Sync>;
