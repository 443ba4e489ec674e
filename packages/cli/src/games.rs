//! Built-in demo game, a stand-in for real game plugins. Installed
//! games bind to it through the `builtin:clicker` entry point (or the
//! default `main`).

use game_core::error::GameError;
use game_core::traits::{Game, GameContext, InputEvent, Tick};
use serde_json::{Value, json};
use tracing::debug;

/// Scores one point per key press and ends after a few seconds of
/// simulated time.
struct Clicker {
    ctx: GameContext,
    elapsed: f32,
    limit: f32,
    score: u64,
}

pub fn clicker(ctx: GameContext) -> Box<dyn Game> {
    Box::new(Clicker {
        ctx,
        elapsed: 0.0,
        limit: 3.0,
        score: 0,
    })
}

impl Game for Clicker {
    fn initialize(&mut self) -> Result<bool, GameError> {
        debug!(
            user_id = self.ctx.user_id,
            language = %self.ctx.language,
            "clicker session starting"
        );
        Ok(true)
    }

    fn handle_input(&mut self, event: &InputEvent) -> Result<(), GameError> {
        if matches!(event, InputEvent::Key(_)) {
            self.score += 1;
        }
        Ok(())
    }

    fn update(&mut self, dt: f32) -> Result<Tick, GameError> {
        self.elapsed += dt;
        Ok(if self.elapsed >= self.limit {
            Tick::Exit
        } else {
            Tick::Continue
        })
    }

    fn render(&mut self) -> Result<(), GameError> {
        Ok(())
    }

    fn cleanup(&mut self) {}

    fn score(&self) -> u64 {
        self.score
    }

    fn save_state(&self) -> Value {
        json!({ "score": self.score, "elapsed": self.elapsed })
    }

    fn restore_state(&mut self, state: &Value) {
        if let Some(score) = state.get("score").and_then(Value::as_u64) {
            self.score = score;
        }
    }
}
