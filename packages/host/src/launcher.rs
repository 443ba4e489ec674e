use std::collections::HashMap;

use tracing::{info, instrument};

use game_core::session::{EventSource, FrameClock, Session};
use game_core::traits::{Game, GameContext, GameFactory};

use crate::entity::user;
use crate::error::HostError;
use crate::registry::Registry;
use crate::store::Store;

/// Table of game constructors keyed by entry-point identifier.
///
/// This is the single place where the host turns a manifest name into
/// executable code. Factories run in-process with full host privilege;
/// there is no isolation between a game and the host.
#[derive(Default)]
pub struct GameFactories {
    factories: HashMap<String, GameFactory>,
}

impl GameFactories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry_point: impl Into<String>, factory: GameFactory) {
        self.factories.insert(entry_point.into(), factory);
    }

    pub fn contains(&self, entry_point: &str) -> bool {
        self.factories.contains_key(entry_point)
    }

    pub fn instantiate(&self, entry_point: &str, ctx: GameContext) -> Option<Box<dyn Game>> {
        self.factories.get(entry_point).map(|factory| factory(ctx))
    }
}

/// Result of one successfully completed session.
#[derive(Debug, Clone)]
pub struct LaunchReport {
    pub score: u64,
    pub playtime_secs: i64,
}

/// Resolves an installed game, drives it through a full session and
/// records the outcome in the store.
pub struct Launcher<'a> {
    registry: &'a Registry,
    factories: &'a GameFactories,
    store: &'a Store,
    language: String,
}

impl<'a> Launcher<'a> {
    pub fn new(
        registry: &'a Registry,
        factories: &'a GameFactories,
        store: &'a Store,
        language: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            factories,
            store,
            language: language.into(),
        }
    }

    /// Launches `game_name` for `user` and returns the final score.
    ///
    /// A previously persisted save blob is handed to the game before
    /// the session starts, and the state the game reports at the end
    /// replaces it. Any failure, including a game that errors or
    /// panics mid-loop, comes back as a recoverable [`HostError`]; the
    /// host stays up. Save data and statistics are written only for
    /// sessions that ran to completion.
    #[instrument(skip(self, user, events, clock), fields(user = %user.username))]
    pub async fn launch(
        &self,
        user: &user::Model,
        game_name: &str,
        events: &mut dyn EventSource,
        clock: &mut dyn FrameClock,
    ) -> Result<LaunchReport, HostError> {
        if !self.registry.is_installed(game_name) {
            return Err(HostError::GameNotInstalled(game_name.to_owned()));
        }
        let entry_point = self.registry.entry_point(game_name)?;

        let ctx = GameContext {
            user_id: user.id,
            game_name: game_name.to_owned(),
            language: self.language.clone(),
        };
        let mut game = self
            .factories
            .instantiate(&entry_point, ctx)
            .ok_or_else(|| HostError::EntryPointMissing(game_name.to_owned()))?;

        if let Some(saved) = self.store.load_state(user.id, game_name).await? {
            game.restore_state(&saved);
        }

        let report = Session::new(game).run(events, clock)?;
        let playtime_secs = report.playtime.as_secs() as i64;

        self.store
            .save_state(user.id, game_name, report.state)
            .await?;
        self.store
            .record_session(user.id, game_name, report.score as i64, playtime_secs)
            .await?;

        info!(game = game_name, score = report.score, "session complete");
        Ok(LaunchReport {
            score: report.score,
            playtime_secs,
        })
    }
}
