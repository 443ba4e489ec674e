use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::debug;

use crate::error::GameError;
use crate::traits::{Game, InputEvent, Tick};

/// Per-session lifecycle states. `CleanedUp` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Created,
    Initializing,
    Running,
    Paused,
    Ended,
    CleanedUp,
}

/// Non-blocking source of pending input events. The drive loop drains
/// it at the start of every frame until it returns `None`.
pub trait EventSource {
    fn poll(&mut self) -> Option<InputEvent>;
}

/// Paces the drive loop. `wait` blocks until the next frame is due and
/// returns the elapsed seconds since the previous call.
pub trait FrameClock {
    fn wait(&mut self) -> f32;
}

/// In-memory event queue, for scripted and headless sessions.
#[derive(Debug, Default)]
pub struct QueuedEvents {
    queue: VecDeque<InputEvent>,
}

impl QueuedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }
}

impl EventSource for QueuedEvents {
    fn poll(&mut self) -> Option<InputEvent> {
        self.queue.pop_front()
    }
}

/// Fixed-step frame clock.
///
/// In paced mode it sleeps toward the target frame interval and
/// reports the real elapsed time; in headless mode it returns the step
/// immediately, which keeps tests and bot sessions fast.
pub struct FixedStep {
    step: Duration,
    paced: bool,
    last: Option<Instant>,
}

impl FixedStep {
    pub fn paced(fps: u32) -> Self {
        Self {
            step: Duration::from_secs(1) / fps.max(1),
            paced: true,
            last: None,
        }
    }

    pub fn headless(dt: f32) -> Self {
        Self {
            step: Duration::from_secs_f32(dt),
            paced: false,
            last: None,
        }
    }
}

impl FrameClock for FixedStep {
    fn wait(&mut self) -> f32 {
        if !self.paced {
            return self.step.as_secs_f32();
        }
        let now = Instant::now();
        let dt = match self.last {
            Some(last) => {
                let deadline = last + self.step;
                if deadline > now {
                    std::thread::sleep(deadline - now);
                }
                last.elapsed()
            }
            None => self.step,
        };
        self.last = Some(Instant::now());
        dt.as_secs_f32()
    }
}

/// Outcome of a completed session.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub score: u64,
    /// The game's serialized state, as returned by
    /// [`Game::save_state`] at the end of the session.
    pub state: Value,
    pub playtime: Duration,
    pub frames: u64,
}

/// Host-owned run loop around one game instance.
///
/// The session owns the running and paused flags; clearing the running
/// flag (via a `Quit` event or a `Tick::Exit` from the game) is the
/// only cancellation primitive. `cleanup` is guaranteed on every exit
/// path, including errors and panics raised inside the loop body.
pub struct Session {
    game: Box<dyn Game>,
    phase: SessionPhase,
    running: bool,
    paused: bool,
}

impl Session {
    pub fn new(game: Box<dyn Game>) -> Self {
        Self {
            game,
            phase: SessionPhase::Created,
            running: false,
            paused: false,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Drives the game to completion and returns the final score.
    pub fn run(
        mut self,
        events: &mut dyn EventSource,
        clock: &mut dyn FrameClock,
    ) -> Result<SessionReport, GameError> {
        let started = Instant::now();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.drive(events, clock)));

        // Serialized before cleanup tears the game down.
        let state = match &outcome {
            Ok(Ok(_)) => self.game.save_state(),
            _ => Value::Null,
        };
        self.phase = SessionPhase::Ended;
        self.game.cleanup();
        self.phase = SessionPhase::CleanedUp;

        match outcome {
            Ok(Ok(frames)) => Ok(SessionReport {
                score: self.game.score(),
                state,
                playtime: started.elapsed(),
                frames,
            }),
            Ok(Err(e)) => Err(e),
            Err(payload) => Err(GameError::Panicked(panic_message(payload.as_ref()))),
        }
    }

    fn drive(
        &mut self,
        events: &mut dyn EventSource,
        clock: &mut dyn FrameClock,
    ) -> Result<u64, GameError> {
        self.phase = SessionPhase::Initializing;
        if !self.game.initialize()? {
            debug!("game declined to initialize, aborting session");
            return Err(GameError::InitDeclined);
        }

        self.phase = SessionPhase::Running;
        self.running = true;
        let mut frames: u64 = 0;

        while self.running {
            let dt = clock.wait();

            while let Some(event) = events.poll() {
                match event {
                    InputEvent::Quit => self.running = false,
                    InputEvent::Pause => {
                        self.paused = true;
                        self.phase = SessionPhase::Paused;
                    }
                    InputEvent::Resume => {
                        self.paused = false;
                        self.phase = SessionPhase::Running;
                    }
                    other => self.game.handle_input(&other)?,
                }
            }
            if !self.running {
                break;
            }

            if !self.paused && self.game.update(dt)? == Tick::Exit {
                self.running = false;
            }

            // Rendered even while paused so an overlay can be drawn.
            self.game.render()?;
            frames += 1;
        }

        self.phase = SessionPhase::Ended;
        Ok(frames)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
