use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// `initialize` returned false: the game chose not to start.
    #[error("game declined to initialize")]
    InitDeclined,

    #[error("initialization failed: {0}")]
    Init(String),

    #[error("runtime failure: {0}")]
    Runtime(String),

    /// A game panicked inside the drive loop. The session catches the
    /// unwind so the host keeps running.
    #[error("game panicked: {0}")]
    Panicked(String),
}
