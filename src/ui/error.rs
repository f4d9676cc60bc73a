use thiserror::Error;

/// Precondition violations in the game core. These are programming errors,
/// never the result of a player action.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("difficulty step must be at least 1, got {step}")]
    InvalidStep { step: u32 },
    #[error("cell {index} is outside a grid of {cells} cells")]
    CellOutOfRange { index: usize, cells: usize },
}
