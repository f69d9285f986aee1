use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("coordinates outside the grid")]
    InvalidCoords,
    #[error("more mines than the grid can hold")]
    TooManyMines,
}

pub type Result<T> = std::result::Result<T, GameError>;
