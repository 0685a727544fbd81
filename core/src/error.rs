use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Cell value must be within 1..=9")]
    InvalidValue,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Expected `--` or `a + b = sum`")]
    InvalidExpression,
}

pub type Result<T> = core::result::Result<T, GameError>;
