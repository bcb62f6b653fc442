use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActuatorError {
    #[error("display surface has no `.{0}` element")]
    MissingContainer(&'static str),
    #[error("message region has no <p> element")]
    MissingMessageText,
    #[error("rendered tile at ({x}, {y}) has no counterpart in the new grid")]
    EmptyCell { x: usize, y: usize },
}
