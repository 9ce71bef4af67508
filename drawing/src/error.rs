//! Structural errors raised by document operations.
//!
//! Every variant leaves the drawing untouched: operations check first and
//! mutate only once nothing can fail.

/// Error returned by [`crate::Drawing`] and [`crate::Layer`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DrawingError {
    #[error("layer not found: {0}")]
    LayerNotFound(String),
    #[error("layer already exists: {0}")]
    DuplicateLayer(String),
    #[error("layer cannot be moved up anymore: {0}")]
    CannotMoveUp(String),
    #[error("layer cannot be moved down anymore: {0}")]
    CannotMoveDown(String),
    #[error("layer cannot be undone anymore: {0}")]
    NothingToUndo(String),
    #[error("layer cannot be redone anymore: {0}")]
    NothingToRedo(String),
    #[error("stroke must have at least one point")]
    EmptyStroke,
    #[error("brush width must be positive and finite")]
    InvalidBrushWidth,
    #[error("inserted image has no position")]
    MissingImagePosition,
    /// `layer_order` is not a permutation of the layer names.
    #[error("layer order does not match layers")]
    InconsistentLayerOrder,
}
