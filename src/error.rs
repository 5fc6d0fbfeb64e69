use thiserror::Error;

/// Result alias for fallible solver entry points.
pub type Result<T> = std::result::Result<T, FluidError>;

/// Errors raised by the fluid core and its configuration layer.
#[derive(Error, Debug)]
pub enum FluidError {
    /// The grid has no interior cells.
    #[error("grid dimension {n} is too small: need at least 3 for a non-empty interior")]
    GridTooSmall { n: usize },

    /// Injection outside the grid.
    #[error("cell ({x}, {y}) is outside the {n}x{n} grid")]
    OutOfBounds { x: usize, y: usize, n: usize },

    /// NaN or infinite input to an injection.
    #[error("{what} must be finite")]
    NonFinite { what: &'static str },

    #[error("invalid config: {0}")]
    Config(String),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_yaml::Error> for FluidError {
    fn from(err: serde_yaml::Error) -> Self {
        FluidError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = FluidError::GridTooSmall { n: 2 };
        assert!(e.to_string().contains("too small"));
        let e = FluidError::OutOfBounds { x: 9, y: 1, n: 8 };
        assert_eq!(e.to_string(), "cell (9, 1) is outside the 8x8 grid");
        let e = FluidError::NonFinite { what: "drag strength" };
        assert_eq!(e.to_string(), "drag strength must be finite");
    }

    #[test]
    fn test_yaml_error_converts_to_config() {
        let err = serde_yaml::from_str::<Vec<u32>>("{").unwrap_err();
        let e: FluidError = err.into();
        assert!(matches!(e, FluidError::Config(_)));
    }
}
