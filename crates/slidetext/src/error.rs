use thiserror::Error;

/// Errors raised when turning user or config text into model values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid color '{0}': expected #rrggbb or #rgb")]
    InvalidColor(String),

    #[error(
        "invalid font family '{0}': expected inter, georgia, times-new-roman, arial or courier-new"
    )]
    InvalidFontFamily(String),

    #[error("invalid font size '{0}': expected a number")]
    InvalidFontSize(String),

    #[error("invalid aspect ratio '{0}': expected 9:16, 16:9, 4:5 or 1:1")]
    InvalidAspect(String),
}
