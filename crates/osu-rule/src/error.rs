use thiserror::Error;

/// Settings construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown setting `{0}`")]
    UnknownOption(String),
    #[error("setting `{0}` holds a different value kind")]
    WrongValueKind(&'static str),
    #[error("setting `{0}` must not be negative")]
    NegativeWindow(&'static str),
    #[error("setting `{inner}` must not exceed `{outer}`")]
    WindowOrder {
        inner: &'static str,
        outer: &'static str,
    },
    #[error("setting `{0}` must be positive")]
    NonPositiveRadius(&'static str),
}
