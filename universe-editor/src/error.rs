//! Error types shared across the crate.

/// Errors returned by the editor's configuration surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The attribute name is not one of [`Attribute::ALL`](crate::Attribute::ALL).
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    /// A factory is already registered under this tag.
    #[error("element already defined: {0}")]
    AlreadyDefined(String),

    /// No factory is registered under this tag.
    #[error("element not defined: {0}")]
    UndefinedElement(String),
}
