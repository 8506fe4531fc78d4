//! Error types for the injector.

use crate::token::Token;

/// Dependency injection errors
///
/// Every failure in binding, resolution, construction or global injector
/// assignment surfaces as one of these variants. None of them are retried
/// internally; they describe configuration mistakes to fix.
///
/// # Examples
///
/// ```rust
/// use ferrous_injector::{DiError, Injector, Token};
///
/// let injector = Injector::root();
/// match injector.resolve_one(&Token::from("missing")) {
///     Err(DiError::Unresolved(token)) => assert_eq!(token, Token::from("missing")),
///     _ => unreachable!(),
/// }
///
/// let circular = DiError::Circular(vec!["A".into(), "B".into(), "A".into()]);
/// assert_eq!(circular.to_string(), "Circular dependency: A -> B -> A");
/// ```
#[derive(Debug, Clone, thiserror::Error)]
pub enum DiError {
    /// Walked the whole parent chain without finding a binding
    #[error("Unresolved token: {0}")]
    Unresolved(Token),
    /// The target has no dependency manifest
    #[error("No dependency manifest available for: {0}")]
    ManifestUnavailable(String),
    /// `bind` was handed an absent or empty specification
    #[error("Invalid provider: {0}")]
    InvalidProvider(&'static str),
    /// Token already bound while the duplicate policy is strict
    #[error("Token already bound: {0}")]
    DuplicateBinding(Token),
    /// The global injector was already read or assigned
    #[error("Global injector already set")]
    GlobalAlreadySet,
    /// Circular dependency detected (includes path)
    #[error("Circular dependency: {}", .0.join(" -> "))]
    Circular(Vec<String>),
    /// Maximum recursion depth exceeded
    #[error("Max depth {0} exceeded")]
    DepthExceeded(usize),
    /// Type downcast failed
    #[error("Type mismatch for: {0}")]
    TypeMismatch(&'static str),
    /// A constructor asked for an argument its manifest does not supply
    #[error("Missing argument {index} for: {target}")]
    MissingArgument {
        target: String,
        index: usize,
    },
}

/// Result type for injector operations
pub type DiResult<T> = Result<T, DiError>;
