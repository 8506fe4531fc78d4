//! Token types used as registry keys by the injector.

use std::any::TypeId;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_SYMBOL: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity with a human readable description.
///
/// Two symbols created with the same description are still different tokens,
/// which makes them useful for keys that must never collide with a string.
///
/// ```rust
/// use ferrous_injector::{Symbol, Token};
///
/// let a = Symbol::new("logger");
/// let b = Symbol::new("logger");
/// assert_ne!(Token::from(a), Token::from(b));
/// assert_eq!(Token::from(a), Token::from(a));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Symbol {
    id: u64,
    description: &'static str,
}

impl Symbol {
    /// Allocates a new symbol. Never returns an id handed out before.
    pub fn new(description: &'static str) -> Self {
        Self {
            id: NEXT_SYMBOL.fetch_add(1, Ordering::Relaxed),
            description,
        }
    }

    pub fn description(&self) -> &'static str {
        self.description
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl std::hash::Hash for Symbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Key for provider storage and lookup.
///
/// Tokens identify what an injector should produce. The three kinds share one
/// key space but never compare equal to each other:
///
/// - **Name**: an arbitrary string such as `"NUM"` or `"db.url"`
/// - **Symbol**: a process-unique [`Symbol`]
/// - **Type**: a Rust type used as its own key, see [`Token::of`]
///
/// Tokens are compared by identity only. They carry no ordering.
///
/// # Examples
///
/// ```rust
/// use ferrous_injector::Token;
///
/// struct Database;
///
/// let by_name = Token::from("NUM");
/// let by_type = Token::of::<Database>();
///
/// assert_eq!(by_name, Token::name("NUM"));
/// assert_eq!(by_type, Token::of::<Database>());
/// assert_ne!(by_type, Token::of::<String>());
/// assert!(by_type.display_name().ends_with("Database"));
/// ```
#[derive(Debug, Clone)]
pub enum Token {
    /// String key.
    Name(Arc<str>),
    /// Unique symbol key.
    Symbol(Symbol),
    /// Type identity key with the type name kept for diagnostics.
    Type(TypeId, &'static str),
}

impl Token {
    /// Builds a string token.
    pub fn name(name: impl AsRef<str>) -> Self {
        Token::Name(Arc::from(name.as_ref()))
    }

    /// Builds a type-identity token for `T`.
    #[inline(always)]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Token::Type(TypeId::of::<T>(), std::any::type_name::<T>())
    }

    /// Human readable form used in errors and logs.
    pub fn display_name(&self) -> &str {
        match self {
            Token::Name(name) => name,
            Token::Symbol(symbol) => symbol.description,
            Token::Type(_, name) => name,
        }
    }

    /// True for tokens created with [`Token::of`].
    pub fn is_type(&self) -> bool {
        matches!(self, Token::Type(..))
    }
}

// TypeId-only comparison for type tokens, the name is informational
impl PartialEq for Token {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Token::Type(a, _), Token::Type(b, _)) => a == b,
            (Token::Name(a), Token::Name(b)) => a == b,
            (Token::Symbol(a), Token::Symbol(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Token {}

impl std::hash::Hash for Token {
    #[inline(always)]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Token::Type(id, _) => {
                0u8.hash(state);
                id.hash(state);
            }
            Token::Name(name) => {
                1u8.hash(state);
                name.hash(state);
            }
            Token::Symbol(symbol) => {
                2u8.hash(state);
                symbol.hash(state);
            }
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Name(name) => write!(f, "\"{}\"", name),
            Token::Symbol(symbol) => write!(f, "Symbol({})", symbol.description),
            Token::Type(_, name) => f.write_str(name),
        }
    }
}

impl From<&str> for Token {
    fn from(name: &str) -> Self {
        Token::name(name)
    }
}

impl From<String> for Token {
    fn from(name: String) -> Self {
        Token::Name(Arc::from(name))
    }
}

impl From<Symbol> for Token {
    fn from(symbol: Symbol) -> Self {
        Token::Symbol(symbol)
    }
}

impl From<&Token> for Token {
    fn from(token: &Token) -> Self {
        token.clone()
    }
}
