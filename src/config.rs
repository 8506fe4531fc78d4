//! Injector configuration.
//!
//! Options can be built in code, read from the environment, or with the
//! `config` feature deserialized from JSON.

use std::env;
use std::str::FromStr;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// Default nesting limit for one resolution chain.
///
/// A chain deeper than this fails with
/// [`DiError::DepthExceeded`](crate::DiError::DepthExceeded) instead of
/// overflowing the stack. Every level costs several frames, so the default
/// stays well below what a 2 MiB thread can hold. Raise it only for threads
/// spawned with a larger stack.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Default prefix for [`InjectorOptions::from_env`].
pub const DEFAULT_ENV_PREFIX: &str = "INJECTOR";

/// What `bind` does with a token that is already bound locally.
///
/// The lenient policy keeps the first binding and logs a warning. The strict
/// policy fails with [`DiError::DuplicateBinding`](crate::DiError::DuplicateBinding).
/// Neither ever overwrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum DuplicatePolicy {
    #[default]
    Warn,
    Error,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "warn" => Ok(DuplicatePolicy::Warn),
            "error" | "strict" => Ok(DuplicatePolicy::Error),
            other => Err(format!("unknown duplicate policy: {}", other)),
        }
    }
}

/// Tunables shared by an injector and the children it spawns.
///
/// # Examples
///
/// ```rust
/// use ferrous_injector::{DuplicatePolicy, InjectorOptions};
///
/// let options = InjectorOptions::default()
///     .with_max_depth(64)
///     .with_duplicate_policy(DuplicatePolicy::Error);
/// assert_eq!(options.max_depth, 64);
/// assert_eq!(options.duplicate_policy, DuplicatePolicy::Error);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct InjectorOptions {
    /// Maximum number of nested resolutions on one thread
    pub max_depth: usize,
    /// Behaviour of `bind` for an already bound token
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for InjectorOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            duplicate_policy: DuplicatePolicy::Warn,
        }
    }
}

impl InjectorOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Reads `INJECTOR_MAX_DEPTH` and `INJECTOR_DUPLICATE_POLICY`.
    pub fn from_env() -> Self {
        Self::from_env_with_prefix(DEFAULT_ENV_PREFIX)
    }

    /// Reads `<PREFIX>_MAX_DEPTH` and `<PREFIX>_DUPLICATE_POLICY`.
    ///
    /// Unset variables keep their defaults. Unparseable ones are logged and
    /// ignored.
    pub fn from_env_with_prefix(prefix: &str) -> Self {
        Self::from_lookup(prefix, |key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(prefix: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = prefix.to_uppercase();
        let mut options = Self::default();

        let depth_key = format!("{}_MAX_DEPTH", prefix);
        if let Some(raw) = lookup(&depth_key) {
            match raw.trim().parse::<usize>() {
                Ok(depth) => options = options.with_max_depth(depth),
                Err(e) => tracing::warn!(key = %depth_key, value = %raw, error = %e, "ignoring invalid injector option"),
            }
        }

        let policy_key = format!("{}_DUPLICATE_POLICY", prefix);
        if let Some(raw) = lookup(&policy_key) {
            match raw.parse::<DuplicatePolicy>() {
                Ok(policy) => options.duplicate_policy = policy,
                Err(e) => tracing::warn!(key = %policy_key, value = %raw, error = %e, "ignoring invalid injector option"),
            }
        }

        options
    }

    /// Parses options from JSON, missing fields take their defaults.
    #[cfg(feature = "config")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[cfg(feature = "config")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
