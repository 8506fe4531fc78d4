//! The process-wide global injector.
//!
//! The global injector is the default parent of [`Injector::new`]. It is
//! initialized at most once: either explicitly with [`set_global`] before
//! anything reads it, or lazily with an empty root injector on the first read.
//! After either happens it can no longer be replaced.

use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::OnceCell;

use crate::error::{DiError, DiResult};
use crate::injector::Injector;

static GLOBAL: OnceCell<Injector> = OnceCell::new();
static DEFAULTED: AtomicBool = AtomicBool::new(false);

/// Lifecycle of the global injector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalState {
    /// Nothing has read or assigned the global injector yet.
    Uninitialized,
    /// A read happened first and created an empty root injector.
    DefaultInitialized,
    /// [`set_global`] assigned the injector.
    Assigned,
}

/// Returns the global injector, creating an empty root on first use.
///
/// ```
/// use ferrous_injector::{global, Injector};
///
/// global().bind_constant("app.name", "demo").unwrap();
///
/// let child = Injector::new();
/// assert_eq!(*child.get::<&str>("app.name").unwrap(), "demo");
/// ```
pub fn global() -> &'static Injector {
    GLOBAL.get_or_init(|| {
        DEFAULTED.store(true, Ordering::Release);
        tracing::debug!("initialized default global injector");
        Injector::root()
    })
}

/// Installs `injector` as the global injector.
///
/// Fails with [`DiError::GlobalAlreadySet`] once the global injector has been
/// read or assigned. The injector should be built with
/// [`Injector::root`] or an explicit parent, since [`Injector::new`] reads
/// the global injector itself.
pub fn set_global(injector: Injector) -> DiResult<()> {
    match GLOBAL.set(injector) {
        Ok(()) => {
            tracing::debug!("assigned global injector");
            Ok(())
        }
        Err(_) => {
            tracing::warn!(state = ?global_state(), "global injector already set");
            Err(DiError::GlobalAlreadySet)
        }
    }
}

pub fn global_state() -> GlobalState {
    match GLOBAL.get() {
        None => GlobalState::Uninitialized,
        Some(_) if DEFAULTED.load(Ordering::Acquire) => GlobalState::DefaultInitialized,
        Some(_) => GlobalState::Assigned,
    }
}
