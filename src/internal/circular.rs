//! Circular dependency detection infrastructure.

use std::cell::RefCell;

use crate::error::{DiError, DiResult};
use crate::token::Token;

// Thread-local stack of resolutions currently in progress
thread_local! {
    static RESOLUTION_TLS: RefCell<Vec<Frame>> = const { RefCell::new(Vec::new()) };
}

struct Frame {
    injector: usize,
    token: Token,
}

/// Marks `token` as in progress on `injector` for the guard's lifetime.
///
/// Frames are keyed by injector as well as token, so a child provider that
/// deliberately asks its parent for the same token is not a cycle.
pub(crate) struct ResolutionGuard {
    depth: usize,
}

impl ResolutionGuard {
    pub(crate) fn enter(injector: usize, token: &Token, max_depth: usize) -> DiResult<Self> {
        RESOLUTION_TLS.with(|tls| {
            let mut stack = tls.borrow_mut();

            // Circular detection BEFORE pushing the new frame
            if let Some(start) = stack
                .iter()
                .position(|f| f.injector == injector && &f.token == token)
            {
                let mut path: Vec<String> = stack[start..]
                    .iter()
                    .map(|f| f.token.display_name().to_string())
                    .collect();
                path.push(token.display_name().to_string());
                return Err(DiError::Circular(path));
            }

            // Depth guard
            if stack.len() >= max_depth {
                return Err(DiError::DepthExceeded(max_depth));
            }

            stack.push(Frame {
                injector,
                token: token.clone(),
            });
            Ok(Self { depth: stack.len() })
        })
    }
}

impl Drop for ResolutionGuard {
    fn drop(&mut self) {
        RESOLUTION_TLS.with(|tls| {
            let mut stack = tls.borrow_mut();
            debug_assert_eq!(stack.len(), self.depth);
            stack.pop();
        });
    }
}
