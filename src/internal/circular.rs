//! Circular dependency detection infrastructure.

use std::cell::RefCell;

use crate::error::{DiError, DiResult};
use crate::key::TypeKey;

// Thread-local resolution state for circular dependency detection
thread_local! {
    static RESOLUTION_STACK: RefCell<Vec<Frame>> = const { RefCell::new(Vec::new()) };
}

/// One in-progress resolution: which container is producing which key.
#[derive(Clone, Copy)]
struct Frame {
    container: u64,
    key: TypeKey,
}

/// Guard for one frame of the thread-local resolution stack.
///
/// Frames are keyed by container id so a derived container may resolve its
/// parent's binding for the same key without tripping the cycle check.
pub(crate) struct StackGuard {
    depth: usize,
}

impl StackGuard {
    pub(crate) fn enter(
        container: u64,
        key: TypeKey,
        detect_cycles: bool,
        max_depth: usize,
    ) -> DiResult<Self> {
        RESOLUTION_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();

            // Circular detection BEFORE pushing the new frame
            if detect_cycles {
                if let Some(start) = stack
                    .iter()
                    .position(|f| f.container == container && f.key == key)
                {
                    let mut path: Vec<TypeKey> = stack[start..].iter().map(|f| f.key).collect();
                    path.push(key);
                    return Err(DiError::Circular(path));
                }
            }

            // Depth guard
            if stack.len() >= max_depth {
                return Err(DiError::DepthExceeded(stack.len()));
            }

            stack.push(Frame { container, key });
            Ok(Self { depth: stack.len() })
        })
    }
}

impl Drop for StackGuard {
    fn drop(&mut self) {
        RESOLUTION_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            debug_assert_eq!(stack.len(), self.depth);
            stack.truncate(self.depth.saturating_sub(1));
        });
    }
}
