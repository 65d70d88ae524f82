//! Internal implementation details.

pub(crate) mod circular;
pub(crate) mod sync;

pub(crate) use circular::StackGuard;
pub(crate) use sync::{Map, Mutex, RwLock};
