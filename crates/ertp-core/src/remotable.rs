//! Identity-compared opaque handles.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;

static NEXT_IDENTITY: AtomicU64 = AtomicU64::new(1);

/// Allocates a process-unique identity number.
pub(crate) fn next_identity() -> u64 {
    NEXT_IDENTITY.fetch_add(1, AtomicOrdering::Relaxed)
}

/// Opaque capability handle. Two handles are equal only if one is a clone of
/// the other; the alleged name carries no authority.
#[derive(Clone)]
pub struct Remotable {
    inner: Arc<RemotableInner>,
}

struct RemotableInner {
    identity: u64,
    alleged_name: String,
}

impl Remotable {
    /// Creates a fresh handle, distinct from every other handle.
    pub fn new(alleged_name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RemotableInner {
                identity: next_identity(),
                alleged_name: alleged_name.into(),
            }),
        }
    }

    /// Returns the name the handle claims for itself.
    pub fn alleged_name(&self) -> &str {
        &self.inner.alleged_name
    }

    /// Returns the process-unique identity number.
    pub fn identity(&self) -> u64 {
        self.inner.identity
    }
}

impl PartialEq for Remotable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Remotable {}

// Identity numbers are unique, so ordering by them agrees with `eq`.
impl PartialOrd for Remotable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Remotable {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl Hash for Remotable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl fmt::Debug for Remotable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Alleged: {}#{}]", self.alleged_name(), self.identity())
    }
}

impl fmt::Display for Remotable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Alleged: {}]", self.alleged_name())
    }
}
