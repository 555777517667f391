// Query side of the gateway: resolve an identifier to a presence snapshot
// and render it in the caller's requested format.

pub mod cache;
pub mod render;

use anyhow::Result;
use log::debug;

use crate::models::{NormalizedPresence, QueryResult};

pub use cache::{FileResourceLoader, ResourceCache, ResourceLoader};
pub use render::{Rendered, RendererDispatch};

/// Directory collaborator owning identity and presence state. The lookup
/// may fail for any reason it likes; this layer folds every failure into
/// `NotFound`.
pub trait PresenceDirectory: Send + Sync {
    /// Current presence of `target` as visible to `requester`.
    fn lookup(&self, requester: Option<&str>, target: &str) -> Result<NormalizedPresence>;
}

/// A target identifier we refuse to even hand to the directory: blank,
/// containing whitespace, or not of the shape `local@domain` with a
/// non-empty local part and at most one `@`.
fn is_malformed(id: &str) -> bool {
    let id = id.trim();
    if id.is_empty() || id.chars().any(char::is_whitespace) {
        return true;
    }
    let at_count = id.chars().filter(|c| *c == '@').count();
    at_count > 1 || id.starts_with('@')
}

/// Answers presence queries against an injected directory.
pub struct PresenceQueryService<D> {
    directory: D,
}

impl<D: PresenceDirectory> PresenceQueryService<D> {
    pub fn new(directory: D) -> Self {
        PresenceQueryService { directory }
    }

    /// Resolve a (requester, target) pair to a presence snapshot.
    ///
    /// Missing targets, malformed identifiers, and directory faults all
    /// come back as `NotFound`; callers render a not-found response and
    /// never need to distinguish the cases.
    pub fn resolve(&self, requester: Option<&str>, target: &str) -> QueryResult {
        if is_malformed(target) {
            debug!("Rejecting malformed target identifier: {:?}", target);
            return QueryResult::NotFound;
        }
        match self.directory.lookup(requester, target.trim()) {
            Ok(presence) => QueryResult::Found(presence),
            Err(e) => {
                debug!("Presence lookup for {} failed: {:#}", target, e);
                QueryResult::NotFound
            }
        }
    }
}
