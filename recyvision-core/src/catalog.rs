//! In-memory catalog of the current recycling-center snapshot.

use std::sync::{Arc, Mutex};

use crate::model::RecyclingCenter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// How a refresh started while another one is in flight behaves.
pub enum RefreshPolicy {
    /// The newest refresh wins; results of superseded refreshes are dropped.
    #[default]
    Supersede,
    /// A new refresh is refused while another one is outstanding.
    Reject,
}

#[derive(Debug, Clone, Copy)]
/// Handle for one refresh cycle, issued by [`CenterCatalog::begin_refresh`].
pub struct RefreshTicket(u64);

#[derive(Debug)]
struct CatalogState {
    centers: Arc<Vec<RecyclingCenter>>,
    /// Generation of the most recently started refresh.
    started: u64,
    /// Generation of the most recently finished (installed or abandoned) refresh.
    resolved: u64,
}

#[derive(Debug)]
/// Holder of the current normalized center set.
///
/// Snapshots are swapped whole, so readers never observe a partially
/// updated list. Refresh cycles are serialized through tickets: a ticket
/// that has been superseded by a newer refresh cannot install its results.
pub struct CenterCatalog {
    policy: RefreshPolicy,
    state: Mutex<CatalogState>,
}

impl CenterCatalog {
    /// Create an empty catalog with the given refresh policy.
    #[must_use]
    pub fn new(policy: RefreshPolicy) -> Self {
        Self {
            policy,
            state: Mutex::new(CatalogState {
                centers: Arc::new(Vec::new()),
                started: 0,
                resolved: 0,
            }),
        }
    }

    /// The current snapshot. Cheap to call; clones an `Arc`.
    #[must_use]
    pub fn current(&self) -> Arc<Vec<RecyclingCenter>> {
        Arc::clone(&self.lock().centers)
    }

    /// Start a refresh cycle.
    ///
    /// Returns `None` when the policy is [`RefreshPolicy::Reject`] and an
    /// earlier refresh has not finished yet.
    #[must_use]
    pub fn begin_refresh(&self) -> Option<RefreshTicket> {
        let mut state = self.lock();

        if self.policy == RefreshPolicy::Reject && state.started > state.resolved {
            return None;
        }

        state.started += 1;
        Some(RefreshTicket(state.started))
    }

    /// Install the results of a refresh cycle.
    ///
    /// Returns `false` when the ticket was superseded by a newer refresh,
    /// in which case the snapshot is left untouched.
    pub fn install(&self, ticket: RefreshTicket, centers: Vec<RecyclingCenter>) -> bool {
        let mut state = self.lock();
        state.resolved = state.resolved.max(ticket.0);

        if ticket.0 == state.started {
            state.centers = Arc::new(centers);
            true
        } else {
            log::debug!("dropping superseded catalog refresh (generation {})", ticket.0);
            false
        }
    }

    /// Mark a refresh cycle as finished without results, e.g. after a
    /// failed fetch, so a `Reject` catalog accepts the next refresh.
    pub fn abandon(&self, ticket: RefreshTicket) {
        let mut state = self.lock();
        state.resolved = state.resolved.max(ticket.0);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CatalogState> {
        self.state.lock().expect("catalog state lock poisoned")
    }
}

impl Default for CenterCatalog {
    fn default() -> Self {
        Self::new(RefreshPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinate, MaterialType};

    fn center(id: &str) -> RecyclingCenter {
        RecyclingCenter {
            id: id.to_owned(),
            name: String::from("Recycling Center"),
            location: Coordinate {
                latitude: 0.0,
                longitude: 0.0,
            },
            address: String::from("Zurich"),
            material_type: MaterialType::General,
            accepted_items: vec![String::from("Glass")],
            opening_hours: String::from("Hours not specified"),
        }
    }

    #[test]
    fn install_replaces_the_whole_snapshot() {
        let catalog = CenterCatalog::default();
        assert!(catalog.current().is_empty());

        let ticket = catalog.begin_refresh().expect("supersede never rejects");
        assert!(catalog.install(ticket, vec![center("1"), center("2")]));

        let snapshot = catalog.current();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].id, "1");
    }

    #[test]
    fn superseded_ticket_cannot_install() {
        let catalog = CenterCatalog::new(RefreshPolicy::Supersede);

        let stale = catalog.begin_refresh().expect("first refresh");
        let fresh = catalog.begin_refresh().expect("second refresh");

        assert!(catalog.install(fresh, vec![center("new")]));
        assert!(!catalog.install(stale, vec![center("old")]));

        let snapshot = catalog.current();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, "new");
    }

    #[test]
    fn reject_policy_refuses_overlapping_refreshes() {
        let catalog = CenterCatalog::new(RefreshPolicy::Reject);

        let first = catalog.begin_refresh().expect("no refresh outstanding");
        assert!(catalog.begin_refresh().is_none());

        catalog.abandon(first);
        assert!(catalog.begin_refresh().is_some());
    }
}
