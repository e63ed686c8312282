use crate::core::queries::QueryEngine;
use crate::domain::model::{Counterparty, Dataset, RealEstateObject, Request, RequestType};
use crate::domain::ports::DataProvider;
use crate::utils::error::{RealtyError, ReferenceTarget, Result};
use crate::utils::validation::Validate;
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// Validated, immutable view of the agency's collections.
///
/// Construction checks every entity, id uniqueness within each collection,
/// cadastral number uniqueness and that all request references resolve.
#[derive(Debug, Clone)]
pub struct Snapshot {
    counterparties: Vec<Counterparty>,
    estates: Vec<RealEstateObject>,
    requests: Vec<Request>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnapshotSummary {
    pub counterparties: usize,
    pub estates: usize,
    pub requests: usize,
    pub buy_requests: usize,
    pub sell_requests: usize,
}

fn ensure_unique<I>(collection: &str, ids: I) -> Result<HashSet<u32>>
where
    I: IntoIterator<Item = u32>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(RealtyError::DuplicateId {
                collection: collection.to_string(),
                id,
            });
        }
    }
    Ok(seen)
}

impl Snapshot {
    pub fn new(
        counterparties: Vec<Counterparty>,
        estates: Vec<RealEstateObject>,
        requests: Vec<Request>,
    ) -> Result<Self> {
        counterparties.iter().try_for_each(Validate::validate)?;
        estates.iter().try_for_each(Validate::validate)?;
        requests.iter().try_for_each(Validate::validate)?;

        let counterparty_ids = ensure_unique("counterparties", counterparties.iter().map(|c| c.id))?;
        let estate_ids = ensure_unique("estates", estates.iter().map(|e| e.id))?;
        ensure_unique("requests", requests.iter().map(|r| r.id))?;

        let mut cadastral = HashSet::new();
        for estate in &estates {
            if !cadastral.insert(estate.cadastral_number.as_str()) {
                return Err(RealtyError::InvalidEntity {
                    entity: "estate".to_string(),
                    id: estate.id,
                    reason: format!("cadastral number {} is already taken", estate.cadastral_number),
                });
            }
        }

        for request in &requests {
            if !counterparty_ids.contains(&request.counterparty_id) {
                return Err(RealtyError::BrokenReference {
                    request_id: request.id,
                    target: ReferenceTarget::Counterparty,
                    target_id: request.counterparty_id,
                });
            }
            if !estate_ids.contains(&request.estate_id) {
                return Err(RealtyError::BrokenReference {
                    request_id: request.id,
                    target: ReferenceTarget::Estate,
                    target_id: request.estate_id,
                });
            }
        }

        Ok(Self {
            counterparties,
            estates,
            requests,
        })
    }

    pub fn counterparties(&self) -> &[Counterparty] {
        &self.counterparties
    }

    pub fn estates(&self) -> &[RealEstateObject] {
        &self.estates
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn engine(&self) -> Result<QueryEngine<'_>> {
        QueryEngine::new(&self.counterparties, &self.estates, &self.requests)
    }

    pub fn summary(&self) -> SnapshotSummary {
        let buy_requests = self
            .requests
            .iter()
            .filter(|r| r.request_type == RequestType::Buy)
            .count();
        SnapshotSummary {
            counterparties: self.counterparties.len(),
            estates: self.estates.len(),
            requests: self.requests.len(),
            buy_requests,
            sell_requests: self.requests.len() - buy_requests,
        }
    }
}

impl TryFrom<Dataset> for Snapshot {
    type Error = RealtyError;

    fn try_from(dataset: Dataset) -> Result<Self> {
        Snapshot::new(dataset.counterparties, dataset.estates, dataset.requests)
    }
}

impl Dataset {
    pub fn into_snapshot(self) -> Result<Snapshot> {
        Snapshot::try_from(self)
    }
}

/// Holds the current snapshot and swaps it as a whole.
///
/// Readers take an `Arc` and keep querying it even if a newer snapshot is
/// installed meanwhile.
pub struct SnapshotStore {
    current: RwLock<Arc<Snapshot>>,
}

impl SnapshotStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    pub fn from_provider(provider: &dyn DataProvider) -> Result<Self> {
        Ok(Self::new(load_snapshot(provider)?))
    }

    pub fn current(&self) -> Arc<Snapshot> {
        self.current.read().clone()
    }

    /// Installs `snapshot` and returns the one it replaced.
    pub fn replace(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let next = Arc::new(snapshot);
        std::mem::replace(&mut *self.current.write(), next)
    }

    /// Loads and validates a fresh snapshot before swapping. On failure the
    /// current snapshot stays in place.
    pub fn reload(&self, provider: &dyn DataProvider) -> Result<Arc<Snapshot>> {
        let snapshot = load_snapshot(provider)?;
        self.replace(snapshot);
        Ok(self.current())
    }
}

pub fn load_snapshot(provider: &dyn DataProvider) -> Result<Snapshot> {
    let dataset = provider.load()?;
    let snapshot = dataset.into_snapshot()?;
    let summary = snapshot.summary();
    tracing::info!(
        provider = provider.name(),
        counterparties = summary.counterparties,
        estates = summary.estates,
        requests = summary.requests,
        "snapshot loaded"
    );
    Ok(snapshot)
}
