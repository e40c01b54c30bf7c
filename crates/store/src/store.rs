use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::fallback::fallback_companies;
use crate::rest::RestSource;
use crate::source::CompanySource;
use crate::types::{DataOrigin, FallbackReason, Snapshot, SortOrder};
use directory_model::{Company, NewCompanyRow};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-wide company directory.
///
/// Cloning is cheap and every clone sees the same list, so one store can
/// back any number of sessions. Without a source the list lives only in
/// memory and is lost on restart.
#[derive(Clone)]
pub struct DirectoryStore {
    inner: Arc<Inner>,
}

struct Inner {
    source: Option<Arc<dyn CompanySource>>,
    order: SortOrder,
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    companies: Vec<Company>,
    /// `None` until the first load
    origin: Option<DataOrigin>,
    /// Bumped when a backed load starts
    started_seq: u64,
    /// Sequence of the load that produced `companies`
    applied_seq: u64,
}

impl DirectoryStore {
    pub fn new(source: Option<Arc<dyn CompanySource>>, order: SortOrder) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                order,
                state: RwLock::new(State::default()),
            }),
        }
    }

    /// Degraded mode: built-in data plus in-memory creates
    pub fn offline() -> Self {
        Self::new(None, SortOrder::default())
    }

    /// Wire a [`RestSource`] when a config is present, otherwise go offline
    pub fn from_config(config: Option<&StoreConfig>) -> Result<Self> {
        match config {
            Some(config) => {
                let source = RestSource::new(config)?;
                log::info!("Directory backed by {}", source.describe());
                Ok(Self::new(Some(Arc::new(source)), config.order))
            }
            None => Ok(Self::offline()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.inner.source.is_some()
    }

    pub fn order(&self) -> SortOrder {
        self.inner.order
    }

    /// Query the source without touching the shared list. Never fails:
    /// every failure degrades to the built-in dataset.
    pub async fn fetch(&self) -> Snapshot {
        let Some(source) = &self.inner.source else {
            return fallback(FallbackReason::NotConfigured);
        };

        match source.select(self.inner.order).await {
            Ok(rows) if rows.is_empty() => {
                log::warn!("External store returned no rows; using built-in directory");
                fallback(FallbackReason::EmptyResult)
            }
            Ok(rows) => Snapshot {
                companies: rows.into_iter().map(Company::from).collect(),
                origin: DataOrigin::Live,
            },
            Err(err) => {
                log::warn!("Directory query failed: {err}; using built-in directory");
                fallback(FallbackReason::QueryFailed(err.to_string()))
            }
        }
    }

    /// Fetch and replace the shared list.
    ///
    /// A load that finishes after a newer one has been applied is dropped
    /// and the current list is returned instead.
    ///
    /// Without a source the built-in dataset is only seeded once; later
    /// loads return the in-memory list so offline creates survive.
    pub async fn load(&self) -> Snapshot {
        if self.inner.source.is_none() {
            let mut state = self.inner.state.write().await;
            if let Some(origin) = state.origin.clone() {
                return Snapshot {
                    companies: state.companies.clone(),
                    origin,
                };
            }
            let snapshot = fallback(FallbackReason::NotConfigured);
            state.companies = snapshot.companies.clone();
            state.origin = Some(snapshot.origin.clone());
            log::info!(
                "Directory seeded with {} built-in companies",
                snapshot.companies.len()
            );
            return snapshot;
        }

        let seq = {
            let mut state = self.inner.state.write().await;
            state.started_seq += 1;
            state.started_seq
        };
        let snapshot = self.fetch().await;

        let mut state = self.inner.state.write().await;
        if seq < state.applied_seq {
            log::debug!(
                "Discarding load #{seq}: load #{} already applied",
                state.applied_seq
            );
            if let Some(origin) = state.origin.clone() {
                return Snapshot {
                    companies: state.companies.clone(),
                    origin,
                };
            }
        }
        state.companies = snapshot.companies.clone();
        state.origin = Some(snapshot.origin.clone());
        state.applied_seq = seq;
        log::info!(
            "Directory loaded: {} companies ({})",
            snapshot.companies.len(),
            snapshot.origin.as_str()
        );
        snapshot
    }

    /// Persist a new company.
    ///
    /// With a source: insert, then reload everything and return the stored
    /// version. Without one: prepend to the in-memory list.
    pub async fn create(&self, company: Company) -> Result<Company> {
        match &self.inner.source {
            Some(source) => {
                source.insert(NewCompanyRow::from(&company)).await.map_err(|err| {
                    log::error!("Insert of {:?} failed: {err}", company.name);
                    err
                })?;
                let snapshot = self.load().await;
                Ok(find_created(&snapshot.companies, &company).unwrap_or(company))
            }
            None => {
                if self.inner.state.read().await.origin.is_none() {
                    self.load().await;
                }
                let mut state = self.inner.state.write().await;
                if state.companies.iter().any(|c| c.id == company.id) {
                    return Err(StoreError::DuplicateId(company.id));
                }
                state.companies.insert(0, company.clone());
                log::info!("Added {:?} to the in-memory directory", company.name);
                Ok(company)
            }
        }
    }

    pub async fn companies(&self) -> Vec<Company> {
        self.inner.state.read().await.companies.clone()
    }

    pub async fn find(&self, id: &str) -> Option<Company> {
        self.inner
            .state
            .read()
            .await
            .companies
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    /// `None` until the first load
    pub async fn origin(&self) -> Option<DataOrigin> {
        self.inner.state.read().await.origin.clone()
    }
}

fn fallback(reason: FallbackReason) -> Snapshot {
    Snapshot {
        companies: fallback_companies(),
        origin: DataOrigin::Fallback { reason },
    }
}

// The insert response is not trusted; match the submitted values against the reload.
fn find_created(companies: &[Company], submitted: &Company) -> Option<Company> {
    companies
        .iter()
        .filter(|c| {
            c.name == submitted.name
                && c.sector == submitted.sector
                && c.contact.email == submitted.contact.email
        })
        .max_by(|a, b| a.created_at.cmp(&b.created_at))
        .cloned()
}
