use crate::error::{AppError, FormError, Result, RouteError};
use crate::form::{FormField, SubmissionForm};
use crate::router::{ListingSeed, Navigation, Transition, View, ViewKind, ViewRouter};
use directory_model::{Company, Sector};
use directory_search::{CompanyFilter, SectorFilter};
use directory_store::{DataOrigin, DirectoryStore, Snapshot, StoreError};

/// Shown to the user whenever a save fails, whatever the cause
pub const SAVE_ERROR_MESSAGE: &str = "Errore nel salvataggio.";

/// Companies shown on the home view
pub const FEATURED_COUNT: usize = 8;

/// A load that has been started but not yet applied.
///
/// Await [`PendingLoad::run`] and hand the result to
/// [`Session::finish_load`]. Dropping the future abandons the request;
/// [`Session::cancel_load`] then clears the loading flag.
#[derive(Clone)]
pub struct PendingLoad {
    store: DirectoryStore,
    seq: u64,
}

impl PendingLoad {
    pub async fn run(self) -> LoadedSnapshot {
        LoadedSnapshot {
            seq: self.seq,
            snapshot: self.store.load().await,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedSnapshot {
    seq: u64,
    pub snapshot: Snapshot,
}

/// A create that has been started but not yet applied
pub struct PendingCreate {
    store: DirectoryStore,
    company: Company,
    epoch: u64,
    /// Last load applied to the session when the submit began
    applied_seq: u64,
}

impl PendingCreate {
    pub fn company(&self) -> &Company {
        &self.company
    }

    pub async fn run(self) -> CreateResult {
        let result = match self.store.create(self.company).await {
            Ok(created) => Ok(CreatedCompany {
                company: created,
                directory: self.store.companies().await,
                origin: self.store.origin().await,
            }),
            Err(err) => Err(err),
        };
        CreateResult {
            epoch: self.epoch,
            applied_seq: self.applied_seq,
            result,
        }
    }
}

#[derive(Debug)]
pub struct CreateResult {
    epoch: u64,
    applied_seq: u64,
    result: std::result::Result<CreatedCompany, StoreError>,
}

#[derive(Debug)]
struct CreatedCompany {
    company: Company,
    directory: Vec<Company>,
    origin: Option<DataOrigin>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Saved. `navigated` is false when the user had already moved on.
    Created { company: Company, navigated: bool },
    /// Not saved; the form keeps its contents
    Failed { message: &'static str },
}

/// What the current view has to show, independent of any rendering
#[derive(Debug, PartialEq, Eq)]
pub enum Screen<'a> {
    Home {
        sectors: &'static [Sector],
        featured: &'a [Company],
    },
    Listing {
        total: usize,
        companies: Vec<&'a Company>,
        filter: &'a CompanyFilter,
    },
    Profile(&'a Company),
    AddCompany {
        form: &'a SubmissionForm,
        error: Option<&'a str>,
    },
}

/// One user's walk through the directory.
///
/// The session keeps its own copy of the list so a slow request finishing
/// after the user moved on cannot rewrite what they are looking at:
/// `load_seq` identifies the newest load started, `applied_seq` the one
/// whose list is shown, and `epoch` changes on every navigation.
pub struct Session {
    store: DirectoryStore,
    router: ViewRouter,
    filter: CompanyFilter,
    companies: Vec<Company>,
    origin: Option<DataOrigin>,
    loading: bool,
    form: SubmissionForm,
    form_error: Option<String>,
    epoch: u64,
    load_seq: u64,
    applied_seq: u64,
}

impl Session {
    pub fn new(store: DirectoryStore) -> Self {
        Self {
            store,
            router: ViewRouter::new(),
            filter: CompanyFilter::default(),
            companies: Vec::new(),
            origin: None,
            loading: false,
            form: SubmissionForm::new(),
            form_error: None,
            epoch: 0,
            load_seq: 0,
            applied_seq: 0,
        }
    }

    pub fn view(&self) -> &View {
        self.router.current()
    }

    pub fn view_kind(&self) -> ViewKind {
        self.router.kind()
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn origin(&self) -> Option<&DataOrigin> {
        self.origin.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn filter(&self) -> &CompanyFilter {
        &self.filter
    }

    pub fn form(&self) -> &SubmissionForm {
        &self.form
    }

    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    // -- loading --

    pub fn begin_load(&mut self) -> PendingLoad {
        self.load_seq += 1;
        self.loading = true;
        PendingLoad {
            store: self.store.clone(),
            seq: self.load_seq,
        }
    }

    /// Apply a finished load; returns false when a newer load superseded it
    pub fn finish_load(&mut self, loaded: LoadedSnapshot) -> bool {
        if loaded.seq != self.load_seq {
            log::debug!(
                "Discarding load #{} (latest is #{})",
                loaded.seq,
                self.load_seq
            );
            return false;
        }
        self.companies = loaded.snapshot.companies;
        self.origin = Some(loaded.snapshot.origin);
        self.applied_seq = loaded.seq;
        self.loading = false;
        true
    }

    /// Give up on the load in flight: its result will be discarded
    pub fn cancel_load(&mut self) {
        if self.loading {
            log::debug!("Load #{} cancelled", self.load_seq);
            self.load_seq += 1;
            self.loading = false;
        }
    }

    pub async fn load(&mut self) -> bool {
        let loaded = self.begin_load().run().await;
        self.finish_load(loaded)
    }

    // -- navigation --

    pub fn navigate(&mut self, navigation: Navigation) -> Result<Transition> {
        let transition = self.router.navigate(navigation, &self.companies)?;
        self.epoch += 1;

        if let Some(seed) = &transition.seed {
            self.apply_seed(seed);
        }
        if transition.to == ViewKind::AddCompany && transition.from != ViewKind::AddCompany {
            self.form = SubmissionForm::new();
            self.form_error = None;
        }
        Ok(transition)
    }

    fn apply_seed(&mut self, seed: &ListingSeed) {
        if let Some(query) = &seed.query {
            self.filter.query.clone_from(query);
        }
        if let Some(sector) = seed.sector {
            self.filter.sector = sector;
        }
    }

    /// Open the n-th company (zero-based) of the current filtered listing
    pub fn open_listed(&mut self, index: usize) -> Result<Option<Transition>> {
        let Some(company) = self.filtered().get(index).map(|c| (*c).clone()) else {
            return Ok(None);
        };
        self.navigate(Navigation::Profile(company)).map(Some)
    }

    // -- filters --

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.filter.location = location.into();
    }

    pub fn set_sector(&mut self, sector: SectorFilter) {
        self.filter.sector = sector;
    }

    pub fn has_active_filters(&self) -> bool {
        self.filter.is_active()
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
    }

    pub fn filtered(&self) -> Vec<&Company> {
        self.filter.apply(&self.companies)
    }

    pub fn featured(&self) -> &[Company] {
        &self.companies[..self.companies.len().min(FEATURED_COUNT)]
    }

    // -- submission --

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) -> Result<()> {
        self.ensure_on_form("edit the submission form")?;
        self.form.set(field, value)?;
        Ok(())
    }

    /// Validate the form and hand out the create to run
    pub fn begin_submit(&mut self) -> Result<PendingCreate> {
        self.ensure_on_form("submit a company")?;
        let company = self.form.build().map_err(|err: FormError| {
            self.form_error = Some(err.to_string());
            AppError::from(err)
        })?;
        self.form_error = None;
        Ok(PendingCreate {
            store: self.store.clone(),
            company,
            epoch: self.epoch,
            applied_seq: self.applied_seq,
        })
    }

    pub fn finish_submit(&mut self, finished: CreateResult) -> SubmitOutcome {
        match finished.result {
            Ok(created) => {
                if finished.applied_seq == self.applied_seq {
                    self.companies = created.directory;
                    if created.origin.is_some() {
                        self.origin = created.origin;
                    }
                } else if !self.companies.iter().any(|c| c.id == created.company.id) {
                    // A newer load already replaced the list; keep it and add the company.
                    self.companies.insert(0, created.company.clone());
                }

                let navigated = finished.epoch == self.epoch
                    && self.router.kind() == ViewKind::AddCompany
                    && self.navigate(Navigation::Submitted).is_ok();
                if !navigated {
                    log::debug!(
                        "Company {:?} saved after the user left the form",
                        created.company.name
                    );
                }
                SubmitOutcome::Created {
                    company: created.company,
                    navigated,
                }
            }
            Err(err) => {
                log::error!("Saving company failed: {err}");
                self.form_error = Some(SAVE_ERROR_MESSAGE.to_string());
                SubmitOutcome::Failed {
                    message: SAVE_ERROR_MESSAGE,
                }
            }
        }
    }

    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        let pending = self.begin_submit()?;
        let finished = pending.run().await;
        Ok(self.finish_submit(finished))
    }

    fn ensure_on_form(&self, action: &'static str) -> std::result::Result<(), RouteError> {
        let from = self.router.kind();
        if from == ViewKind::AddCompany {
            Ok(())
        } else {
            Err(RouteError::InvalidTransition { from, action })
        }
    }

    pub fn screen(&self) -> Screen<'_> {
        match self.router.current() {
            View::Home => Screen::Home {
                sectors: &Sector::ALL,
                featured: self.featured(),
            },
            View::Listing => Screen::Listing {
                total: self.companies.len(),
                companies: self.filtered(),
                filter: &self.filter,
            },
            View::Profile(company) => Screen::Profile(company),
            View::AddCompany => Screen::AddCompany {
                form: &self.form,
                error: self.form_error(),
            },
        }
    }
}
