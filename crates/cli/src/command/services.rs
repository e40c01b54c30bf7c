use super::errors::{save_failure, NotFound};
use anyhow::Result;
use directory_app::{FormField, SubmissionForm};
use directory_model::{Company, CompanySize, CompanyType, Sector};
use directory_protocol::{
    parse_payload, Catalog, CommandAction, CreatePayload, GetPayload, ListPayload, ResponseMeta,
    COMMAND_API_VERSION,
};
use directory_search::{CompanyFilter, SectorFilter};
use directory_store::{DataOrigin, DirectoryStore};
use serde::Serialize;
use serde_json::Value;

pub struct CommandOutcome {
    pub data: Value,
    pub meta: ResponseMeta,
}

impl CommandOutcome {
    fn from_value<T: Serialize>(value: T, origin: Option<&DataOrigin>) -> Result<Self> {
        Ok(Self {
            data: serde_json::to_value(value)?,
            meta: meta_for(origin),
        })
    }
}

pub fn meta_for(origin: Option<&DataOrigin>) -> ResponseMeta {
    ResponseMeta {
        version: COMMAND_API_VERSION,
        origin: origin.map(|o| o.as_str().to_string()),
        fallback_reason: origin
            .and_then(DataOrigin::fallback_reason)
            .map(ToString::to_string),
        duration_ms: None,
    }
}

#[derive(Serialize)]
struct ListOutput<'a> {
    total: usize,
    count: usize,
    filter: &'a CompanyFilter,
    companies: Vec<&'a Company>,
}

#[derive(Serialize)]
struct ReloadOutput {
    total: usize,
    origin: DataOrigin,
}

pub fn catalog() -> Catalog {
    Catalog {
        sectors: Sector::ALL.iter().map(|s| s.label().to_string()).collect(),
        sizes: CompanySize::ALL.iter().map(|s| s.label().to_string()).collect(),
        types: CompanyType::ALL.iter().map(|t| t.label().to_string()).collect(),
    }
}

/// Fill a submission form from API fields; absent fields keep their defaults
pub fn form_from_payload(payload: CreatePayload) -> Result<SubmissionForm> {
    let fields = [
        (FormField::Name, Some(payload.name)),
        (FormField::Type, payload.company_type),
        (FormField::Sector, payload.sector),
        (FormField::Size, payload.size),
        (FormField::ShortDescription, Some(payload.short_description)),
        (FormField::FullDescription, Some(payload.full_description)),
        (FormField::Products, Some(payload.products)),
        (FormField::Services, Some(payload.services)),
        (FormField::MarketsServed, Some(payload.markets_served)),
        (FormField::Location, Some(payload.location)),
        (FormField::Logo, payload.logo),
        (FormField::Cover, payload.cover),
        (FormField::Email, Some(payload.email)),
        (FormField::Phone, Some(payload.phone)),
        (FormField::Website, Some(payload.website)),
        (FormField::Whatsapp, Some(payload.whatsapp)),
    ];

    let mut form = SubmissionForm::new();
    for (field, value) in fields {
        if let Some(value) = value {
            form.set(field, value)?;
        }
    }
    Ok(form)
}

pub struct Services {
    store: DirectoryStore,
}

impl Services {
    pub fn new(store: DirectoryStore) -> Self {
        Self { store }
    }

    pub async fn route(&self, action: CommandAction, payload: Value) -> Result<CommandOutcome> {
        match action {
            CommandAction::List => self.list(parse_payload(payload)?).await,
            CommandAction::Get => self.get(parse_payload(payload)?).await,
            CommandAction::Create => self.create(parse_payload(payload)?).await,
            CommandAction::Catalog => CommandOutcome::from_value(catalog(), None),
            CommandAction::Reload => self.reload().await,
        }
    }

    /// Load once per process; later calls reuse the shared list
    async fn ensure_loaded(&self) -> DataOrigin {
        match self.store.origin().await {
            Some(origin) => origin,
            None => self.store.load().await.origin,
        }
    }

    async fn list(&self, payload: ListPayload) -> Result<CommandOutcome> {
        let sector = match payload.sector.as_deref() {
            Some(label) => SectorFilter::parse(label)?,
            None => SectorFilter::All,
        };
        let filter = CompanyFilter::new(
            payload.query.unwrap_or_default(),
            payload.location.unwrap_or_default(),
            sector,
        );

        let origin = self.ensure_loaded().await;
        let companies = self.store.companies().await;
        let matched = filter.apply(&companies);
        let output = ListOutput {
            total: companies.len(),
            count: matched.len(),
            filter: &filter,
            companies: matched,
        };
        CommandOutcome::from_value(output, Some(&origin))
    }

    async fn get(&self, payload: GetPayload) -> Result<CommandOutcome> {
        let origin = self.ensure_loaded().await;
        let company = self
            .store
            .find(payload.id.trim())
            .await
            .ok_or_else(|| NotFound(payload.id.trim().to_string()))?;
        CommandOutcome::from_value(company, Some(&origin))
    }

    async fn create(&self, payload: CreatePayload) -> Result<CommandOutcome> {
        let company = form_from_payload(payload)?.build()?;
        self.ensure_loaded().await;
        let created = self.store.create(company).await.map_err(save_failure)?;
        let origin = self.store.origin().await;
        CommandOutcome::from_value(created, origin.as_ref())
    }

    async fn reload(&self) -> Result<CommandOutcome> {
        let snapshot = self.store.load().await;
        let output = ReloadOutput {
            total: snapshot.companies.len(),
            origin: snapshot.origin.clone(),
        };
        CommandOutcome::from_value(output, Some(&snapshot.origin))
    }
}
