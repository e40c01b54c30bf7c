use crate::company::{Company, Contact};
use serde::{Deserialize, Deserializer, Serialize};

/// A company as the hosted database stores it.
///
/// Every column is optional: a read never fails because a column is null or
/// missing, it just produces an empty value in the view model.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CompanyRow {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: Option<String>,
    pub nome: Option<String>,
    pub tipologia: Option<String>,
    pub settore: Option<String>,
    pub descrizione_breve: Option<String>,
    pub descrizione_completa: Option<String>,
    pub prodotti: Option<Vec<String>>,
    pub servizi: Option<Vec<String>>,
    pub mercati_serviti: Option<Vec<String>>,
    pub localita: Option<String>,
    pub dimensione_organico: Option<String>,
    pub logo_url: Option<String>,
    pub cover_url: Option<String>,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub sito_web: Option<String>,
    pub whatsapp: Option<String>,
    pub created_at: Option<String>,
}

/// Insert payload: every column except the ones the store assigns
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct NewCompanyRow {
    pub nome: String,
    pub tipologia: String,
    pub settore: String,
    pub descrizione_breve: String,
    pub descrizione_completa: String,
    pub prodotti: Vec<String>,
    pub servizi: Vec<String>,
    pub mercati_serviti: Vec<String>,
    pub localita: String,
    pub dimensione_organico: String,
    pub logo_url: String,
    pub cover_url: String,
    pub email: String,
    pub telefono: String,
    pub sito_web: String,
    pub whatsapp: String,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Self {
            id: row.id.unwrap_or_default(),
            name: row.nome.unwrap_or_default(),
            company_type: row.tipologia.unwrap_or_default(),
            sector: row.settore.unwrap_or_default(),
            short_description: row.descrizione_breve.unwrap_or_default(),
            full_description: row.descrizione_completa.unwrap_or_default(),
            products: row.prodotti.unwrap_or_default(),
            services: row.servizi.unwrap_or_default(),
            markets_served: row.mercati_serviti.unwrap_or_default(),
            location: row.localita.unwrap_or_default(),
            size: row.dimensione_organico.unwrap_or_default(),
            logo: row.logo_url.unwrap_or_default(),
            cover: row.cover_url.unwrap_or_default(),
            contact: Contact {
                email: row.email.unwrap_or_default(),
                phone: row.telefono.unwrap_or_default(),
                website: row.sito_web.unwrap_or_default(),
                whatsapp: row.whatsapp.unwrap_or_default(),
            },
            created_at: row.created_at,
        }
    }
}

impl From<&Company> for CompanyRow {
    fn from(company: &Company) -> Self {
        Self {
            id: Some(company.id.clone()),
            nome: Some(company.name.clone()),
            tipologia: Some(company.company_type.clone()),
            settore: Some(company.sector.clone()),
            descrizione_breve: Some(company.short_description.clone()),
            descrizione_completa: Some(company.full_description.clone()),
            prodotti: Some(company.products.clone()),
            servizi: Some(company.services.clone()),
            mercati_serviti: Some(company.markets_served.clone()),
            localita: Some(company.location.clone()),
            dimensione_organico: Some(company.size.clone()),
            logo_url: Some(company.logo.clone()),
            cover_url: Some(company.cover.clone()),
            email: Some(company.contact.email.clone()),
            telefono: Some(company.contact.phone.clone()),
            sito_web: Some(company.contact.website.clone()),
            whatsapp: Some(company.contact.whatsapp.clone()),
            created_at: company.created_at.clone(),
        }
    }
}

impl From<&Company> for NewCompanyRow {
    fn from(company: &Company) -> Self {
        Self {
            nome: company.name.clone(),
            tipologia: company.company_type.clone(),
            settore: company.sector.clone(),
            descrizione_breve: company.short_description.clone(),
            descrizione_completa: company.full_description.clone(),
            prodotti: company.products.clone(),
            servizi: company.services.clone(),
            mercati_serviti: company.markets_served.clone(),
            localita: company.location.clone(),
            dimensione_organico: company.size.clone(),
            logo_url: company.logo.clone(),
            cover_url: company.cover.clone(),
            email: company.contact.email.clone(),
            telefono: company.contact.phone.clone(),
            sito_web: company.contact.website.clone(),
            whatsapp: company.contact.whatsapp.clone(),
        }
    }
}

// Primary keys come back as uuid strings or bigint numbers depending on the table.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(
        Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
            RawId::Text(text) => text,
            RawId::Signed(n) => n.to_string(),
            RawId::Unsigned(n) => n.to_string(),
        }),
    )
}
