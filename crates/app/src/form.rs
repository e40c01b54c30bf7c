use crate::error::FormError;
use directory_model::{
    Company, CompanySize, CompanyType, Contact, Sector, SHORT_DESCRIPTION_MAX_CHARS,
};
use rand::Rng;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub const LOGO_PLACEHOLDER_BASE: &str = "https://api.dicebear.com/7.x/initials/svg?seed=";
pub const DEFAULT_COVER: &str =
    "https://images.unsplash.com/photo-1497366216548-37526070297c?auto=format&fit=crop&w=1200";

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Name,
    Type,
    Sector,
    Size,
    ShortDescription,
    FullDescription,
    Products,
    Services,
    MarketsServed,
    Location,
    Logo,
    Cover,
    Email,
    Phone,
    Website,
    Whatsapp,
}

impl FormField {
    pub const ALL: [FormField; 16] = [
        Self::Name,
        Self::Type,
        Self::Sector,
        Self::Size,
        Self::ShortDescription,
        Self::FullDescription,
        Self::Products,
        Self::Services,
        Self::MarketsServed,
        Self::Location,
        Self::Logo,
        Self::Cover,
        Self::Email,
        Self::Phone,
        Self::Website,
        Self::Whatsapp,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Type => "type",
            Self::Sector => "sector",
            Self::Size => "size",
            Self::ShortDescription => "shortDescription",
            Self::FullDescription => "fullDescription",
            Self::Products => "products",
            Self::Services => "services",
            Self::MarketsServed => "marketsServed",
            Self::Location => "location",
            Self::Logo => "logo",
            Self::Cover => "cover",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Website => "website",
            Self::Whatsapp => "whatsapp",
        }
    }

    pub const fn is_list(self) -> bool {
        matches!(self, Self::Products | Self::Services | Self::MarketsServed)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = FormError;

    /// Accepts the camelCase names as well as kebab/snake spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| FormError::UnknownField(s.trim().to_string()))
    }
}

/// Split comma-separated input into trimmed, non-empty entries in order
#[must_use]
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Nine lowercase base-36 characters
#[must_use]
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())]))
        .collect()
}

/// A company being entered, field by field.
///
/// Enumerated fields are held typed; list fields stay as the raw text the
/// user typed until [`SubmissionForm::build`] splits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionForm {
    pub name: String,
    #[serde(rename = "type")]
    pub company_type: CompanyType,
    pub sector: Sector,
    pub size: CompanySize,
    pub short_description: String,
    pub full_description: String,
    pub products: String,
    pub services: String,
    pub markets_served: String,
    pub location: String,
    pub logo: String,
    pub cover: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub whatsapp: String,
}

impl Default for SubmissionForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            company_type: CompanyType::default(),
            sector: Sector::ALL[0],
            size: CompanySize::default(),
            short_description: String::new(),
            full_description: String::new(),
            products: String::new(),
            services: String::new(),
            markets_served: String::new(),
            location: String::new(),
            logo: format!("{LOGO_PLACEHOLDER_BASE}{}", generate_id()),
            cover: DEFAULT_COVER.to_string(),
            email: String::new(),
            phone: String::new(),
            website: String::new(),
            whatsapp: String::new(),
        }
    }
}

impl SubmissionForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store one field. Option fields must name a known label.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) -> Result<(), FormError> {
        let value = value.into();
        match field {
            FormField::Type => self.company_type = CompanyType::parse(&value)?,
            FormField::Sector => self.sector = Sector::parse(&value)?,
            FormField::Size => self.size = CompanySize::parse(&value)?,
            _ => {
                if let Some(slot) = self.text_mut(field) {
                    *slot = value;
                }
            }
        }
        Ok(())
    }

    /// Builder form of [`SubmissionForm::set`]
    pub fn with(mut self, field: FormField, value: impl Into<String>) -> Result<Self, FormError> {
        self.set(field, value)?;
        Ok(self)
    }

    pub fn get(&self, field: FormField) -> String {
        match field {
            FormField::Type => self.company_type.label().to_string(),
            FormField::Sector => self.sector.label().to_string(),
            FormField::Size => self.size.label().to_string(),
            _ => self.text(field).to_string(),
        }
    }

    fn text(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::ShortDescription => &self.short_description,
            FormField::FullDescription => &self.full_description,
            FormField::Products => &self.products,
            FormField::Services => &self.services,
            FormField::MarketsServed => &self.markets_served,
            FormField::Location => &self.location,
            FormField::Logo => &self.logo,
            FormField::Cover => &self.cover,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Website => &self.website,
            FormField::Whatsapp => &self.whatsapp,
            FormField::Type | FormField::Sector | FormField::Size => "",
        }
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::ShortDescription => &mut self.short_description,
            FormField::FullDescription => &mut self.full_description,
            FormField::Products => &mut self.products,
            FormField::Services => &mut self.services,
            FormField::MarketsServed => &mut self.markets_served,
            FormField::Location => &mut self.location,
            FormField::Logo => &mut self.logo,
            FormField::Cover => &mut self.cover,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Website => &mut self.website,
            FormField::Whatsapp => &mut self.whatsapp,
            FormField::Type | FormField::Sector | FormField::Size => return None,
        };
        Some(slot)
    }

    /// Check the entry constraints without building anything
    pub fn validate(&self) -> Result<(), FormError> {
        for field in [FormField::Name, FormField::FullDescription, FormField::Email] {
            if self.text(field).trim().is_empty() {
                return Err(FormError::Required(field));
            }
        }

        let actual = self.short_description.chars().count();
        if actual > SHORT_DESCRIPTION_MAX_CHARS {
            return Err(FormError::TooLong {
                field: FormField::ShortDescription,
                max: SHORT_DESCRIPTION_MAX_CHARS,
                actual,
            });
        }

        if !self.email.contains('@') {
            return Err(FormError::InvalidEmail(self.email.trim().to_string()));
        }
        Ok(())
    }

    /// Validate and turn the entry into a company with a fresh id
    pub fn build(&self) -> Result<Company, FormError> {
        self.validate()?;
        let company = Company::new(
            generate_id(),
            self.name.trim(),
            self.company_type.label(),
            self.sector.label(),
        )
        .descriptions(self.short_description.trim(), self.full_description.trim())
        .location(self.location.trim())
        .size(self.size.label())
        .products(parse_list(&self.products))
        .services(parse_list(&self.services))
        .markets_served(parse_list(&self.markets_served))
        .images(self.logo.trim(), self.cover.trim())
        .contact(Contact {
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            website: self.website.trim().to_string(),
            whatsapp: self.whatsapp.trim().to_string(),
        });
        log::debug!("Built company {:?} ({})", company.name, company.id);
        Ok(company)
    }
}
