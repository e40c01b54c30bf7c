use serde::{Deserialize, Serialize};

/// Upper bound for the elevator pitch, enforced only when a company is entered
pub const SHORT_DESCRIPTION_MAX_CHARS: usize = 150;

/// A company listed in the directory
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Opaque identifier, unique within the directory
    pub id: String,

    pub name: String,

    /// Business role label ("Produttore", "Distributore", ...)
    #[serde(rename = "type")]
    pub company_type: String,

    /// Sector label; one of [`crate::Sector`] when entered through the form
    pub sector: String,

    pub short_description: String,
    pub full_description: String,

    /// Display order is insertion order
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub markets_served: Vec<String>,

    pub location: String,
    pub size: String,

    /// Image URLs, never fetched or validated
    pub logo: String,
    pub cover: String,

    #[serde(default)]
    pub contact: Contact,

    /// Set by the external store, never by the client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Company {
    /// Create a company with the required scalars; everything else empty
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        company_type: impl Into<String>,
        sector: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            company_type: company_type.into(),
            sector: sector.into(),
            ..Default::default()
        }
    }

    /// Builder: set both descriptions
    #[must_use]
    pub fn descriptions(mut self, short: impl Into<String>, full: impl Into<String>) -> Self {
        self.short_description = short.into();
        self.full_description = full.into();
        self
    }

    /// Builder: set location
    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Builder: set size label
    #[must_use]
    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    /// Builder: set products
    #[must_use]
    pub fn products<I, S>(mut self, products: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.products = products.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set services
    #[must_use]
    pub fn services<I, S>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.services = services.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set markets served
    #[must_use]
    pub fn markets_served<I, S>(mut self, markets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markets_served = markets.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set logo and cover URLs
    #[must_use]
    pub fn images(mut self, logo: impl Into<String>, cover: impl Into<String>) -> Self {
        self.logo = logo.into();
        self.cover = cover.into();
        self
    }

    /// Builder: set contact details
    #[must_use]
    pub fn contact(mut self, contact: Contact) -> Self {
        self.contact = contact;
        self
    }
}

/// How to reach a company
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub website: String,
    pub whatsapp: String,
}

impl Contact {
    /// Direct chat link: the number with every whitespace character removed
    #[must_use]
    pub fn whatsapp_link(&self) -> Option<String> {
        let number: String = self
            .whatsapp
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if number.is_empty() {
            return None;
        }
        Some(format!("https://wa.me/{number}"))
    }

    #[must_use]
    pub fn mailto_link(&self) -> Option<String> {
        let email = self.email.trim();
        if email.is_empty() {
            return None;
        }
        Some(format!("mailto:{email}"))
    }
}
