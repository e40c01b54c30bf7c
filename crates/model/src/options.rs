use crate::error::{ModelError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Industry category a company is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    #[serde(rename = "DESIGN CONCEPT, ARREDAMENTI")]
    DesignConcept,
    #[serde(rename = "INGREDIENTI E SEMILAVORATI")]
    Ingredients,
    #[serde(rename = "PACKAGING & TABLEWARE")]
    Packaging,
    #[serde(rename = "PRODOTTI READY TO EAT")]
    ReadyToEat,
    #[serde(rename = "PRODOTTI SURGELATI")]
    Frozen,
    #[serde(rename = "SERVIZI E VARIE")]
    Services,
    #[serde(rename = "TECNOLOGIE E ATTREZZATURE")]
    Technology,
}

impl Sector {
    /// Every sector, in display order
    pub const ALL: [Sector; 7] = [
        Self::DesignConcept,
        Self::Ingredients,
        Self::Packaging,
        Self::ReadyToEat,
        Self::Frozen,
        Self::Services,
        Self::Technology,
    ];

    /// The stored label, which is also what filters compare against
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DesignConcept => "DESIGN CONCEPT, ARREDAMENTI",
            Self::Ingredients => "INGREDIENTI E SEMILAVORATI",
            Self::Packaging => "PACKAGING & TABLEWARE",
            Self::ReadyToEat => "PRODOTTI READY TO EAT",
            Self::Frozen => "PRODOTTI SURGELATI",
            Self::Services => "SERVIZI E VARIE",
            Self::Technology => "TECNOLOGIE E ATTREZZATURE",
        }
    }

    /// Match a label, ignoring case and surrounding whitespace
    pub fn parse(label: &str) -> Result<Self> {
        let wanted = label.trim();
        Self::ALL
            .into_iter()
            .find(|sector| sector.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ModelError::unknown_sector(wanted))
    }

    /// Whether a free-form stored label names this sector exactly
    #[must_use]
    pub fn is_label(self, stored: &str) -> bool {
        self.label() == stored
    }
}

impl FromStr for Sector {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Head-count bucket offered by the submission form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CompanySize {
    #[default]
    #[serde(rename = "1-10 dipendenti")]
    Micro,
    #[serde(rename = "11-50 dipendenti")]
    Small,
    #[serde(rename = "51-200 dipendenti")]
    Medium,
    #[serde(rename = "200+ dipendenti")]
    Large,
}

impl CompanySize {
    pub const ALL: [CompanySize; 4] = [Self::Micro, Self::Small, Self::Medium, Self::Large];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Micro => "1-10 dipendenti",
            Self::Small => "11-50 dipendenti",
            Self::Medium => "51-200 dipendenti",
            Self::Large => "200+ dipendenti",
        }
    }

    pub fn parse(label: &str) -> Result<Self> {
        let wanted = label.trim();
        Self::ALL
            .into_iter()
            .find(|size| size.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ModelError::unknown_size(wanted))
    }
}

impl FromStr for CompanySize {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Business role offered by the submission form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CompanyType {
    #[default]
    #[serde(rename = "Produttore")]
    Manufacturer,
    #[serde(rename = "Distributore")]
    Distributor,
    #[serde(rename = "Service Provider")]
    ServiceProvider,
    #[serde(rename = "Import/Export")]
    ImportExport,
}

impl CompanyType {
    pub const ALL: [CompanyType; 4] = [
        Self::Manufacturer,
        Self::Distributor,
        Self::ServiceProvider,
        Self::ImportExport,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Manufacturer => "Produttore",
            Self::Distributor => "Distributore",
            Self::ServiceProvider => "Service Provider",
            Self::ImportExport => "Import/Export",
        }
    }

    pub fn parse(label: &str) -> Result<Self> {
        let wanted = label.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ModelError::unknown_type(wanted))
    }
}

impl FromStr for CompanyType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CompanyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
