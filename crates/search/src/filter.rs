use crate::error::Result;
use directory_model::{Company, Sector};
use serde::Serialize;
use std::fmt;

/// Sentinel label that disables the sector predicate
pub const ALL_SECTORS: &str = "All";

/// Sector criterion: everything, or one exact sector label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectorFilter {
    #[default]
    All,
    Only(Sector),
}

impl SectorFilter {
    /// Parse "All" (any case) or a sector label
    pub fn parse(label: &str) -> Result<Self> {
        let label = label.trim();
        if label.is_empty() || label.eq_ignore_ascii_case(ALL_SECTORS) {
            return Ok(Self::All);
        }
        Ok(Self::Only(Sector::parse(label)?))
    }

    #[must_use]
    pub fn matches(self, company: &Company) -> bool {
        match self {
            Self::All => true,
            Self::Only(sector) => sector.is_label(&company.sector),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => ALL_SECTORS,
            Self::Only(sector) => sector.label(),
        }
    }
}

impl fmt::Display for SectorFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for SectorFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// The three listing criteria, combined conjunctively.
///
/// `query` is matched against name and short description, `location`
/// against location; both are case-insensitive substring tests, so an empty
/// criterion matches every company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompanyFilter {
    pub query: String,
    pub location: String,
    pub sector: SectorFilter,
}

impl CompanyFilter {
    #[must_use]
    pub fn new(query: impl Into<String>, location: impl Into<String>, sector: SectorFilter) -> Self {
        Self {
            query: query.into(),
            location: location.into(),
            sector,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || !self.location.is_empty() || self.sector != SectorFilter::All
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn matches(&self, company: &Company) -> bool {
        let query = self.query.to_lowercase();
        let location = self.location.to_lowercase();
        self.matches_lowered(company, &query, &location)
    }

    fn matches_lowered(&self, company: &Company, query: &str, location: &str) -> bool {
        let matches_search = contains_folded(&company.name, query)
            || contains_folded(&company.short_description, query);
        let matches_location = contains_folded(&company.location, location);
        matches_search && matches_location && self.sector.matches(company)
    }

    /// Companies satisfying every criterion, in input order
    #[must_use]
    pub fn apply<'a>(&self, companies: &'a [Company]) -> Vec<&'a Company> {
        let query = self.query.to_lowercase();
        let location = self.location.to_lowercase();
        let matched: Vec<&Company> = companies
            .iter()
            .filter(|company| self.matches_lowered(company, &query, &location))
            .collect();
        log::debug!(
            "Filter (query={:?}, location={:?}, sector={}) kept {}/{}",
            self.query,
            self.location,
            self.sector,
            matched.len(),
            companies.len()
        );
        matched
    }
}

/// Owned variant of [`CompanyFilter::apply`]
#[must_use]
pub fn filter_companies(
    companies: &[Company],
    query: &str,
    location: &str,
    sector: SectorFilter,
) -> Vec<Company> {
    CompanyFilter::new(query, location, sector)
        .apply(companies)
        .into_iter()
        .cloned()
        .collect()
}

fn contains_folded(haystack: &str, lowered_needle: &str) -> bool {
    lowered_needle.is_empty() || haystack.to_lowercase().contains(lowered_needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn company(id: &str, name: &str, sector: Sector, location: &str, short: &str) -> Company {
        Company::new(id, name, "Produttore", sector.label())
            .location(location)
            .descriptions(short, "")
    }

    fn sample() -> Vec<Company> {
        vec![
            company("pk-1", "EcoPack Solutions", Sector::Packaging, "Padova, IT", "Packaging sostenibile"),
            company("pk-2", "TableArt Exclusive", Sector::Packaging, "Firenze, IT", "Tableware di design"),
            company("rt-2", "Chef in Box", Sector::ReadyToEat, "Roma, IT", "Meal kit per uffici"),
            company("dc-1", "Arredo Contract Italia", Sector::DesignConcept, "Milano, IT", "Allestimenti hotel"),
            company("x-1", "Green Eco Mobili", Sector::DesignConcept, "Milano, IT", "Arredo riciclato"),
        ]
    }

    fn ids(companies: &[&Company]) -> Vec<String> {
        companies.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn all_sector_with_empty_text_keeps_everything() {
        let companies = sample();
        let matched = CompanyFilter::default().apply(&companies);
        assert_eq!(matched.len(), companies.len());
    }

    #[test]
    fn sector_filter_uses_exact_label() {
        let companies = sample();
        let filter = CompanyFilter::new("", "", SectorFilter::Only(Sector::DesignConcept));
        assert_eq!(ids(&filter.apply(&companies)), vec!["dc-1", "x-1"]);
    }

    #[test]
    fn query_matches_name_or_short_description() {
        let companies = sample();
        let by_name = CompanyFilter::new("chef", "", SectorFilter::All);
        assert_eq!(ids(&by_name.apply(&companies)), vec!["rt-2"]);

        let by_description = CompanyFilter::new("SOSTENIBILE", "", SectorFilter::All);
        assert_eq!(ids(&by_description.apply(&companies)), vec!["pk-1"]);
    }

    #[test]
    fn location_is_case_insensitive() {
        let companies = sample();
        let upper = CompanyFilter::new("", "MILANO", SectorFilter::All);
        let lower = CompanyFilter::new("", "milano", SectorFilter::All);
        assert_eq!(ids(&upper.apply(&companies)), ids(&lower.apply(&companies)));
        assert_eq!(ids(&upper.apply(&companies)), vec!["dc-1", "x-1"]);
    }

    #[test]
    fn criteria_combine_conjunctively() {
        let companies = sample();
        let filter = CompanyFilter::new("eco", "", SectorFilter::Only(Sector::Packaging));
        assert_eq!(ids(&filter.apply(&companies)), vec!["pk-1"]);
    }

    #[test]
    fn sector_filter_parse_accepts_sentinel() {
        assert_eq!(SectorFilter::parse("All").unwrap(), SectorFilter::All);
        assert_eq!(SectorFilter::parse("  all ").unwrap(), SectorFilter::All);
        assert_eq!(SectorFilter::parse("").unwrap(), SectorFilter::All);
        assert_eq!(
            SectorFilter::parse("PRODOTTI SURGELATI").unwrap(),
            SectorFilter::Only(Sector::Frozen)
        );
        assert!(SectorFilter::parse("Surgelati").is_err());
    }

    #[test]
    fn active_flag_and_clear() {
        let mut filter = CompanyFilter::new("", "", SectorFilter::Only(Sector::Services));
        assert!(filter.is_active());
        filter.clear();
        assert!(!filter.is_active());
        assert_eq!(filter, CompanyFilter::default());
    }
}
