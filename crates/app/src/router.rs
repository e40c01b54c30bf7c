use crate::error::RouteError;
use directory_model::Company;
use directory_search::SectorFilter;
use serde::Serialize;
use std::fmt;

/// Which screen is showing, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewKind {
    Home,
    Listing,
    Profile,
    AddCompany,
}

impl ViewKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Listing => "listing",
            Self::Profile => "profile",
            Self::AddCompany => "add-company",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The current screen. A profile always carries the company it shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    Listing,
    Profile(Box<Company>),
    AddCompany,
}

impl View {
    pub const fn kind(&self) -> ViewKind {
        match self {
            Self::Home => ViewKind::Home,
            Self::Listing => ViewKind::Listing,
            Self::Profile(_) => ViewKind::Profile,
            Self::AddCompany => ViewKind::AddCompany,
        }
    }

    pub fn selected(&self) -> Option<&Company> {
        match self {
            Self::Profile(company) => Some(company),
            _ => None,
        }
    }
}

/// Filter values carried into the listing. Only the parts that are set
/// replace the current filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingSeed {
    pub query: Option<String>,
    pub sector: Option<SectorFilter>,
}

impl ListingSeed {
    pub fn sector(sector: SectorFilter) -> Self {
        Self {
            query: None,
            sector: Some(sector),
        }
    }

    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            sector: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Home,
    Listing(ListingSeed),
    Profile(Company),
    /// Resolved against the directory; unknown ids land on the listing
    ProfileById(String),
    AddCompany,
    /// Form accepted: add-company → listing
    Submitted,
    /// Form abandoned: add-company → home
    Cancelled,
}

impl Navigation {
    const fn action(&self) -> &'static str {
        match self {
            Self::Home => "go home",
            Self::Listing(_) => "open the listing",
            Self::Profile(_) | Self::ProfileById(_) => "open a profile",
            Self::AddCompany => "open the submission form",
            Self::Submitted => "finish a submission",
            Self::Cancelled => "cancel a submission",
        }
    }
}

/// Outcome of one navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: ViewKind,
    pub to: ViewKind,
    pub seed: Option<ListingSeed>,
    /// A profile was requested but the company was not found
    pub redirected: bool,
}

/// Four-state view machine; `home` is the initial state and none is terminal
#[derive(Debug, Clone, Default)]
pub struct ViewRouter {
    current: View,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &View {
        &self.current
    }

    pub fn kind(&self) -> ViewKind {
        self.current.kind()
    }

    pub fn navigate(
        &mut self,
        navigation: Navigation,
        directory: &[Company],
    ) -> Result<Transition, RouteError> {
        let from = self.current.kind();
        let action = navigation.action();
        let mut seed = None;
        let mut redirected = false;

        let next = match navigation {
            Navigation::Home => View::Home,
            Navigation::Listing(listing_seed) => {
                seed = Some(listing_seed);
                View::Listing
            }
            Navigation::Profile(company) => View::Profile(Box::new(company)),
            Navigation::ProfileById(id) => match directory.iter().find(|c| c.id == id) {
                Some(company) => View::Profile(Box::new(company.clone())),
                None => {
                    log::warn!("No company with id {id:?}; showing the listing instead");
                    redirected = true;
                    View::Listing
                }
            },
            Navigation::AddCompany => View::AddCompany,
            Navigation::Submitted | Navigation::Cancelled if from != ViewKind::AddCompany => {
                return Err(RouteError::InvalidTransition { from, action });
            }
            Navigation::Submitted => View::Listing,
            Navigation::Cancelled => View::Home,
        };

        self.current = next;
        let to = self.current.kind();
        log::debug!("View {from} -> {to}");
        Ok(Transition {
            from,
            to,
            seed,
            redirected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use directory_model::Sector;
    use pretty_assertions::assert_eq;

    fn directory() -> Vec<Company> {
        vec![
            Company::new("pk-1", "EcoPack Solutions", "Produttore", Sector::Packaging.label()),
            Company::new("sv-1", "Logistica FoodExpress", "Service Provider", Sector::Services.label()),
        ]
    }

    #[test]
    fn starts_at_home() {
        let router = ViewRouter::new();
        assert_eq!(router.kind(), ViewKind::Home);
        assert!(router.current().selected().is_none());
    }

    #[test]
    fn home_to_listing_carries_seed() {
        let mut router = ViewRouter::new();
        let seed = ListingSeed::sector(SectorFilter::Only(Sector::Frozen));
        let transition = router
            .navigate(Navigation::Listing(seed.clone()), &[])
            .unwrap();
        assert_eq!(transition.from, ViewKind::Home);
        assert_eq!(transition.to, ViewKind::Listing);
        assert_eq!(transition.seed, Some(seed));
    }

    #[test]
    fn listing_to_profile_keeps_the_exact_company() {
        let companies = directory();
        let mut router = ViewRouter::new();
        router.navigate(Navigation::Listing(ListingSeed::default()), &companies).unwrap();
        router
            .navigate(Navigation::Profile(companies[1].clone()), &companies)
            .unwrap();
        assert_eq!(router.current().selected(), Some(&companies[1]));
    }

    #[test]
    fn unknown_profile_id_redirects_to_listing() {
        let companies = directory();
        let mut router = ViewRouter::new();
        let transition = router
            .navigate(Navigation::ProfileById("missing".to_string()), &companies)
            .unwrap();
        assert!(transition.redirected);
        assert_eq!(router.kind(), ViewKind::Listing);

        router
            .navigate(Navigation::ProfileById("pk-1".to_string()), &companies)
            .unwrap();
        assert_eq!(router.current().selected().map(|c| c.id.as_str()), Some("pk-1"));
    }

    #[test]
    fn form_outcomes_only_leave_the_form() {
        let mut router = ViewRouter::new();
        let err = router.navigate(Navigation::Submitted, &[]).unwrap_err();
        assert_eq!(
            err,
            RouteError::InvalidTransition {
                from: ViewKind::Home,
                action: "finish a submission"
            }
        );
        assert_eq!(router.kind(), ViewKind::Home);

        router.navigate(Navigation::AddCompany, &[]).unwrap();
        router.navigate(Navigation::Submitted, &[]).unwrap();
        assert_eq!(router.kind(), ViewKind::Listing);

        router.navigate(Navigation::AddCompany, &[]).unwrap();
        router.navigate(Navigation::Cancelled, &[]).unwrap();
        assert_eq!(router.kind(), ViewKind::Home);
    }

    #[test]
    fn every_state_reaches_every_plain_target() {
        let companies = directory();
        let targets = || {
            vec![
                Navigation::Home,
                Navigation::Listing(ListingSeed::default()),
                Navigation::Profile(companies[0].clone()),
                Navigation::AddCompany,
            ]
        };
        for start in targets() {
            for target in targets() {
                let mut router = ViewRouter::new();
                router.navigate(start.clone(), &companies).unwrap();
                assert!(router.navigate(target, &companies).is_ok());
            }
        }
    }
}
