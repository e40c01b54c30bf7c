use directory_model::Company;
use once_cell::sync::Lazy;

const BUILTIN_COMPANIES: &str = include_str!("../data/fallback_companies.json");

static FALLBACK: Lazy<Vec<Company>> = Lazy::new(|| {
    serde_json::from_str(BUILTIN_COMPANIES).unwrap_or_else(|err| {
        log::error!("Built-in directory is malformed: {err}");
        Vec::new()
    })
});

/// The built-in example directory, two companies per sector
#[must_use]
pub fn fallback_companies() -> Vec<Company> {
    FALLBACK.clone()
}
