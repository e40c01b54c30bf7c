use directory_model::Company;
use directory_protocol::Catalog;
use directory_store::DataOrigin;
use std::fmt::Write as _;

pub(crate) fn origin_line(origin: &DataOrigin) -> String {
    match origin.fallback_reason() {
        None => "Live directory".to_string(),
        Some(reason) => format!("Built-in example directory ({reason})"),
    }
}

/// One numbered line per company
pub(crate) fn listing<'a>(companies: impl IntoIterator<Item = &'a Company>) -> String {
    let mut out = String::new();
    for (idx, company) in companies.into_iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {} [{}] {} ({})",
            idx + 1,
            company.name,
            company.id,
            company.location,
            company.sector
        );
        if !company.short_description.is_empty() {
            let _ = writeln!(out, "     {}", company.short_description);
        }
    }
    out
}

pub(crate) fn profile(company: &Company) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", company.name, company.id);
    let _ = writeln!(out, "{} · {}", company.company_type, company.sector);
    if !company.location.is_empty() {
        let _ = writeln!(out, "Sede: {}", company.location);
    }
    if !company.size.is_empty() {
        let _ = writeln!(out, "Organico: {}", company.size);
    }
    if !company.short_description.is_empty() {
        let _ = writeln!(out, "\n{}", company.short_description);
    }
    if !company.full_description.is_empty() {
        let _ = writeln!(out, "\n{}", company.full_description);
    }

    for (title, items) in [
        ("Prodotti", &company.products),
        ("Servizi", &company.services),
        ("Mercati serviti", &company.markets_served),
    ] {
        if items.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n{title}:");
        for item in items {
            let _ = writeln!(out, "  - {item}");
        }
    }

    let contact = &company.contact;
    let mut lines = Vec::new();
    if let Some(mailto) = contact.mailto_link() {
        lines.push(format!("Email: {} <{mailto}>", contact.email));
    }
    if !contact.phone.is_empty() {
        lines.push(format!("Telefono: {}", contact.phone));
    }
    if !contact.website.is_empty() {
        lines.push(format!("Sito: {}", contact.website));
    }
    if let Some(link) = contact.whatsapp_link() {
        lines.push(format!("WhatsApp: {link}"));
    }
    if !lines.is_empty() {
        let _ = writeln!(out, "\nContatti:");
        for line in lines {
            let _ = writeln!(out, "  {line}");
        }
    }
    out
}

pub(crate) fn catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    for (title, values) in [
        ("Sectors", &catalog.sectors),
        ("Sizes", &catalog.sizes),
        ("Types", &catalog.types),
    ] {
        let _ = writeln!(out, "{title}:");
        for (idx, value) in values.iter().enumerate() {
            let _ = writeln!(out, "  {}. {value}", idx + 1);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use directory_model::Contact;
    use directory_store::FallbackReason;

    #[test]
    fn profile_shows_lists_and_contact_links() {
        let company = Company::new("x1", "Alfa", "Produttore", "SERVIZI E VARIE")
            .products(["A", "B"])
            .contact(Contact {
                email: "info@alfa.it".to_string(),
                whatsapp: "+39 333 111".to_string(),
                ..Default::default()
            });
        let text = profile(&company);
        assert!(text.contains("Prodotti:\n  - A\n  - B"));
        assert!(!text.contains("Servizi:"));
        assert!(text.contains("mailto:info@alfa.it"));
        assert!(text.contains("https://wa.me/+39333111"));
    }

    #[test]
    fn listing_is_numbered_from_one() {
        let companies = [
            Company::new("a", "Alfa", "Produttore", "SERVIZI E VARIE"),
            Company::new("b", "Beta", "Produttore", "SERVIZI E VARIE"),
        ];
        let text = listing(&companies);
        assert!(text.starts_with("  1. Alfa [a]"));
        assert!(text.contains("  2. Beta [b]"));
    }

    #[test]
    fn origin_line_names_the_fallback_reason() {
        let origin = DataOrigin::Fallback {
            reason: FallbackReason::NotConfigured,
        };
        assert!(origin_line(&origin).contains("not configured"));
        assert_eq!(origin_line(&DataOrigin::Live), "Live directory");
    }
}
