use directory_model::{Company, CompanyRow, Contact, NewCompanyRow, Sector};
use pretty_assertions::assert_eq;

fn sample_company() -> Company {
    Company::new(
        "tc-2",
        "Cooling Smart",
        "Produttore",
        Sector::Technology.label(),
    )
    .descriptions(
        "Refrigerazione intelligente e abbattitori rapidi.",
        "Sistemi di refrigerazione connessi per il monitoraggio remoto.",
    )
    .products(["Abbattitori", "Armadi Frigo", "Abbattitori"])
    .services(["Monitoraggio IoT"])
    .markets_served(["Europa", "Medio Oriente"])
    .location("Bari, IT")
    .size("51-200 dipendenti")
    .images("https://logo/cs.svg", "https://cover/cs.jpg")
    .contact(Contact {
        email: "smart@cooling.it".to_string(),
        phone: "+39 080 334455".to_string(),
        website: "https://example.com".to_string(),
        whatsapp: "+39 333 000014".to_string(),
    })
}

#[test]
fn view_model_survives_a_trip_through_the_row_shape() {
    let company = sample_company();
    let back = Company::from(CompanyRow::from(&company));
    assert_eq!(back, company);
}

#[test]
fn round_trip_keeps_store_timestamp() {
    let mut company = sample_company();
    company.created_at = Some("2025-01-02T03:04:05Z".to_string());

    let json = serde_json::to_string(&CompanyRow::from(&company)).unwrap();
    let row: CompanyRow = serde_json::from_str(&json).unwrap();
    assert_eq!(Company::from(row), company);
}

#[test]
fn duplicates_and_order_survive_in_sequences() {
    let company = sample_company();
    let row = NewCompanyRow::from(&company);
    assert_eq!(row.prodotti, vec!["Abbattitori", "Armadi Frigo", "Abbattitori"]);
    assert_eq!(row.mercati_serviti, vec!["Europa", "Medio Oriente"]);
}

#[test]
fn unknown_sector_passes_through_unvalidated() {
    let row: CompanyRow =
        serde_json::from_str(r#"{"id":"z","nome":"Odd","settore":"NON ESISTE"}"#).unwrap();
    let company = Company::from(row);
    assert_eq!(company.sector, "NON ESISTE");
    assert!(Sector::parse(&company.sector).is_err());
}
