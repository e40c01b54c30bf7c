use async_trait::async_trait;
use directory_app::{
    FormError, FormField, ListingSeed, Navigation, RouteError, Screen, Session, SubmitOutcome,
    ViewKind, AppError, SAVE_ERROR_MESSAGE,
};
use directory_model::{CompanyRow, NewCompanyRow, Sector};
use directory_search::SectorFilter;
use directory_store::{
    fallback_companies, CompanySource, DataOrigin, DirectoryStore, FallbackReason, SortOrder,
    StoreError,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

/// A store that is configured but never answers successfully
struct Unreachable;

#[async_trait]
impl CompanySource for Unreachable {
    async fn select(&self, _order: SortOrder) -> directory_store::Result<Vec<CompanyRow>> {
        Err(StoreError::Other("connection refused".to_string()))
    }

    async fn insert(&self, _row: NewCompanyRow) -> directory_store::Result<()> {
        Err(StoreError::Other("connection refused".to_string()))
    }

    fn describe(&self) -> String {
        "unreachable".to_string()
    }
}

fn unreachable_store() -> DirectoryStore {
    DirectoryStore::new(Some(Arc::new(Unreachable)), SortOrder::NameAscending)
}

async fn loaded_offline() -> Session {
    let mut session = Session::new(DirectoryStore::offline());
    assert!(session.load().await);
    session
}

fn fill_required(session: &mut Session) {
    session.set_field(FormField::Name, "Nuova Azienda").unwrap();
    session
        .set_field(FormField::FullDescription, "Descrizione completa.")
        .unwrap();
    session.set_field(FormField::Email, "info@nuova.it").unwrap();
}

#[tokio::test]
async fn unreachable_store_shows_builtin_directory() {
    let mut session = Session::new(unreachable_store());
    assert!(session.load().await);

    assert_eq!(session.companies(), fallback_companies().as_slice());
    assert!(!session.is_loading());
    assert!(matches!(
        session.origin(),
        Some(DataOrigin::Fallback {
            reason: FallbackReason::QueryFailed(_)
        })
    ));

    match session.screen() {
        Screen::Home { sectors, featured } => {
            assert_eq!(sectors.len(), 7);
            let ids: Vec<_> = featured.iter().map(|c| c.id.as_str()).collect();
            assert_eq!(ids, vec!["dc-1", "dc-2", "in-1", "in-2", "pk-1", "pk-2", "rt-1", "rt-2"]);
        }
        other => panic!("expected home, got {other:?}"),
    }
}

#[tokio::test]
async fn sector_then_query_narrows_the_listing() {
    let mut session = loaded_offline().await;
    session
        .navigate(Navigation::Listing(ListingSeed::sector(SectorFilter::Only(
            Sector::Packaging,
        ))))
        .unwrap();
    let ids: Vec<_> = session.filtered().iter().map(|c| c.id.clone()).collect();
    assert_eq!(ids, vec!["pk-1", "pk-2"]);

    session.set_query("Eco");
    match session.screen() {
        Screen::Listing {
            total,
            companies,
            filter,
        } => {
            assert_eq!(total, 14);
            assert_eq!(filter.sector.label(), "PACKAGING & TABLEWARE");
            let names: Vec<_> = companies.iter().map(|c| c.name.as_str()).collect();
            assert_eq!(names, vec!["EcoPack Solutions"]);
        }
        other => panic!("expected listing, got {other:?}"),
    }

    assert!(session.has_active_filters());
    session.clear_filters();
    assert!(!session.has_active_filters());
    assert_eq!(session.filtered().len(), 14);
}

#[tokio::test]
async fn seed_only_overwrites_what_it_carries() {
    let mut session = loaded_offline().await;
    session.set_location("Padova");
    session.set_sector(SectorFilter::Only(Sector::Packaging));

    session
        .navigate(Navigation::Listing(ListingSeed::query("pack")))
        .unwrap();
    assert_eq!(session.filter().query, "pack");
    assert_eq!(session.filter().location, "Padova");
    assert_eq!(session.filter().sector, SectorFilter::Only(Sector::Packaging));
}

#[tokio::test]
async fn offline_submission_lands_at_the_head() {
    let mut session = loaded_offline().await;
    session.navigate(Navigation::AddCompany).unwrap();
    fill_required(&mut session);
    session
        .set_field(FormField::Products, "Prodotto A, Prodotto B")
        .unwrap();

    let outcome = session.submit().await.unwrap();
    let SubmitOutcome::Created { company, navigated } = outcome else {
        panic!("submission failed");
    };
    assert!(navigated);
    assert_eq!(session.view_kind(), ViewKind::Listing);
    assert!(!company.id.is_empty());
    assert_eq!(company.products, vec!["Prodotto A", "Prodotto B"]);
    assert_eq!(session.companies()[0], company);
    assert_eq!(session.companies().len(), 15);
}

#[tokio::test]
async fn opening_a_listed_company_shows_it_unmodified() {
    let mut session = loaded_offline().await;
    session
        .navigate(Navigation::Listing(ListingSeed::default()))
        .unwrap();
    session.set_query("gelo");

    let expected = session.filtered()[0].clone();
    session.open_listed(0).unwrap().unwrap();

    match session.screen() {
        Screen::Profile(company) => {
            assert_eq!(company.id, "su-1");
            assert_eq!(company.full_description, expected.full_description);
            assert_eq!(company.products, expected.products);
            assert_eq!(company.services, expected.services);
            assert_eq!(company.markets_served, expected.markets_served);
        }
        other => panic!("expected profile, got {other:?}"),
    }

    assert!(session.open_listed(99).unwrap().is_none());
}

#[tokio::test]
async fn unknown_profile_id_redirects() {
    let mut session = loaded_offline().await;
    let transition = session
        .navigate(Navigation::ProfileById("zzz".to_string()))
        .unwrap();
    assert!(transition.redirected);
    assert_eq!(session.view_kind(), ViewKind::Listing);
}

#[tokio::test]
async fn failed_save_keeps_the_form() {
    let mut session = Session::new(unreachable_store());
    session.load().await;
    session.navigate(Navigation::AddCompany).unwrap();
    fill_required(&mut session);

    let outcome = session.submit().await.unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Failed {
            message: SAVE_ERROR_MESSAGE
        }
    );
    assert_eq!(session.view_kind(), ViewKind::AddCompany);
    assert_eq!(session.form().name, "Nuova Azienda");
    match session.screen() {
        Screen::AddCompany { error, .. } => assert_eq!(error, Some("Errore nel salvataggio.")),
        other => panic!("expected form, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_form_is_not_sent() {
    let mut session = loaded_offline().await;
    session.navigate(Navigation::AddCompany).unwrap();
    session.set_field(FormField::Name, "Solo Nome").unwrap();

    let err = session.submit().await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Form(FormError::Required(FormField::FullDescription))
    ));
    assert_eq!(session.companies().len(), 14);
    assert_eq!(session.form_error(), Some("fullDescription is required"));
}

#[tokio::test]
async fn form_actions_need_the_form_view() {
    let mut session = loaded_offline().await;
    let err = session.set_field(FormField::Name, "X").unwrap_err();
    assert!(matches!(
        err,
        AppError::Route(RouteError::InvalidTransition {
            from: ViewKind::Home,
            ..
        })
    ));
    assert!(session.navigate(Navigation::Cancelled).is_err());
}

#[tokio::test]
async fn reopening_the_form_starts_fresh() {
    let mut session = loaded_offline().await;
    session.navigate(Navigation::AddCompany).unwrap();
    session.set_field(FormField::Name, "Bozza").unwrap();
    session.navigate(Navigation::Cancelled).unwrap();
    assert_eq!(session.view_kind(), ViewKind::Home);

    session.navigate(Navigation::AddCompany).unwrap();
    assert_eq!(session.form().name, "");
}

#[tokio::test]
async fn superseded_load_is_discarded() {
    let mut session = Session::new(DirectoryStore::offline());
    let first = session.begin_load();
    let second = session.begin_load();
    assert!(session.is_loading());

    let second = second.run().await;
    let first = first.run().await;

    assert!(session.finish_load(second));
    assert!(!session.finish_load(first));
    assert!(!session.is_loading());
    assert_eq!(session.companies().len(), 14);
}

#[tokio::test]
async fn late_create_is_recorded_without_moving_the_user() {
    let mut session = loaded_offline().await;
    session.navigate(Navigation::AddCompany).unwrap();
    fill_required(&mut session);

    let pending = session.begin_submit().unwrap();
    let submitted_id = pending.company().id.clone();
    session.navigate(Navigation::Home).unwrap();

    let finished = pending.run().await;
    let outcome = session.finish_submit(finished);

    assert!(matches!(
        outcome,
        SubmitOutcome::Created { navigated: false, .. }
    ));
    assert_eq!(session.view_kind(), ViewKind::Home);
    assert_eq!(session.companies()[0].id, submitted_id);
}

#[tokio::test]
async fn sessions_share_one_directory() {
    let store = DirectoryStore::offline();
    let mut writer = Session::new(store.clone());
    let mut reader = Session::new(store);
    writer.load().await;

    writer.navigate(Navigation::AddCompany).unwrap();
    fill_required(&mut writer);
    writer.submit().await.unwrap();

    reader.load().await;
    assert_eq!(reader.companies().len(), 15);
    assert_eq!(reader.companies()[0].name, "Nuova Azienda");
}

#[tokio::test]
async fn cancelled_load_stops_loading_and_is_ignored() {
    let mut session = loaded_offline().await;

    drop(session.begin_load());
    assert!(session.is_loading());
    session.cancel_load();
    assert!(!session.is_loading());

    let pending = session.begin_load();
    let loaded = pending.run().await;
    session.cancel_load();
    assert!(!session.finish_load(loaded));
    assert!(!session.is_loading());
    assert_eq!(session.companies().len(), 14);

    assert!(session.load().await);
    assert!(!session.is_loading());
}

#[tokio::test]
async fn create_result_does_not_replace_a_newer_load() {
    let store = DirectoryStore::offline();
    let mut session = Session::new(store.clone());
    session.load().await;
    session.navigate(Navigation::AddCompany).unwrap();
    fill_required(&mut session);

    let pending = session.begin_submit().unwrap();
    let submitted_id = pending.company().id.clone();
    let finished = pending.run().await;

    let mut other = Session::new(store);
    other.load().await;
    other.navigate(Navigation::AddCompany).unwrap();
    other.set_field(FormField::Name, "Dopo Srl").unwrap();
    other
        .set_field(FormField::FullDescription, "Arrivata dopo.")
        .unwrap();
    other.set_field(FormField::Email, "dopo@example.it").unwrap();
    other.submit().await.unwrap();

    assert!(session.load().await);
    assert_eq!(session.companies().len(), 16);

    let outcome = session.finish_submit(finished);
    assert!(matches!(
        outcome,
        SubmitOutcome::Created { navigated: true, .. }
    ));
    let companies = session.companies();
    assert_eq!(companies.len(), 16);
    assert_eq!(companies[0].name, "Dopo Srl");
    assert_eq!(
        companies.iter().filter(|c| c.id == submitted_id).count(),
        1
    );
}
