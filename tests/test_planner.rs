mod common;

use rust_decimal::Decimal;

use common::{at, day, session, t};
use lounge_scheduler::domain::catalog::beverage::{BeverageCatalog, BeverageKey};
use lounge_scheduler::domain::catalog::gaming_option::GamingCatalog;
use lounge_scheduler::domain::catalog::station::StationCatalog;
use lounge_scheduler::domain::session::draft::{DurationChoice, SessionDraft, SessionEdit};
use lounge_scheduler::domain::session::planner::SessionPlanner;
use lounge_scheduler::domain::session::session::{PaymentMethod, last_note_for_customer};
use lounge_scheduler::domain::settings::EngineSettings;
use lounge_scheduler::domain::utils::id::StationId;
use lounge_scheduler::domain::validation::ValidationError;

struct Catalogs {
    stations: StationCatalog,
    options: GamingCatalog,
    beverages: BeverageCatalog,
    settings: EngineSettings,
}

impl Catalogs {
    fn new() -> Self {
        Catalogs {
            stations: StationCatalog::default_lounge(),
            options: GamingCatalog::default_lounge(),
            beverages: BeverageCatalog::default_lounge(),
            settings: EngineSettings::default(),
        }
    }

    fn planner(&self) -> SessionPlanner<'_> {
        SessionPlanner::new(&self.stations, &self.options, &self.beverages, &self.settings)
    }
}

fn pc_draft() -> SessionDraft {
    SessionDraft::new("Asha", "9876543210", "PC").at_station("PC-2").entering_at(t(23, 30)).lasting(DurationChoice::CustomHours(Decimal::new(15, 1)))
}

#[test]
fn creates_a_priced_session_crossing_midnight() {
    let catalogs = Catalogs::new();
    let mut draft = pc_draft();
    draft.beverages.insert(BeverageKey::fixed("Sprite"), 2);
    draft.beverages.insert(BeverageKey::fixed("Lays"), 0);

    let created = catalogs.planner().create(&draft, &[], at(23, 30)).unwrap();

    assert_eq!(created.serial_number, 1);
    assert_eq!(created.date, day());
    assert_eq!(created.station, Some(StationId::new("PC-2")));
    assert_eq!(created.exit_time, t(1, 0));
    assert_eq!(created.duration_minutes, 90);
    assert_eq!(created.gaming_price, Decimal::from(135));
    assert_eq!(created.beverage_price, Decimal::from(40));
    assert_eq!(created.total, Decimal::from(175));
    assert_eq!(created.beverages.len(), 1);
    assert_eq!(created.payment_method, PaymentMethod::Cash);
}

#[test]
fn serial_numbers_continue_within_the_day() {
    let catalogs = Catalogs::new();
    let existing = vec![session("a", 4, "PC", "PC-1", t(10, 0), 60), session("b", 7, "PC", "PC-3", t(11, 0), 60)];

    let created = catalogs.planner().create(&pc_draft(), &existing, at(23, 30)).unwrap();
    assert_eq!(created.serial_number, 8);
}

#[test]
fn missing_fields_are_reported_before_anything_else() {
    let catalogs = Catalogs::new();
    let planner = catalogs.planner();

    let nameless = SessionDraft { customer_name: "  ".to_string(), mobile_number: "1".to_string(), ..pc_draft() };
    assert_eq!(planner.create(&nameless, &[], at(12, 0)), Err(ValidationError::MissingField("name")));

    let no_entry = SessionDraft { entry_time: None, ..pc_draft() };
    assert_eq!(planner.create(&no_entry, &[], at(12, 0)), Err(ValidationError::MissingField("entry time")));

    let no_station = SessionDraft { station: None, ..pc_draft() };
    assert_eq!(planner.create(&no_station, &[], at(12, 0)), Err(ValidationError::MissingField("station")));
}

#[test]
fn rejects_bad_terms() {
    let catalogs = Catalogs::new();
    let planner = catalogs.planner();

    let short_mobile = SessionDraft { mobile_number: "98765".to_string(), ..pc_draft() };
    assert_eq!(planner.create(&short_mobile, &[], at(12, 0)), Err(ValidationError::InvalidMobileNumber));

    let zero_hours = pc_draft().lasting(DurationChoice::CustomHours(Decimal::ZERO));
    assert_eq!(planner.create(&zero_hours, &[], at(12, 0)), Err(ValidationError::NonPositiveDuration));

    let unknown = SessionDraft::new("Asha", "9876543210", "Arcade").at_station("PC-2").entering_at(t(12, 0));
    assert_eq!(planner.create(&unknown, &[], at(12, 0)), Err(ValidationError::UnknownGamingOption("Arcade".to_string())));

    let wrong_kind = SessionDraft::new("Asha", "9876543210", "PC").at_station("PS-1").entering_at(t(12, 0));
    assert!(matches!(planner.create(&wrong_kind, &[], at(12, 0)), Err(ValidationError::StationUnavailable { .. })));

    let no_rate = SessionDraft::new("Asha", "9876543210", "Custom Price").at_station("PS-1").entering_at(t(12, 0));
    assert_eq!(planner.create(&no_rate, &[], at(12, 0)), Err(ValidationError::InvalidCustomRate("Custom Price".to_string())));
}

#[test]
fn amounts_past_the_decimal_range_are_refused() {
    let catalogs = Catalogs::new();
    let planner = catalogs.planner();

    assert_eq!(DurationChoice::CustomHours(Decimal::MAX).minutes(), Err(ValidationError::DurationTooLong));
    let endless = pc_draft().lasting(DurationChoice::CustomHours(Decimal::MAX));
    assert_eq!(planner.create(&endless, &[], at(12, 0)), Err(ValidationError::DurationTooLong));

    let mut huge_rate = SessionDraft::new("Asha", "9876543210", "Custom Price").at_station("PS-1").entering_at(t(12, 0)).lasting(DurationChoice::Preset(120));
    huge_rate.custom_hourly_rate = Some(Decimal::MAX);
    assert_eq!(planner.create(&huge_rate, &[], at(12, 0)), Err(ValidationError::InvalidCustomRate("Custom Price".to_string())));

    // One hour at the largest rate still fits.
    huge_rate.duration = DurationChoice::Preset(60);
    assert_eq!(planner.create(&huge_rate, &[], at(12, 0)).unwrap().gaming_price, Decimal::MAX);
}

#[test]
fn occupied_station_is_refused() {
    let catalogs = Catalogs::new();
    let existing = vec![session("a", 1, "PC", "PC-2", t(12, 0), 120)];

    let draft = SessionDraft::new("Asha", "9876543210", "PC").at_station("PC-2").entering_at(t(12, 30));
    assert_eq!(
        catalogs.planner().create(&draft, &existing, at(12, 30)),
        Err(ValidationError::StationUnavailable { station: StationId::new("PC-2"), option: "PC".to_string() })
    );
}

#[test]
fn edit_keeps_entry_time_and_recomputes_the_bill() {
    let catalogs = Catalogs::new();
    let original = catalogs.planner().create(&pc_draft(), &[], at(23, 30)).unwrap();
    let sessions = vec![original.clone()];

    let edit = SessionEdit {
        gaming_option: "Custom Price".to_string(),
        station: original.station.clone(),
        duration: DurationChoice::Preset(120),
        discount_applied: true,
        custom_hourly_rate: Some(Decimal::from(80)),
        beverages: Default::default(),
        payment_method: PaymentMethod::Online,
    };

    let updated = catalogs.planner().edit(&original, &edit, &sessions, at(23, 45)).unwrap();

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.serial_number, original.serial_number);
    assert_eq!(updated.entry_time, t(23, 30));
    assert_eq!(updated.exit_time, t(1, 30));
    assert_eq!(updated.gaming_price, Decimal::from(160));
    assert_eq!(updated.total, Decimal::from(160));
    assert_eq!(updated.payment_method, PaymentMethod::Online);

    let back_to_pc = SessionEdit { gaming_option: "PC".to_string(), custom_hourly_rate: Some(Decimal::from(80)), ..edit };
    assert_eq!(catalogs.planner().edit(&updated, &back_to_pc, &[updated.clone()], at(23, 45)).unwrap().custom_hourly_rate, None);
}

#[test]
fn latest_note_is_recalled_by_mobile_number() {
    let mut first = session("a", 1, "PC", "PC-1", t(10, 0), 60);
    first.set_note("Prefers the corner rig");
    let mut second = session("b", 2, "PC", "PC-2", t(14, 0), 60);
    second.set_note("  Owes 20 from last visit ");
    let mut blank = session("c", 3, "PC", "PC-3", t(16, 0), 60);
    blank.set_note("   ");

    let sessions = vec![first, second.clone(), blank];
    let reminder = last_note_for_customer("9876543210", &sessions).unwrap();

    assert_eq!(reminder.note, "Owes 20 from last visit");
    assert_eq!(reminder.from, second.customer_name);
    assert_eq!(last_note_for_customer("9000000000", &sessions), None);

    second.clear_note();
    assert_eq!(second.note, None);
}
