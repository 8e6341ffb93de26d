use rust_decimal::Decimal;

use lounge_scheduler::domain::catalog::beverage::{BeverageCatalog, BeverageKey, BeverageSelections};
use lounge_scheduler::domain::catalog::gaming_option::GamingCatalog;
use lounge_scheduler::domain::pricing::pricing_engine::{PricingEngine, hours_from_minutes};

fn dec(value: &str) -> Decimal {
    value.parse().unwrap()
}

#[test]
fn fixed_rate_bills_at_least_one_hour() {
    let options = GamingCatalog::default_lounge();
    let beverages = BeverageCatalog::default_lounge();
    let pricing = PricingEngine::new(&options, &beverages);

    assert_eq!(pricing.gaming_price("PS(2P)", hours_from_minutes(30), None, false), dec("110"));
    assert_eq!(pricing.gaming_price("PC", hours_from_minutes(60), None, false), dec("90"));
    assert_eq!(pricing.gaming_price("PC", hours_from_minutes(90), None, false), dec("135"));
    assert_eq!(pricing.gaming_price("Racing Cockpit", hours_from_minutes(120), None, false), dec("300"));
}

#[test]
fn discount_frees_half_an_hour_from_ninety_minutes_on() {
    let options = GamingCatalog::default_lounge();
    let beverages = BeverageCatalog::default_lounge();
    let pricing = PricingEngine::new(&options, &beverages);

    assert_eq!(pricing.gaming_price("PC", hours_from_minutes(120), None, true), dec("135"));
    assert_eq!(pricing.gaming_price("PS", hours_from_minutes(90), None, true), dec("120"));
    // Below one and a half hours the discount does not apply.
    assert_eq!(pricing.gaming_price("PC", hours_from_minutes(60), None, true), dec("90"));
}

#[test]
fn variable_rate_ignores_minimum_and_discount() {
    let options = GamingCatalog::default_lounge();
    let beverages = BeverageCatalog::default_lounge();
    let pricing = PricingEngine::new(&options, &beverages);

    assert_eq!(pricing.gaming_price("Custom Price", hours_from_minutes(90), Some(dec("75")), true), dec("112.5"));
    assert_eq!(pricing.gaming_price("Custom Price", hours_from_minutes(30), Some(dec("80")), false), dec("40"));
    assert_eq!(pricing.gaming_price("Custom Price", hours_from_minutes(30), None, false), Decimal::ZERO);
}

#[test]
fn unknown_option_and_zero_hours_cost_nothing() {
    let options = GamingCatalog::default_lounge();
    let beverages = BeverageCatalog::default_lounge();
    let pricing = PricingEngine::new(&options, &beverages);

    assert_eq!(pricing.gaming_price("Arcade", hours_from_minutes(60), None, false), Decimal::ZERO);
    assert_eq!(pricing.gaming_price("PC", Decimal::ZERO, None, false), Decimal::ZERO);
}

#[test]
fn quote_adds_beverages_and_rounds_to_cents() {
    let options = GamingCatalog::default_lounge();
    let beverages = BeverageCatalog::default_lounge();
    let pricing = PricingEngine::new(&options, &beverages);

    let mut selections = BeverageSelections::new();
    selections.insert(BeverageKey::fixed("Redbull"), 2);
    selections.insert(BeverageKey::fixed("Lays"), 1);
    selections.insert(BeverageKey::fixed("Nachos"), 0);
    selections.insert(BeverageKey::dynamic("gone"), 3);

    let quote = pricing.quote("Custom Price", hours_from_minutes(20), Some(dec("100")), false, &selections);

    assert_eq!(quote.gaming, dec("33.33"));
    assert_eq!(quote.beverage, dec("300"));
    assert_eq!(quote.total, dec("333.33"));
}

#[test]
fn admin_added_beverages_are_priced_while_they_exist() {
    let options = GamingCatalog::default_lounge();
    let mut beverages = BeverageCatalog::default_lounge();
    let key = beverages.add_dynamic("Cold Coffee", dec("65")).unwrap();

    let mut selections = BeverageSelections::new();
    selections.insert(key.clone(), 2);

    assert_eq!(PricingEngine::new(&options, &beverages).beverage_price(&selections), dec("130"));

    let BeverageKey::Dynamic { id } = key else { panic!("expected a dynamic key") };
    assert!(beverages.remove_dynamic(&id));
    assert_eq!(PricingEngine::new(&options, &beverages).beverage_price(&selections), Decimal::ZERO);
}
