use rust_decimal::prelude::*;

use crate::domain::catalog::beverage::{BeverageCatalog, BeverageSelections};
use crate::domain::catalog::gaming_option::GamingCatalog;

const DECIMAL_PLACES: u32 = 2;

/// Rounds a monetary amount to two decimal places, midpoints away from zero.
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a session length in minutes to billable hours.
#[inline]
pub fn hours_from_minutes(minutes: u32) -> Decimal {
    Decimal::from(minutes) / Decimal::from(60)
}

fn saturating_product(price: Decimal, factor: Decimal, item: &str) -> Decimal {
    price.checked_mul(factor).unwrap_or_else(|| {
        log::warn!("Price of '{}' ({} x {}) overflows, capping it at {}.", item, price, factor, Decimal::MAX);
        Decimal::MAX
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceBreakdown {
    pub gaming: Decimal,
    pub beverage: Decimal,
    pub total: Decimal,
}

/// Stateless price calculator over the gaming and beverage catalogs.
#[derive(Debug, Clone, Copy)]
pub struct PricingEngine<'a> {
    gaming: &'a GamingCatalog,
    beverages: &'a BeverageCatalog,
}

impl<'a> PricingEngine<'a> {
    pub fn new(gaming: &'a GamingCatalog, beverages: &'a BeverageCatalog) -> Self {
        PricingEngine { gaming, beverages }
    }

    /// Price of the gaming part of a session.
    ///
    /// Fixed rate options bill at least one hour. With the discount applied and at least one and a
    /// half hours played, half an hour is free instead. The variable rate option bills
    /// `custom_rate * hours` exactly and ignores the discount. Unknown options cost nothing.
    /// Amounts past the `Decimal` range saturate at `Decimal::MAX`.
    pub fn gaming_price(&self, option: &str, hours: Decimal, custom_rate: Option<Decimal>, discount_applied: bool) -> Decimal {
        if hours <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let Some(spec) = self.gaming.get(option) else {
            log::debug!("No hourly rate for gaming option '{}', pricing it at 0.", option);
            return Decimal::ZERO;
        };

        if spec.variable_rate {
            return saturating_product(custom_rate.unwrap_or(Decimal::ZERO), hours, option);
        }

        let one_and_a_half = Decimal::new(15, 1);
        let billed_hours = if discount_applied && hours >= one_and_a_half { hours - Decimal::new(5, 1) } else { hours.max(Decimal::ONE) };

        saturating_product(spec.hourly_rate, billed_hours, option)
    }

    /// Sum of unit price times quantity. Keys the catalog no longer knows are priced at 0.
    pub fn beverage_price(&self, selections: &BeverageSelections) -> Decimal {
        selections
            .iter()
            .filter(|(_, quantity)| **quantity > 0)
            .map(|(key, quantity)| match self.beverages.unit_price(key) {
                Some(price) => saturating_product(price, Decimal::from(*quantity), &key.to_string()),
                None => {
                    log::debug!("Beverage '{}' is not in the catalog, pricing it at 0.", key);
                    Decimal::ZERO
                }
            })
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    pub fn quote(
        &self,
        option: &str,
        hours: Decimal,
        custom_rate: Option<Decimal>,
        discount_applied: bool,
        selections: &BeverageSelections,
    ) -> PriceBreakdown {
        let gaming = round_money(self.gaming_price(option, hours, custom_rate, discount_applied));
        let beverage = round_money(self.beverage_price(selections));

        PriceBreakdown { gaming, beverage, total: gaming.saturating_add(beverage) }
    }
}
