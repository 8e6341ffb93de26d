use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::utils::id::BeverageId;
use crate::domain::validation::{ValidationError, require};

pub const UNKNOWN_BEVERAGE: &str = "Unknown Beverage";

/// Reference to a sellable item. Standard items are keyed by their name, items added by an admin
/// at runtime by their generated id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BeverageKey {
    Fixed { name: String },
    Dynamic { id: BeverageId },
}

impl BeverageKey {
    pub fn fixed(name: impl Into<String>) -> Self {
        BeverageKey::Fixed { name: name.into() }
    }

    pub fn dynamic(id: impl Into<String>) -> Self {
        BeverageKey::Dynamic { id: BeverageId::new(id) }
    }

    /// The string stored in a session's beverage map.
    pub fn raw(&self) -> &str {
        match self {
            BeverageKey::Fixed { name } => name,
            BeverageKey::Dynamic { id } => id.as_str(),
        }
    }
}

impl fmt::Display for BeverageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw())
    }
}

/// Quantities per beverage. Entries with quantity zero are never kept.
pub type BeverageSelections = BTreeMap<BeverageKey, u32>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedBeverage {
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicBeverage {
    pub id: BeverageId,
    pub name: String,
    pub price: Decimal,
}

/// Line shown in the beverage picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableBeverage {
    pub key: BeverageKey,
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeverageCatalog {
    fixed: Vec<FixedBeverage>,
    dynamic: Vec<DynamicBeverage>,
}

impl BeverageCatalog {
    pub fn new(fixed: Vec<FixedBeverage>) -> Self {
        BeverageCatalog { fixed, dynamic: Vec::new() }
    }

    pub fn default_lounge() -> Self {
        let fixed = [
            ("Water (Small)", 10),
            ("Water (Large)", 20),
            ("Sprite", 20),
            ("Coca Cola (200ml)", 20),
            ("Thumps Up", 20),
            ("Fanta", 20),
            ("Mojito", 20),
            ("Kurkure", 30),
            ("Diet Coke", 40),
            ("Coca Cola (Large)", 40),
            ("Too Yum", 50),
            ("Cheetos", 50),
            ("Lays", 50),
            ("Coconut water", 55),
            ("Nachos", 90),
            ("Redbull", 125),
            ("Monster", 125),
        ]
        .into_iter()
        .map(|(name, price)| FixedBeverage { name: name.to_string(), price: Decimal::from(price) })
        .collect();

        BeverageCatalog::new(fixed)
    }

    /// Replaces the admin-added list, e.g. with the host's latest snapshot.
    pub fn with_dynamic(mut self, dynamic: Vec<DynamicBeverage>) -> Self {
        self.dynamic = dynamic;
        self
    }

    pub fn dynamic(&self) -> &[DynamicBeverage] {
        &self.dynamic
    }

    fn fixed_by_name(&self, name: &str) -> Option<&FixedBeverage> {
        self.fixed.iter().find(|beverage| beverage.name == name)
    }

    fn dynamic_by_id(&self, id: &BeverageId) -> Option<&DynamicBeverage> {
        self.dynamic.iter().find(|beverage| &beverage.id == id)
    }

    /// Interprets a stored key: standard names win, anything else is treated as a dynamic id.
    pub fn resolve_key(&self, raw: &str) -> BeverageKey {
        if self.fixed_by_name(raw).is_some() { BeverageKey::fixed(raw) } else { BeverageKey::dynamic(raw) }
    }

    pub fn unit_price(&self, key: &BeverageKey) -> Option<Decimal> {
        match key {
            BeverageKey::Fixed { name } => self.fixed_by_name(name).map(|beverage| beverage.price),
            BeverageKey::Dynamic { id } => self.dynamic_by_id(id).map(|beverage| beverage.price),
        }
    }

    pub fn display_name(&self, key: &BeverageKey) -> String {
        match key {
            BeverageKey::Fixed { name } if self.fixed_by_name(name).is_some() => name.clone(),
            BeverageKey::Dynamic { id } => {
                self.dynamic_by_id(id).map(|beverage| beverage.name.clone()).unwrap_or_else(|| UNKNOWN_BEVERAGE.to_string())
            }
            _ => UNKNOWN_BEVERAGE.to_string(),
        }
    }

    /// Adds an admin-defined item. Names of standard items and existing dynamic items are refused.
    pub fn add_dynamic(&mut self, name: &str, price: Decimal) -> Result<BeverageKey, ValidationError> {
        let name = require(name, "beverage name")?;

        if price <= Decimal::ZERO {
            return Err(ValidationError::InvalidBeveragePrice);
        }

        if self.fixed_by_name(name).is_some() {
            log::warn!("Refused to add beverage '{}': name belongs to a standard beverage.", name);
            return Err(ValidationError::ReservedBeverageName(name.to_string()));
        }

        if self.dynamic.iter().any(|beverage| beverage.name == name) {
            log::warn!("Refused to add beverage '{}': name already in use.", name);
            return Err(ValidationError::DuplicateBeverageName(name.to_string()));
        }

        let id = BeverageId::generate();
        self.dynamic.push(DynamicBeverage { id: id.clone(), name: name.to_string(), price });
        log::info!("Added beverage '{}' ({}) at {}.", name, id, price);

        Ok(BeverageKey::Dynamic { id })
    }

    /// Removes an admin-defined item. Sessions that still reference it keep the key, which then
    /// prices at zero and displays as unknown.
    pub fn remove_dynamic(&mut self, id: &BeverageId) -> bool {
        let before = self.dynamic.len();
        self.dynamic.retain(|beverage| &beverage.id != id);

        before != self.dynamic.len()
    }

    /// Standard and admin-defined items together, cheapest first.
    pub fn all_available(&self) -> Vec<AvailableBeverage> {
        let mut all: Vec<AvailableBeverage> = self
            .fixed
            .iter()
            .map(|beverage| AvailableBeverage { key: BeverageKey::fixed(&beverage.name), name: beverage.name.clone(), price: beverage.price })
            .chain(self.dynamic.iter().map(|beverage| AvailableBeverage {
                key: BeverageKey::Dynamic { id: beverage.id.clone() },
                name: beverage.name.clone(),
                price: beverage.price,
            }))
            .collect();

        all.sort_by(|a, b| a.price.cmp(&b.price));
        all
    }
}

impl Default for BeverageCatalog {
    fn default() -> Self {
        Self::default_lounge()
    }
}
