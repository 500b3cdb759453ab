use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::errors::ConfigError;

/// Sales tax applied at the confirmation step (5%).
pub const TAX_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Granularity of the charity round-up ($0.10).
pub const ROUND_UP_INCREMENT: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// A priced entry in one of the menu catalogs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    pub price: Decimal,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, price: Decimal) -> Self {
        Self {
            label: label.into(),
            price,
        }
    }

    /// Label as shown on screen, e.g. `Strawberry $1.50`.
    pub fn display_label(&self) -> String {
        format!("{} ${:.2}", self.label, self.price)
    }
}

/// Menu and tax settings the order flow prices against.
///
/// The application runs on [`PricingConfig::default`]; the JSON form exists
/// so tests can build alternative menus.
///
/// # Examples
///
/// ```
/// use icecream_land::domain::PricingConfig;
///
/// let config = PricingConfig::default();
/// assert_eq!(config.catalog.len(), 3);
/// assert_eq!(config.flavor("Strawberry").unwrap().price.to_string(), "1.50");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    pub catalog: Vec<MenuItem>,
    pub extras_catalog: Vec<MenuItem>,
    pub tax_rate: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            catalog: vec![
                MenuItem::new("Vanilla", Decimal::new(100, 2)),
                MenuItem::new("Strawberry", Decimal::new(150, 2)),
                MenuItem::new("Chocolate", Decimal::new(200, 2)),
            ],
            extras_catalog: vec![
                MenuItem::new("Sprinkles", Decimal::new(25, 2)),
                MenuItem::new("Cheese", Decimal::new(50, 2)),
                MenuItem::new("Veggies", Decimal::new(75, 2)),
            ],
            tax_rate: TAX_RATE,
        }
    }
}

impl PricingConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PricingConfig = serde_json::from_str(json)?;
        if config.catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        Ok(config)
    }

    pub fn flavor(&self, label: &str) -> Option<&MenuItem> {
        self.catalog.iter().find(|item| item.label == label)
    }

    pub fn extra(&self, label: &str) -> Option<&MenuItem> {
        self.extras_catalog.iter().find(|item| item.label == label)
    }
}

/// Fields of the order being assembled during one session.
///
/// Setters store values as given; deciding whether a value is acceptable is
/// left to [`OrderFlow`](super::OrderFlow), which is the only mutator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderState {
    name: String,
    base_flavor_price: Decimal,
    selected_extras: BTreeSet<MenuItem>,
    total_price: Decimal,
    round_up_enabled: bool,
}

impl OrderState {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_flavor_price(&self) -> Decimal {
        self.base_flavor_price
    }

    pub fn selected_extras(&self) -> &BTreeSet<MenuItem> {
        &self.selected_extras
    }

    pub fn is_extra_selected(&self, item: &MenuItem) -> bool {
        self.selected_extras.contains(item)
    }

    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    pub fn round_up_enabled(&self) -> bool {
        self.round_up_enabled
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    pub fn set_flavor_price(&mut self, value: Decimal) {
        self.base_flavor_price = value;
    }

    pub fn toggle_extra(&mut self, item: &MenuItem, selected: bool) {
        if selected {
            self.selected_extras.insert(item.clone());
        } else {
            self.selected_extras.remove(item);
        }
    }

    pub fn clear_extras(&mut self) {
        self.selected_extras.clear();
    }

    pub fn set_total_price(&mut self, value: Decimal) {
        self.total_price = value;
    }

    pub fn set_round_up(&mut self, enabled: bool) {
        self.round_up_enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_prices() {
        let config = PricingConfig::default();
        let prices: Vec<String> = config.catalog.iter().map(|i| i.price.to_string()).collect();
        assert_eq!(prices, vec!["1.00", "1.50", "2.00"]);

        let extras: Vec<String> = config.extras_catalog.iter().map(|i| i.price.to_string()).collect();
        assert_eq!(extras, vec!["0.25", "0.50", "0.75"]);
        assert_eq!(config.tax_rate, Decimal::new(5, 2));
    }

    #[test]
    fn test_constants() {
        assert_eq!(TAX_RATE, Decimal::new(5, 2));
        assert_eq!(ROUND_UP_INCREMENT, Decimal::new(1, 1));
    }

    #[test]
    fn test_display_label() {
        let item = MenuItem::new("Vanilla", Decimal::new(1, 0));
        assert_eq!(item.display_label(), "Vanilla $1.00");
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "catalog": [{"label": "Mango", "price": "3.25"}],
            "extrasCatalog": [{"label": "Nuts", "price": "0.40"}],
            "taxRate": "0.13"
        }"#;
        let config = PricingConfig::from_json(json).unwrap();
        assert_eq!(config.flavor("Mango").unwrap().price, Decimal::new(325, 2));
        assert_eq!(config.extra("Nuts").unwrap().price, Decimal::new(40, 2));
        assert_eq!(config.tax_rate, Decimal::new(13, 2));
        assert!(config.flavor("Vanilla").is_none());
    }

    #[test]
    fn test_config_from_json_rejects_empty_catalog() {
        let json = r#"{"catalog": [], "extrasCatalog": [], "taxRate": "0.05"}"#;
        assert!(matches!(PricingConfig::from_json(json), Err(ConfigError::EmptyCatalog)));
        assert!(matches!(PricingConfig::from_json("not json"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_order_state_defaults() {
        let state = OrderState::default();
        assert_eq!(state.name(), "");
        assert_eq!(state.base_flavor_price(), Decimal::ZERO);
        assert!(state.selected_extras().is_empty());
        assert_eq!(state.total_price(), Decimal::ZERO);
        assert!(!state.round_up_enabled());
    }

    #[test]
    fn test_order_state_setters() {
        let mut state = OrderState::default();
        state.set_name("  Ada ");
        assert_eq!(state.name(), "  Ada ");

        state.set_flavor_price(Decimal::new(150, 2));
        state.set_total_price(Decimal::new(225, 2));
        state.set_round_up(true);
        assert_eq!(state.base_flavor_price(), Decimal::new(150, 2));
        assert_eq!(state.total_price(), Decimal::new(225, 2));
        assert!(state.round_up_enabled());
    }

    #[test]
    fn test_toggle_extra() {
        let config = PricingConfig::default();
        let sprinkles = config.extra("Sprinkles").unwrap();
        let mut state = OrderState::default();

        state.toggle_extra(sprinkles, true);
        state.toggle_extra(sprinkles, true);
        assert_eq!(state.selected_extras().len(), 1);
        assert!(state.is_extra_selected(sprinkles));

        state.toggle_extra(sprinkles, false);
        assert!(!state.is_extra_selected(sprinkles));

        // Removing an item that is not selected is a no-op
        state.toggle_extra(sprinkles, false);
        assert!(state.selected_extras().is_empty());
    }
}
