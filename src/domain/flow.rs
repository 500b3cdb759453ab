//! The four-step ordering state machine.
//!
//! `OrderFlow` owns the session's [`OrderState`] and is the only thing that
//! mutates it. Every transition returns the step the caller should render
//! next, or an error describing why nothing changed.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::errors::{FlowError, FlowResult, ValidationError};
use super::models::{MenuItem, OrderState, PricingConfig};
use super::pricing::{PriceBreakdown, subtotal};

/// Screen the customer is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    /// Flavor selection
    Home,
    /// Extras and customer name
    Order,
    /// Price summary and round-up choice
    Confirmation,
    /// Paid summary; terminal
    Result,
}

impl Step {
    pub fn title(&self) -> &'static str {
        match self {
            Step::Home => "Welcome",
            Step::Order => "Add to your order",
            Step::Confirmation => "Order Confirmation",
            Step::Result => "Thank you",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Step::Result)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Home => "home",
            Step::Order => "order",
            Step::Confirmation => "confirmation",
            Step::Result => "result",
        };
        f.write_str(name)
    }
}

/// Passed to observers after every successful change.
#[derive(Debug)]
pub struct FlowEvent<'a> {
    pub previous: Step,
    pub step: Step,
    pub state: &'a OrderState,
}

type Observer = Box<dyn FnMut(&FlowEvent<'_>)>;

/// Drives one checkout session from flavor selection to the paid summary.
///
/// # Examples
///
/// ```
/// use icecream_land::domain::{OrderFlow, PricingConfig, Step};
///
/// let config = PricingConfig::default();
/// let mut flow = OrderFlow::new(config.clone());
///
/// flow.confirm_flavor(config.flavor("Strawberry").unwrap()).unwrap();
/// flow.toggle_extra(config.extra("Sprinkles").unwrap(), true).unwrap();
/// flow.toggle_extra(config.extra("Cheese").unwrap(), true).unwrap();
/// flow.confirm_order("Ada").unwrap();
/// assert_eq!(flow.state().total_price().to_string(), "2.25");
///
/// flow.set_round_up(true).unwrap();
/// assert_eq!(flow.accept_confirmation().unwrap(), Step::Result);
/// assert_eq!(flow.state().total_price().to_string(), "2.40");
/// ```
pub struct OrderFlow {
    config: PricingConfig,
    state: OrderState,
    step: Step,
    observers: Vec<Observer>,
}

impl fmt::Debug for OrderFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderFlow")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("step", &self.step)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for OrderFlow {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}

impl OrderFlow {
    pub fn new(config: PricingConfig) -> Self {
        Self {
            config,
            state: OrderState::default(),
            step: Step::Home,
            observers: Vec::new(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn state(&self) -> &OrderState {
        &self.state
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Registers a callback run after every successful transition or
    /// field change.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&FlowEvent<'_>) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Home -> Order. Records the flavor price and starts with no extras.
    pub fn confirm_flavor(&mut self, flavor: &MenuItem) -> FlowResult<Step> {
        self.expect_step(Step::Home, "choose a flavor")?;

        debug!(flavor = %flavor.label, price = %flavor.price, "flavor selected");
        self.state.set_flavor_price(flavor.price);
        self.state.clear_extras();
        Ok(self.advance(Step::Order))
    }

    pub fn toggle_extra(&mut self, item: &MenuItem, selected: bool) -> FlowResult<()> {
        self.expect_step(Step::Order, "change extras")?;

        debug!(extra = %item.label, selected, "extra toggled");
        self.state.toggle_extra(item, selected);
        self.notify(self.step);
        Ok(())
    }

    /// Order -> Confirmation. Fails without touching any field when the
    /// name is blank.
    pub fn confirm_order(&mut self, name: &str) -> FlowResult<Step> {
        self.expect_step(Step::Order, "confirm the order")?;

        if name.trim().is_empty() {
            warn!("order confirmation rejected: empty name");
            return Err(ValidationError::EmptyName.into());
        }

        let total = subtotal(self.state.base_flavor_price(), self.state.selected_extras());
        self.state.set_total_price(total);
        self.state.set_name(name);
        Ok(self.advance(Step::Confirmation))
    }

    pub fn set_round_up(&mut self, enabled: bool) -> FlowResult<()> {
        self.expect_step(Step::Confirmation, "change the round-up")?;

        debug!(enabled, "round-up toggled");
        self.state.set_round_up(enabled);
        self.notify(self.step);
        Ok(())
    }

    /// Confirmation -> Result. Applies tax and, if enabled, the charity
    /// round-up to the total.
    pub fn accept_confirmation(&mut self) -> FlowResult<Step> {
        self.expect_step(Step::Confirmation, "accept the confirmation")?;

        let breakdown = PriceBreakdown::new(self.state.total_price(), self.config.tax_rate);
        let total = breakdown.payable(self.state.round_up_enabled());
        info!(
            subtotal = %breakdown.subtotal,
            tax = %breakdown.tax,
            total = %total,
            round_up = self.state.round_up_enabled(),
            "order accepted"
        );
        self.state.set_total_price(total);
        Ok(self.advance(Step::Result))
    }

    /// Moves one screen back without touching the order.
    pub fn back(&mut self) -> FlowResult<Step> {
        let target = match self.step {
            Step::Order => Step::Home,
            Step::Confirmation => Step::Order,
            step => {
                return Err(FlowError::InvalidTransition {
                    step,
                    action: "go back",
                });
            }
        };
        Ok(self.advance(target))
    }

    /// Price summary for the confirmation screen. Only meaningful while the
    /// total still excludes tax.
    pub fn preview(&self) -> Option<PriceBreakdown> {
        match self.step {
            Step::Confirmation => Some(PriceBreakdown::new(
                self.state.total_price(),
                self.config.tax_rate,
            )),
            _ => None,
        }
    }

    fn expect_step(&self, expected: Step, action: &'static str) -> FlowResult<()> {
        if self.step == expected {
            Ok(())
        } else {
            warn!(step = %self.step, action, "transition not allowed");
            Err(FlowError::InvalidTransition {
                step: self.step,
                action,
            })
        }
    }

    fn advance(&mut self, next: Step) -> Step {
        let previous = self.step;
        self.step = next;
        info!(from = %previous, to = %next, "step changed");
        self.notify(previous);
        next
    }

    fn notify(&mut self, previous: Step) {
        let event = FlowEvent {
            previous,
            step: self.step,
            state: &self.state,
        };
        for observer in &mut self.observers {
            observer(&event);
        }
    }
}
