use std::fs;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::domain::{MenuItem, OrderFlow, Step, tax};

#[derive(Debug, Error)]
pub enum ReceiptError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Flat snapshot of an order and the screen it was taken on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub step: Step,
    pub name: String,
    pub flavor: Option<String>,
    pub flavor_price: Decimal,
    pub extras: Vec<MenuItem>,
    pub round_up: bool,
    pub total: Decimal,
}

impl Receipt {
    pub fn from_flow(flow: &OrderFlow) -> Self {
        let state = flow.state();
        let flavor = flow
            .config()
            .catalog
            .iter()
            .find(|item| item.price == state.base_flavor_price())
            .map(|item| item.label.clone());

        Self {
            step: flow.step(),
            name: state.name().to_string(),
            flavor,
            flavor_price: state.base_flavor_price(),
            extras: state.selected_extras().iter().cloned().collect(),
            round_up: state.round_up_enabled(),
            total: state.total_price(),
        }
    }

    /// Sum of the flavor and extras, before tax.
    pub fn subtotal(&self) -> Decimal {
        self.flavor_price + self.extras.iter().map(|item| item.price).sum::<Decimal>()
    }
}

pub struct ReceiptRepository;

impl ReceiptRepository {
    pub fn save_json(receipt: &Receipt, filename: &str) -> Result<String, ReceiptError> {
        let json = serde_json::to_string_pretty(receipt)?;
        fs::write(filename, json)?;
        info!(filename, "receipt saved");
        Ok(filename.to_string())
    }

    pub fn load_json(filename: &str) -> Result<Receipt, ReceiptError> {
        let content = fs::read_to_string(filename)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Writes one row per line item, followed by tax, donation and total rows.
    pub fn export_csv(receipt: &Receipt, filename: &str, tax_rate: Decimal) -> Result<String, ReceiptError> {
        let mut writer = csv::Writer::from_path(filename)?;
        writer.write_record(["item", "amount"])?;

        let flavor = receipt.flavor.as_deref().unwrap_or("Ice cream");
        writer.write_record([flavor.to_string(), receipt.flavor_price.to_string()])?;
        for extra in &receipt.extras {
            writer.write_record([extra.label.clone(), extra.price.to_string()])?;
        }

        let subtotal = receipt.subtotal();
        let tax = tax(subtotal, tax_rate);
        writer.write_record(["Tax".to_string(), tax.to_string()])?;
        let donation = receipt.total - subtotal - tax;
        if receipt.round_up && donation > Decimal::ZERO {
            writer.write_record(["Round-up donation".to_string(), donation.to_string()])?;
        }
        writer.write_record(["Total".to_string(), receipt.total.to_string()])?;
        writer.flush()?;

        info!(filename, "receipt exported");
        Ok(filename.to_string())
    }
}
