//! Checkout handoff to the shop's WhatsApp.
//!
//! Checkout reads the cart once, formats it as a message and opens a
//! `wa.me` link addressed to the shop. What happens to the order after
//! that is outside the store.

use crate::cart::{CartLine, CartTotals};
use crate::checkout::OrderNumber;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Checkout settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Shop's WhatsApp number. Spaces, dashes and a leading `+` are
    /// allowed; only digits are used.
    #[serde(default)]
    pub whatsapp_number: String,
}

/// Invoice payload for an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSummary {
    /// The order number.
    pub order_number: OrderNumber,
    /// Lines as they were in the cart at checkout.
    pub items: Vec<CartLine>,
    /// Grand total.
    pub total: Money,
    /// When checkout happened.
    pub date: DateTime<Utc>,
}

/// Everything the UI needs to hand an order off.
#[derive(Debug, Clone, PartialEq)]
pub struct Handoff {
    /// Message body, unencoded.
    pub message: String,
    /// `https://wa.me/<number>?text=<message>`.
    pub whatsapp_url: String,
    /// Invoice payload.
    pub summary: OrderSummary,
}

/// Build the handoff for a cart.
///
/// Returns [`CommerceError::EmptyCart`] for an empty cart and
/// [`CommerceError::ValidationError`] if no WhatsApp number is configured.
pub fn prepare_handoff(
    lines: &[CartLine],
    order_number: OrderNumber,
    config: &CheckoutConfig,
    currency: Currency,
    placed_at: DateTime<Utc>,
) -> Result<Handoff, CommerceError> {
    if lines.is_empty() {
        return Err(CommerceError::EmptyCart);
    }

    let number = whatsapp_digits(&config.whatsapp_number)?;
    let totals = CartTotals::compute(lines, currency)?;
    let message = order_message(order_number, &totals, lines);
    let whatsapp_url = format!(
        "https://wa.me/{}?text={}",
        number,
        utf8_percent_encode(&message, URI_COMPONENT)
    );

    tracing::debug!(
        order_number = %order_number,
        lines = lines.len(),
        total = %totals.subtotal,
        "prepared checkout handoff"
    );

    Ok(Handoff {
        message,
        whatsapp_url,
        summary: OrderSummary {
            order_number,
            items: lines.to_vec(),
            total: totals.subtotal,
            date: placed_at,
        },
    })
}

fn order_message(order_number: OrderNumber, totals: &CartTotals, lines: &[CartLine]) -> String {
    let mut out = vec![format!("Order {}", order_number)];
    for (line, priced) in lines.iter().zip(&totals.lines) {
        out.push(format!(
            "{} x{} - {}",
            line.product.name,
            line.quantity,
            priced.unit_price.display()
        ));
    }
    out.push(format!("Total: {}", totals.subtotal.display()));
    out.join("\n")
}

fn whatsapp_digits(number: &str) -> Result<String, CommerceError> {
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(CommerceError::ValidationError(
            "checkout.whatsapp_number is not set".to_string(),
        ));
    }
    Ok(digits)
}
