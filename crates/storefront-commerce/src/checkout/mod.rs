//! Checkout module.
//!
//! Order numbers and the handoff of a cart to the shop.

mod handoff;
mod order_number;

pub use handoff::{prepare_handoff, CheckoutConfig, Handoff, OrderSummary};
pub use order_number::{OrderNumber, RANDOM_SEQUENCE_LIMIT};
