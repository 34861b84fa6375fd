//! Shopping cart module.
//!
//! Contains the cart line type and cart pricing.

mod line;
mod pricing;

pub use line::{CartLine, MAX_QUANTITY_PER_LINE};
pub use pricing::{CartTotals, LineTotal};
