//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront commerce operations.
///
/// The cart and wishlist operations on [`crate::CommerceStore`] never return
/// these; storage trouble there is logged and treated as empty state.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Text is not a `DDMMYYYY-N` order number.
    #[error("Invalid order number: {0}")]
    InvalidOrderNumber(String),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(CommerceError::EmptyCart.to_string(), "Cart is empty");
        assert_eq!(
            CommerceError::InvalidOrderNumber("18-13-2026".to_string()).to_string(),
            "Invalid order number: 18-13-2026"
        );
        assert_eq!(
            CommerceError::ValidationError("checkout.whatsapp_number is not set".to_string())
                .to_string(),
            "Validation error: checkout.whatsapp_number is not set"
        );
    }
}
