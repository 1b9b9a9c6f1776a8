//! Boundary to the external cart state container.
//!
//! The cart itself lives outside this crate; checkout only needs to
//! read its lines, total them, and clear it after a confirmed payment
//! handoff. [`InMemoryCart`] is a plain implementation for tests and
//! embedding.

use adire_core::{CartLine, Money};

/// Read-and-clear view of the cart held by the surrounding application.
pub trait Cart {
    /// Current cart lines.
    fn lines(&self) -> &[CartLine];

    /// Sum of `unit_price * quantity` over the lines.
    fn subtotal(&self) -> Money {
        self.lines().iter().map(CartLine::line_total).sum()
    }

    fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }

    /// Discard all cart contents. Irreversible; called only once
    /// payment initiation has been confirmed.
    fn clear(&mut self);
}

/// A simple owned cart.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCart {
    lines: Vec<CartLine>,
}

impl InMemoryCart {
    #[must_use]
    pub const fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    pub fn push(&mut self, line: CartLine) {
        self.lines.push(line);
    }
}

impl Cart for InMemoryCart {
    fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtotal_and_clear() {
        let mut cart = InMemoryCart::default();
        cart.push(CartLine {
            name: "Shirt".to_string(),
            unit_price: Money::from_major(2000),
            quantity: 2,
            size: Some("M".to_string()),
            color: None,
            image: None,
        });
        cart.push(CartLine {
            name: "Cap".to_string(),
            unit_price: Money::from_major(1500),
            quantity: 1,
            size: None,
            color: None,
            image: None,
        });

        assert_eq!(cart.subtotal(), Money::from_major(5500));
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Money::ZERO);
    }
}
