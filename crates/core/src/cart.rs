//! The in-memory shopping cart.
//!
//! A [`Cart`] is an insertion-ordered list of [`CartLine`]s, unique by
//! product name. Adding a product whose name already has a line increments
//! that line instead of appending a duplicate; a quantity that falls to
//! zero removes the line. Lines are addressed by a per-cart [`LineId`]
//! rather than list position, so a control rendered before a removal can
//! never mutate the wrong line.
//!
//! Prices are opaque display strings. The cart never parses or sums them.

use serde::{Deserialize, Serialize};

use crate::types::LineId;

/// A catalog product as handed to the cart.
///
/// All fields are display text; `name` doubles as the merge key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    /// Opaque display string, e.g. `"$10"`. Never parsed.
    pub price: String,
    pub image: String,
}

/// One product entry in the cart.
///
/// `quantity` is at least 1 for as long as the line exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: LineId,
    pub name: String,
    pub price: String,
    pub image: String,
    pub quantity: u32,
}

/// Direction of a single-step quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delta {
    Increase,
    Decrease,
}

/// Outcome of [`Cart::change_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line now has this quantity.
    Updated(u32),
    /// The quantity reached zero and the line was removed.
    Removed,
    /// No line with that ID exists (e.g. it was removed by an earlier
    /// click). Nothing was mutated.
    UnknownLine,
}

/// The visitor's in-progress selection of products.
///
/// Created empty, mutated by add/quantity operations, cleared by a
/// confirmed checkout. Lives only in process memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    next_line_id: i32,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cart's lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines (not total quantity).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Add a product to the cart, merging by exact name match.
    ///
    /// If a line with the same name exists its quantity is incremented by
    /// one and its stored price/image are left untouched (first write wins
    /// for display fields). Otherwise a new line with quantity 1 is
    /// appended. Returns the ID of the affected line.
    pub fn add_or_increment(&mut self, product: &Product) -> LineId {
        if let Some(line) = self.lines.iter_mut().find(|l| l.name == product.name) {
            line.quantity += 1;
            return line.id;
        }

        let id = self.allocate_line_id();
        self.lines.push(CartLine {
            id,
            name: product.name.clone(),
            price: product.price.clone(),
            image: product.image.clone(),
            quantity: 1,
        });
        id
    }

    /// Step the quantity of the line with `id` up or down by one.
    ///
    /// A decrease from quantity 1 removes the line. An `id` that does not
    /// resolve to a line (already removed, or never existed) is rejected
    /// without mutating anything and reported as
    /// [`QuantityChange::UnknownLine`].
    pub fn change_quantity(&mut self, id: LineId, delta: Delta) -> QuantityChange {
        let Some(pos) = self.lines.iter().position(|l| l.id == id) else {
            return QuantityChange::UnknownLine;
        };
        let Some(line) = self.lines.get_mut(pos) else {
            return QuantityChange::UnknownLine;
        };

        match delta {
            Delta::Increase => {
                line.quantity += 1;
                QuantityChange::Updated(line.quantity)
            }
            Delta::Decrease => {
                line.quantity -= 1;
                let remaining = line.quantity;
                if remaining == 0 {
                    self.lines.remove(pos);
                    QuantityChange::Removed
                } else {
                    QuantityChange::Updated(remaining)
                }
            }
        }
    }

    /// Remove every line. Used by the confirmed checkout.
    pub fn reset(&mut self) {
        self.lines.clear();
    }

    /// Sum of all line quantities; 0 for an empty cart.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    fn allocate_line_id(&mut self) -> LineId {
        let id = LineId::new(self.next_line_id);
        self.next_line_id += 1;
        id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn shoe() -> Product {
        Product {
            name: "Shoe".to_string(),
            price: "$10".to_string(),
            image: "shoe.png".to_string(),
        }
    }

    fn product(name: &str) -> Product {
        Product {
            name: name.to_string(),
            price: "$1".to_string(),
            image: format!("{}.png", name.to_lowercase()),
        }
    }

    #[test]
    fn test_add_creates_line_with_quantity_one() {
        let mut cart = Cart::new();
        cart.add_or_increment(&shoe());

        assert_eq!(cart.len(), 1);
        let line = &cart.lines()[0];
        assert_eq!(line.name, "Shoe");
        assert_eq!(line.price, "$10");
        assert_eq!(line.image, "shoe.png");
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn test_add_same_name_merges_instead_of_duplicating() {
        let mut cart = Cart::new();
        let first = cart.add_or_increment(&shoe());
        let second = cart.add_or_increment(&shoe());

        assert_eq!(first, second);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_merge_keeps_first_price_and_image() {
        let mut cart = Cart::new();
        cart.add_or_increment(&shoe());
        cart.add_or_increment(&Product {
            name: "Shoe".to_string(),
            price: "$99".to_string(),
            image: "other.png".to_string(),
        });

        let line = &cart.lines()[0];
        assert_eq!(line.price, "$10");
        assert_eq!(line.image, "shoe.png");
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_decrement_to_zero_removes_line() {
        let mut cart = Cart::new();
        let id = cart.add_or_increment(&shoe());

        assert_eq!(cart.change_quantity(id, Delta::Decrease), QuantityChange::Removed);
        assert!(cart.is_empty());
        assert!(cart.lines().iter().all(|l| l.quantity >= 1));
    }

    #[test]
    fn test_increment_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add_or_increment(&product("A"));
        let b = cart.add_or_increment(&product("B"));
        cart.add_or_increment(&product("C"));

        cart.change_quantity(b, Delta::Increase);

        let names: Vec<_> = cart.lines().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn test_removal_preserves_order_of_remaining_lines() {
        let mut cart = Cart::new();
        cart.add_or_increment(&product("A"));
        let b = cart.add_or_increment(&product("B"));
        cart.add_or_increment(&product("C"));

        cart.change_quantity(b, Delta::Decrease);

        let names: Vec<_> = cart.lines().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["A", "C"]);
    }

    #[test]
    fn test_total_quantity_sums_lines() {
        let mut cart = Cart::new();
        assert_eq!(cart.total_quantity(), 0);

        cart.add_or_increment(&product("A"));
        cart.add_or_increment(&product("A"));
        cart.add_or_increment(&product("B"));

        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_stale_line_id_is_rejected_silently() {
        let mut cart = Cart::new();
        let a = cart.add_or_increment(&product("A"));
        cart.add_or_increment(&product("B"));

        // Remove A, then replay a click that still references it.
        cart.change_quantity(a, Delta::Decrease);
        let before = cart.clone();

        assert_eq!(
            cart.change_quantity(a, Delta::Increase),
            QuantityChange::UnknownLine
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_line_ids_are_not_reused_after_removal() {
        let mut cart = Cart::new();
        let a = cart.add_or_increment(&product("A"));
        cart.change_quantity(a, Delta::Decrease);

        let next = cart.add_or_increment(&product("A"));
        assert_ne!(a, next);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut cart = Cart::new();
        cart.add_or_increment(&product("A"));
        cart.add_or_increment(&product("B"));

        cart.reset();

        assert!(cart.is_empty());
        assert_eq!(cart.total_quantity(), 0);
    }

    // The scenario from the storefront walkthrough: add a shoe twice,
    // then step it back down to empty.
    #[test]
    fn test_shoe_scenario() {
        let mut cart = Cart::new();

        let id = cart.add_or_increment(&shoe());
        assert_eq!(cart.lines()[0].quantity, 1);

        cart.add_or_increment(&shoe());
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);

        assert_eq!(
            cart.change_quantity(id, Delta::Decrease),
            QuantityChange::Updated(1)
        );
        assert_eq!(
            cart.change_quantity(id, Delta::Decrease),
            QuantityChange::Removed
        );
        assert!(cart.is_empty());
    }
}
