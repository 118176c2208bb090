//! StepStyle Core - Shared domain library.
//!
//! This crate provides the cart domain used by the storefront:
//!
//! - [`cart`] - The in-memory shopping cart: line merging, quantity
//!   changes with remove-at-zero, and totals
//! - [`checkout`] - The confirm/success checkout state machine
//! - [`types`] - Newtype wrappers for type-safe IDs
//!
//! # Architecture
//!
//! The core crate contains only types and logic - no I/O, no HTTP, no
//! rendering. The storefront crate owns all of those concerns and drives
//! this crate from its request handlers.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod types;

pub use cart::{Cart, CartLine, Delta, Product, QuantityChange};
pub use checkout::CheckoutFlow;
pub use types::*;
