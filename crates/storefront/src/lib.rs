//! StepStyle Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing the router and state to be driven in-process by tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod carts;
pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
