//! Jewelry Storefront Library
//!
//! Core of a jewelry store backend: product catalog, per-visitor carts with
//! coupon pricing, authenticated checkout and an admin summary, served over
//! a JSON HTTP API.

// Domain modules
pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod pricing;

// Infrastructure
pub mod clock;
pub mod config;
pub mod error;
pub mod router;
pub mod state;
