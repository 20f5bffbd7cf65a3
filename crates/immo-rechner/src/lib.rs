//! Rental valuation and sell-versus-rent comparison engine.
//!
//! The [`valuation`] module is pure: every calculation takes an immutable
//! [`valuation::PricingConfiguration`] and returns a fully populated result or a
//! [`valuation::ValuationError`]. Configuration loading, telemetry and the
//! HTTP-facing error type live alongside it for the request adapters.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod valuation;
