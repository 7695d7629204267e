//! Typed contracts between the dashboard client and the analytics backend.
//!
//! Everything here is target-independent: DTOs, the error taxonomy and the
//! pure data-shaping rules (currency parsing, chart math, row normalization)
//! that the frontend applies to already-aggregated payloads.

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod system;
