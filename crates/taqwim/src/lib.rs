//! # Taqwim
//!
//! Hijri dates and daily prayer schedules: a tabular Islamic calendar, an
//! offline solar calculator, and a resolver that tells you which prayer is
//! current, which is next and how long until it starts.
//!
//! This crate is a facade that re-exports functionality from the `taqwim` ecosystem.
//!
//! ## Modules
//!
//! - `types`: Core types (Coordinates, Prayer, EngineConfig, etc.)
//! - `calendar`: Julian Day and Hijri conversion
//! - `astronomy`: Offline prayer time calculation
//! - `schedule`: Next/current prayer and countdown
//! - `network`: Remote provider with caching (feature `async`)
//!
//! ## Usage
//!
//! ```rust
//! use taqwim::prelude::*;
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
//! let hijri = taqwim::get_hijri_date(date, &EngineConfig::default());
//! assert_eq!(hijri.to_string(), "1 Ramadan 1445 AH");
//! ```

pub use taqwim_core::*;
