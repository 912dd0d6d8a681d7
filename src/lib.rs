//! # AirOps Dispatch Engine
//!
//! Daily assignment of aircraft to passenger routes and charters for a small
//! air operator's dispatch desk. For each operating day a finite pool of
//! expected passengers per route is distributed across aircraft legs, with
//! seat capacity, pool consumption and aircraft position drift (nightstops)
//! tracked as the board changes, honoring a recurring weekly flight
//! template.
//!
//! ## Features
//!
//! - **Pool allocation**: consumed/remaining/spare-seat accounting per route,
//!   including through/connecting pax riding on another route's pool
//! - **Warnings, not errors**: over-capacity and over-pool conditions are
//!   flagged with severities but never block a save
//! - **Board lifecycle**: lazy per-date boards reconciled against the active
//!   fleet, saved last-write-wins with an append-only audit trail
//! - **Weekly template**: recurring slots matched to concrete aircraft and
//!   turned into draft legs with derived arrival times
//! - **Program export**: a read-only daily program projection with load
//!   annotations and a nightstop summary
//! - **HTTP API**: axum REST endpoints for the desk frontend
//!
//! ## Architecture
//!
//! - [`models`]: domain records (airports, fleet, routes, charters, boards,
//!   template slots) and clock/weekday primitives
//! - [`services`]: pure computations over an in-memory snapshot
//! - [`db`]: repository traits, in-memory and JSON-file backends, and the
//!   best-effort store service layer
//! - [`http`]: REST surface (feature `http-server`)

pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
