//! Quest dashboard HTTP service.
//!
//! The persistent model, leveling arithmetic and completion workflow live
//! in `quest-core`; this crate adds sessions, configuration and the axum
//! routes on top.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
