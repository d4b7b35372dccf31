//! Customer Call Bot - Simulated customer for support-call practice
//!
//! This crate drives an automated customer through a scripted support call:
//! it introduces itself, confirms the department, authenticates and asks
//! about its plan, reacting to whatever the human agent says.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
