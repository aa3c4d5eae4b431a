//! Salary Engine
//!
//! This crate computes take-home pay from gross salary (and the inverse) for
//! thirteen national tax jurisdictions, applying each country's progressive
//! brackets, social insurance contributions, regional surtaxes and personal
//! credits for the 2025 tax year. Results are estimates.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
