//! movers-screener: Volume-spike and momentum screener for equities and crypto
//!
//! This library provides the core components for:
//! - A pure filter-and-rank screening engine (volume spikes + price momentum)
//! - Market data providers (deterministic mock, Financial Modeling Prep)
//! - Time-boxed snapshot caching
//! - Display formatting for the results table
//! - CLI with configurable criteria and named scenario presets
//! - Structured logging

pub mod cli;
pub mod config;
pub mod display;
pub mod provider;
pub mod screener;
pub mod telemetry;
