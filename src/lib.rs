//! tickflow: Streaming tick-replay engine for strategy backtesting
//!
//! This library provides the core components for:
//! - Tick source enumeration and per-line CSV parsing into quotes
//! - A bounded, backpressured channel between ingestion and consumption
//! - Pipeline orchestration with cooperative cancellation and fault
//!   propagation across both halves
//! - The trade request lifecycle (direction/level coupling, one-shot
//!   slippage, stop/limit revision) and the active request book
//! - A strategy boundary with a stock random strategy
//! - Run orchestration and one-shot terminal reporting

pub mod cli;
pub mod config;
pub mod consumer;
pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod report;
pub mod runner;
pub mod strategy;
pub mod telemetry;
pub mod trade;
