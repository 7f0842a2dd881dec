//! Stockledger CLI tools.
//!
//! This crate provides the command-line front-ends over the computation
//! crates:
//!
//! - `stock-report`: Period ledger, ABC, velocity, audit, and stats reports
//! - `stock-check`: Data-quality checks over a snapshot
//!
//! # Example Usage
//!
//! ```bash
//! stock-report snapshot.json ledger --from 2024-03-01 --to 2024-03-31
//! stock-report snapshot.json abc --from 2024-03-01 --to 2024-03-31 --location branch-1
//! stock-check snapshot.json
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cmd;
pub mod table;
