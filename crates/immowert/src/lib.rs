//! Core engine for statutory multi-method real-estate market valuation.
//!
//! The library accepts a structured description of a subject property plus
//! its supporting market data, runs the requested valuation procedures
//! (comparison, income, cost — each on top of a land-value building block),
//! applies rights/encumbrance deductions, and reconciles the procedure
//! outputs into one final value. Every numeric result is paired with an
//! ordered protocol of plain-text derivation steps so a report renderer can
//! show the full chain of reasoning without re-interpreting anything.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod valuation;
