//! # worthit
//!
//! Post-turn cost accounting for Claude Code sessions.
//!
//! ## Overview
//!
//! Invoked as a Stop hook once per conversational turn. Reads the hook payload
//! from stdin, finds the transcript, and reports for the most recent turn:
//! - Input-side tokens (fresh input plus cache reads and writes)
//! - Estimated output tokens
//! - Cost in USD at the model tier's rates
//! - A friendly model label
//!
//! The result is a single line that a platform notifier turns into a popup.

/// Command-line argument parsing and configuration
pub mod cli;

/// Output encoding and sanitization
pub mod display;

/// Validation errors and exit status
pub mod error;

/// Data models for hook payloads, transcript records and token totals
pub mod models;

/// End-to-end hook run
pub mod pipeline;

/// Model tiers and per-token pricing
pub mod pricing;

/// Transcript reading and turn extraction
pub mod transcript;

/// Token aggregation and output estimation
pub mod usage;

/// Utility functions for stdin, logging and formatting
pub mod utils;

/// Payload and path validation
pub mod validate;
