//! CLI infrastructure for the Mountain Car trainer
//!
//! This module provides the command-line interface for training, evaluating,
//! and exporting tabular Q-learning agents.

pub mod commands;
