//! Vocabulary cards for Flashtastic
//!
//! This module provides:
//! - The lexical record generated for each headword
//! - Self-rating values recorded after a card is revealed

pub mod models;

pub use models::*;
