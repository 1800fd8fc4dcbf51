//! Flashtastic: English vocabulary flashcards for Persian speakers.
//!
//! Card content is generated on demand by a [`provider::ContentProvider`],
//! persisted in a [`storage::CardCache`], and walked through by a
//! [`session::SessionController`] that keeps the next card prefetched.

pub mod config;
pub mod flashcards;
pub mod provider;
pub mod session;
pub mod speech;
pub mod storage;
pub mod words;
