//! Request middleware.

pub mod exchange_journal;

pub use exchange_journal::{exchange_journal, journal_layer};
