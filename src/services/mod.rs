//! Services layer for TextLens
//!
//! Provides the remote grammar provider integration.

pub mod grammar;

pub use grammar::{GrammarChecker, GrammarClient, LanguageToolChecker};
