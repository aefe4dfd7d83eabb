//! LLM provider implementations for LedgerLens.
//!
//! The pipeline only ever sees the [`ledgerlens_core::Provider`] trait;
//! this crate supplies the OpenAI-compatible implementation used in
//! production. Tests elsewhere substitute scripted mock providers.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;
