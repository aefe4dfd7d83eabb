//! Question answering pipelines for LedgerLens.
//!
//! Two ways to get from a natural-language question to an answer:
//!
//! - [`StagedPipeline`]: a fixed four-stage flow. The provider turns the
//!   question into a filter spec, the deterministic core resolves it,
//!   and the provider narrates the structured result. Every number in
//!   the answer comes from the core, never from the model.
//! - [`ChatSession`]: a conversational loop where the model decides
//!   which data tools to call, across multiple turns of history.
//!
//! Both depend only on the [`ledgerlens_core::Provider`] trait.

pub mod chat;
pub mod prompts;
pub mod staged;

pub use chat::ChatSession;
pub use staged::StagedPipeline;
