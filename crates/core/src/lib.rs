//! # LedgerLens Core
//!
//! Domain types, traits, and error definitions for the LedgerLens billing
//! assistant. This crate has **zero I/O dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The two text-generation steps (question → filter spec, result →
//! narrative) are probabilistic black boxes behind the [`Provider`] trait.
//! Everything between them — the record model, the filter contract, the
//! tool surface — is defined here with strict, deterministic semantics.

pub mod error;
pub mod filter;
pub mod message;
pub mod model;
pub mod provider;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{DataSourceError, Error, ProviderError, Result, SpecError, ToolError};
pub use filter::{FilterResult, FilterSpec, InvoiceInfo, PaymentInfo, Scope};
pub use message::{Conversation, Message, MessageToolCall, Role};
pub use model::{Customer, Invoice, Payment};
pub use provider::{Provider, ProviderRequest, ProviderResponse, ToolDefinition};
pub use tool::{Tool, ToolCall, ToolRegistry, ToolResult};
