//! The staged question-answering pipeline.
//!
//! A fixed flow with two provider calls bracketing one deterministic
//! resolution:
//!
//! 1. question → provider → raw filter spec text
//! 2. parse and validate the spec
//! 3. resolve the spec against the record store
//! 4. serialized result → provider → narrative answer
//!
//! Recoverable problems (unparseable spec, unknown customer) become
//! user-facing messages and the session continues. Provider failures
//! propagate as errors.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use ledgerlens_core::filter::FilterSpec;
use ledgerlens_core::provider::{Provider, ProviderRequest};
use ledgerlens_core::Result;
use ledgerlens_store::{resolve_filter, RecordStore};
use tracing::{debug, info, warn};

use crate::prompts;

pub struct StagedPipeline {
    provider: Arc<dyn Provider>,
    store: Arc<RecordStore>,
    model: String,
    /// Pinned "today" for deterministic window computation in tests.
    fixed_today: Option<NaiveDate>,
}

impl StagedPipeline {
    pub fn new(provider: Arc<dyn Provider>, store: Arc<RecordStore>, model: impl Into<String>) -> Self {
        Self {
            provider,
            store,
            model: model.into(),
            fixed_today: None,
        }
    }

    /// Pin the reference date used for lookback windows.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Answer a single question. Always returns text for the user;
    /// only provider and serialization faults surface as errors.
    pub async fn answer(&self, question: &str) -> Result<String> {
        info!(model = %self.model, "Processing question through staged pipeline");

        // Stage 1: extract the filter spec.
        let spec_request =
            ProviderRequest::prompt(&self.model, prompts::filter_spec_prompt(question));
        let spec_response = self.provider.complete(spec_request).await?;
        let raw_spec = spec_response.message.content;
        debug!(raw = %raw_spec, "Received filter spec text");

        // Stage 2: parse. A malformed spec is the model's failure to
        // follow the contract, not the user's; ask them to rephrase.
        let spec = match FilterSpec::parse(&raw_spec) {
            Ok(spec) => spec,
            Err(e) => {
                warn!(error = %e, "Filter spec rejected");
                return Ok(format!(
                    "I had trouble parsing your request. Error: {e}\nReceived: {raw_spec}"
                ));
            }
        };

        // Stage 3: deterministic resolution.
        let result = resolve_filter(&self.store, &spec, self.today());

        if result.is_not_found() {
            let requested = spec.customer_name.as_deref().unwrap_or_default();
            return Ok(format!(
                "I couldn't find a customer named '{requested}'. Please check the name and try again."
            ));
        }

        // Stage 4: narrate.
        let result_json = serde_json::to_string_pretty(&result)?;
        let insight_request =
            ProviderRequest::prompt(&self.model, prompts::insight_prompt(&result_json));
        let insight_response = self.provider.complete(insight_request).await?;

        Ok(insight_response.message.content)
    }
}
