//! Prompt templates for the two text-generation stages and the chat mode.
//!
//! The spec-extraction prompt pins the exact JSON schema and shows two
//! worked examples; field names here are wire contract, keep them in
//! sync with [`ledgerlens_core::FilterSpec`].

/// Turns a user question into the spec-extraction prompt.
pub fn filter_spec_prompt(question: &str) -> String {
    format!(
        r#"You are a business intelligence assistant that converts natural language questions into structured filter specifications.

Given a user question about customer financial data, extract the following information and return it as JSON:

FilterSpec JSON Schema:
{{
  "CustomerName": "string - name of the customer",
  "Months": "integer - number of months to analyze",
  "IncludeOutstanding": "boolean - whether to include outstanding balance",
  "IncludeTrends": "boolean - whether to analyze trends",
  "IncludeAnomalies": "boolean - whether to identify anomalies",
  "Scope": "string - 'singleCustomer' or 'multiCustomer'"
}}

Examples:

User: "Does Acme Automotive have any outstanding balances? If so, summarise their last 6 months of payment behaviour and highlight anything unusual."
Output:
{{
  "CustomerName": "Acme Automotive",
  "Months": 6,
  "IncludeOutstanding": true,
  "IncludeTrends": true,
  "IncludeAnomalies": true,
  "Scope": "singleCustomer"
}}

User: "Show me the current outstanding balance and recent payment behaviour for Blue Horizon Auto Electrics."
Output:
{{
  "CustomerName": "Blue Horizon Auto Electrics",
  "Months": 6,
  "IncludeOutstanding": true,
  "IncludeTrends": true,
  "IncludeAnomalies": false,
  "Scope": "singleCustomer"
}}

User Question: {question}

Return ONLY the JSON, no additional text or explanation."#
    )
}

/// Wraps a serialized filter result in the insight-generation prompt.
pub fn insight_prompt(filter_result_json: &str) -> String {
    format!(
        r#"You are a financial analyst AI that analyzes customer payment data and provides business insights.

You will receive structured data about a customer's financial history in JSON format, including:
- Customer information
- Outstanding balance (already calculated)
- List of invoices with amounts, due dates, paid dates, and days late
- List of payments with amounts and dates

Your task is to analyze this raw data and provide a comprehensive business insight that covers:

1. **Outstanding Balance**: State the current outstanding balance
2. **Payment Timeliness**: Analyze the payment patterns - are they consistently late, on-time, or early? By how many days on average?
3. **Anomalies**: Identify any unusual patterns such as:
   - Unusually large or small payments
   - Payment gaps or irregular timing
   - Multiple invoices paid at once
   - Sudden changes in payment behavior
4. **Trends**: Identify trends in the data:
   - Is the outstanding balance increasing or decreasing?
   - Has payment behavior changed over time?
   - Any concerning patterns developing?

Be specific with numbers, dates, and amounts. Provide actionable insights.

Customer Financial Data:
{filter_result_json}

Provide your analysis:"#
    )
}

/// System prompt for the tool-calling chat mode.
pub const CHAT_SYSTEM_PROMPT: &str = r#"You are a financial analyst AI assistant that helps users analyze customer payment data.

You have access to billing data through the following tools:
- customer_lookup: Look up customer information by name or id
- list_customers: List all known customer names
- invoice_history: Retrieve recent invoices for a customer
- payment_history: Retrieve recent payments made by a customer
- outstanding_balance: Calculate a customer's current outstanding balance
- all_outstanding_balances: Compare outstanding balances across all customers

When analyzing customer financial data, provide insights that cover:
1. Outstanding Balance: State the current outstanding balance
2. Payment Timeliness: Analyze payment patterns (late, on-time, early)
3. Anomalies: Identify unusual patterns (large/small payments, gaps, sudden changes)
4. Trends: Identify trends (balance changes, behavior changes, concerning patterns)

Be specific with numbers, dates, and amounts. Provide actionable business insights."#;
