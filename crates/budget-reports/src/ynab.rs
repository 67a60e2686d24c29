//! YNAB API integration
//!
//! Fetches budgets, accounts and categories. Every response is wrapped in a
//! `{"data": ...}` envelope; failures come back as `{"error": {...}}`.
//!
//! API docs: https://api.ynab.com/v1

use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::config::{Config, mask_token};
use crate::month::MonthSelector;

/// Budget as listed by the service
#[derive(Debug, Clone, Deserialize)]
pub struct BudgetSummary {
    pub id: String,
    pub name: String,
}

/// Account with its balance in milliunits
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub name: String,
    pub balance: i64,
}

/// Category group with its categories
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteCategoryGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub categories: Vec<RemoteCategory>,
}

/// Category amounts in milliunits
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteCategory {
    pub category_group_id: String,
    #[serde(default)]
    pub name: String,
    pub budgeted: i64,
    pub activity: i64,
}

/// Read-only view of a budget, in the order the report needs it
pub trait BudgetService {
    async fn list_budgets(&self) -> Result<Vec<BudgetSummary>>;

    async fn list_accounts(&self, budget_id: &str) -> Result<Vec<Account>>;

    async fn list_category_groups(&self, budget_id: &str) -> Result<Vec<RemoteCategoryGroup>>;

    async fn get_month_categories(
        &self,
        budget_id: &str,
        month: MonthSelector,
    ) -> Result<Vec<RemoteCategory>>;
}

// =============================================================================
// API Response Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct BudgetsData {
    budgets: Vec<BudgetSummary>,
}

#[derive(Debug, Deserialize)]
struct AccountsData {
    accounts: Vec<Account>,
}

#[derive(Debug, Deserialize)]
struct CategoriesData {
    category_groups: Vec<RemoteCategoryGroup>,
}

#[derive(Debug, Deserialize)]
struct MonthData {
    month: MonthDetail,
}

#[derive(Debug, Deserialize)]
struct MonthDetail {
    #[serde(default)]
    categories: Vec<RemoteCategory>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    id: String,
    name: String,
    #[serde(default)]
    detail: String,
}

// =============================================================================
// YNAB Client
// =============================================================================

/// YNAB API client
pub struct YnabClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl YnabClient {
    /// Create a client from runtime configuration
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        debug!(
            "YNAB client for {} (token {})",
            config.base_url,
            mask_token(&config.access_token)
        );

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            access_token: config.access_token.clone(),
        })
    }

    /// GET a path and unwrap the data envelope
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to reach YNAB API ({})", path))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("YNAB API error {} on {}: {}", status, path, describe_error(&text));
        }

        let envelope: DataEnvelope<T> = response
            .json()
            .await
            .with_context(|| format!("Failed to parse YNAB response ({})", path))?;

        Ok(envelope.data)
    }
}

impl BudgetService for YnabClient {
    async fn list_budgets(&self) -> Result<Vec<BudgetSummary>> {
        let data: BudgetsData = self.get("/budgets").await?;
        Ok(data.budgets)
    }

    async fn list_accounts(&self, budget_id: &str) -> Result<Vec<Account>> {
        let data: AccountsData = self.get(&format!("/budgets/{}/accounts", budget_id)).await?;
        Ok(data.accounts)
    }

    async fn list_category_groups(&self, budget_id: &str) -> Result<Vec<RemoteCategoryGroup>> {
        let data: CategoriesData = self
            .get(&format!("/budgets/{}/categories", budget_id))
            .await?;
        Ok(data.category_groups)
    }

    async fn get_month_categories(
        &self,
        budget_id: &str,
        month: MonthSelector,
    ) -> Result<Vec<RemoteCategory>> {
        let data: MonthData = self
            .get(&format!("/budgets/{}/months/{}", budget_id, month))
            .await?;
        Ok(data.month.categories)
    }
}

/// Turn an error body into a readable message, falling back to the raw text
fn describe_error(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(resp) if resp.error.detail.is_empty() => {
            format!("{} ({})", resp.error.name, resp.error.id)
        }
        Ok(resp) => format!("{} ({}): {}", resp.error.name, resp.error.id, resp.error.detail),
        Err(_) => body.to_string(),
    }
}
