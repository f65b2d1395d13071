//! Raw odds payload retrieval through the fetch relay.
//!
//! The upstream provider emits a JSON-like dialect delimited with single
//! quotes, and buries the match groups at a fixed position inside a larger
//! untyped array. Everything here is best-effort: any transport, status,
//! parse, or shape failure is logged and degrades to an empty group list so
//! the pipeline never breaks.

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::FetchError;

/// Position of the match-group list inside the top-level payload array. The
/// surrounding elements are unspecified and discarded.
const PAYLOAD_INDEX: usize = 3;

/// Append a volatile `_` query parameter so intermediary caches never serve
/// a stale body. Assumes the URL already carries a query string (hence `&`).
pub fn with_cache_bust(url: &str) -> String {
    format!("{}&_={}", url, Utc::now().timestamp_millis())
}

/// Textual repair of the upstream quote dialect. This corrupts any value
/// that legitimately contains an apostrophe; a known fragility inherited
/// from the provider's format.
pub fn repair_quotes(body: &str) -> String {
    body.replace('\'', "\"")
}

/// Parse a (repaired) response body and pull out the match-group list.
pub fn extract_match_groups(body: &str) -> Result<Vec<Value>, FetchError> {
    let cleaned = repair_quotes(body);
    let parsed: Value = serde_json::from_str(&cleaned)?;

    let top = parsed
        .as_array()
        .ok_or(FetchError::Shape("top-level payload is not an array"))?;
    let groups = top
        .get(PAYLOAD_INDEX)
        .ok_or(FetchError::Shape("top-level array is too short"))?
        .as_array()
        .ok_or(FetchError::Shape("match-group element is not an array"))?;

    Ok(groups.clone())
}

/// Fetch the raw match groups for the configured league. Never fails the
/// caller: every failure mode is logged and collapses to an empty list.
pub async fn fetch_raw(client: &reqwest::Client, config: &Config) -> Vec<Value> {
    match try_fetch(client, config).await {
        Ok(groups) => {
            info!("fetched {} match groups from upstream", groups.len());
            groups
        }
        Err(e) => {
            warn!("upstream fetch degraded to empty result: {}", e);
            Vec::new()
        }
    }
}

async fn try_fetch(client: &reqwest::Client, config: &Config) -> Result<Vec<Value>, FetchError> {
    let target = with_cache_bust(&format!("{}{}", config.api_base_url, config.league_id));
    debug!("requesting upstream via relay: {}", target);

    // The relay takes the percent-encoded target as its `url` parameter and
    // performs the actual fetch server-side.
    let response = client
        .get(&config.relay_url)
        .query(&[("url", target.as_str())])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::UpstreamStatus(status));
    }

    let body = response.text().await?;
    debug!("relay body snippet: {}", snippet(&body));

    let groups = extract_match_groups(&body);
    match &groups {
        Ok(g) => debug!("parsed upstream payload: {} groups", g.len()),
        Err(e) => debug!("upstream payload rejected: {}", e),
    }
    groups
}

fn snippet(body: &str) -> String {
    body.chars().take(200).collect()
}
