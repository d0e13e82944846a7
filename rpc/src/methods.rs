//! Remote methods consumed by the client: names, parameters, and field
//! extraction from their results.
//!
//! Results are navigated by path rather than decoded into fixed structs: the
//! node's schema is owned by the network, and a missing or oddly shaped field
//! must map to the caller's fallback instead of a decode error.

use serde::Serialize;
use serde_json::Value;

use casperflow_types::DeployStatus;

pub const GET_STATE_ROOT_HASH: &str = "chain_get_state_root_hash";
pub const GET_ITEM: &str = "state_get_item";
pub const GET_BALANCE: &str = "state_get_balance";
pub const GET_DEPLOY: &str = "info_get_deploy";

/// Every method the client issues, in a stable order.
pub const ALL: [&str; 4] = [GET_STATE_ROOT_HASH, GET_ITEM, GET_BALANCE, GET_DEPLOY];

// ── Params ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GetItemParams<'a> {
    pub state_root_hash: &'a str,
    pub key: String,
    pub path: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct GetBalanceParams<'a> {
    pub state_root_hash: &'a str,
    pub purse_uref: &'a str,
}

#[derive(Debug, Serialize)]
pub struct GetDeployParams<'a> {
    pub deploy_hash: &'a str,
}

// ── Result extraction ───────────────────────────────────────────────────

/// `result.state_root_hash`
pub fn state_root_hash(result: &Value) -> Option<&str> {
    result
        .get("state_root_hash")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// `result.Account.main_purse`
pub fn main_purse(result: &Value) -> Option<&str> {
    result
        .get("Account")
        .and_then(|account| account.get("main_purse"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// `result.balance_value`, sent as a decimal string (U512) or a plain number.
pub fn balance_value(result: &Value) -> Option<u128> {
    match result.get("balance_value")? {
        Value::String(s) if !s.is_empty() => s.parse::<u128>().ok(),
        Value::Number(n) => n.as_u64().map(u128::from),
        _ => None,
    }
}

/// Status from `result.execution_results[0].result`.
///
/// A `Success` entry means completed-success, a `Failure` entry means
/// completed-failure; anything else (no results yet, empty list, unexpected
/// shape) is still pending.
pub fn execution_status(result: &Value) -> DeployStatus {
    let outcome = result
        .get("execution_results")
        .and_then(|results| results.get(0))
        .and_then(|first| first.get("result"));

    let has = |field: &str| {
        outcome
            .and_then(|o| o.get(field))
            .is_some_and(|v| !v.is_null())
    };

    if has("Success") {
        DeployStatus::Success
    } else if has("Failure") {
        DeployStatus::Failed
    } else {
        DeployStatus::Pending
    }
}
