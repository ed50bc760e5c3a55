// Detection case entity
// One scored event emitted by a backend model, optionally escalated to a
// sanction. The client only ever reads immutable snapshots of these.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value_objects::ModelKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionCase {
    pub id: String,
    pub model: ModelKind,
    /// Epoch milliseconds, normalized at ingestion from either an ISO string
    /// or a numeric timestamp.
    pub timestamp_ms: i64,
    /// Free-form sub-classification, e.g. `IMMEDIATE_BOT`, `CRITICAL`.
    pub kind: String,
    pub accounts: Vec<String>,
    /// 0-100, higher = more suspicious.
    pub score: f64,
    /// Decided server-side; the client only displays it.
    pub is_sanctioned: bool,
    pub sanction_id: Option<String>,
    pub sanction_type: Option<String>,
    pub details: String,
    pub payload: CasePayload,
}

/// Model-specific profit fields, adapted once at ingestion from the backend's
/// loosely-typed `raw` mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum CasePayload {
    Wash {
        laundered_amount: f64,
        winner_account: Option<String>,
        trade_pair_ids: Vec<String>,
    },
    Funding {
        window_funding: f64,
    },
    Cooperative {
        account_id1: Option<String>,
        account_id2: Option<String>,
        rpnl1: f64,
        rpnl2: f64,
        pnl_total: f64,
    },
}

impl CasePayload {
    /// Adapts a raw payload for the given model. The backend is inconsistent
    /// about where fields live, so each lookup probes the `raw` mapping first
    /// and the enclosing record second. This probing happens only here.
    pub fn from_raw(model: ModelKind, raw: &Value, record: &Value) -> Self {
        match model {
            ModelKind::Wash => CasePayload::Wash {
                laundered_amount: probe_f64(&["laundered_amount", "total_laundered_amount"], raw, record),
                winner_account: probe_string(&["winner_account"], raw, record),
                trade_pair_ids: probe_string_list(&["trade_pair_ids"], raw, record),
            },
            ModelKind::Funding => CasePayload::Funding {
                window_funding: probe_f64(&["window_funding"], raw, record),
            },
            ModelKind::Cooperative => CasePayload::Cooperative {
                account_id1: probe_string(&["account_id1"], raw, record),
                account_id2: probe_string(&["account_id2"], raw, record),
                rpnl1: probe_f64(&["rpnl1"], raw, record),
                rpnl2: probe_f64(&["rpnl2"], raw, record),
                pnl_total: probe_f64(&["pnl_total", "total_pnl"], raw, record),
            },
        }
    }
}

/// Auxiliary wash-trading pair record; resolves winner accounts when a case
/// carries no explicit attribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradePair {
    pub pair_id: String,
    pub winner_account: String,
}

fn probe_value<'a>(keys: &[&str], raw: &'a Value, record: &'a Value) -> Option<&'a Value> {
    for source in [raw, record] {
        for key in keys {
            if let Some(value) = source.get(key) {
                if !value.is_null() {
                    return Some(value);
                }
            }
        }
    }
    None
}

fn probe_f64(keys: &[&str], raw: &Value, record: &Value) -> f64 {
    probe_value(keys, raw, record)
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

fn probe_string(keys: &[&str], raw: &Value, record: &Value) -> Option<String> {
    probe_value(keys, raw, record)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn probe_string_list(keys: &[&str], raw: &Value, record: &Value) -> Vec<String> {
    probe_value(keys, raw, record)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wash_payload_reads_raw_fields() {
        let raw = json!({
            "laundered_amount": 1200.5,
            "winner_account": "ACC-9",
            "trade_pair_ids": ["p1", "p2"],
        });
        let payload = CasePayload::from_raw(ModelKind::Wash, &raw, &json!({}));
        match payload {
            CasePayload::Wash {
                laundered_amount,
                winner_account,
                trade_pair_ids,
            } => {
                assert_eq!(laundered_amount, 1200.5);
                assert_eq!(winner_account.as_deref(), Some("ACC-9"));
                assert_eq!(trade_pair_ids, vec!["p1", "p2"]);
            }
            other => panic!("unexpected payload {:?}", other),
        }
    }

    #[test]
    fn probing_falls_back_to_the_enclosing_record() {
        let record = json!({ "laundered_amount": 77.0 });
        let payload = CasePayload::from_raw(ModelKind::Wash, &json!({}), &record);
        match payload {
            CasePayload::Wash { laundered_amount, .. } => assert_eq!(laundered_amount, 77.0),
            other => panic!("unexpected payload {:?}", other),
        }
    }

    #[test]
    fn cooperative_payload_accepts_total_pnl_alias() {
        let raw = json!({ "account_id1": "A", "rpnl1": 10.0, "total_pnl": 42.0 });
        let payload = CasePayload::from_raw(ModelKind::Cooperative, &raw, &json!({}));
        match payload {
            CasePayload::Cooperative {
                account_id1,
                rpnl1,
                pnl_total,
                ..
            } => {
                assert_eq!(account_id1.as_deref(), Some("A"));
                assert_eq!(rpnl1, 10.0);
                assert_eq!(pnl_total, 42.0);
            }
            other => panic!("unexpected payload {:?}", other),
        }
    }

    #[test]
    fn missing_fields_default_to_zero_and_empty() {
        let payload = CasePayload::from_raw(ModelKind::Funding, &json!({}), &json!({}));
        match payload {
            CasePayload::Funding { window_funding } => assert_eq!(window_funding, 0.0),
            other => panic!("unexpected payload {:?}", other),
        }
    }
}
