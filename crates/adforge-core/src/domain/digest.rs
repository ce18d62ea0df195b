//! Canonical JSON and draft digests.
//!
//! Object keys are sorted by UTF-16 code units and integer-valued floats are
//! written as integers, so two drafts that serialize to the same value hash
//! the same regardless of field order.

use sha2::{Digest, Sha256};

use super::draft::CampaignDraft;
use super::error::{AdforgeError, Result};

fn sort_keys(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_by(|a, b| a.encode_utf16().cmp(b.encode_utf16()));
            let mut sorted = serde_json::Map::new();
            for key in keys {
                if let Some(v) = map.get(key) {
                    sorted.insert(key.clone(), sort_keys(v));
                }
            }
            serde_json::Value::Object(sorted)
        }
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(sort_keys).collect())
        }
        other => other.clone(),
    }
}

fn normalize_numbers(value: &serde_json::Value) -> Result<serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (k, v) in map {
                out.insert(k.clone(), normalize_numbers(v)?);
            }
            Ok(serde_json::Value::Object(out))
        }
        serde_json::Value::Array(items) => Ok(serde_json::Value::Array(
            items
                .iter()
                .map(normalize_numbers)
                .collect::<Result<Vec<_>>>()?,
        )),
        serde_json::Value::Number(n) if !(n.is_i64() || n.is_u64()) => {
            let Some(f) = n.as_f64() else {
                return Ok(value.clone());
            };
            if !f.is_finite() {
                return Err(AdforgeError::InvalidDraft(
                    "non-finite number in draft".to_string(),
                ));
            }
            if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                Ok(serde_json::Value::Number((f as i64).into()))
            } else {
                Ok(value.clone())
            }
        }
        other => Ok(other.clone()),
    }
}

/// Compact canonical JSON for `value`.
pub fn canonical_json(value: &serde_json::Value) -> Result<String> {
    let normalized = normalize_numbers(value)?;
    Ok(serde_json::to_string(&sort_keys(&normalized))?)
}

/// SHA-256 hex digest of the canonical JSON of `value`.
pub fn compute_digest(value: &serde_json::Value) -> Result<String> {
    let canonical = canonical_json(value)?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Digest identifying a draft's content.
pub fn draft_digest(draft: &CampaignDraft) -> Result<String> {
    compute_digest(&serde_json::to_value(draft)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::strategy::Strategy;

    #[test]
    fn key_order_does_not_change_canonical_form() {
        let a = serde_json::json!({"b": {"y": 1, "x": 2}, "a": [3, 1]});
        let b = serde_json::json!({"a": [3, 1], "b": {"x": 2, "y": 1}});
        assert_eq!(
            canonical_json(&a).expect("a"),
            canonical_json(&b).expect("b")
        );
    }

    #[test]
    fn integer_valued_floats_collapse() {
        let v = serde_json::json!({"daily_budget": 50.0});
        assert_eq!(canonical_json(&v).expect("canonical"), r#"{"daily_budget":50}"#);
    }

    #[test]
    fn draft_digest_tracks_content() {
        let d1 = CampaignDraft::new("Plumbing").with_keywords(["plumber"]);
        let d2 = d1.clone().with_strategy(Strategy::Skag);
        let h1 = draft_digest(&d1).expect("d1");
        assert_eq!(h1.len(), 64);
        assert_eq!(h1, draft_digest(&d1.clone()).expect("again"));
        assert_ne!(h1, draft_digest(&d2).expect("d2"));
    }
}
