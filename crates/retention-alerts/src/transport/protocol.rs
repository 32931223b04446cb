//! Wire format of the alert server.
//!
//! Both channels carry a JSON array of alert objects. A payload is decoded as
//! a whole: one bad element rejects the entire payload, so the store is never
//! handed a partial set.

use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;
use serde_json::Value;

use retention_core::errors::AlertError;
use retention_core::models::{AlertCategory, AlertRecord, AlertSet, ItemDetail};

/// Which endpoint a payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedScope {
    /// Full feed (`/alertas`, push channel). Every record names its category.
    All,
    /// Today feed (`/alertas/hoje`). Records carry no category; it is
    /// inferred from whether items are missing.
    Today,
}

/// How to treat a well-formed JSON body that is not an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapePolicy {
    /// Only an array or `null` is accepted.
    Strict,
    /// Anything that is not an array, including an empty body, is an empty set.
    Lenient,
}

#[derive(Debug, Deserialize)]
struct WireAlert {
    #[serde(rename = "cliente_id", alias = "customer_id")]
    customer_id: String,
    #[serde(rename = "nome_cliente", alias = "customer_name", default)]
    customer_name: String,
    #[serde(rename = "tipo", alias = "category", default)]
    category: Option<AlertCategory>,
    #[serde(rename = "motivo", alias = "reason", default)]
    reason: String,
    #[serde(rename = "itens_faltantes", alias = "missing_items", default)]
    missing_items: Option<Vec<String>>,
    #[serde(rename = "itens_detalhados", alias = "item_details", default)]
    item_details: Option<Vec<WireItemDetail>>,
}

#[derive(Debug, Deserialize)]
struct WireItemDetail {
    #[serde(rename = "nome", alias = "name")]
    name: String,
    #[serde(rename = "ultima_compra", alias = "last_purchase", default)]
    last_purchase: Option<DateTime<Utc>>,
}

impl WireAlert {
    fn into_record(self, scope: FeedScope) -> Result<AlertRecord, String> {
        let missing_items = self.missing_items.unwrap_or_default();
        let category = match (self.category, scope) {
            (Some(category), _) => category,
            (None, FeedScope::Today) if !missing_items.is_empty() => AlertCategory::MissingItem,
            (None, FeedScope::Today) => AlertCategory::MissedExpectedDay,
            (None, FeedScope::All) => return Err("missing category".to_string()),
        };

        let details = self
            .item_details
            .unwrap_or_default()
            .into_iter()
            .map(|d| ItemDetail {
                name: d.name,
                // The server sends its zero time for items never bought.
                last_purchase: d.last_purchase.filter(|t| t.year() > 1),
            })
            .collect();

        Ok(AlertRecord::new(self.customer_id, self.customer_name, category, self.reason)
            .with_missing_items(missing_items)
            .with_item_details(details))
    }
}

/// Decode a complete alert set.
pub fn decode_alert_set(
    payload: &[u8],
    scope: FeedScope,
    policy: ShapePolicy,
) -> Result<AlertSet, AlertError> {
    if policy == ShapePolicy::Lenient && payload.iter().all(u8::is_ascii_whitespace) {
        return Ok(AlertSet::empty());
    }

    let value: Value = serde_json::from_slice(payload).map_err(|e| malformed(e.to_string()))?;
    let items = match value {
        Value::Array(items) => items,
        Value::Null => return Ok(AlertSet::empty()),
        other => match policy {
            ShapePolicy::Lenient => {
                tracing::debug!(kind = json_kind(&other), "non-array alert body, treating as empty");
                return Ok(AlertSet::empty());
            }
            ShapePolicy::Strict => {
                return Err(malformed(format!(
                    "expected an array of alerts, got {}",
                    json_kind(&other)
                )))
            }
        },
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<WireAlert>(item)
                .map_err(|e| e.to_string())
                .and_then(|wire| wire.into_record(scope))
                .map_err(|reason| malformed(format!("alert #{index}: {reason}")))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(AlertSet::new)
}

fn malformed(reason: String) -> AlertError {
    AlertError::MalformedPayload { reason }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
