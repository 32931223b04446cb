use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AlertError;

/// Why a customer was flagged. The set is closed: a payload naming any other
/// category is rejected as malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertCategory {
    /// No purchase for longer than the server's inactivity window.
    #[serde(rename = "inatividade", alias = "inactivity")]
    Inactivity,
    /// Today is one of the customer's usual days and nothing was bought yet.
    #[serde(rename = "dia_previsto", alias = "missed_expected_day")]
    MissedExpectedDay,
    /// One or more habitual items stopped showing up in purchases.
    #[serde(rename = "item_faltando", alias = "missing_item")]
    MissingItem,
}

impl AlertCategory {
    /// Display order used by the board.
    pub const ALL: [AlertCategory; 3] = [
        AlertCategory::Inactivity,
        AlertCategory::MissedExpectedDay,
        AlertCategory::MissingItem,
    ];

    /// Name used on the wire by the alert server.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Inactivity => "inatividade",
            Self::MissedExpectedDay => "dia_previsto",
            Self::MissingItem => "item_faltando",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inactivity => "inactivity",
            Self::MissedExpectedDay => "missed_expected_day",
            Self::MissingItem => "missing_item",
        }
    }
}

impl fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertCategory {
    type Err = AlertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inatividade" | "inactivity" => Ok(Self::Inactivity),
            "dia_previsto" | "missed_expected_day" => Ok(Self::MissedExpectedDay),
            "item_faltando" | "missing_item" => Ok(Self::MissingItem),
            other => Err(AlertError::MalformedPayload {
                reason: format!("unknown alert category {other:?}"),
            }),
        }
    }
}

/// A habitual item together with the last time the customer bought it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub name: String,
    /// `None` when the customer never bought the item.
    pub last_purchase: Option<DateTime<Utc>>,
}

/// The only identity an alert has.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlertKey {
    pub customer_id: String,
    pub category: AlertCategory,
}

/// One detected retention issue. Never mutated after it is received; the
/// alert set changes by wholesale replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub customer_id: String,
    /// Display label only. Not unique.
    pub customer_name: String,
    pub category: AlertCategory,
    pub reason: String,
    /// Empty unless `category` is [`AlertCategory::MissingItem`].
    #[serde(default)]
    pub missing_items: Vec<String>,
    #[serde(default)]
    pub item_details: Vec<ItemDetail>,
}

impl AlertRecord {
    pub fn new(
        customer_id: impl Into<String>,
        customer_name: impl Into<String>,
        category: AlertCategory,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            customer_name: customer_name.into(),
            category,
            reason: reason.into(),
            missing_items: Vec::new(),
            item_details: Vec::new(),
        }
    }

    /// Attach the missing item names. Ignored for categories other than
    /// [`AlertCategory::MissingItem`].
    pub fn with_missing_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.category == AlertCategory::MissingItem {
            self.missing_items = items.into_iter().map(Into::into).collect();
        }
        self
    }

    pub fn with_item_details(mut self, details: Vec<ItemDetail>) -> Self {
        if self.category == AlertCategory::MissingItem {
            self.item_details = details;
        }
        self
    }

    pub fn key(&self) -> AlertKey {
        AlertKey {
            customer_id: self.customer_id.clone(),
            category: self.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_wire_and_english_names() {
        assert_eq!(
            "inatividade".parse::<AlertCategory>().unwrap(),
            AlertCategory::Inactivity
        );
        assert_eq!(
            "missed_expected_day".parse::<AlertCategory>().unwrap(),
            AlertCategory::MissedExpectedDay
        );
        assert!("churn".parse::<AlertCategory>().is_err());
    }

    #[test]
    fn missing_items_only_stick_to_missing_item_alerts() {
        let inactive = AlertRecord::new("c1", "Ana", AlertCategory::Inactivity, "idle")
            .with_missing_items(["Arroz"]);
        assert!(inactive.missing_items.is_empty());

        let missing = AlertRecord::new("c1", "Ana", AlertCategory::MissingItem, "stopped")
            .with_missing_items(["Arroz", "Feijão"]);
        assert_eq!(missing.missing_items, vec!["Arroz", "Feijão"]);
    }
}
