//! Display-ready projection of the current alert set.

use std::fmt;

use retention_core::models::{AlertCategory, AlertRecord, AlertSet};

use crate::classify::{by_category, total_count};

/// One category section of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSection {
    pub category: AlertCategory,
    pub title: &'static str,
    /// Shown instead of entries when the section is empty.
    pub empty_message: &'static str,
    pub entries: Vec<AlertRecord>,
}

impl BoardSection {
    fn new(set: &AlertSet, category: AlertCategory) -> Self {
        let (title, empty_message) = match category {
            AlertCategory::Inactivity => ("Inactive customers", "No inactive customers."),
            AlertCategory::MissedExpectedDay => (
                "Missed expected day",
                "Everyone bought on their expected day.",
            ),
            AlertCategory::MissingItem => {
                ("Items no longer bought", "No missing items identified.")
            }
        };
        Self {
            category,
            title,
            empty_message,
            entries: by_category(set, category).into_iter().cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sections in [`AlertCategory::ALL`] order plus the notification badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertBoard {
    sections: Vec<BoardSection>,
    badge: usize,
}

impl AlertBoard {
    pub fn from_set(set: &AlertSet) -> Self {
        Self {
            sections: AlertCategory::ALL
                .iter()
                .map(|&category| BoardSection::new(set, category))
                .collect(),
            badge: total_count(set),
        }
    }

    pub fn sections(&self) -> &[BoardSection] {
        &self.sections
    }

    pub fn section(&self, category: AlertCategory) -> &BoardSection {
        // Every category has a section.
        &self.sections[category as usize]
    }

    pub fn badge(&self) -> usize {
        self.badge
    }

    /// Badge text, hidden when there is nothing to report.
    pub fn badge_label(&self) -> Option<String> {
        (self.badge > 0).then(|| self.badge.to_string())
    }
}

impl fmt::Display for AlertBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.badge_label() {
            Some(badge) => writeln!(f, "Retention alerts [{badge}]")?,
            None => writeln!(f, "Retention alerts")?,
        }

        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "== {} ==", section.title)?;
            if section.is_empty() {
                writeln!(f, "  {}", section.empty_message)?;
                continue;
            }
            for record in &section.entries {
                writeln!(f, "  - {}: {}", record.customer_name, record.reason)?;
                for item in &record.missing_items {
                    write_item(f, record, item)?;
                }
            }
        }
        Ok(())
    }
}

fn write_item(f: &mut fmt::Formatter<'_>, record: &AlertRecord, item: &str) -> fmt::Result {
    let detail = record.item_details.iter().find(|d| d.name == item);
    match detail {
        Some(d) => match d.last_purchase {
            Some(at) => writeln!(f, "      * {item} (last bought {})", at.format("%d/%m/%Y")),
            None => writeln!(f, "      * {item} (never bought)"),
        },
        None => writeln!(f, "      * {item}"),
    }
}
