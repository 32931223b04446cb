//! Alert data model shared by both delivery channels.

pub mod alert;
pub mod alert_set;

pub use alert::{AlertCategory, AlertKey, AlertRecord, ItemDetail};
pub use alert_set::AlertSet;
