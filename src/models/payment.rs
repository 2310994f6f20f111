//! Payment transactions.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment status. The backend's set is open, so unknown values are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
    Other(String),
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Other("unknown".to_string())
    }
}

impl From<String> for PaymentStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => PaymentStatus::Pending,
            "success" => PaymentStatus::Success,
            "failed" => PaymentStatus::Failed,
            _ => PaymentStatus::Other(s),
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> Self {
        status.to_string()
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Pending => f.write_str("pending"),
            PaymentStatus::Success => f.write_str("success"),
            PaymentStatus::Failed => f.write_str("failed"),
            PaymentStatus::Other(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "orderId", default)]
    pub order_id: String,
    #[serde(rename = "requestId", default)]
    pub request_id: String,
    #[serde(default, deserialize_with = "super::de::lenient_f64")]
    pub amount: f64,
    #[serde(default, deserialize_with = "super::de::or_default")]
    pub status: PaymentStatus,
    #[serde(
        rename = "createdAt",
        default,
        deserialize_with = "super::de::or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

/// Restaurant local time (UTC+7)
const LOCAL_OFFSET_SECS: i32 = 7 * 3600;

impl Payment {
    /// `$12.50`
    pub fn amount_display(&self) -> String {
        format!("${:.2}", self.amount)
    }

    /// `Mar 5, 2025, 2:30 PM` in restaurant local time, `-` when unknown
    pub fn created_at_display(&self) -> String {
        let Some(created_at) = self.created_at else {
            return "-".to_string();
        };
        let offset = FixedOffset::east_opt(LOCAL_OFFSET_SECS).unwrap_or_else(|| Utc.fix());
        created_at
            .with_timezone(&offset)
            .format("%b %-d, %Y, %-I:%M %p")
            .to_string()
    }
}

/// One server-side page of payments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentPage {
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub total: u64,
}

/// Aggregates handed to the assistant prompt.
///
/// `total` is the server-wide count; the status counts cover the fetched page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaymentSummary {
    pub total: u64,
    pub pending: u64,
    pub success: u64,
}

impl From<&PaymentPage> for PaymentSummary {
    fn from(page: &PaymentPage) -> Self {
        let count = |status: PaymentStatus| {
            page.payments.iter().filter(|p| p.status == status).count() as u64
        };
        Self {
            total: page.total,
            pending: count(PaymentStatus::Pending),
            success: count(PaymentStatus::Success),
        }
    }
}
