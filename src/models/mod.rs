//! Domain Models
//!
//! Wire types exchanged with the restaurant backend. Field names follow the
//! backend's JSON (`_id`, `base_price`, `orderId`, ...) through serde renames.

mod chat;
mod customer;
mod menu;
mod payment;
mod stats;

pub use chat::{ChatMessage, Sender};
pub use customer::{format_phone, Customer, CustomerPayload, Role};
pub use menu::{MenuCategory, MenuItem, MenuItemPayload};
pub use payment::{Payment, PaymentPage, PaymentStatus, PaymentSummary};
pub use stats::{
    AverageOrderValue, DailyRevenue, OrderCountByStatus, RevenueByDay, StatusCount, TopActiveUsers,
    TopProduct, TopSellingProducts, TopUser, TotalRevenue,
};

use serde::{Deserialize, Serialize};

/// Credentials posted to the login endpoint
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login payload
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    #[serde(alias = "_id")]
    pub id: String,
}

/// Lenient decoding: the backend stores some prices as strings and may omit
/// or garble fields on individual records.
pub(crate) mod de {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            None => Ok(0.0),
            Some(NumberOrString::Number(n)) => Ok(n),
            Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(0.0),
            Some(NumberOrString::Text(s)) => s
                .trim()
                .parse()
                .map_err(|_| serde::de::Error::custom(format!("invalid number: {s}"))),
        }
    }

    /// Falls back to `T::default()` when the value has the wrong shape
    pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }
}
