//! Statistics responses from `/api/stats/*`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageOrderValue {
    #[serde(default)]
    pub average_order_value: f64,
    #[serde(default)]
    pub total_orders: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCountByStatus {
    #[serde(default)]
    pub order_count_by_status: Vec<StatusCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopUser {
    pub username: String,
    #[serde(default)]
    pub order_count: u64,
    #[serde(default)]
    pub total_spent: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopActiveUsers {
    #[serde(default)]
    pub top_users: Vec<TopUser>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenue {
    pub date: String,
    #[serde(default)]
    pub total_revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueByDay {
    #[serde(default)]
    pub daily_revenue: Vec<DailyRevenue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalRevenue {
    #[serde(default)]
    pub total_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub product_name: String,
    #[serde(default)]
    pub total_quantity: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopSellingProducts {
    #[serde(default)]
    pub top_products: Vec<TopProduct>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_fields() {
        let users: TopActiveUsers = serde_json::from_str(
            r#"{"topUsers":[{"username":"ann","orderCount":4,"totalSpent":52.0}]}"#,
        )
        .unwrap();
        assert_eq!(users.top_users[0].order_count, 4);

        let revenue: RevenueByDay = serde_json::from_str(
            r#"{"dailyRevenue":[{"date":"2025-03-01","totalRevenue":120.5}]}"#,
        )
        .unwrap();
        assert_eq!(revenue.daily_revenue[0].total_revenue, 120.5);
    }

    #[test]
    fn test_missing_fields_default() {
        let aov: AverageOrderValue = serde_json::from_str("{}").unwrap();
        assert_eq!(aov.average_order_value, 0.0);
        assert_eq!(aov.total_orders, 0);
    }
}
