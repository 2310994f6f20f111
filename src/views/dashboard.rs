//! Dashboard overview: stat boxes, two charts and the latest payments.

use super::{ChartSeries, PaymentRow, ViewResult};
use crate::client::{ApiClient, ClientResult, PaymentQuery, StatsQuery};
use crate::session::Session;

/// Payments shown in the recent list
pub const RECENT_PAYMENTS: u32 = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub total_revenue: f64,
    pub average_order_value: f64,
    /// Server-wide payment count
    pub total_customers: u64,
    /// Total orders behind the average order value
    pub revenue_trend: u64,
    pub recent_payments: Vec<PaymentRow>,
    pub revenue_by_day: ChartSeries,
    pub order_status: ChartSeries,
}

#[derive(Debug, Default)]
pub struct DashboardView {
    summary: Option<DashboardSummary>,
    error: Option<String>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> Option<&DashboardSummary> {
        self.summary.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetch the five dashboard resources concurrently. Any failure leaves the
    /// previous summary in place.
    pub async fn load(&mut self, client: &ApiClient, session: &Session) -> ViewResult<&DashboardSummary> {
        match fetch_summary(client, session).await {
            Ok(summary) => {
                self.error = None;
                Ok(&*self.summary.insert(summary))
            }
            Err(e) => {
                self.error = Some(format!("Failed to load dashboard: {}", e.user_message()));
                Err(e.into())
            }
        }
    }
}

async fn fetch_summary(client: &ApiClient, session: &Session) -> ClientResult<DashboardSummary> {
    let stats = StatsQuery::default();
    let recent = PaymentQuery::page(0, RECENT_PAYMENTS);

    let (payments, total, aov, by_day, status) = tokio::try_join!(
        client.list_payments(session, &recent),
        client.total_revenue(session, &stats),
        client.average_order_value(session, &stats),
        client.revenue_by_day(session, &stats),
        client.order_count_by_status(session, &stats),
    )?;

    Ok(DashboardSummary {
        total_revenue: total.total_revenue,
        average_order_value: aov.average_order_value,
        total_customers: payments.total,
        revenue_trend: aov.total_orders,
        recent_payments: payments.payments.iter().map(PaymentRow::from).collect(),
        revenue_by_day: ChartSeries::from(&by_day),
        order_status: ChartSeries::from(&status),
    })
}
