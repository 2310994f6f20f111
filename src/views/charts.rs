//! Statistics charts screen

use super::ViewResult;
use crate::client::{ApiClient, ClientError, StatsQuery};
use crate::models::{
    AverageOrderValue, OrderCountByStatus, RevenueByDay, TopActiveUsers, TopSellingProducts,
    TotalRevenue,
};
use crate::session::Session;
use std::fmt;
use std::str::FromStr;

/// Metric used to rank top users
pub const TOP_USERS_METRIC: &str = "orderCount";
/// Number of products in the top sellers chart
pub const TOP_PRODUCTS_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChartTab {
    #[default]
    AverageOrderValue,
    OrderStatus,
    TopUsers,
    RevenueByDay,
    TotalRevenue,
    TopProducts,
}

impl ChartTab {
    pub const ALL: [ChartTab; 6] = [
        ChartTab::AverageOrderValue,
        ChartTab::OrderStatus,
        ChartTab::TopUsers,
        ChartTab::RevenueByDay,
        ChartTab::TotalRevenue,
        ChartTab::TopProducts,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChartTab::AverageOrderValue => "Average Order Value",
            ChartTab::OrderStatus => "Order Status",
            ChartTab::TopUsers => "Top Users",
            ChartTab::RevenueByDay => "Revenue by Day",
            ChartTab::TotalRevenue => "Total Revenue",
            ChartTab::TopProducts => "Top Products",
        }
    }

    fn slug(&self) -> &'static str {
        match self {
            ChartTab::AverageOrderValue => "aov",
            ChartTab::OrderStatus => "status",
            ChartTab::TopUsers => "users",
            ChartTab::RevenueByDay => "revenue-by-day",
            ChartTab::TotalRevenue => "total-revenue",
            ChartTab::TopProducts => "products",
        }
    }
}

impl fmt::Display for ChartTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ChartTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ChartTab::ALL
            .into_iter()
            .find(|tab| tab.slug() == wanted || tab.label().to_lowercase() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = ChartTab::ALL.iter().map(|t| t.slug()).collect();
                format!("unknown chart '{s}', expected one of: {}", known.join(", "))
            })
    }
}

/// Labelled values ready to plot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    fn new(title: &str, points: impl IntoIterator<Item = (String, f64)>) -> Self {
        let (labels, values) = points.into_iter().unzip();
        Self {
            title: title.to_string(),
            labels,
            values,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

impl From<&AverageOrderValue> for ChartSeries {
    fn from(aov: &AverageOrderValue) -> Self {
        ChartSeries::new(
            ChartTab::AverageOrderValue.label(),
            [
                ("Average Order Value".to_string(), aov.average_order_value),
                ("Total Orders".to_string(), aov.total_orders as f64),
            ],
        )
    }
}

impl From<&OrderCountByStatus> for ChartSeries {
    fn from(stats: &OrderCountByStatus) -> Self {
        ChartSeries::new(
            ChartTab::OrderStatus.label(),
            stats
                .order_count_by_status
                .iter()
                .map(|s| (s.status.clone(), s.count as f64)),
        )
    }
}

impl From<&TopActiveUsers> for ChartSeries {
    fn from(stats: &TopActiveUsers) -> Self {
        ChartSeries::new(
            ChartTab::TopUsers.label(),
            stats
                .top_users
                .iter()
                .map(|u| (u.username.clone(), u.order_count as f64)),
        )
    }
}

impl From<&RevenueByDay> for ChartSeries {
    fn from(stats: &RevenueByDay) -> Self {
        ChartSeries::new(
            ChartTab::RevenueByDay.label(),
            stats
                .daily_revenue
                .iter()
                .map(|d| (d.date.clone(), d.total_revenue)),
        )
    }
}

impl From<&TotalRevenue> for ChartSeries {
    fn from(stats: &TotalRevenue) -> Self {
        ChartSeries::new(
            ChartTab::TotalRevenue.label(),
            [("Total Revenue".to_string(), stats.total_revenue)],
        )
    }
}

impl From<&TopSellingProducts> for ChartSeries {
    fn from(stats: &TopSellingProducts) -> Self {
        ChartSeries::new(
            ChartTab::TopProducts.label(),
            stats
                .top_products
                .iter()
                .map(|p| (p.product_name.clone(), p.total_quantity as f64)),
        )
    }
}

#[derive(Debug, Default)]
pub struct ChartsView {
    selected: ChartTab,
    average_order_value: Option<AverageOrderValue>,
    order_status: Option<OrderCountByStatus>,
    top_users: Option<TopActiveUsers>,
    revenue_by_day: Option<RevenueByDay>,
    total_revenue: Option<TotalRevenue>,
    top_products: Option<TopSellingProducts>,
    errors: Vec<String>,
}

impl ChartsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> ChartTab {
        self.selected
    }

    pub fn select_tab(&mut self, tab: ChartTab) {
        self.selected = tab;
    }

    /// One message per statistic that failed on the last load
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Fetch all six statistics concurrently. A statistic that fails keeps
    /// its previous data; the first failure is returned after all have settled.
    pub async fn load(&mut self, client: &ApiClient, session: &Session) -> ViewResult<()> {
        let plain = StatsQuery::default();
        let users = StatsQuery::default().with_metric(TOP_USERS_METRIC);
        let products = StatsQuery::default().with_limit(TOP_PRODUCTS_LIMIT);

        let (aov, status, top_users, by_day, total, top_products) = tokio::join!(
            client.average_order_value(session, &plain),
            client.order_count_by_status(session, &plain),
            client.top_active_users(session, &users),
            client.revenue_by_day(session, &plain),
            client.total_revenue(session, &plain),
            client.top_selling_products(session, &products),
        );

        self.errors.clear();
        let mut first_error: Option<ClientError> = None;
        let errors = &mut self.errors;
        let mut settle_into = |tab: ChartTab, failed: Option<ClientError>| {
            if let Some(e) = failed {
                errors.push(format!("Failed to load {}: {}", tab.label(), e.user_message()));
                first_error.get_or_insert(e);
            }
        };
        settle_into(ChartTab::AverageOrderValue, settle(&mut self.average_order_value, aov));
        settle_into(ChartTab::OrderStatus, settle(&mut self.order_status, status));
        settle_into(ChartTab::TopUsers, settle(&mut self.top_users, top_users));
        settle_into(ChartTab::RevenueByDay, settle(&mut self.revenue_by_day, by_day));
        settle_into(ChartTab::TotalRevenue, settle(&mut self.total_revenue, total));
        settle_into(ChartTab::TopProducts, settle(&mut self.top_products, top_products));

        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    /// Series for a tab, `None` until that statistic has loaded
    pub fn series(&self, tab: ChartTab) -> Option<ChartSeries> {
        match tab {
            ChartTab::AverageOrderValue => self.average_order_value.as_ref().map(ChartSeries::from),
            ChartTab::OrderStatus => self.order_status.as_ref().map(ChartSeries::from),
            ChartTab::TopUsers => self.top_users.as_ref().map(ChartSeries::from),
            ChartTab::RevenueByDay => self.revenue_by_day.as_ref().map(ChartSeries::from),
            ChartTab::TotalRevenue => self.total_revenue.as_ref().map(ChartSeries::from),
            ChartTab::TopProducts => self.top_products.as_ref().map(ChartSeries::from),
        }
    }

    pub fn selected_series(&self) -> Option<ChartSeries> {
        self.series(self.selected)
    }
}

/// Store a successful result; a failure leaves the previous value in place
fn settle<T>(slot: &mut Option<T>, result: Result<T, ClientError>) -> Option<ClientError> {
    match result {
        Ok(value) => {
            *slot = Some(value);
            None
        }
        Err(e) => Some(e),
    }
}
