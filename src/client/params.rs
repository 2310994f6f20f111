//! Query-string parameters for paginated and statistics resources.
//!
//! Absent parameters are omitted from the query string entirely.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction: {other}")),
        }
    }
}

/// Server-side sort descriptor, sent JSON-encoded: `{"field":"amount","sort":"desc"}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortModel {
    pub field: String,
    pub sort: SortDirection,
}

impl SortModel {
    pub fn new(field: impl Into<String>, sort: SortDirection) -> Self {
        Self {
            field: field.into(),
            sort,
        }
    }

    /// Wire form of the `sort` parameter
    pub fn to_json(&self) -> String {
        serde_json::json!({ "field": self.field, "sort": self.sort.as_str() }).to_string()
    }
}

impl FromStr for SortModel {
    type Err = String;

    /// `amount` or `amount:desc`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, dir) = match s.split_once(':') {
            Some((field, dir)) => (field, dir.parse()?),
            None => (s, SortDirection::Asc),
        };
        if field.trim().is_empty() {
            return Err("sort field is empty".to_string());
        }
        Ok(SortModel::new(field.trim(), dir))
    }
}

/// Parameters for `getAllPayments`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentQuery {
    /// Zero-based page index
    pub page: u32,
    pub page_size: u32,
    pub sort: Option<SortModel>,
    pub search: Option<String>,
}

impl Default for PaymentQuery {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: 20,
            sort: None,
            search: None,
        }
    }
}

impl PaymentQuery {
    pub fn page(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            ..Self::default()
        }
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.to_json()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        pairs
    }
}

/// Parameters shared by the statistics endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Ranking metric, only read by `top-active-users`
    pub metric: Option<String>,
    /// Result count, only read by `top-selling-products`; zero means unset
    pub limit: Option<u32>,
}

impl StatsQuery {
    pub fn between(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            start_date: start,
            end_date: end,
            ..Self::default()
        }
    }

    pub fn with_metric(mut self, metric: impl Into<String>) -> Self {
        self.metric = Some(metric.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(start) = self.start_date {
            pairs.push(("startDate", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            pairs.push(("endDate", end.format("%Y-%m-%d").to_string()));
        }
        if let Some(metric) = self.metric.as_deref().filter(|m| !m.is_empty()) {
            pairs.push(("metric", metric.to_string()));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// Percent-encoded query string, without the leading `?`
pub fn encode_query(pairs: &[(&'static str, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Appends `?query` when there is anything to append
pub fn with_query(path: String, pairs: &[(&'static str, String)]) -> String {
    if pairs.is_empty() {
        path
    } else {
        format!("{}?{}", path, encode_query(pairs))
    }
}

impl fmt::Display for SortModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.sort.as_str())
    }
}
