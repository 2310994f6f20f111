//! Operation Table
//!
//! Every backend operation is declared once here with its HTTP method, its
//! endpoint, the resource tag its response is cached under, and the tags a
//! successful call marks stale. The mapping is a fixed table; nothing is
//! computed at runtime.

use crate::models::MenuCategory;
use reqwest::Method;
use std::fmt;

/// Resource category used for cache invalidation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceTag {
    User,
    Customers,
    Pizzas,
    Drinks,
    Sides,
    Salads,
    Payments,
    Stats,
    Chat,
}

impl ResourceTag {
    pub fn for_menu(category: MenuCategory) -> Self {
        match category {
            MenuCategory::Pizza => ResourceTag::Pizzas,
            MenuCategory::Drink => ResourceTag::Drinks,
            MenuCategory::Side => ResourceTag::Sides,
            MenuCategory::Salad => ResourceTag::Salads,
        }
    }
}

/// Statistics endpoints under `/api/stats`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatsResource {
    AverageOrderValue,
    OrderCountByStatus,
    TopActiveUsers,
    RevenueByDay,
    TotalRevenue,
    TopSellingProducts,
}

impl StatsResource {
    pub const ALL: [StatsResource; 6] = [
        StatsResource::AverageOrderValue,
        StatsResource::OrderCountByStatus,
        StatsResource::TopActiveUsers,
        StatsResource::RevenueByDay,
        StatsResource::TotalRevenue,
        StatsResource::TopSellingProducts,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            StatsResource::AverageOrderValue => "average-order-value",
            StatsResource::OrderCountByStatus => "order-count-by-status",
            StatsResource::TopActiveUsers => "top-active-users",
            StatsResource::RevenueByDay => "revenue-by-day",
            StatsResource::TotalRevenue => "total-revenue",
            StatsResource::TopSellingProducts => "top-selling-products",
        }
    }
}

/// A declared backend operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    GetUser,
    GetCustomers,
    CreateUser,
    UpdateUser,
    DeleteUser,
    ListMenu(MenuCategory),
    CreateMenuItem(MenuCategory),
    UpdateMenuItem(MenuCategory),
    DeleteMenuItem(MenuCategory),
    GetPayments,
    Stats(StatsResource),
    SendChatMessage,
}

impl Operation {
    pub fn method(&self) -> Method {
        match self {
            Operation::GetUser
            | Operation::GetCustomers
            | Operation::ListMenu(_)
            | Operation::GetPayments
            | Operation::Stats(_) => Method::GET,
            Operation::Login
            | Operation::CreateUser
            | Operation::CreateMenuItem(_)
            | Operation::SendChatMessage => Method::POST,
            Operation::UpdateUser | Operation::UpdateMenuItem(_) => Method::PUT,
            Operation::DeleteUser | Operation::DeleteMenuItem(_) => Method::DELETE,
        }
    }

    /// Endpoint without the trailing record id
    pub fn endpoint(&self) -> String {
        match self {
            Operation::Login => "/api/user/login".to_string(),
            Operation::GetUser => "/api/user/getUser".to_string(),
            Operation::GetCustomers => "/api/user/getAllUser".to_string(),
            Operation::CreateUser => "/api/user/createUser".to_string(),
            Operation::UpdateUser => "/api/user/updateUser".to_string(),
            Operation::DeleteUser => "/api/user/deleteUser".to_string(),
            Operation::ListMenu(c) => format!("/api/{}/getAll{}", c.slug(), c.name()),
            Operation::CreateMenuItem(c) => format!("/api/{}/create{}", c.slug(), c.name()),
            Operation::UpdateMenuItem(c) => format!("/api/{}/update{}", c.slug(), c.name()),
            Operation::DeleteMenuItem(c) => format!("/api/{}/delete{}", c.slug(), c.name()),
            Operation::GetPayments => "/api/payment/getAllPayments".to_string(),
            Operation::Stats(s) => format!("/api/stats/{}", s.slug()),
            Operation::SendChatMessage => "/chat".to_string(),
        }
    }

    /// Whether the endpoint expects `/{id}` appended
    pub fn takes_id(&self) -> bool {
        matches!(
            self,
            Operation::GetUser
                | Operation::UpdateUser
                | Operation::DeleteUser
                | Operation::UpdateMenuItem(_)
                | Operation::DeleteMenuItem(_)
        )
    }

    /// Full path, with the record id percent-encoded when the operation takes one
    pub fn path(&self, id: Option<&str>) -> String {
        match (self.takes_id(), id) {
            (true, Some(id)) => format!("{}/{}", self.endpoint(), urlencoding::encode(id)),
            _ => self.endpoint(),
        }
    }

    /// Whether the request carries the bearer token
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Operation::Login)
    }

    /// Tag a query's response is cached under. `None` for mutations.
    pub fn provides(&self) -> Option<ResourceTag> {
        match self {
            Operation::GetUser => Some(ResourceTag::User),
            Operation::GetCustomers => Some(ResourceTag::Customers),
            Operation::ListMenu(c) => Some(ResourceTag::for_menu(*c)),
            Operation::GetPayments => Some(ResourceTag::Payments),
            Operation::Stats(_) => Some(ResourceTag::Stats),
            _ => None,
        }
    }

    /// Tags marked stale after a successful call
    pub fn invalidates(&self) -> &'static [ResourceTag] {
        match self {
            Operation::CreateUser | Operation::UpdateUser | Operation::DeleteUser => {
                &[ResourceTag::Customers]
            }
            Operation::CreateMenuItem(c)
            | Operation::UpdateMenuItem(c)
            | Operation::DeleteMenuItem(c) => match c {
                MenuCategory::Pizza => &[ResourceTag::Pizzas],
                MenuCategory::Drink => &[ResourceTag::Drinks],
                MenuCategory::Side => &[ResourceTag::Sides],
                MenuCategory::Salad => &[ResourceTag::Salads],
            },
            Operation::SendChatMessage => &[ResourceTag::Chat],
            _ => &[],
        }
    }

    pub fn is_query(&self) -> bool {
        self.provides().is_some()
    }
}

impl fmt::Display for Operation {
    /// Operation name for logs, e.g. `deletePizza`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Login => f.write_str("login"),
            Operation::GetUser => f.write_str("getUser"),
            Operation::GetCustomers => f.write_str("getCustomers"),
            Operation::CreateUser => f.write_str("createUser"),
            Operation::UpdateUser => f.write_str("updateUser"),
            Operation::DeleteUser => f.write_str("deleteUser"),
            Operation::ListMenu(c) => write!(f, "get{}s", c.name()),
            Operation::CreateMenuItem(c) => write!(f, "create{}", c.name()),
            Operation::UpdateMenuItem(c) => write!(f, "update{}", c.name()),
            Operation::DeleteMenuItem(c) => write!(f, "delete{}", c.name()),
            Operation::GetPayments => f.write_str("getPayments"),
            Operation::Stats(s) => write!(f, "stats:{}", s.slug()),
            Operation::SendChatMessage => f.write_str("sendChatMessage"),
        }
    }
}
