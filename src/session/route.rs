//! Route guard: which screen a request actually lands on.

use super::Session;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Products,
    Customers,
    Transactions,
    Charts,
    AskAi,
}

impl Route {
    /// Resolve a requested route against the session.
    ///
    /// Without a token every route lands on `Login`; with a token, `Login`
    /// forwards to `Dashboard`.
    pub fn resolve(requested: Route, session: &Session) -> Route {
        match (session.is_authenticated(), requested) {
            (false, _) => Route::Login,
            (true, Route::Login) => Route::Dashboard,
            (true, route) => route,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::Products => "/products",
            Route::Customers => "/customers",
            Route::Transactions => "/transactions",
            Route::Charts => "/charts",
            Route::AskAi => "/askAI",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    /// `/` resolves like `/dashboard`; the guard sends it to login when needed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "/" | "/dashboard" => Ok(Route::Dashboard),
            "/login" => Ok(Route::Login),
            "/products" => Ok(Route::Products),
            "/customers" => Ok(Route::Customers),
            "/transactions" => Ok(Route::Transactions),
            "/charts" => Ok(Route::Charts),
            "/askAI" => Ok(Route::AskAi),
            other => Err(format!("unknown route: {other}")),
        }
    }
}
