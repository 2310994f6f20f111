//! Customer accounts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Admin => f.write_str("admin"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Body for create and update calls. `password` is only set on create.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerPayload {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub phone: String,
    pub address: String,
    pub date_of_birth: String,
    pub role: Role,
}

/// Formats a ten digit prefix as `(555)123-4567`; other input is returned as is.
pub fn format_phone(phone: &str) -> String {
    let digits: Vec<char> = phone.chars().take(10).collect();
    if digits.len() == 10 && digits.iter().all(|c| c.is_ascii_digit()) {
        let d: String = digits.iter().collect();
        let rest: String = phone.chars().skip(10).collect();
        format!("({}){}-{}{}", &d[..3], &d[3..6], &d[6..], rest)
    } else {
        phone.to_string()
    }
}
