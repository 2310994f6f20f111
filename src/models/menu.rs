//! Menu items: pizzas, drinks, sides and salads.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Menu category. Each category is served by its own backend resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuCategory {
    #[default]
    Pizza,
    Drink,
    Side,
    Salad,
}

impl MenuCategory {
    pub const ALL: [MenuCategory; 4] = [
        MenuCategory::Pizza,
        MenuCategory::Drink,
        MenuCategory::Side,
        MenuCategory::Salad,
    ];

    /// Path segment used by the backend (`/api/pizza/...`)
    pub fn slug(&self) -> &'static str {
        match self {
            MenuCategory::Pizza => "pizza",
            MenuCategory::Drink => "drink",
            MenuCategory::Side => "side",
            MenuCategory::Salad => "salad",
        }
    }

    /// Capitalized name used in endpoint names (`getAllPizza`) and display
    pub fn name(&self) -> &'static str {
        match self {
            MenuCategory::Pizza => "Pizza",
            MenuCategory::Drink => "Drink",
            MenuCategory::Side => "Side",
            MenuCategory::Salad => "Salad",
        }
    }

    /// Only pizzas carry size and crust type.
    pub fn has_pizza_options(&self) -> bool {
        matches!(self, MenuCategory::Pizza)
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MenuCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pizza" | "pizzas" => Ok(MenuCategory::Pizza),
            "drink" | "drinks" => Ok(MenuCategory::Drink),
            "side" | "sides" => Ok(MenuCategory::Side),
            "salad" | "salads" => Ok(MenuCategory::Salad),
            other => Err(format!("unknown menu category: {other}")),
        }
    }
}

/// A menu item as returned by the backend.
///
/// The category is not part of the wire format; the client stamps it from the
/// resource the item was listed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "super::de::lenient_f64")]
    pub base_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crust_type: Option<String>,
    #[serde(skip)]
    pub category: MenuCategory,
}

impl MenuItem {
    pub fn with_category(mut self, category: MenuCategory) -> Self {
        self.category = category;
        self
    }

    /// `Pizza (Large)` style label
    pub fn kind_label(&self) -> String {
        match self.size.as_deref().filter(|s| !s.is_empty()) {
            Some(size) => format!("{} ({})", self.category, size),
            None => self.category.to_string(),
        }
    }
}

/// Body for create and update calls. Never carries the category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItemPayload {
    pub name: String,
    pub description: String,
    pub base_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crust_type: Option<String>,
}
