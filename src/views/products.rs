//! Menu screen: all four categories in one list.

use super::{is_blank, Editor, ViewError, ViewResult};
use crate::client::{ApiClient, ClientError};
use crate::models::{MenuCategory, MenuItem, MenuItemPayload};
use crate::session::Session;

/// Editable menu fields, kept as typed text until validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuFields {
    pub name: String,
    pub description: String,
    pub base_price: String,
    pub size: String,
    pub crust_type: String,
}

impl MenuFields {
    pub fn from_item(item: &MenuItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            base_price: item.base_price.to_string(),
            size: item.size.clone().unwrap_or_default(),
            crust_type: item.crust_type.clone().unwrap_or_default(),
        }
    }

    /// Required fields, numeric price; pizza options only for pizzas
    pub fn validate(&self, category: MenuCategory) -> Result<MenuItemPayload, String> {
        if is_blank(&self.name) || is_blank(&self.description) || is_blank(&self.base_price) {
            return Err("Name, description and base price are required".to_string());
        }
        let base_price: f64 = self
            .base_price
            .trim()
            .parse()
            .map_err(|_| format!("Base price must be a number, got '{}'", self.base_price))?;
        if !base_price.is_finite() || base_price < 0.0 {
            return Err("Base price must be a non-negative number".to_string());
        }

        let (size, crust_type) = if category.has_pizza_options() {
            (Some(self.size.trim().to_string()), Some(self.crust_type.trim().to_string()))
        } else {
            (None, None)
        };

        Ok(MenuItemPayload {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            base_price,
            size,
            crust_type,
        })
    }
}

/// Create form: the category is chosen here and nowhere else
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuDraft {
    pub category: MenuCategory,
    pub fields: MenuFields,
}

/// Update form for an existing item. The category comes from the item.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuUpdate {
    id: String,
    category: MenuCategory,
    pub fields: MenuFields,
}

impl MenuUpdate {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn category(&self) -> MenuCategory {
        self.category
    }
}

#[derive(Debug, Default)]
pub struct ProductsView {
    items: Vec<MenuItem>,
    loaded: bool,
    error: Option<String>,
    pub create: Editor<MenuDraft>,
    pub update: Editor<MenuUpdate>,
}

impl ProductsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pizzas, drinks, sides, then salads
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        !self.loaded && self.items.is_empty()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn find(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Re-fetch all four categories concurrently and replace the list.
    ///
    /// A category that fails keeps its previously listed items; the first
    /// failure becomes the banner.
    pub async fn refresh(&mut self, client: &ApiClient, session: &Session) -> ViewResult<()> {
        let (pizzas, drinks, sides, salads) = tokio::join!(
            client.list_menu(session, MenuCategory::Pizza),
            client.list_menu(session, MenuCategory::Drink),
            client.list_menu(session, MenuCategory::Side),
            client.list_menu(session, MenuCategory::Salad),
        );

        let (items, first_error) = merge_categories(&self.items, [pizzas, drinks, sides, salads]);
        self.items = items;
        self.loaded = true;
        match first_error {
            Some(e) => {
                self.error = Some(format!("Failed to load menu: {}", e.user_message()));
                Err(e.into())
            }
            None => {
                self.error = None;
                Ok(())
            }
        }
    }

    /// Open the create form with the given category selected
    pub fn open_create(&mut self, category: MenuCategory) {
        self.error = None;
        self.create.open(MenuDraft {
            category,
            fields: MenuFields::default(),
        });
    }

    pub async fn submit_create(&mut self, client: &ApiClient, session: &Session) -> ViewResult<()> {
        self.error = None;
        let Some(draft) = self.create.draft().cloned() else {
            return Err(ViewError::InvalidState("create form is not open".into()));
        };
        let payload = draft
            .fields
            .validate(draft.category)
            .map_err(|msg| self.reject(msg))?;

        self.create.begin_submit();
        match client
            .create_menu_item(session, draft.category, &payload)
            .await
        {
            Ok(_) => {
                self.create.succeed();
                tracing::info!(category = %draft.category, name = %payload.name, "Menu item created");
                self.refresh(client, session).await
            }
            Err(e) => {
                self.create.fail();
                self.error = Some(format!("Failed to create {}: {}", draft.category, e.user_message()));
                Err(e.into())
            }
        }
    }

    /// Select an item for editing; it stays selected until cancel or save
    pub fn begin_update(&mut self, id: &str) -> ViewResult<()> {
        let item = self
            .find(id)
            .ok_or_else(|| ViewError::InvalidState(format!("no menu item with id {id}")))?;
        let update = MenuUpdate {
            id: item.id.clone(),
            category: item.category,
            fields: MenuFields::from_item(item),
        };
        self.error = None;
        self.update.open(update);
        Ok(())
    }

    pub fn cancel_update(&mut self) {
        self.update.cancel();
    }

    pub async fn submit_update(&mut self, client: &ApiClient, session: &Session) -> ViewResult<()> {
        self.error = None;
        let Some(update) = self.update.draft().cloned() else {
            return Err(ViewError::InvalidState("no item selected for update".into()));
        };
        let payload = update
            .fields
            .validate(update.category)
            .map_err(|msg| self.reject(msg))?;

        self.update.begin_submit();
        match client
            .update_menu_item(session, update.category, &update.id, &payload)
            .await
        {
            Ok(_) => {
                self.update.succeed();
                tracing::info!(category = %update.category, id = %update.id, "Menu item updated");
                self.refresh(client, session).await
            }
            Err(e) => {
                self.update.fail();
                self.error = Some(format!("Failed to update {}: {}", update.category, e.user_message()));
                Err(e.into())
            }
        }
    }

    /// Delete through the item's own category endpoint. The row stays until
    /// the server confirms and the list is re-fetched.
    pub async fn delete(
        &mut self,
        client: &ApiClient,
        session: &Session,
        category: MenuCategory,
        id: &str,
    ) -> ViewResult<()> {
        self.error = None;
        match client.delete_menu_item(session, category, id).await {
            Ok(_) => {
                tracing::info!(category = %category, id = %id, "Menu item deleted");
                self.refresh(client, session).await
            }
            Err(e) => {
                self.error = Some(format!("Failed to delete {}: {}", category, e.user_message()));
                Err(e.into())
            }
        }
    }

    /// Delete a listed item, routing by the category it was listed under
    pub async fn delete_listed(
        &mut self,
        client: &ApiClient,
        session: &Session,
        id: &str,
    ) -> ViewResult<()> {
        let category = self
            .find(id)
            .map(|item| item.category)
            .ok_or_else(|| ViewError::InvalidState(format!("no menu item with id {id}")))?;
        self.delete(client, session, category, id).await
    }

    fn reject(&mut self, msg: String) -> ViewError {
        self.error = Some(msg.clone());
        ViewError::Validation(msg)
    }
}

/// Results arrive in `MenuCategory::ALL` order
fn merge_categories(
    previous: &[MenuItem],
    results: [Result<Vec<MenuItem>, ClientError>; 4],
) -> (Vec<MenuItem>, Option<ClientError>) {
    let mut items = Vec::new();
    let mut first_error = None;
    for (category, result) in MenuCategory::ALL.into_iter().zip(results) {
        match result {
            Ok(list) => items.extend(list),
            Err(e) => {
                items.extend(previous.iter().filter(|i| i.category == category).cloned());
                first_error.get_or_insert(e);
            }
        }
    }
    (items, first_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, description: &str, price: &str) -> MenuFields {
        MenuFields {
            name: name.into(),
            description: description.into(),
            base_price: price.into(),
            size: "Large".into(),
            crust_type: "Thin".into(),
        }
    }

    #[test]
    fn test_validate_requires_fields() {
        assert!(fields("", "d", "1").validate(MenuCategory::Pizza).is_err());
        assert!(fields("n", "  ", "1").validate(MenuCategory::Pizza).is_err());
        assert!(fields("n", "d", "").validate(MenuCategory::Pizza).is_err());
        assert!(fields("n", "d", "abc").validate(MenuCategory::Pizza).is_err());
        assert!(fields("n", "d", "-1").validate(MenuCategory::Pizza).is_err());
    }

    #[test]
    fn test_pizza_options_only_for_pizza() {
        let pizza = fields("Margherita", "Classic", "9.5")
            .validate(MenuCategory::Pizza)
            .unwrap();
        assert_eq!(pizza.size.as_deref(), Some("Large"));
        assert_eq!(pizza.base_price, 9.5);

        let drink = fields("Cola", "Cold", "2").validate(MenuCategory::Drink).unwrap();
        assert!(drink.size.is_none());
        assert!(drink.crust_type.is_none());
    }

    #[test]
    fn test_submit_without_open_form_is_rejected() {
        let mut view = ProductsView::new();
        assert!(view.create.draft().is_none());
        assert!(view.begin_update("missing").is_err());
    }

    fn item(id: &str, category: MenuCategory) -> MenuItem {
        MenuItem {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            base_price: 1.0,
            image_url: None,
            size: None,
            crust_type: None,
            category,
        }
    }

    #[test]
    fn test_failed_category_keeps_previous_items() {
        let previous = vec![
            item("p1", MenuCategory::Pizza),
            item("d1", MenuCategory::Drink),
            item("d2", MenuCategory::Drink),
        ];
        let unauthorized = ClientError::Api {
            status: 401,
            message: "Unauthorized".into(),
        };

        let (items, error) = merge_categories(
            &previous,
            [
                Ok(vec![item("p2", MenuCategory::Pizza)]),
                Err(unauthorized),
                Ok(vec![]),
                Ok(vec![item("s1", MenuCategory::Salad)]),
            ],
        );

        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "d1", "d2", "s1"]);
        assert_eq!(error.map(|e| e.status()), Some(Some(401)));
    }

    #[test]
    fn test_validation_failure_keeps_form_open() {
        let mut view = ProductsView::new();
        view.open_create(MenuCategory::Side);
        let fields = view.create.draft().unwrap().fields.clone();
        let msg = fields.validate(MenuCategory::Side).unwrap_err();
        let err = view.reject(msg);
        assert!(matches!(err, ViewError::Validation(_)));
        assert!(view.create.is_open());
        assert!(view.error().is_some());
    }
}
