//! Customer accounts screen

use super::{is_blank, Editor, ViewError, ViewResult};
use crate::client::ApiClient;
use crate::models::{Customer, CustomerPayload, Role};
use crate::session::Session;

/// Create/update form contents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerDraft {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub date_of_birth: String,
    pub role: Role,
}

impl CustomerDraft {
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            username: customer.username.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone().unwrap_or_default(),
            address: customer.address.clone().unwrap_or_default(),
            date_of_birth: customer.date_of_birth.clone().unwrap_or_default(),
            role: customer.role,
        }
    }

    fn to_payload(&self, password: Option<String>) -> Result<CustomerPayload, String> {
        if is_blank(&self.username) || is_blank(&self.email) {
            return Err("Username and email are required".to_string());
        }
        Ok(CustomerPayload {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password,
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            date_of_birth: self.date_of_birth.trim().to_string(),
            role: self.role,
        })
    }
}

#[derive(Debug)]
pub struct CustomersView {
    customers: Vec<Customer>,
    error: Option<String>,
    default_password: String,
    pub create: Editor<CustomerDraft>,
    /// Selected customer id and its form
    pub update: Editor<(String, CustomerDraft)>,
}

impl CustomersView {
    /// `default_password` is sent with every created account
    pub fn new(default_password: impl Into<String>) -> Self {
        Self {
            customers: Vec::new(),
            error: None,
            default_password: default_password.into(),
            create: Editor::new(),
            update: Editor::new(),
        }
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn refresh(&mut self, client: &ApiClient, session: &Session) -> ViewResult<()> {
        match client.list_customers(session).await {
            Ok(customers) => {
                self.customers = customers;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(format!("Failed to load users: {}", e.user_message()));
                Err(e.into())
            }
        }
    }

    pub fn open_create(&mut self) {
        self.error = None;
        self.create.open(CustomerDraft::default());
    }

    pub async fn submit_create(&mut self, client: &ApiClient, session: &Session) -> ViewResult<()> {
        self.error = None;
        let Some(draft) = self.create.draft().cloned() else {
            return Err(ViewError::InvalidState("create form is not open".into()));
        };
        let payload = match draft.to_payload(Some(self.default_password.clone())) {
            Ok(payload) => payload,
            Err(msg) => return Err(self.reject(msg)),
        };

        self.create.begin_submit();
        match client.create_customer(session, &payload).await {
            Ok(_) => {
                self.create.succeed();
                tracing::info!(username = %payload.username, "User created");
                self.refresh(client, session).await
            }
            Err(e) => {
                self.create.fail();
                self.error = Some(format!("Failed to create user: {}", e.user_message()));
                Err(e.into())
            }
        }
    }

    pub fn begin_update(&mut self, id: &str) -> ViewResult<()> {
        let customer = self
            .customers
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| ViewError::InvalidState(format!("no user with id {id}")))?;
        let draft = CustomerDraft::from_customer(customer);
        self.error = None;
        self.update.open((id.to_string(), draft));
        Ok(())
    }

    pub fn cancel_update(&mut self) {
        self.update.cancel();
    }

    pub async fn submit_update(&mut self, client: &ApiClient, session: &Session) -> ViewResult<()> {
        self.error = None;
        let Some((id, draft)) = self.update.draft().cloned() else {
            return Err(ViewError::InvalidState("no user selected for update".into()));
        };
        let payload = match draft.to_payload(None) {
            Ok(payload) => payload,
            Err(msg) => return Err(self.reject(msg)),
        };

        self.update.begin_submit();
        match client.update_customer(session, &id, &payload).await {
            Ok(_) => {
                self.update.succeed();
                tracing::info!(id = %id, "User updated");
                self.refresh(client, session).await
            }
            Err(e) => {
                self.update.fail();
                self.error = Some(format!("Failed to update user: {}", e.user_message()));
                Err(e.into())
            }
        }
    }

    pub async fn delete(&mut self, client: &ApiClient, session: &Session, id: &str) -> ViewResult<()> {
        self.error = None;
        match client.delete_customer(session, id).await {
            Ok(_) => {
                tracing::info!(id = %id, "User deleted");
                self.refresh(client, session).await
            }
            Err(e) => {
                self.error = Some(format!("Failed to delete user: {}", e.user_message()));
                Err(e.into())
            }
        }
    }

    fn reject(&mut self, msg: String) -> ViewError {
        self.error = Some(msg.clone());
        ViewError::Validation(msg)
    }
}
