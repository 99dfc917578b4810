use tracing::debug;

use crate::{
    clients::directory::Directory,
    error::NotificationError,
    models::entities::{Contractor, ContractorKind, Employee, Seller},
};

pub struct EntityResolver<'a> {
    directory: &'a dyn Directory,
}

impl<'a> EntityResolver<'a> {
    pub fn new(directory: &'a dyn Directory) -> Self {
        Self { directory }
    }

    pub async fn resolve_seller(&self, seller_id: i64) -> Result<Seller, NotificationError> {
        self.directory
            .find_seller_by_id(seller_id)
            .await?
            .ok_or_else(|| NotificationError::NotFound("Seller not found!".to_string()))
    }

    /// A contractor that is not a customer, or belongs to a different
    /// reseller, is reported the same way as a missing one.
    pub async fn resolve_client(
        &self,
        client_id: i64,
        reseller_id: i64,
    ) -> Result<Contractor, NotificationError> {
        let contractor = self.directory.find_contractor_by_id(client_id).await?;

        match contractor {
            Some(c) if c.kind == ContractorKind::Customer && c.seller_id == reseller_id => {
                debug!(client_id = c.id, "Client resolved");
                Ok(c)
            }
            _ => Err(NotificationError::NotFound("Client not found!".to_string())),
        }
    }

    pub async fn resolve_employee(
        &self,
        employee_id: i64,
        missing_message: &str,
    ) -> Result<Employee, NotificationError> {
        self.directory
            .find_employee_by_id(employee_id)
            .await?
            .ok_or_else(|| NotificationError::NotFound(missing_message.to_string()))
    }
}
