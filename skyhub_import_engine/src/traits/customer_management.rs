use thiserror::Error;

use crate::db_types::{Customer, NewCustomer};

/// Access to the customer repository.
///
/// Customer identity is scoped by website: the same email may exist once per website id. "Customer does not exist"
/// is an expected outcome of the lookup and is reported as `Ok(None)`, never as an error; the error type is reserved
/// for genuine repository failures, which abort the import of the reference being processed.
#[allow(async_fn_in_trait)]
pub trait CustomerManagement {
    async fn fetch_customer_by_email(&self, email: &str, website_id: i64)
        -> Result<Option<Customer>, CustomerApiError>;

    /// Persists a new customer together with its address set, returning the stored record with assigned ids and
    /// default-address markers resolved.
    async fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, CustomerApiError>;
}

#[derive(Debug, Clone, Error)]
pub enum CustomerApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Cannot insert customer, since {0} already exists on website {1}")]
    CustomerAlreadyExists(String, i64),
    #[error("The requested customer (internal id {0}) does not exist")]
    CustomerNotFound(i64),
}

impl From<sqlx::Error> for CustomerApiError {
    fn from(e: sqlx::Error) -> Self {
        CustomerApiError::DatabaseError(e.to_string())
    }
}
