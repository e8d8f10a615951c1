use crate::traits::{CatalogManagement, CustomerManagement, OrderApiError, OrderManagement};

/// The full set of repository behaviour a backend needs to expose in order to drive the import pipeline.
///
/// The pipeline holds one backend value and clones it freely (backends are expected to be cheap handles over a
/// connection pool).
#[allow(async_fn_in_trait)]
pub trait OrderImportDatabase: Clone + OrderManagement + CustomerManagement + CatalogManagement {
    /// The URL of the database
    fn url(&self) -> &str;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<(), OrderApiError> {
        Ok(())
    }
}
