use crate::{db_types::NewCustomer, marketplace_objects::MarketplaceCustomer};

/// Extension point for mapping marketplace customer attributes (person type, state registration, social name, ...)
/// onto store-specific custom attributes during customer creation.
///
/// The capability exists in the integration but is intentionally inert: the attribute-mapping subsystem it depends
/// on is not part of this system. [`NoopAttributeMapper`] is the default and only shipped implementation.
pub trait CustomerAttributeMapping: Send + Sync {
    fn apply(&self, source: &MarketplaceCustomer, customer: &mut NewCustomer);
}

/// The default no-op attribute mapper.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAttributeMapper;

impl CustomerAttributeMapping for NoopAttributeMapper {
    fn apply(&self, _source: &MarketplaceCustomer, _customer: &mut NewCustomer) {}
}
