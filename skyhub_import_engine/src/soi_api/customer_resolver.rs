//! Customer resolution: find the customer by email + website scope, or create one from the marketplace data.
use log::*;

use crate::{
    db_types::{AddressRole, Customer, Gender, NewCustomer, NewCustomerAddress},
    helpers::break_name,
    marketplace_objects::{MarketplaceAddress, MarketplaceCustomer},
    soi_api::{
        address_builder::{build_address, AddressBook},
        errors::OrderImportError,
        import_objects::StoreScope,
        OrderImportApi,
    },
    traits::OrderImportDatabase,
};

impl<B> OrderImportApi<B>
where B: OrderImportDatabase
{
    /// Resolves the customer for an incoming order and fills the address book with the order addresses.
    ///
    /// An existing customer contributes addresses from their stored address set (see
    /// [`select_default_addresses`]); the marketplace addresses are only used when a new customer has to be
    /// created. Repository failures other than "not found" are fatal for this import attempt and propagate.
    pub(crate) async fn resolve_customer(
        &self,
        scope: &StoreScope,
        data: &MarketplaceCustomer,
        billing: Option<&MarketplaceAddress>,
        shipping: Option<&MarketplaceAddress>,
        book: &mut AddressBook,
    ) -> Result<Customer, OrderImportError> {
        match self.db.fetch_customer_by_email(&data.email, scope.website_id).await? {
            Some(customer) => {
                debug!("👤️ Customer {} already exists on website {} (#{})", data.email, scope.website_id, customer.id);
                select_default_addresses(&customer, book);
                Ok(customer)
            },
            None => {
                debug!("👤️ Customer {} not found on website {}. Creating.", data.email, scope.website_id);
                self.create_customer(scope, data, billing, shipping, book).await
            },
        }
    }

    /// Creates a new customer from marketplace data, building its address set from whichever order addresses are
    /// present.
    async fn create_customer(
        &self,
        scope: &StoreScope,
        data: &MarketplaceCustomer,
        billing: Option<&MarketplaceAddress>,
        shipping: Option<&MarketplaceAddress>,
        book: &mut AddressBook,
    ) -> Result<Customer, OrderImportError> {
        let name = break_name(&data.name);
        let gender = match data.gender.as_deref() {
            Some("male") => Some(Gender::Male),
            Some("female") => Some(Gender::Female),
            _ => None,
        };
        let telephone = data.phones.first().cloned();

        let mut customer = NewCustomer {
            website_id: scope.website_id,
            store_id: scope.store_id,
            email: data.email.clone(),
            firstname: name.firstname.clone(),
            middlename: name.middlename.clone(),
            lastname: name.lastname.clone(),
            dob: data.date_of_birth,
            gender,
            telephone,
            taxvat: data.vat_number.clone(),
            addresses: Vec::new(),
        };
        // Person-type/custom-attribute mapping is an inert extension point; the default mapper does nothing.
        self.attribute_mapper.apply(data, &mut customer);

        if let Some(billing) = billing {
            let address = build_address(scope, billing, &name.firstname, &name.lastname);
            book.push(address, AddressRole::Billing);
        }
        if let Some(shipping) = shipping {
            let address = build_address(scope, shipping, &name.firstname, &name.lastname);
            book.push(address, AddressRole::Shipping);
        }
        customer.addresses = address_set_from(book);

        let customer = self.db.insert_customer(customer).await?;
        info!("👤️ Customer {} created with id {}", customer.email, customer.id);
        Ok(customer)
    }
}

/// Selects the order addresses from an existing customer's address set.
///
/// The scan walks the stored addresses in iteration order with a deliberately non-uniform exit rule: an address
/// matching the default-billing id fills BILLING and the scan continues; one matching default-shipping fills
/// SHIPPING and the scan continues; the first address matching neither fills BOTH roles and stops the scan
/// entirely. Multiple defaults can therefore be picked up before a non-default address halts iteration. This
/// ordering is load-bearing for which address wins when several are eligible; keep it exactly.
pub(crate) fn select_default_addresses(customer: &Customer, book: &mut AddressBook) {
    for address in &customer.addresses {
        if customer.default_billing == Some(address.id) {
            book.push(address.into(), AddressRole::Billing);
            continue;
        }
        if customer.default_shipping == Some(address.id) {
            book.push(address.into(), AddressRole::Shipping);
            continue;
        }
        book.push(address.into(), AddressRole::Billing);
        book.push(address.into(), AddressRole::Shipping);
        break;
    }
}

/// Collapses the address book into the address set persisted with a new customer. When the same address fills both
/// roles it is stored once, flagged as default for both; otherwise each assigned role contributes one record.
fn address_set_from(book: &AddressBook) -> Vec<NewCustomerAddress> {
    let (billing, shipping) = book.assigned();
    match (billing, shipping) {
        (Some(b), Some(s)) if b == s => {
            vec![NewCustomerAddress { address: b.clone(), is_default_billing: true, is_default_shipping: true }]
        },
        (billing, shipping) => {
            let mut addresses = Vec::with_capacity(2);
            if let Some(b) = billing {
                addresses.push(NewCustomerAddress {
                    address: b.clone(),
                    is_default_billing: true,
                    is_default_shipping: false,
                });
            }
            if let Some(s) = shipping {
                addresses.push(NewCustomerAddress {
                    address: s.clone(),
                    is_default_billing: false,
                    is_default_shipping: true,
                });
            }
            addresses
        },
    }
}

#[cfg(test)]
mod test {
    use chrono::Utc;

    use super::*;
    use crate::db_types::CustomerAddress;

    fn stored_address(id: i64, label: &str) -> CustomerAddress {
        CustomerAddress {
            id,
            customer_id: 1,
            firstname: "Ana".to_string(),
            lastname: "Souza".to_string(),
            telephone: None,
            street: vec![label.to_string()],
            city: "São Paulo".to_string(),
            region: Some("SP".to_string()),
            postcode: "01000-000".to_string(),
            country_id: "BR".to_string(),
        }
    }

    fn customer_with(addresses: Vec<CustomerAddress>, billing: Option<i64>, shipping: Option<i64>) -> Customer {
        Customer {
            id: 1,
            website_id: 1,
            store_id: 1,
            email: "ana@example.com".to_string(),
            firstname: "Ana".to_string(),
            middlename: None,
            lastname: "Souza".to_string(),
            dob: None,
            gender: None,
            telephone: None,
            taxvat: None,
            default_billing: billing,
            default_shipping: shipping,
            addresses,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn both_defaults_matched_before_break() {
        // Addresses [A(id=1), B(id=2)] with defaultBilling=2, defaultShipping=1: A fills SHIPPING, B fills BILLING,
        // and no non-default address ever triggers the both-roles break.
        let customer =
            customer_with(vec![stored_address(1, "A"), stored_address(2, "B")], Some(2), Some(1));
        let mut book = AddressBook::default();
        select_default_addresses(&customer, &mut book);
        assert_eq!(book.billing().unwrap().street, vec!["B"]);
        assert_eq!(book.shipping().unwrap().street, vec!["A"]);
    }

    #[test]
    fn non_default_address_takes_both_roles_and_stops_the_scan() {
        let customer =
            customer_with(vec![stored_address(1, "A"), stored_address(2, "B")], None, None);
        let mut book = AddressBook::default();
        select_default_addresses(&customer, &mut book);
        // The first address matched neither default, so it fills both roles and B is never considered.
        assert_eq!(book.billing().unwrap().street, vec!["A"]);
        assert_eq!(book.shipping().unwrap().street, vec!["A"]);
    }

    #[test]
    fn default_billing_then_non_default_overwrites_shipping_only() {
        // A is default billing; B matches no default, so it fills both roles. Billing ends up overwritten by B:
        // the last write wins, exactly as the legacy scan behaved.
        let customer =
            customer_with(vec![stored_address(1, "A"), stored_address(2, "B")], Some(1), None);
        let mut book = AddressBook::default();
        select_default_addresses(&customer, &mut book);
        assert_eq!(book.billing().unwrap().street, vec!["B"]);
        assert_eq!(book.shipping().unwrap().street, vec!["B"]);
    }

    #[test]
    fn no_addresses_leaves_the_book_empty() {
        let customer = customer_with(vec![], None, None);
        let mut book = AddressBook::default();
        select_default_addresses(&customer, &mut book);
        assert!(book.is_empty());
    }
}
