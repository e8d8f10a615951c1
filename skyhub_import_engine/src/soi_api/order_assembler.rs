//! The order assembler: accumulates the pieces of an order-creation request and commits them as one value.
use soi_common::Money;

use crate::{
    db_types::{AddressRole, MarketplaceCode, NewAddress, NewOrderRequest, ProductMatch},
    soi_api::errors::OrderImportError,
};

/// Builder state for one order-creation request. Consumed by [`OrderAssembly::into_request`]; abandoned on failure.
///
/// Confirmation emails are always suppressed for imported orders, so `send_confirmation` starts (and stays) false.
#[derive(Debug, Clone, Default)]
pub struct OrderAssembly {
    increment_id: Option<String>,
    send_confirmation: bool,
    customer_id: Option<i64>,
    currency: String,
    billing_address: Option<NewAddress>,
    shipping_address: Option<NewAddress>,
    shipping_method: Option<String>,
    shipping_carrier: Option<String>,
    shipping_cost: Money,
    payment_method: Option<String>,
    discount: Money,
    interest: Money,
    comment: Option<String>,
    products: Vec<ProductMatch>,
}

impl OrderAssembly {
    pub fn new(currency: String) -> Self {
        Self { currency, ..Default::default() }
    }

    pub fn set_customer(&mut self, customer_id: i64) -> &mut Self {
        self.customer_id = Some(customer_id);
        self
    }

    /// Forces the operator-facing order number. Imports use the marketplace code here so references line up across
    /// both systems.
    pub fn set_increment_id(&mut self, increment_id: &str) -> &mut Self {
        self.increment_id = Some(increment_id.to_string());
        self
    }

    pub fn set_shipping_method(&mut self, method: &str, carrier: &str, cost: Money) -> &mut Self {
        self.shipping_method = Some(method.to_string());
        self.shipping_carrier = Some(carrier.to_string());
        self.shipping_cost = cost;
        self
    }

    pub fn set_payment_method(&mut self, method: &str) -> &mut Self {
        self.payment_method = Some(method.to_string());
        self
    }

    pub fn set_discount_amount(&mut self, discount: Money) -> &mut Self {
        self.discount = discount;
        self
    }

    pub fn set_interest_amount(&mut self, interest: Money) -> &mut Self {
        self.interest = interest;
        self
    }

    pub fn set_comment(&mut self, comment: &str) -> &mut Self {
        self.comment = Some(comment.to_string());
        self
    }

    /// Assigns an address to a role. Last write wins per role.
    pub fn add_order_address(&mut self, address: NewAddress, role: AddressRole) -> &mut Self {
        match role {
            AddressRole::Billing => self.billing_address = Some(address),
            AddressRole::Shipping => self.shipping_address = Some(address),
        }
        self
    }

    pub fn add_product(&mut self, product: ProductMatch) -> &mut Self {
        self.products.push(product);
        self
    }

    /// Finalizes the assembly into the request the backend persists.
    ///
    /// Fails with [`OrderImportError::EmptyProductSet`] when no product was added: an order with zero matched line
    /// items must never be created. A missing address role falls back to the other role symmetrically; only when
    /// neither is present (or no customer was set) does assembly fail as incomplete.
    ///
    /// Totals are computed here as subtotal + shipping − discount + interest; tax and shipping-rate refinement are
    /// the order ledger's concern, not the importer's.
    pub fn into_request(
        self,
        code: &MarketplaceCode,
        channel: &str,
        payload_json: String,
    ) -> Result<NewOrderRequest, OrderImportError> {
        if self.products.is_empty() {
            return Err(OrderImportError::EmptyProductSet(code.clone()));
        }
        let customer_id = self
            .customer_id
            .ok_or_else(|| OrderImportError::IncompleteAssembly("No customer was assigned".to_string()))?;
        let billing_address = self
            .billing_address
            .clone()
            .or_else(|| self.shipping_address.clone())
            .ok_or_else(|| OrderImportError::IncompleteAssembly("No order address is available".to_string()))?;
        let shipping_address = self.shipping_address.or(self.billing_address).unwrap_or_else(|| {
            // Unreachable: the billing fallback above already failed if both were absent.
            billing_address.clone()
        });

        let subtotal = self.products.iter().map(line_total).sum::<Money>();
        let grand_total = subtotal + self.shipping_cost - self.discount + self.interest;

        Ok(NewOrderRequest {
            increment_id: self.increment_id,
            send_confirmation: self.send_confirmation,
            customer_id,
            currency: self.currency,
            billing_address,
            shipping_address,
            shipping_method: self.shipping_method.unwrap_or_default(),
            shipping_carrier: self.shipping_carrier.unwrap_or_default(),
            shipping_cost: self.shipping_cost,
            payment_method: self.payment_method.unwrap_or_default(),
            subtotal,
            discount: self.discount,
            interest: self.interest,
            grand_total,
            comment: self.comment,
            items: self.products,
            marketplace_code: code.clone(),
            marketplace_channel: if channel.is_empty() { None } else { Some(channel.to_string()) },
            marketplace_payload: payload_json,
        })
    }
}

/// Line total in cents, rounding once per line. Quantities are fractional on some marketplaces.
fn line_total(product: &ProductMatch) -> Money {
    #[allow(clippy::cast_possible_truncation)]
    Money::from_cents((product.final_price.value() as f64 * product.qty).round() as i64)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::db_types::NewAddress;

    fn address() -> NewAddress {
        NewAddress {
            firstname: "Ana".to_string(),
            lastname: "Souza".to_string(),
            telephone: None,
            street: vec!["Rua A".to_string(), "10".to_string()],
            city: "São Paulo".to_string(),
            region: Some("SP".to_string()),
            postcode: "01000-000".to_string(),
            country_id: "BR".to_string(),
        }
    }

    fn product(sku: &str, final_price: f64, qty: f64) -> ProductMatch {
        ProductMatch {
            product_id: 7,
            product_sku: sku.to_string(),
            qty,
            price: Money::from_float(final_price),
            special_price: Money::default(),
            final_price: Money::from_float(final_price),
            child: None,
        }
    }

    fn assembly() -> OrderAssembly {
        let mut assembly = OrderAssembly::new("BRL".to_string());
        assembly
            .set_customer(3)
            .set_shipping_method("freeshipping", "freeshipping", Money::from_float(10.0))
            .set_payment_method("skyhub_standard")
            .set_comment("imported");
        assembly
    }

    #[test]
    fn empty_product_set_fails_assembly() {
        let mut assembly = assembly();
        assembly.add_order_address(address(), AddressRole::Billing);
        let err = assembly.into_request(&"X-1".parse().unwrap(), "CH", "{}".to_string()).unwrap_err();
        assert!(err.is_empty_product_set());
    }

    #[test]
    fn missing_billing_address_falls_back_to_shipping() {
        let mut assembly = assembly();
        assembly.add_order_address(address(), AddressRole::Shipping).add_product(product("SKU-1", 50.0, 1.0));
        let request = assembly.into_request(&"X-2".parse().unwrap(), "CH", "{}".to_string()).unwrap();
        assert_eq!(request.billing_address, request.shipping_address);
    }

    #[test]
    fn missing_shipping_address_falls_back_to_billing() {
        let mut assembly = assembly();
        assembly.add_order_address(address(), AddressRole::Billing).add_product(product("SKU-1", 50.0, 1.0));
        let request = assembly.into_request(&"X-3".parse().unwrap(), "CH", "{}".to_string()).unwrap();
        assert_eq!(request.shipping_address, request.billing_address);
    }

    #[test]
    fn no_address_at_all_is_incomplete() {
        let mut assembly = assembly();
        assembly.add_product(product("SKU-1", 50.0, 1.0));
        let err = assembly.into_request(&"X-4".parse().unwrap(), "CH", "{}".to_string()).unwrap_err();
        assert!(matches!(err, OrderImportError::IncompleteAssembly(_)));
    }

    #[test]
    fn totals_add_up() {
        let mut assembly = assembly();
        assembly
            .add_order_address(address(), AddressRole::Billing)
            .add_product(product("SKU-1", 50.0, 2.0))
            .add_product(product("SKU-2", 19.9, 1.0))
            .set_discount_amount(Money::from_float(5.0))
            .set_interest_amount(Money::from_float(1.5));
        let request = assembly.into_request(&"X-5".parse().unwrap(), "CH", "{}".to_string()).unwrap();
        assert_eq!(request.subtotal, Money::from_float(119.9));
        // 119.90 + 10.00 shipping - 5.00 discount + 1.50 interest
        assert_eq!(request.grand_total, Money::from_float(126.4));
        assert!(!request.send_confirmation);
    }
}
