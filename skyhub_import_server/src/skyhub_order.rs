//! Conversion of SkyHub wire orders into the engine's marketplace payload model.
use chrono::NaiveDate;
use log::trace;
use skyhub_import_engine::marketplace_objects::{
    MarketplaceAddress,
    MarketplaceCustomer,
    MarketplaceItem,
    MarketplaceOrder,
    MarketplaceStatus,
};
use skyhub_tools::{SkyHubAddress, SkyHubCustomer, SkyHubItem, SkyHubOrder};

pub fn to_marketplace_order(value: SkyHubOrder) -> MarketplaceOrder {
    trace!("Converting SkyHubOrder to MarketplaceOrder: {:?}", value);
    MarketplaceOrder {
        code: value.code.into(),
        channel: value.channel,
        placed_at: value.placed_at.map(|d| d.to_rfc3339()),
        status: MarketplaceStatus { code: value.status.code, kind: value.status.kind.into() },
        customer: convert_customer(value.customer),
        billing_address: value.billing_address.map(convert_address),
        shipping_address: value.shipping_address.map(convert_address),
        items: value.items.into_iter().map(convert_item).collect(),
        shipping_carrier: value.shipping_carrier,
        shipping_method: value.shipping_method,
        shipping_cost: value.shipping_cost,
        discount: value.discount,
        interest: value.interest,
    }
}

fn convert_customer(customer: SkyHubCustomer) -> MarketplaceCustomer {
    // Birth dates arrive as plain `YYYY-MM-DD` strings; anything unparseable is treated as absent.
    let date_of_birth = customer.date_of_birth.as_deref().and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());
    MarketplaceCustomer {
        name: customer.name,
        email: customer.email,
        date_of_birth,
        gender: customer.gender,
        vat_number: customer.vat_number,
        phones: customer.phones,
    }
}

fn convert_address(address: SkyHubAddress) -> MarketplaceAddress {
    MarketplaceAddress {
        street: address.street,
        number: address.number,
        neighborhood: address.neighborhood,
        complement: address.complement,
        reference: address.reference,
        city: address.city,
        region: address.region,
        postcode: address.postcode,
        country: address.country,
        phone: address.phone,
    }
}

fn convert_item(item: SkyHubItem) -> MarketplaceItem {
    MarketplaceItem {
        id: item.id,
        product_id: item.product_id,
        qty: item.qty,
        original_price: item.original_price,
        special_price: item.special_price,
    }
}

#[cfg(test)]
mod test {
    use skyhub_import_engine::marketplace_objects::MarketplaceStatusKind;
    use skyhub_tools::SkyHubOrderBuilder;

    use super::*;

    #[test]
    fn wire_order_converts_field_for_field() {
        let wire = SkyHubOrderBuilder::sample_order("ACME-42");
        let order = to_marketplace_order(wire.clone());
        assert_eq!(order.code.as_str(), "ACME-42");
        assert_eq!(order.channel, wire.channel);
        assert_eq!(order.status.kind, MarketplaceStatusKind::Approved);
        assert_eq!(order.customer.email, wire.customer.email);
        assert_eq!(order.customer.date_of_birth, Some(NaiveDate::from_ymd_opt(1988, 4, 12).unwrap()));
        assert_eq!(order.items.len(), wire.items.len());
        assert_eq!(order.items[0].product_id, "SKU-100");
        assert_eq!(order.shipping_cost, wire.shipping_cost);
        assert!(order.billing_address.is_none());
        assert!(order.shipping_address.is_some());
    }

    #[test]
    fn bad_birth_dates_are_dropped() {
        let mut wire = SkyHubOrderBuilder::sample_order("ACME-43");
        wire.customer.date_of_birth = Some("12/04/1988".to_string());
        let order = to_marketplace_order(wire);
        assert_eq!(order.customer.date_of_birth, None);
    }
}
