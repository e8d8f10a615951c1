//! Address normalization and the billing/shipping role assignment.
use crate::{
    db_types::{AddressRole, NewAddress},
    marketplace_objects::MarketplaceAddress,
    soi_api::import_objects::StoreScope,
};

/// Tracks which address fills which role while one order is being processed.
///
/// `push` is last-write-wins per role. The read accessors apply the symmetric cross-role fallback: when only one
/// role was filled, the other role resolves to the same address, so an order always carries both addresses as long
/// as at least one was available.
#[derive(Debug, Clone, Default)]
pub struct AddressBook {
    billing: Option<NewAddress>,
    shipping: Option<NewAddress>,
}

impl AddressBook {
    pub fn push(&mut self, address: NewAddress, role: AddressRole) {
        match role {
            AddressRole::Billing => self.billing = Some(address),
            AddressRole::Shipping => self.shipping = Some(address),
        }
    }

    pub fn billing(&self) -> Option<&NewAddress> {
        self.billing.as_ref().or(self.shipping.as_ref())
    }

    pub fn shipping(&self) -> Option<&NewAddress> {
        self.shipping.as_ref().or(self.billing.as_ref())
    }

    /// The role slots as filled, without fallback. Used when persisting a new customer's address set, where an
    /// address must only be marked default for a role it was actually assigned.
    pub fn assigned(&self) -> (Option<&NewAddress>, Option<&NewAddress>) {
        (self.billing.as_ref(), self.shipping.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.billing.is_none() && self.shipping.is_none()
    }
}

/// Builds a normalized address from marketplace data. The recipient name comes from the owning customer; the
/// marketplace address block does not carry independent name data.
pub(crate) fn build_address(
    scope: &StoreScope,
    data: &MarketplaceAddress,
    firstname: &str,
    lastname: &str,
) -> NewAddress {
    let street = pack_street_lines(
        &data.street,
        data.number.as_deref(),
        data.neighborhood.as_deref(),
        data.complement.as_deref(),
        scope.street_line_count(),
    );
    NewAddress {
        firstname: firstname.to_string(),
        lastname: lastname.to_string(),
        telephone: data.phone.clone(),
        street,
        city: data.city.clone(),
        region: data.region.clone(),
        postcode: data.postcode.clone(),
        country_id: data.country.clone().unwrap_or_else(|| scope.default_country.clone()),
    }
}

/// Packs the four marketplace street fields into the store's configured number of street lines.
///
/// The first `count - 1` lines take the leading fields verbatim (empty when absent); the last line takes the
/// remaining fields, non-empty ones joined with a single space. The returned vector always has exactly `count`
/// entries, so trailing lines can be empty.
pub(crate) fn pack_street_lines(
    street: &str,
    number: Option<&str>,
    neighborhood: Option<&str>,
    complement: Option<&str>,
    count: u8,
) -> Vec<String> {
    let fields = [street, number.unwrap_or(""), neighborhood.unwrap_or(""), complement.unwrap_or("")];
    let count = count.clamp(1, 4) as usize;
    let mut lines = Vec::with_capacity(count);
    for field in fields.iter().take(count - 1) {
        lines.push(field.to_string());
    }
    let tail = fields[count - 1..].iter().filter(|f| !f.is_empty()).copied().collect::<Vec<_>>().join(" ");
    lines.push(tail);
    lines
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn four_lines_keeps_fields_separate() {
        let lines = pack_street_lines("Rua A", Some("10"), Some("Centro"), Some("Casa 2"), 4);
        assert_eq!(lines, vec!["Rua A", "10", "Centro", "Casa 2"]);
    }

    #[test]
    fn two_lines_merges_overflow_into_the_last() {
        let lines = pack_street_lines("Rua A", Some("10"), Some("Centro"), Some("Casa 2"), 2);
        assert_eq!(lines, vec!["Rua A", "10 Centro Casa 2"]);
    }

    #[test]
    fn one_line_merges_everything() {
        let lines = pack_street_lines("Rua A", Some("10"), None, Some("Casa 2"), 1);
        assert_eq!(lines, vec!["Rua A 10 Casa 2"]);
    }

    #[test]
    fn absent_fields_leave_lines_empty() {
        let lines = pack_street_lines("Rua A", None, None, None, 4);
        assert_eq!(lines, vec!["Rua A", "", "", ""]);
        let lines = pack_street_lines("Rua A", Some("10"), None, None, 3);
        assert_eq!(lines, vec!["Rua A", "10", ""]);
    }

    #[test]
    fn out_of_range_counts_are_clamped() {
        let lines = pack_street_lines("Rua A", Some("10"), None, None, 0);
        assert_eq!(lines, vec!["Rua A 10"]);
        let lines = pack_street_lines("Rua A", Some("10"), None, None, 9);
        assert_eq!(lines.len(), 4);
    }

    fn addr(n: u32) -> NewAddress {
        NewAddress {
            firstname: "Ana".to_string(),
            lastname: "Souza".to_string(),
            telephone: None,
            street: vec![format!("Street {n}")],
            city: "São Paulo".to_string(),
            region: None,
            postcode: "01000-000".to_string(),
            country_id: "BR".to_string(),
        }
    }

    #[test]
    fn cross_role_fallback_is_symmetric() {
        let mut book = AddressBook::default();
        book.push(addr(1), AddressRole::Shipping);
        assert_eq!(book.billing(), Some(&addr(1)));
        assert_eq!(book.shipping(), Some(&addr(1)));

        let mut book = AddressBook::default();
        book.push(addr(2), AddressRole::Billing);
        assert_eq!(book.shipping(), Some(&addr(2)));
    }

    #[test]
    fn push_is_last_write_wins_per_role() {
        let mut book = AddressBook::default();
        book.push(addr(1), AddressRole::Billing);
        book.push(addr(2), AddressRole::Billing);
        book.push(addr(3), AddressRole::Shipping);
        assert_eq!(book.billing(), Some(&addr(2)));
        assert_eq!(book.shipping(), Some(&addr(3)));
    }

    #[test]
    fn assigned_does_not_apply_fallback() {
        let mut book = AddressBook::default();
        book.push(addr(1), AddressRole::Shipping);
        let (billing, shipping) = book.assigned();
        assert!(billing.is_none());
        assert_eq!(shipping, Some(&addr(1)));
    }
}
