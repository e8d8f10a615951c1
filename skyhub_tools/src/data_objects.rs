use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// An order as the SkyHub API returns it. Only the fields the import flow consumes are modelled; the marketplace
/// sends more, and unknown fields are ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SkyHubOrder {
    pub code: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub placed_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub status: SkyHubStatus,
    #[serde(default)]
    pub customer: SkyHubCustomer,
    #[serde(default)]
    pub billing_address: Option<SkyHubAddress>,
    #[serde(default)]
    pub shipping_address: Option<SkyHubAddress>,
    #[serde(default)]
    pub items: Vec<SkyHubItem>,
    #[serde(default)]
    pub shipping_carrier: Option<String>,
    #[serde(default)]
    pub shipping_method: Option<String>,
    #[serde(default)]
    pub shipping_cost: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub interest: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SkyHubStatus {
    #[serde(default)]
    pub code: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SkyHubCustomer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub vat_number: Option<String>,
    #[serde(default)]
    pub phones: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SkyHubAddress {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub complement: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub postcode: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SkyHubItem {
    /// The specific (child/variant) SKU that was ordered, when the product is a composite.
    #[serde(default)]
    pub id: Option<String>,
    /// The parent SKU the seller listed on the marketplace.
    pub product_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub qty: f64,
    #[serde(default)]
    pub original_price: f64,
    #[serde(default)]
    pub special_price: Option<f64>,
}

/// Builder for realistic SkyHub order payloads in tests.
#[derive(Debug, Clone, Default)]
pub struct SkyHubOrderBuilder {
    code: Option<String>,
    channel: Option<String>,
    status_kind: Option<String>,
    customer: Option<SkyHubCustomer>,
    billing_address: Option<SkyHubAddress>,
    shipping_address: Option<SkyHubAddress>,
    items: Vec<SkyHubItem>,
    shipping_cost: Option<f64>,
    discount: Option<f64>,
    interest: Option<f64>,
}

impl SkyHubOrderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample_order(code: &str) -> SkyHubOrder {
        let mut builder = SkyHubOrderBuilder::new();
        builder.code(code.to_string()).item(SkyHubItem {
            id: Some("SKU-100-RED".to_string()),
            product_id: "SKU-100".to_string(),
            name: Some("Sample product".to_string()),
            qty: 1.0,
            original_price: 100.0,
            special_price: Some(80.0),
        });
        builder.build()
    }

    pub fn code(&mut self, code: String) -> &mut Self {
        self.code = Some(code);
        self
    }

    pub fn channel(&mut self, channel: String) -> &mut Self {
        self.channel = Some(channel);
        self
    }

    pub fn status_kind(&mut self, kind: String) -> &mut Self {
        self.status_kind = Some(kind);
        self
    }

    pub fn customer(&mut self, customer: SkyHubCustomer) -> &mut Self {
        self.customer = Some(customer);
        self
    }

    pub fn billing_address(&mut self, address: SkyHubAddress) -> &mut Self {
        self.billing_address = Some(address);
        self
    }

    pub fn shipping_address(&mut self, address: SkyHubAddress) -> &mut Self {
        self.shipping_address = Some(address);
        self
    }

    pub fn item(&mut self, item: SkyHubItem) -> &mut Self {
        self.items.push(item);
        self
    }

    pub fn shipping_cost(&mut self, cost: f64) -> &mut Self {
        self.shipping_cost = Some(cost);
        self
    }

    pub fn discount(&mut self, discount: f64) -> &mut Self {
        self.discount = Some(discount);
        self
    }

    pub fn interest(&mut self, interest: f64) -> &mut Self {
        self.interest = Some(interest);
        self
    }

    pub fn build(self) -> SkyHubOrder {
        let customer = self.customer.unwrap_or_else(|| SkyHubCustomer {
            name: "Maria da Silva Santos".to_string(),
            email: "maria.santos@example.com".to_string(),
            date_of_birth: Some("1988-04-12".to_string()),
            gender: Some("female".to_string()),
            vat_number: Some("12345678909".to_string()),
            phones: vec!["11 99999-0000".to_string()],
        });
        let shipping_address = self.shipping_address.or_else(|| {
            Some(SkyHubAddress {
                street: "Rua das Laranjeiras".to_string(),
                number: Some("42".to_string()),
                neighborhood: Some("Centro".to_string()),
                complement: Some("Apto 101".to_string()),
                reference: None,
                city: "São Paulo".to_string(),
                region: Some("SP".to_string()),
                postcode: "01000-000".to_string(),
                country: Some("BR".to_string()),
                phone: Some("11 99999-0000".to_string()),
            })
        });
        SkyHubOrder {
            code: self.code.unwrap_or_else(|| "TEST-0000000001".to_string()),
            channel: self.channel.unwrap_or_else(|| "MARKETPLACE".to_string()),
            placed_at: "2024-05-01T10:00:00-03:00".parse().ok(),
            status: SkyHubStatus {
                code: "payment_approved".to_string(),
                kind: self.status_kind.unwrap_or_else(|| "APPROVED".to_string()),
                label: None,
            },
            customer,
            billing_address: self.billing_address,
            shipping_address,
            items: self.items,
            shipping_carrier: Some("Correios".to_string()),
            shipping_method: Some("PAC".to_string()),
            shipping_cost: self.shipping_cost.unwrap_or(15.9),
            discount: self.discount.unwrap_or(0.0),
            interest: self.interest.unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const ORDER_JSON: &str = r#"{
        "code": "Lojas-Americanas-331906616501",
        "channel": "AMERICANAS",
        "placed_at": "2024-05-01T10:00:00-03:00",
        "updated_at": "2024-05-01T10:05:00-03:00",
        "status": { "code": "payment_approved", "type": "APPROVED", "label": "Pagamento aprovado" },
        "customer": {
            "name": "João Pedro Alves",
            "email": "joao.alves@example.com",
            "date_of_birth": "1979-11-23",
            "gender": "male",
            "vat_number": "98765432100",
            "phones": ["11 98888-7777", "11 3333-2222"]
        },
        "shipping_address": {
            "street": "Avenida Paulista",
            "number": "1000",
            "neighborhood": "Bela Vista",
            "complement": "Conjunto 52",
            "city": "São Paulo",
            "region": "SP",
            "postcode": "01310-100",
            "country": "BR",
            "phone": "11 98888-7777"
        },
        "items": [
            {
                "id": "CAM-P-AZUL",
                "product_id": "CAM-P",
                "name": "Camiseta básica azul P",
                "qty": 2,
                "original_price": 59.9,
                "special_price": 49.9
            }
        ],
        "shipping_carrier": "Correios",
        "shipping_method": "SEDEX",
        "shipping_cost": 22.5,
        "discount": 10.0,
        "interest": 0.0,
        "total_ordered": 112.3
    }"#;

    #[test]
    fn deserialize_order() {
        let order: SkyHubOrder = serde_json::from_str(ORDER_JSON).unwrap();
        assert_eq!(order.code, "Lojas-Americanas-331906616501");
        assert_eq!(order.channel, "AMERICANAS");
        assert_eq!(order.status.kind, "APPROVED");
        assert_eq!(order.customer.phones.len(), 2);
        assert!(order.billing_address.is_none());
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].product_id, "CAM-P");
        assert_eq!(order.items[0].special_price, Some(49.9));
        assert_eq!(order.shipping_cost, 22.5);
    }

    #[test]
    fn builder_defaults_are_complete() {
        let order = SkyHubOrderBuilder::sample_order("ACME-1");
        assert_eq!(order.code, "ACME-1");
        assert!(!order.customer.email.is_empty());
        assert!(order.shipping_address.is_some());
        assert_eq!(order.items.len(), 1);
    }
}
