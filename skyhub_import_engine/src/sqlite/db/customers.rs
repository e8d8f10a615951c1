use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use sqlx::{FromRow, SqliteConnection};

use crate::{
    db_types::{Customer, CustomerAddress, Gender, NewCustomer},
    traits::CustomerApiError,
};

/// Street lines are stored as a single newline-joined column.
const STREET_LINE_SEPARATOR: &str = "\n";

#[derive(FromRow)]
struct CustomerRow {
    id: i64,
    website_id: i64,
    store_id: i64,
    email: String,
    firstname: String,
    middlename: Option<String>,
    lastname: String,
    dob: Option<NaiveDate>,
    gender: Option<i64>,
    telephone: Option<String>,
    taxvat: Option<String>,
    default_billing: Option<i64>,
    default_shipping: Option<i64>,
    created_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct AddressRow {
    id: i64,
    customer_id: i64,
    firstname: String,
    lastname: String,
    telephone: Option<String>,
    street: String,
    city: String,
    region: Option<String>,
    postcode: String,
    country_id: String,
}

impl From<AddressRow> for CustomerAddress {
    fn from(row: AddressRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            firstname: row.firstname,
            lastname: row.lastname,
            telephone: row.telephone,
            street: row.street.split(STREET_LINE_SEPARATOR).map(String::from).collect(),
            city: row.city,
            region: row.region,
            postcode: row.postcode,
            country_id: row.country_id,
        }
    }
}

fn assemble(row: CustomerRow, addresses: Vec<CustomerAddress>) -> Customer {
    Customer {
        id: row.id,
        website_id: row.website_id,
        store_id: row.store_id,
        email: row.email,
        firstname: row.firstname,
        middlename: row.middlename,
        lastname: row.lastname,
        dob: row.dob,
        gender: row.gender.and_then(Gender::from_code),
        telephone: row.telephone,
        taxvat: row.taxvat,
        default_billing: row.default_billing,
        default_shipping: row.default_shipping,
        addresses,
        created_at: row.created_at,
    }
}

async fn fetch_addresses(
    customer_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<CustomerAddress>, sqlx::Error> {
    let rows: Vec<AddressRow> =
        sqlx::query_as("SELECT * FROM customer_addresses WHERE customer_id = $1 ORDER BY id")
            .bind(customer_id)
            .fetch_all(conn)
            .await?;
    Ok(rows.into_iter().map(CustomerAddress::from).collect())
}

pub async fn fetch_customer_by_id(
    id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Customer>, CustomerApiError> {
    let row: Option<CustomerRow> =
        sqlx::query_as("SELECT * FROM customers WHERE id = $1").bind(id).fetch_optional(&mut *conn).await?;
    let Some(row) = row else {
        return Ok(None);
    };
    let addresses = fetch_addresses(row.id, conn).await?;
    Ok(Some(assemble(row, addresses)))
}

/// Looks a customer up by the (email, website) identity scope, with their full address set.
pub async fn fetch_customer_by_email(
    email: &str,
    website_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Customer>, CustomerApiError> {
    let row: Option<CustomerRow> =
        sqlx::query_as("SELECT * FROM customers WHERE email = $1 AND website_id = $2")
            .bind(email)
            .bind(website_id)
            .fetch_optional(&mut *conn)
            .await?;
    let Some(row) = row else {
        return Ok(None);
    };
    let addresses = fetch_addresses(row.id, conn).await?;
    Ok(Some(assemble(row, addresses)))
}

/// Inserts a customer and its address set, then fixes up the default-billing/default-shipping pointers. Embed in a
/// transaction; the call is not atomic on its own.
pub async fn insert_customer(
    customer: NewCustomer,
    conn: &mut SqliteConnection,
) -> Result<Customer, CustomerApiError> {
    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM customers WHERE email = $1 AND website_id = $2")
        .bind(customer.email.as_str())
        .bind(customer.website_id)
        .fetch_optional(&mut *conn)
        .await?;
    if existing.is_some() {
        return Err(CustomerApiError::CustomerAlreadyExists(customer.email, customer.website_id));
    }

    let customer_id: i64 = sqlx::query_scalar(
        r#"
            INSERT INTO customers (
                website_id, store_id, email, firstname, middlename, lastname, dob, gender, telephone, taxvat
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id;
        "#,
    )
    .bind(customer.website_id)
    .bind(customer.store_id)
    .bind(customer.email.as_str())
    .bind(customer.firstname.as_str())
    .bind(customer.middlename.as_deref())
    .bind(customer.lastname.as_str())
    .bind(customer.dob)
    .bind(customer.gender.map(|g| g.code()))
    .bind(customer.telephone.as_deref())
    .bind(customer.taxvat.as_deref())
    .fetch_one(&mut *conn)
    .await?;

    let mut default_billing = None;
    let mut default_shipping = None;
    for entry in &customer.addresses {
        let address_id: i64 = sqlx::query_scalar(
            r#"
                INSERT INTO customer_addresses (
                    customer_id, firstname, lastname, telephone, street, city, region, postcode, country_id
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                RETURNING id;
            "#,
        )
        .bind(customer_id)
        .bind(entry.address.firstname.as_str())
        .bind(entry.address.lastname.as_str())
        .bind(entry.address.telephone.as_deref())
        .bind(entry.address.street.join(STREET_LINE_SEPARATOR))
        .bind(entry.address.city.as_str())
        .bind(entry.address.region.as_deref())
        .bind(entry.address.postcode.as_str())
        .bind(entry.address.country_id.as_str())
        .fetch_one(&mut *conn)
        .await?;
        if entry.is_default_billing {
            default_billing = Some(address_id);
        }
        if entry.is_default_shipping {
            default_shipping = Some(address_id);
        }
    }
    sqlx::query("UPDATE customers SET default_billing = $1, default_shipping = $2 WHERE id = $3")
        .bind(default_billing)
        .bind(default_shipping)
        .bind(customer_id)
        .execute(&mut *conn)
        .await?;
    debug!("📝️ Customer #{customer_id} inserted with {} addresses", customer.addresses.len());

    fetch_customer_by_id(customer_id, conn)
        .await?
        .ok_or(CustomerApiError::CustomerNotFound(customer_id))
}
