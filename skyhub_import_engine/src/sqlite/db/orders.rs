use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{MarketplaceCode, NewOrderRequest, Order, OrderStatusType},
    traits::OrderApiError,
};

/// Returns the order that was created for the given marketplace code, if any.
pub async fn fetch_order_by_marketplace_code(
    code: &MarketplaceCode,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as("SELECT * FROM orders WHERE marketplace_code = $1")
        .bind(code.as_str())
        .fetch_optional(conn)
        .await?;
    Ok(order)
}

pub async fn fetch_order_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as("SELECT * FROM orders WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(order)
}

/// Checks whether an order already exists for the marketplace code, returning its row id if so.
pub async fn order_exists(
    code: &MarketplaceCode,
    conn: &mut SqliteConnection,
) -> Result<Option<i64>, OrderApiError> {
    let order = fetch_order_by_marketplace_code(code, conn).await?;
    Ok(order.map(|o| o.id))
}

/// Inserts a new order and its line items using the given connection. This is not atomic on its own; embed the call
/// inside a transaction and pass `&mut *tx` as the connection argument.
pub async fn insert_order(order: NewOrderRequest, conn: &mut SqliteConnection) -> Result<Order, OrderApiError> {
    let billing = serde_json::to_string(&order.billing_address)
        .map_err(|e| OrderApiError::DatabaseError(e.to_string()))?;
    let shipping = serde_json::to_string(&order.shipping_address)
        .map_err(|e| OrderApiError::DatabaseError(e.to_string()))?;
    let inserted: Order = sqlx::query_as(
        r#"
            INSERT INTO orders (
                increment_id,
                customer_id,
                status,
                currency,
                subtotal,
                shipping_cost,
                discount,
                interest,
                grand_total,
                shipping_method,
                shipping_carrier,
                payment_method,
                comment,
                send_confirmation,
                billing_address,
                shipping_address,
                from_marketplace,
                marketplace_code,
                marketplace_channel,
                marketplace_payload
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
            RETURNING *;
        "#,
    )
    .bind(order.increment_id)
    .bind(order.customer_id)
    .bind(OrderStatusType::New)
    .bind(order.currency)
    .bind(order.subtotal)
    .bind(order.shipping_cost)
    .bind(order.discount)
    .bind(order.interest)
    .bind(order.grand_total)
    .bind(order.shipping_method)
    .bind(order.shipping_carrier)
    .bind(order.payment_method)
    .bind(order.comment)
    .bind(order.send_confirmation)
    .bind(billing)
    .bind(shipping)
    .bind(true)
    .bind(order.marketplace_code)
    .bind(order.marketplace_channel)
    .bind(order.marketplace_payload)
    .fetch_one(&mut *conn)
    .await?;

    for item in &order.items {
        sqlx::query(
            r#"
                INSERT INTO order_items (
                    order_id, product_id, product_sku, child_product_id, child_product_sku,
                    qty, price, special_price, final_price
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9);
            "#,
        )
        .bind(inserted.id)
        .bind(item.product_id)
        .bind(item.product_sku.as_str())
        .bind(item.child.as_ref().map(|c| c.product_id))
        .bind(item.child.as_ref().map(|c| c.product_sku.as_str()))
        .bind(item.qty)
        .bind(item.price)
        .bind(item.special_price)
        .bind(item.final_price)
        .execute(&mut *conn)
        .await?;
    }
    debug!("📝️ Order [{}] inserted with id {} ({} items)", inserted.marketplace_code, inserted.id, order.items.len());
    Ok(inserted)
}

pub async fn update_order_status(
    id: i64,
    status: OrderStatusType,
    conn: &mut SqliteConnection,
) -> Result<Order, OrderApiError> {
    let order: Option<Order> = sqlx::query_as(
        "UPDATE orders SET status = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 RETURNING *",
    )
    .bind(status)
    .bind(id)
    .fetch_optional(conn)
    .await?;
    order.ok_or(OrderApiError::OrderNotFound(id))
}
