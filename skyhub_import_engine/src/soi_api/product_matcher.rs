//! Marketplace SKU to catalog product matching.
use log::*;
use soi_common::Money;

use crate::{
    db_types::{ChildMatch, ProductMatch},
    marketplace_objects::MarketplaceItem,
    soi_api::{errors::OrderImportError, OrderImportApi},
    traits::OrderImportDatabase,
};

impl<B> OrderImportApi<B>
where B: OrderImportDatabase
{
    /// Resolves the order's line items against the local catalog.
    ///
    /// An item whose parent SKU has no catalog match is dropped silently; the caller decides what an entirely empty
    /// result means (order assembly fails on it). A child SKU that does not resolve is simply omitted from the
    /// match. Catalog lookup *errors* are not drops; they propagate.
    pub(crate) async fn match_items(&self, items: &[MarketplaceItem]) -> Result<Vec<ProductMatch>, OrderImportError> {
        let mut products = Vec::with_capacity(items.len());
        for item in items {
            let parent_sku = item.product_id.as_str();
            let price = Money::from_float(item.original_price);
            let special_price = Money::from_float(item.special_price.unwrap_or(0.0));
            let final_price = if special_price.is_zero() { price } else { special_price };
            let qty = if item.qty == 0.0 { 1.0 } else { item.qty };

            let Some(product_id) = self.db.product_id_by_sku(parent_sku).await? else {
                debug!("🏷️ No catalog product matches marketplace SKU {parent_sku}. Dropping the item.");
                continue;
            };
            let mut product = ProductMatch {
                product_id,
                product_sku: parent_sku.to_string(),
                qty,
                price,
                special_price,
                final_price,
                child: None,
            };
            if let Some(child_sku) = item.id.as_deref() {
                if let Some(child_id) = self.db.product_id_by_sku(child_sku).await? {
                    trace!("🏷️ Child SKU {child_sku} resolved to product #{child_id}");
                    product.child = Some(ChildMatch { product_id: child_id, product_sku: child_sku.to_string() });
                }
            }
            products.push(product);
        }
        debug!("🏷️ {} of {} marketplace items matched the catalog", products.len(), items.len());
        Ok(products)
    }
}
