//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate function. Keep this module neat and tidy 🙏
//!
//! The import handlers are generic over the backend and gateway traits so that endpoint tests can run them against
//! mocks; the concrete types are fixed at registration time in [`crate::server`].
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use skyhub_import_engine::{
    db_types::MarketplaceCode,
    traits::{MarketplaceGateway, OrderImportDatabase},
    OrderImportApi,
    StoreScope,
};

use crate::{
    config::ServerConfig,
    data_objects::{ImportMessage, ImportReport, ImportRequest},
    errors::ServerError,
    helpers::parse_reference_list,
};

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

// ----------------------------------------------   Import  ----------------------------------------------------
/// Route handler for the batch import endpoint.
///
/// The body carries a newline-separated list of marketplace reference codes, as pasted by the operator. References
/// are trimmed and deduplicated, then processed strictly one at a time; a reference that fails never aborts the
/// batch. The response is always a 200 with the accumulated per-reference messages.
pub async fn import_orders<B, G>(
    api: web::Data<OrderImportApi<B>>,
    gateway: web::Data<G>,
    config: web::Data<ServerConfig>,
    body: web::Json<ImportRequest>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderImportDatabase + 'static,
    G: MarketplaceGateway + 'static,
{
    let request = body.into_inner();
    let references = parse_reference_list(&request.references);
    let mut report = ImportReport::default();
    if references.is_empty() {
        report.push(ImportMessage::warning(None, "No order reference was informed."));
        return Ok(HttpResponse::Ok().json(report));
    }
    let scope = config.store_scope(request.store_id);
    debug!("💻️ Importing {} reference(s) for store {}", references.len(), scope.store_id);
    for reference in &references {
        let message = import_reference(reference, &scope, api.as_ref(), gateway.as_ref()).await;
        report.push(message);
    }
    report.push(ImportMessage::notice("The process is finished."));
    Ok(HttpResponse::Ok().json(report))
}

/// Imports a single reference and reduces whatever happened to one operator-facing message.
async fn import_reference<B, G>(
    reference: &str,
    scope: &StoreScope,
    api: &OrderImportApi<B>,
    gateway: &G,
) -> ImportMessage
where
    B: OrderImportDatabase,
    G: MarketplaceGateway,
{
    let payload = match gateway.fetch_order(reference).await {
        Ok(Some(payload)) => payload,
        Ok(None) => {
            return ImportMessage::warning(
                Some(reference),
                format!("The order reference \"{reference}\" does not exist in SkyHub."),
            )
        },
        Err(e) => {
            warn!("💻️ Could not fetch reference {reference} from the marketplace. {e}");
            return ImportMessage::warning(
                Some(reference),
                format!("The order reference \"{reference}\" could not be fetched from SkyHub. See the logs for more details."),
            );
        },
    };
    match api.import_order(scope, payload).await {
        Ok(outcome) if outcome.is_new() => ImportMessage::success(
            reference,
            format!("The order reference \"{reference}\" was successfully imported."),
        ),
        Ok(_) => {
            ImportMessage::success(reference, format!("The order reference \"{reference}\" was already imported."))
        },
        Err(e) if e.is_empty_product_set() => ImportMessage::warning(
            Some(reference),
            format!("The SkyHub products of order \"{reference}\" cannot be matched with catalog products."),
        ),
        Err(_) => ImportMessage::warning(
            Some(reference),
            format!("The order reference \"{reference}\" could not be created. See the logs for more details."),
        ),
    }
}

// ----------------------------------------------   Orders  ----------------------------------------------------
/// Route handler for looking up the imported order behind a marketplace code.
pub async fn order_by_code<B>(
    path: web::Path<String>,
    api: web::Data<OrderImportApi<B>>,
) -> Result<HttpResponse, ServerError>
where B: OrderImportDatabase + 'static
{
    let code: MarketplaceCode = path.into_inner().into();
    debug!("💻️ GET order for marketplace code {code}");
    let order = api.fetch_order(&code).await.map_err(|e| {
        debug!("💻️ Could not fetch order for {code}. {e}");
        ServerError::BackendError(e.to_string())
    })?;
    match order {
        Some(order) => Ok(HttpResponse::Ok().json(order)),
        None => Err(ServerError::NoRecordFound(format!("No order was imported for reference {code}"))),
    }
}
