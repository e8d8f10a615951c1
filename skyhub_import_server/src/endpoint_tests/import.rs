use actix_web::{test, web, App};
use skyhub_import_engine::{
    events::EventProducers,
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    OrderImportApi,
    SqliteDatabase,
};
use skyhub_tools::SkyHubOrderBuilder;

use crate::{
    config::ServerConfig,
    data_objects::{ImportReport, ImportRequest, MessageLevel},
    endpoint_tests::mocks::MockGateway,
    routes::import_orders,
    skyhub_order::to_marketplace_order,
};

async fn test_db() -> SqliteDatabase {
    let url = random_db_path();
    prepare_test_env(&url).await;
    SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating database")
}

macro_rules! import_app {
    ($db:expr, $gateway:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(OrderImportApi::new($db.clone(), EventProducers::default())))
                .app_data(web::Data::new($gateway))
                .app_data(web::Data::new(ServerConfig::default()))
                .route("/import", web::post().to(import_orders::<SqliteDatabase, MockGateway>)),
        )
        .await
    };
}

fn import_request(references: &str) -> ImportRequest {
    ImportRequest { store_id: None, references: references.to_string() }
}

#[actix_web::test]
async fn empty_reference_list_warns_and_processes_nothing() {
    let db = test_db().await;
    let mut gateway = MockGateway::new();
    gateway.expect_fetch_order().never();
    let app = import_app!(db, gateway);

    let req = test::TestRequest::post().uri("/import").set_json(import_request("\n   \n")).to_request();
    let report: ImportReport = test::call_and_read_body_json(&app, req).await;
    assert_eq!(report.messages.len(), 1);
    assert_eq!(report.messages[0].level, MessageLevel::Warning);
    assert_eq!(report.messages[0].text, "No order reference was informed.");
}

#[actix_web::test]
async fn references_are_trimmed_and_deduplicated() {
    let db = test_db().await;
    let mut gateway = MockGateway::new();
    // "AM-1" appears twice and "AM-2" carries padding; each reference must be fetched exactly once.
    gateway.expect_fetch_order().withf(|r| r == "AM-1").times(1).returning(|_| Ok(None));
    gateway.expect_fetch_order().withf(|r| r == "AM-2").times(1).returning(|_| Ok(None));
    let app = import_app!(db, gateway);

    let req = test::TestRequest::post().uri("/import").set_json(import_request("AM-1\nAM-1\n AM-2 ")).to_request();
    let report: ImportReport = test::call_and_read_body_json(&app, req).await;
    // Two not-found warnings plus the closing notice.
    assert_eq!(report.messages.len(), 3);
    assert_eq!(report.warnings().count(), 2);
    assert!(report.messages[0].text.contains("does not exist in SkyHub"));
    assert_eq!(report.messages[0].reference.as_deref(), Some("AM-1"));
    assert_eq!(report.messages[1].reference.as_deref(), Some("AM-2"));
}

#[actix_web::test]
async fn successful_and_repeated_imports_report_success() {
    let db = test_db().await;
    db.register_catalog_product("SKU-100", "Parent product").await.unwrap();
    let mut gateway = MockGateway::new();
    gateway
        .expect_fetch_order()
        .withf(|r| r == "AM-3")
        .times(2)
        .returning(|code| Ok(Some(to_marketplace_order(SkyHubOrderBuilder::sample_order(code)))));
    let app = import_app!(db, gateway);

    let req = test::TestRequest::post().uri("/import").set_json(import_request("AM-3")).to_request();
    let report: ImportReport = test::call_and_read_body_json(&app, req).await;
    assert_eq!(report.messages[0].level, MessageLevel::Success);
    assert!(report.messages[0].text.contains("was successfully imported"));

    // A second batch with the same reference hits the idempotency gate and reports it as already imported.
    let req = test::TestRequest::post().uri("/import").set_json(import_request("AM-3")).to_request();
    let report: ImportReport = test::call_and_read_body_json(&app, req).await;
    assert_eq!(report.messages[0].level, MessageLevel::Success);
    assert!(report.messages[0].text.contains("was already imported"));
}

#[actix_web::test]
async fn unmatched_products_warn_but_do_not_abort_the_batch() {
    let db = test_db().await;
    // No catalog products registered: every item drops and creation fails with an empty product set.
    let mut gateway = MockGateway::new();
    gateway
        .expect_fetch_order()
        .withf(|r| r == "AM-4")
        .times(1)
        .returning(|code| Ok(Some(to_marketplace_order(SkyHubOrderBuilder::sample_order(code)))));
    gateway.expect_fetch_order().withf(|r| r == "AM-5").times(1).returning(|_| Ok(None));
    let app = import_app!(db, gateway);

    let req = test::TestRequest::post().uri("/import").set_json(import_request("AM-4\nAM-5")).to_request();
    let report: ImportReport = test::call_and_read_body_json(&app, req).await;
    assert_eq!(report.warnings().count(), 2);
    assert!(report.messages[0].text.contains("cannot be matched with catalog products"));
    // The batch continued to the next reference regardless.
    assert!(report.messages[1].text.contains("does not exist in SkyHub"));
}
