use std::{future::Future, pin::Pin, sync::Arc};

use crate::events::{EventHandler, EventProducer, Handler, ImportFailedEvent, OrderImportedEvent};

#[derive(Default, Clone)]
pub struct EventProducers {
    pub order_imported_producer: Vec<EventProducer<OrderImportedEvent>>,
    pub import_failed_producer: Vec<EventProducer<ImportFailedEvent>>,
}

pub struct EventHandlers {
    pub on_order_imported: Option<EventHandler<OrderImportedEvent>>,
    pub on_import_failed: Option<EventHandler<ImportFailedEvent>>,
}

impl EventHandlers {
    pub fn new(buffer_size: usize, hooks: EventHooks) -> Self {
        let on_order_imported = hooks.on_order_imported.map(|f| EventHandler::new(buffer_size, f));
        let on_import_failed = hooks.on_import_failed.map(|f| EventHandler::new(buffer_size, f));
        Self { on_order_imported, on_import_failed }
    }

    pub fn producers(&self) -> EventProducers {
        let mut result = EventProducers::default();
        if let Some(handler) = &self.on_order_imported {
            result.order_imported_producer.push(handler.subscribe());
        }
        if let Some(handler) = &self.on_import_failed {
            result.import_failed_producer.push(handler.subscribe());
        }
        result
    }

    pub async fn start_handlers(self) {
        if let Some(handler) = self.on_order_imported {
            tokio::spawn(async move {
                handler.start_handler().await;
            });
        }
        if let Some(handler) = self.on_import_failed {
            tokio::spawn(async move {
                handler.start_handler().await;
            });
        }
    }
}

#[derive(Default, Clone)]
pub struct EventHooks {
    pub on_order_imported: Option<Handler<OrderImportedEvent>>,
    pub on_import_failed: Option<Handler<ImportFailedEvent>>,
}

impl EventHooks {
    pub fn on_order_imported<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(OrderImportedEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_order_imported = Some(Arc::new(f));
        self
    }

    pub fn on_import_failed<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(ImportFailedEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_import_failed = Some(Arc::new(f));
        self
    }
}
