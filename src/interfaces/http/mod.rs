pub mod upload;

use std::sync::{Arc, Mutex, MutexGuard};

use actix_cors::Cors;
use actix_multipart::Multipart;
use actix_web::dev::Server;
use actix_web::http::header::ContentDisposition;
use actix_web::http::StatusCode;
use actix_web::{delete, get, post, put, web, App, HttpResponse, HttpServer};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::application::use_cases::inventory_export::XLSX_CONTENT_TYPE;
use crate::application::{
    InventoryExportUseCase, InventoryIngestionUseCase, TableExtractionUseCase,
};
use crate::domain::error::{AppError, Result};
use crate::domain::inventory::{parse_quantity_input, InventorySession};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::extraction::{HttpTableExtractor, TableExtractor};
use upload::read_file_field;

/// Entries kept in the in-memory log buffer
const MAX_LOG_ENTRIES: usize = 100;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub session: Mutex<InventorySession>,
    pub ingestion: InventoryIngestionUseCase,
    pub export: InventoryExportUseCase,
    pub table_extraction: TableExtractionUseCase,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

impl HttpState {
    pub fn new(
        extractor: Arc<dyn TableExtractor + Send + Sync>,
        export_file_name: &str,
        logs: Arc<Mutex<Vec<LogEntry>>>,
    ) -> Self {
        Self {
            session: Mutex::new(InventorySession::new()),
            ingestion: InventoryIngestionUseCase::new(),
            export: InventoryExportUseCase::new(export_file_name),
            table_extraction: TableExtractionUseCase::new(extractor),
            logs,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(HttpTableExtractor::new(config.extraction.url.clone())),
            &config.export.file_name,
            Arc::new(Mutex::new(Vec::new())),
        )
    }

    fn session(&self) -> Result<MutexGuard<'_, InventorySession>> {
        self.session
            .lock()
            .map_err(|_| AppError::Internal("Inventory session lock poisoned".to_string()))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum QuantityInput {
    Number(f64),
    Text(String),
}

impl QuantityInput {
    fn to_quantity(&self) -> u32 {
        match self {
            QuantityInput::Number(value) => parse_quantity_input(&value.to_string()),
            QuantityInput::Text(text) => parse_quantity_input(text),
        }
    }
}

#[derive(Deserialize)]
pub struct QuantityUpdate {
    pub value: QuantityInput,
}

#[derive(Serialize)]
pub struct QuantityResponse {
    pub index: usize,
    pub quantity: u32,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[post("/pdf-to-table")]
async fn pdf_to_table(data: web::Data<HttpState>, payload: Multipart) -> Result<HttpResponse> {
    let file = read_file_field(payload).await;

    if let Some(file) = file.as_ref() {
        add_log(
            &data.logs,
            "INFO",
            "TableProxy",
            &format!(
                "Forwarding {} ({} bytes) to extraction service",
                file.file_name,
                file.bytes.len()
            ),
        );
    }

    let reply = data.table_extraction.execute(file).await.map_err(|e| {
        add_log(
            &data.logs,
            "ERROR",
            "TableProxy",
            &format!("Extraction failed: {}", e),
        );
        e
    })?;

    if reply.status >= 400 {
        add_log(
            &data.logs,
            "WARN",
            "TableProxy",
            &format!("Extraction service answered {}", reply.status),
        );
    }

    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);
    Ok(HttpResponse::build(status)
        .content_type(reply.content_type)
        .body(reply.body))
}

#[post("/inventory")]
async fn upload_inventory(
    data: web::Data<HttpState>,
    payload: Multipart,
) -> Result<HttpResponse> {
    let file = read_file_field(payload).await.ok_or(AppError::MissingFile)?;

    add_log(
        &data.logs,
        "INFO",
        "Inventory",
        &format!("Loading catalog {} ({} bytes)", file.file_name, file.bytes.len()),
    );

    let catalog = data.ingestion.parse(&file).map_err(|e| {
        add_log(
            &data.logs,
            "ERROR",
            "Inventory",
            &format!("Catalog rejected: {}", e),
        );
        e
    })?;

    let summary = {
        let mut session = data.session()?;
        data.ingestion.load(&mut session, catalog)
    };

    add_log(
        &data.logs,
        "INFO",
        "Inventory",
        &format!(
            "Catalog loaded: {} items, {} discount rows removed",
            summary.items, summary.discount_rows_removed
        ),
    );

    Ok(HttpResponse::Ok().json(summary))
}

#[get("/inventory")]
async fn get_inventory(data: web::Data<HttpState>) -> Result<HttpResponse> {
    let session = data.session()?;
    Ok(HttpResponse::Ok().json(session.view()))
}

#[delete("/inventory")]
async fn clear_inventory(data: web::Data<HttpState>) -> Result<HttpResponse> {
    data.session()?.clear();
    add_log(&data.logs, "INFO", "Inventory", "Catalog cleared");
    Ok(HttpResponse::NoContent().finish())
}

#[put("/inventory/quantities/{index}")]
async fn set_quantity(
    data: web::Data<HttpState>,
    path: web::Path<usize>,
    req: web::Json<QuantityUpdate>,
) -> Result<HttpResponse> {
    let index = path.into_inner();
    let quantity = req.value.to_quantity();

    data.session()?.set_quantity(index, quantity)?;

    tracing::debug!(index, quantity, "Quantity updated");
    Ok(HttpResponse::Ok().json(QuantityResponse { index, quantity }))
}

#[post("/inventory/items/{index}/add")]
async fn add_to_order(
    data: web::Data<HttpState>,
    path: web::Path<usize>,
) -> Result<HttpResponse> {
    let line = data.session()?.order_line(path.into_inner())?;

    add_log(
        &data.logs,
        "INFO",
        "Order",
        &format!("Añadir {} und de {}", line.quantity, line.product),
    );

    Ok(HttpResponse::Ok().json(line))
}

#[get("/inventory/order")]
async fn get_order(data: web::Data<HttpState>) -> Result<HttpResponse> {
    let order = data.session()?.order();
    Ok(HttpResponse::Ok().json(order))
}

#[post("/inventory/order/reset")]
async fn reset_order(data: web::Data<HttpState>) -> Result<HttpResponse> {
    data.session()?.reset_quantities();
    add_log(&data.logs, "INFO", "Order", "Started new order");
    Ok(HttpResponse::NoContent().finish())
}

#[get("/inventory/search")]
async fn search_inventory(
    data: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse> {
    let session = data.session()?;
    Ok(HttpResponse::Ok().json(session.search(&query.q)))
}

#[get("/inventory/export")]
async fn export_inventory(data: web::Data<HttpState>) -> Result<HttpResponse> {
    let exported = {
        let session = data.session()?;
        data.export.execute(&session)
    }
    .map_err(|e| {
        add_log(
            &data.logs,
            "WARN",
            "Export",
            &format!("Export refused: {}", e),
        );
        e
    })?;

    add_log(
        &data.logs,
        "INFO",
        "Export",
        &format!("Exported {} rows to {}", exported.rows, exported.file_name),
    );

    Ok(HttpResponse::Ok()
        .content_type(XLSX_CONTENT_TYPE)
        .insert_header(ContentDisposition::attachment(exported.file_name))
        .body(exported.bytes))
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> Result<HttpResponse> {
    let logs = data
        .logs
        .lock()
        .map_err(|_| AppError::Internal("Log buffer lock poisoned".to_string()))?;
    Ok(HttpResponse::Ok().json(&*logs))
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };

    match level {
        "ERROR" => tracing::error!(source, "{}", message),
        "WARN" => tracing::warn!(source, "{}", message),
        _ => tracing::info!(source, "{}", message),
    }

    // a poisoned buffer only loses history
    if let Ok(mut logs) = logs.lock() {
        logs.push(entry.clone());
        if logs.len() > MAX_LOG_ENTRIES {
            logs.remove(0);
        }
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

/// Routes, mounted under `/api`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(pdf_to_table)
            .service(upload_inventory)
            .service(get_inventory)
            .service(clear_inventory)
            .service(set_quantity)
            .service(add_to_order)
            .service(get_order)
            .service(reset_order)
            .service(search_inventory)
            .service(export_inventory)
            .service(get_logs),
    );
}

pub fn start_server(state: web::Data<HttpState>, config: &AppConfig) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(config.bind_address())?
    .run();

    Ok(server)
}
