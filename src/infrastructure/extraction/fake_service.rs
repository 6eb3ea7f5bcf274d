//! Stand-in for the table-extraction service, bound to an ephemeral local port.

use std::sync::{Arc, Mutex};

use actix_multipart::Multipart;
use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer};

use crate::domain::upload::UploadedFile;
use crate::interfaces::http::upload::read_file_field;

struct FakeReply {
    status: u16,
    body: Vec<u8>,
    received: Arc<Mutex<Vec<UploadedFile>>>,
}

async fn fake_table(payload: Multipart, reply: web::Data<FakeReply>) -> HttpResponse {
    match read_file_field(payload).await {
        Some(file) => {
            reply.received.lock().unwrap().push(file);
            HttpResponse::build(StatusCode::from_u16(reply.status).unwrap())
                .content_type("text/plain")
                .body(reply.body.clone())
        }
        None => HttpResponse::UnprocessableEntity().body("fake: missing file field"),
    }
}

pub struct FakeExtractor {
    pub url: String,
    received: Arc<Mutex<Vec<UploadedFile>>>,
    handle: ServerHandle,
}

impl FakeExtractor {
    pub fn received(&self) -> Vec<UploadedFile> {
        self.received.lock().unwrap().clone()
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

/// Answers every `POST /table` carrying a `file` field with `status` and `body`.
pub async fn spawn_fake_extractor(status: u16, body: impl Into<Vec<u8>>) -> FakeExtractor {
    let received = Arc::new(Mutex::new(Vec::new()));
    let reply = web::Data::new(FakeReply {
        status,
        body: body.into(),
        received: received.clone(),
    });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(reply.clone())
            .route("/table", web::post().to(fake_table))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    FakeExtractor {
        url: format!("http://{}/table", addr),
        received,
        handle,
    }
}
