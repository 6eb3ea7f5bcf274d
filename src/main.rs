#[actix_web::main]
async fn main() -> std::io::Result<()> {
    inventario_lib::run().await
}
