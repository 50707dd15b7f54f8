#[actix_web::main]
async fn main() -> std::io::Result<()> {
    strelka_server::run().await
}
