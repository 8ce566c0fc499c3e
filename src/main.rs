#[actix_web::main]
async fn main() -> std::io::Result<()> {
    surat_menyurat_gateway::run().await
}
