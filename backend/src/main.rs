#[tokio::main]
async fn main() -> Result<(), server::error::StartupError> {
    server::start_server().await
}
