use std::sync::Arc;
use tokio::io::BufReader;
use book_catalog::catalog::controller::CatalogConsole;
use book_catalog::catalog::domain::CatalogService;
use book_catalog::catalog::factory;
use book_catalog::core::controller::AppState;
use book_catalog::core::domain::Configuration;
use book_catalog::core::library::LibraryError;
use book_catalog::utils::logs::setup_tracing;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), LibraryError> {
    let config = Configuration::from_env();
    setup_tracing(&config);

    let state = AppState::new(config);
    let catalog_service: Arc<dyn CatalogService> = Arc::from(factory::create_catalog_service(&state.config));

    let mut console = CatalogConsole::new(
        state, catalog_service, BufReader::new(tokio::io::stdin()), tokio::io::stdout());
    console.run().await
}
