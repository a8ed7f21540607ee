use lambda_runtime::{run, service_fn, tracing, Error};
use movies_core::{DynamoStore, MovieCatalog, MovieConfig};

mod event_handler;
use event_handler::function_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config = MovieConfig::from_env()?;
    let store = DynamoStore::from_config(&config).await;
    let catalog = MovieCatalog::from_config(store, &config);
    if !catalog.has_cast_table() {
        tracing::warn!("CAST_TABLE_NAME is not set, cast lookups are disabled");
    }

    run(service_fn(|event| function_handler(&catalog, event))).await
}
