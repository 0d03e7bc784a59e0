use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::dictionary::{Dictionary, OutcomeImages};
use crate::error::Error;
use crate::routes;
use crate::session_factory::actor::SessionFactoryActor;
use crate::storage::{FileStore, KeyValueStore};

/// Loads the word list and the score store, then serves until the listener fails.
pub async fn create_web_server(config: Config, listener: TcpListener) -> Result<(), Error> {
    let dictionary = Arc::new(Dictionary::load(&config.words).await?);
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.storage.path)?);
    let session_factory = Arc::new(SessionFactoryActor::spawn(
        config.game.clone(),
        dictionary,
        OutcomeImages::new(&config.images),
        store,
    ));

    let router = routes::create_router(&config).with_state(session_factory);

    match listener.local_addr() {
        Ok(address) => log::info!("Listening on {address}"),
        Err(error) => log::warn!("Could not read the listening address. Error: '{error}'."),
    }
    axum::serve(listener, router).await.map_err(|error| {
        Error::log_and_create_internal(&format!("The web server stopped. Error: '{error}'."))
    })
}
