use letras::config::Config;
use letras::metrics::register_metrics;
use letras::startup::create_web_server;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    std_logger::Config::logfmt().init();

    let config = match Config::get() {
        Ok(config) => config,
        Err(error) => {
            log::error!("Unable to read the configuration. Error: '{error}'.");
            std::process::exit(1);
        }
    };
    register_metrics();

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = match TcpListener::bind(address.as_str()).await {
        Ok(listener) => listener,
        Err(error) => {
            log::error!("Unable to bind {address}. Error: '{error}'.");
            std::process::exit(1);
        }
    };

    if let Err(error) = create_web_server(config, listener).await {
        log::error!("The server stopped. Error: '{error}'.");
        std::process::exit(1);
    }
}
