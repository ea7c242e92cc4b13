use std::net::TcpListener;

use env_logger::Env;
use harvest::{configuration::get_configuration, session::SessionStore, startup::run};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");
    let client = configuration
        .scraper
        .client()
        .expect("Failed to build HTTP client.");

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(address)?;
    log::info!("Listening on http://{}", listener.local_addr()?);

    run(listener, client, SessionStore::new())?.await
}
