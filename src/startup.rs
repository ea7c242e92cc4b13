use std::net::TcpListener;

use actix_files::Files;
use actix_web::{
    dev::Server,
    middleware::Logger,
    web, App, HttpServer,
};

use crate::{
    routes::{home_route, scrape_route, table_route},
    session::SessionStore,
};

pub fn run(
    listener: TcpListener,
    client: reqwest::Client,
    session_store: SessionStore,
) -> Result<Server, std::io::Error> {
    let client = web::Data::new(client);
    let session_store = web::Data::new(session_store);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(Files::new("/static", "./templates/static").prefer_utf8(true))
            .service(home_route::home)
            .service(scrape_route::scrape)
            .service(table_route::show_table)
            .service(table_route::download_table)
            .app_data(client.clone())
            .app_data(session_store.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
