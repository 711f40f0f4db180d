use crate::{routes, MoosendClient};

use std::net::TcpListener;

use {
    actix_web::{dev::Server, web, App, HttpServer},
    tracing_actix_web::TracingLogger,
};

pub fn run(listener: TcpListener, moosend_client: MoosendClient) -> Result<Server, std::io::Error> {
    let moosend_client = web::Data::new(moosend_client);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(routes::health_check))
            .route(
                "/api/export-subscribers",
                web::get().to(routes::export_subscribers),
            )
            .app_data(moosend_client.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
