use moosend_export::*;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("moosend-export".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().expect("Failed to read configuration");

    let moosend_client = MoosendClient::new(
        configuration.moosend.base_url.clone(),
        configuration.moosend.timeout(),
        configuration.moosend.max_retries,
    )
    .expect("Failed to configure the Moosend client");

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = std::net::TcpListener::bind(address)?;

    run(listener, moosend_client)?.await
}
