use subscriber_store::config::get_configuration;
use subscriber_store::startup::Application;
use subscriber_store::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() {
    let subscriber = get_subscriber(
        String::from("subscriber_store"),
        String::from("info"),
        std::io::stdout,
    );

    init_subscriber(subscriber);

    let config = get_configuration().expect("Missing configuration file.");
    let application = Application::build(config)
        .await
        .expect("Failed to initialize the subscriber store.");

    match application.store().fetch_confirmed_subscribers().await {
        Ok(subscribers) => tracing::info!("{} confirmed subscribers", subscribers.len()),
        Err(err) => tracing::error!("Failed to read confirmed subscribers: {:?}", err),
    }

    application.close().await;
}
