use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chat_functions::handlers::{register_devices, register_push, register_rtc};
use chat_functions::services::{
    DeviceTokenStore, FcmTransport, PgDeviceTokenStore, PushDelivery, PushTransport,
};
use chat_functions::{AppState, Config};
use fcm_multicast::{FcmClient, ServiceAccountKey};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("configuration error: {}", e))?;
    tracing::info!(
        "starting chat functions service: env={} region={}",
        config.app.env,
        config.app.region
    );

    if !config.rtc.is_configured() {
        tracing::warn!("RTC signing identity not configured; token issuance will be rejected");
    }

    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!("connected to database");

    let credentials = ServiceAccountKey::from_file(&config.fcm.credentials_path)?;
    let fcm_client = FcmClient::new(credentials);
    tracing::info!("push transport ready: project={}", fcm_client.project_id);

    let store: Arc<dyn DeviceTokenStore> = Arc::new(PgDeviceTokenStore::new(db_pool));
    let transport: Arc<dyn PushTransport> = Arc::new(FcmTransport::new(fcm_client));
    let delivery = Arc::new(PushDelivery::new(store.clone(), transport));

    let state = AppState {
        rtc: config.rtc.clone(),
        store,
        delivery,
    };

    let addr = format!("0.0.0.0:{}", config.app.port);
    tracing::info!("listening on {}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(middleware::Logger::default())
            .route("/health", web::get().to(|| async { "OK" }))
            .configure(|cfg| {
                register_rtc(cfg);
                register_push(cfg);
                register_devices(cfg);
            })
    })
    .bind(&addr)?
    .run()
    .await?;

    Ok(())
}
