//! YourTutor API server.
//!
//! Reads `YOURTUTOR__*` configuration, connects to Postgres (and Redis when
//! configured), wires the adapters into the HTTP router and serves until
//! Ctrl+C.

use std::sync::Arc;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use yourtutor::adapters::auth::JwtSessionValidator;
use yourtutor::adapters::cache::{InMemoryTokenCache, RedisTokenCache};
use yourtutor::adapters::clock::SystemClock;
use yourtutor::adapters::http::{api_router, AppState};
use yourtutor::adapters::notification::{EmailSettings, ResendConfig, ResendNotifier};
use yourtutor::adapters::postgres::{
    PostgresBookingRepository, PostgresFeedbackRepository, PostgresInquiryRepository, PostgresMessageRepository,
    PostgresTutorProfileRepository, PostgresUserDirectory,
};
use yourtutor::adapters::stripe::{StripeConfig, StripePaymentAdapter};
use yourtutor::adapters::zoom::{ZoomConfig, ZoomMeetingAdapter};
use yourtutor::config::AppConfig;
use yourtutor::ports::{Clock, TokenCache};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        stripe_test_mode = config.payment.is_test_mode(),
        redis = config.redis.is_some(),
        "Configuration loaded"
    );

    let pool = config.database.pool_options().connect(&config.database.url).await?;
    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let state = build_state(&config, pool).await?;
    let validator = Arc::new(JwtSessionValidator::new(
        config.auth.jwt_secret.clone(),
        config.auth.issuer.clone(),
    ));
    let app = api_router(state, validator, &config.router_settings());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "YourTutor API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

async fn build_state(config: &AppConfig, pool: PgPool) -> Result<AppState, Box<dyn std::error::Error>> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let token_cache: Arc<dyn TokenCache> = match &config.redis {
        Some(redis_config) => {
            let client = redis::Client::open(redis_config.url.as_str())?;
            let conn = tokio::time::timeout(redis_config.connect_timeout(), client.get_multiplexed_tokio_connection()).await??;
            Arc::new(RedisTokenCache::new(conn).with_prefix(redis_config.key_prefix.clone()))
        }
        None => {
            tracing::warn!("No Redis configured; meeting credentials are cached per process");
            Arc::new(InMemoryTokenCache::new())
        }
    };

    let meeting = &config.meeting;
    let zoom_config = ZoomConfig::new(
        meeting.zoom_account_id.clone(),
        meeting.zoom_client_id.clone(),
        meeting.zoom_client_secret.expose_secret().clone(),
    )
    .with_base_urls(meeting.api_base_url.clone(), meeting.oauth_base_url.clone())
    .with_timeout(meeting.request_timeout());
    let meeting_provider = ZoomMeetingAdapter::new(zoom_config, token_cache, clock.clone())?;

    let stripe_config = StripeConfig::new(
        config.payment.stripe_api_key.expose_secret().clone(),
        config.payment.stripe_webhook_secret.expose_secret().clone(),
    )
    .with_base_url(config.payment.api_base_url.clone())
    .with_require_livemode(config.payment.is_live_mode());

    let email_settings = EmailSettings {
        admin_email: config.email.admin_email.clone(),
        public_base_url: config.server.public_base_url.trim_end_matches('/').to_string(),
    };
    let notifier = ResendNotifier::new(
        ResendConfig::new(
            config.email.resend_api_key.expose_secret().clone(),
            config.email.from_header(),
            email_settings,
        ),
        reqwest::Client::new(),
    );

    let profiles = Arc::new(PostgresTutorProfileRepository::new(pool.clone()));

    Ok(AppState {
        bookings: Arc::new(PostgresBookingRepository::new(pool.clone())),
        profiles: profiles.clone(),
        availability: profiles,
        users: Arc::new(PostgresUserDirectory::new(pool.clone())),
        feedback: Arc::new(PostgresFeedbackRepository::new(pool.clone())),
        messages: Arc::new(PostgresMessageRepository::new(pool.clone())),
        inquiries: Arc::new(PostgresInquiryRepository::new(pool)),
        payment_provider: Arc::new(StripePaymentAdapter::new(stripe_config)),
        meeting_provider: Arc::new(meeting_provider),
        notifier: Arc::new(notifier),
        clock,
        checkout: config.checkout_settings(),
        fulfillment: config.fulfillment_settings(),
    })
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down gracefully...");
}
