//! Session smoke tool: bring the console up, resolve any persisted session,
//! optionally sign in with env-provided credentials, and report where the
//! session landed.

use etms_console::auth::session::SessionState;
use etms_console::resources::surveys;
use etms_console::Console;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let console = Console::from_env()?;
    tracing::info!("API base: {}", console.config().api_base_url);

    console.session().initialize().await;

    if !console.session().is_authenticated().await {
        if let (Ok(email), Ok(password)) =
            (std::env::var("ETMS_EMAIL"), std::env::var("ETMS_PASSWORD"))
        {
            if let Err(e) = console.session().login(&email, &password).await {
                tracing::error!("Login failed: {e}");
                return Ok(());
            }
        }
    }

    match console.session().state().await {
        SessionState::Authenticated(identity) => {
            tracing::info!(
                "Session active: {} <{}> role={} home={}",
                identity.name,
                identity.email,
                identity.role.as_str(),
                identity.role.home_path()
            );
            match surveys::my_assignments(console.api()).await {
                Ok(assignments) => {
                    tracing::info!("{} pending survey assignment(s)", assignments.len())
                }
                Err(e) => tracing::warn!("Could not list assignments: {e}"),
            }
        }
        SessionState::Anonymous => {
            tracing::info!("No active session. Set ETMS_EMAIL and ETMS_PASSWORD to sign in.")
        }
        state => tracing::warn!("Session did not settle: {state:?}"),
    }

    Ok(())
}
