use std::env;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use elanis_api::{ApiClient, ClientConfig, LoginRequest};
use elanis_session::{logout, routes, SessionState, TokenStore};

fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never(elanis_common::logs_dir(), "elanis.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "elanis_cli=debug,elanis_api=debug,elanis_session=debug,warn".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    guard
}

fn arg_value(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn usage() {
    eprintln!("Usage: elanis-cli <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  login --email <email> --password <pw> [--phone <number>] [--remember]");
    eprintln!("  status");
    eprintln!("  refresh");
    eprintln!("  logout");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    elanis_common::init_structure()?;
    let _guard = init_tracing();
    info!("Starting Elanis CLI");

    let store = Arc::new(TokenStore::open());
    let mut config = ClientConfig::default();
    if let Ok(url) = env::var("ELANIS_API_URL") {
        config = config.with_base_url(url);
    }
    let api = ApiClient::new(config, store.clone())?;
    let mut state = SessionState::hydrate(store);

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("login") => {
            let password = arg_value(&args, "--password")
                .ok_or_else(|| anyhow::anyhow!("--password is required"))?;
            let request = if let Some(email) = arg_value(&args, "--email") {
                LoginRequest::with_email(email, password)
            } else if let Some(phone) = arg_value(&args, "--phone") {
                LoginRequest::with_phone(phone, password)
            } else {
                anyhow::bail!("either --email or --phone is required");
            };
            let remember = args.iter().any(|a| a == "--remember");

            let profile = api.login(&request).await?;
            state.login(profile, remember);

            let user = state.session().user.as_ref();
            println!("Logged in as {}", routes::display_name(user));
            println!("Dashboard: {}", routes::dashboard_path(user));
        }
        Some("status") => {
            if state.is_authenticated() {
                let user = state.session().user.as_ref();
                println!("Logged in as {}", routes::display_name(user));
                println!("Role:      {}", routes::role_display(user));
                println!("Dashboard: {}", routes::dashboard_path(user));
                if let Some(id) = &state.session().user_id {
                    println!("User id:   {id}");
                }
            } else {
                println!("Not logged in");
            }
        }
        Some("refresh") => {
            api.refresh().await?;
            println!("Token pair refreshed");
        }
        Some("logout") => {
            let path = logout(&api, &mut state).await;
            println!("Logged out, navigate to {path}");
        }
        _ => usage(),
    }

    Ok(())
}
