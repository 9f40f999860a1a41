//! CLI command definitions and dispatch.

pub mod auth;
pub mod bookings;
pub mod guests;
pub mod hotels;
pub mod rooms;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use autoguide_auth::SessionStore;
use autoguide_client::http::RequestPipeline;
use autoguide_client::identity::KeycloakClient;
use autoguide_client::router::{GuardDecision, NavigationGuard, Navigator, RouteName};
use autoguide_core::config::AppConfig;
use autoguide_core::error::AppError;
use autoguide_storage::FileSessionStorage;

use crate::output::{self, OutputFormat};

/// AutoGuide hotel back-office terminal client
#[derive(Debug, Parser)]
#[command(name = "autoguide", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (merged over config/default.toml)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in against the Keycloak realm
    Login(auth::LoginArgs),
    /// Clear the stored session
    Logout,
    /// Show the current session and permissions
    Whoami,
    /// Print the hosted registration URL
    Register(auth::RegisterArgs),
    /// Guest management
    Guests(guests::GuestsArgs),
    /// Hotel management
    Hotels(hotels::HotelsArgs),
    /// Room management
    Rooms(rooms::RoomsArgs),
    /// Booking workflow
    Bookings(bookings::BookingsArgs),
    /// Backend health probe
    Health,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let ctx = AppContext::build(&self.env)?;

        match &self.command {
            Commands::Login(args) => auth::login(args, &ctx).await,
            Commands::Logout => auth::logout(&ctx),
            Commands::Whoami => auth::whoami(&ctx, self.format),
            Commands::Register(args) => auth::register(args, &ctx),
            Commands::Guests(args) => guests::execute(args, &ctx, self.format).await,
            Commands::Hotels(args) => hotels::execute(args, &ctx, self.format).await,
            Commands::Rooms(args) => rooms::execute(args, &ctx, self.format).await,
            Commands::Bookings(args) => bookings::execute(args, &ctx, self.format).await,
            Commands::Health => {
                let health = autoguide_client::api::fetch_health(&ctx.pipeline).await?;
                println!("{}", serde_json::to_string_pretty(&health)?);
                Ok(())
            }
        }
    }
}

/// Wired-up application state shared by every command.
#[derive(Debug)]
pub struct AppContext {
    pub config: AppConfig,
    pub session: Arc<SessionStore>,
    pub keycloak: KeycloakClient,
    pub navigator: Arc<Navigator>,
    pub pipeline: RequestPipeline,
    pub guard: NavigationGuard,
}

impl AppContext {
    /// Loads configuration and wires storage, session, identity, pipeline,
    /// and guard together.
    pub fn build(env: &str) -> Result<Self, AppError> {
        let config = AppConfig::load(env)?;

        let storage = Arc::new(FileSessionStorage::new(&config.session.storage_path));
        let keycloak = KeycloakClient::new(config.keycloak.clone())?;
        let session = Arc::new(SessionStore::new(
            storage.clone(),
            Arc::new(keycloak.clone()),
        ));
        let navigator = Arc::new(Navigator::new(RouteName::Dashboard.path()));
        let pipeline = RequestPipeline::new(
            &config.api,
            storage,
            navigator.clone(),
            config.auth.require_auth,
        )?;
        let guard = NavigationGuard::new(session.clone(), config.auth.require_auth);

        Ok(Self {
            config,
            session,
            keycloak,
            navigator,
            pipeline,
            guard,
        })
    }

    /// Runs the navigation guard for a view-backed command. Returns true
    /// when the command may proceed; otherwise explains the redirect.
    pub fn enter_route(&self, route: RouteName) -> bool {
        match self.guard.check(route) {
            GuardDecision::Allow => {
                self.navigator.complete_navigation(route.path());
                true
            }
            GuardDecision::Redirect {
                route: RouteName::Login,
                ..
            } => {
                output::print_warning("This view requires a session. Run `autoguide login` first.");
                false
            }
            GuardDecision::Redirect { route, .. } => {
                output::print_warning(&format!(
                    "Your roles do not grant access to this view (redirected to {}).",
                    route.path()
                ));
                false
            }
        }
    }
}
