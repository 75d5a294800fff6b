//! CLI entrypoint for LeafScan
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use leafscan_application::{
    AuthService, ChatManager, ImagePayload, ImageSource, ProfileGateway, TokenStore,
};
use leafscan_domain::{Message, User};
use leafscan_infrastructure::{
    ApiClient, CameraCapture, ConfigLoader, FallbackImageSource, FileConfig, FileImageSource,
    FilePicker, FileTokenStore, HttpAuthGateway, HttpChatGateway, HttpImageClassifier,
    HttpProfileGateway,
};
use leafscan_presentation::{
    ChatRepl, Cli, Command, ConsoleFormatter, ProfileAction, Spinner, prompt_line,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };
    config.validate()?;

    info!(backend = %config.backend.base_url, "starting leafscan");

    // === Dependency Injection ===
    let token_path =
        FileTokenStore::default_path().context("could not determine the platform data directory")?;
    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(token_path));

    let client = Arc::new(ApiClient::new(
        &config.backend.base_url,
        Duration::from_secs(config.backend.timeout_secs),
        tokens.clone(),
    )?);

    let auth = AuthService::new(Arc::new(HttpAuthGateway::new(client.clone())), tokens);
    let profile = HttpProfileGateway::new(client.clone());
    let manager = Arc::new(ChatManager::new(
        Arc::new(HttpImageClassifier::new(client.clone())),
        Arc::new(HttpChatGateway::new(client)),
    ));

    match cli.command {
        Command::Login {
            email,
            password,
            google,
        } => {
            let user = if google {
                let url = auth.google_login_url().await?;
                println!("Open this URL in a browser and authorize LeafScan:");
                println!("  {url}");
                let code = prompt_line("Paste the callback code: ")?;
                auth.google_login(&code).await?
            } else {
                let email = email.context("EMAIL is required without --google")?;
                let password = match password {
                    Some(password) => password,
                    None => prompt_line("Password: ")?,
                };
                auth.login(&email, &password).await?
            };
            println!("{} Logged in as {} <{}>", "✓".green(), user.name, user.email);
        }

        Command::Signup {
            email,
            password,
            name,
        } => {
            let password = match password {
                Some(password) => password,
                None => prompt_line("Password: ")?,
            };
            let user = auth.signup(&email, &password, name.as_deref()).await?;
            println!("{} Welcome, {}!", "✓".green(), user.name);
        }

        Command::Logout => {
            auth.logout().await;
            manager.reset().await;
            println!("Logged out.");
        }

        Command::Whoami => {
            auth.hydrate().await;
            match auth.current_user().await {
                Some(user) => println!("{} <{}>", user.name, user.email),
                None => println!("Not logged in."),
            }
        }

        Command::Analyze {
            image,
            camera,
            message,
        } => {
            require_auth(&auth).await?;

            let uri = if camera {
                let cam: Arc<dyn ImageSource> =
                    Arc::new(CameraCapture::new(config.capture.device.clone()));
                let source: Arc<dyn ImageSource> = match image {
                    Some(path) => Arc::new(FallbackImageSource::new(
                        cam,
                        Arc::new(FileImageSource::new(path)),
                    )),
                    None => cam,
                };
                source.acquire().await?
            } else {
                let path = image.context("IMAGE path required (or pass --camera)")?;
                FileImageSource::new(path).acquire().await?
            };

            let encoded = uri.to_string();
            manager
                .add_message(Message::user_image(encoded.clone(), message.clone()))
                .await;

            let spinner = spinner(cli.quiet, "Analyzing...");
            manager.analyze_image(&encoded, message.as_deref()).await;
            spinner.finish();

            if let Some(session) = manager.current_session().await
                && let Some(reply) = session.messages().last()
            {
                print!("{}", ConsoleFormatter::format_message(reply));
            }
        }

        Command::Chat => {
            require_auth(&auth).await?;

            let camera: Arc<dyn ImageSource> =
                Arc::new(CameraCapture::new(config.capture.device.clone()));
            let repl = ChatRepl::new(manager, Arc::new(FilePicker), camera)
                .with_progress(!cli.quiet);
            repl.run().await?;
        }

        Command::History { sync } => {
            require_auth(&auth).await?;

            if sync {
                let spinner = spinner(cli.quiet, "Syncing...");
                let count = manager.sync_history().await?;
                spinner.finish();
                info!(count, "sessions fetched");
            }

            let sessions = manager.history().await;
            if sessions.is_empty() {
                println!("No sessions yet. Try `leafscan history --sync`.");
            }
            for session in sessions {
                println!("{}", ConsoleFormatter::format_session_line(&session));
            }
        }

        Command::Profile { action } => {
            require_auth(&auth).await?;

            match action.unwrap_or(ProfileAction::Show) {
                ProfileAction::Show => {
                    let user = profile.fetch().await?;
                    println!("{} <{}>", user.name, user.email);
                }
                ProfileAction::Update { name, email } => {
                    let current = profile.fetch().await?;
                    let wanted = User::new(
                        name.unwrap_or(current.name),
                        email.unwrap_or(current.email),
                    );
                    let updated = profile.update(&wanted).await?;
                    println!("{} Profile updated: {} <{}>", "✓".green(), updated.name, updated.email);
                    auth.update_user(updated).await;
                }
                ProfileAction::SetImage { image } => {
                    let uri = FileImageSource::new(image).acquire().await?;
                    profile
                        .update_image(ImagePayload::from_data_uri(&uri))
                        .await?;
                    println!("{} Profile picture updated.", "✓".green());
                }
            }
        }
    }

    Ok(())
}

/// Restore the persisted session and fail when nobody is logged in.
async fn require_auth(auth: &AuthService) -> Result<()> {
    auth.hydrate().await;
    if !auth.is_authenticated().await {
        bail!("Not logged in. Run `leafscan login <email>` first.");
    }
    Ok(())
}

fn spinner(quiet: bool, message: &str) -> Spinner {
    if quiet {
        Spinner::disabled()
    } else {
        Spinner::start(message.to_string())
    }
}
