mod actions;
mod api;
mod cli;
mod config;
mod dashboard;
mod logging;
mod models;
mod output;

use actions::{AssumeYes, Confirm, PromptConfirm};
use anyhow::{Context, Result};
use api::client::DriveClient;
use api::{auth, files, folders, storage};
use clap::Parser;
use cli::{AuthCommands, Cli, Commands, FilesCommands, FoldersCommands};
use config::Session;
use dashboard::{Dashboard, Listing, View};
use logging::{init_logging, LogConfig};
use models::user::RegisterRequest;
use output::color::ColorWriter;
use output::formatter::OutputFormat;
use output::{auth_formatter, file_formatter, pager, storage_formatter};
use serde::Serialize;
use std::io::BufRead;
use std::process::ExitCode;

/// Rendering settings shared by every command
struct Ui {
    format: OutputFormat,
    no_color: bool,
    no_pager: bool,
}

impl Ui {
    /// Print `data` as json/yaml, or render it with `human`
    fn show<T, F>(&self, data: &T, human: F) -> Result<()>
    where
        T: Serialize,
        F: FnOnce(&mut ColorWriter) -> std::io::Result<()>,
    {
        if let Some(text) = self.format.serialize(data)? {
            println!("{}", text);
            return Ok(());
        }

        let mut writer = ColorWriter::new(self.no_color);
        human(&mut writer)?;
        pager::emit(&writer.into_string()?, self.no_pager)
    }

    fn show_listing(&self, dashboard: &Dashboard, listing: &Listing) -> Result<()> {
        self.show(listing, |w| file_formatter::format_listing(dashboard, listing, w))
    }

    /// Status lines go to stderr in machine-readable modes so stdout stays parseable
    fn status(&self, line: impl FnOnce(&mut ColorWriter) -> std::io::Result<()>) -> Result<()> {
        let mut writer = ColorWriter::new(self.no_color);
        line(&mut writer)?;
        let text = writer.into_string()?;

        match self.format {
            OutputFormat::Human => print!("{}", text),
            OutputFormat::Json | OutputFormat::Yaml => eprint!("{}", text),
        }
        Ok(())
    }

    fn success(&self, message: &str) -> Result<()> {
        self.status(|w| w.print_success(message))
    }

    /// Report an action outcome: the refreshed listing, or why nothing happened
    fn after_action(
        &self,
        dashboard: &Dashboard,
        outcome: Option<Listing>,
        done: &str,
        skipped: &str,
    ) -> Result<()> {
        match outcome {
            Some(listing) => {
                self.success(done)?;
                self.show_listing(dashboard, &listing)
            }
            None => self.status(|w| {
                w.write(skipped)?;
                w.writeln()
            }),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(LogConfig { verbose: cli.verbose }) {
        eprintln!("{:#}", e);
    }

    let no_color = cli.no_color;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");

            let mut writer = ColorWriter::new(no_color);
            let _ = writer.print_error(&format!("{:#}", err));
            eprint!("{}", writer.into_string().unwrap_or_else(|_| format!("{:#}\n", err)));
            ExitCode::FAILURE
        }
    }
}

fn confirmer(yes: bool) -> Box<dyn Confirm> {
    if yes {
        Box::new(AssumeYes)
    } else {
        Box::new(PromptConfirm::new(std::io::stdin().lock()))
    }
}

fn read_password(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;

    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        anyhow::bail!("A password is required");
    }
    Ok(password)
}

fn authenticated_client(api_url: &str, explicit_token: Option<&str>) -> Result<DriveClient> {
    let session = config::load_session()?;
    let token = config::resolve_token(explicit_token, session.as_ref(), api_url).context(
        "Not logged in\n\n\
         Log in with:\n  \
         opendrive auth login --username <NAME>\n\n\
         or set the OPENDRIVE_TOKEN environment variable",
    )?;

    Ok(DriveClient::new(api_url, Some(&token))?)
}

async fn run(cli: Cli) -> Result<()> {
    let ui = Ui {
        format: cli.format,
        no_color: cli.no_color,
        no_pager: cli.no_pager,
    };

    let api_url = cli.api_url.as_str();
    let token = cli.token.as_deref();
    let connect = || -> Result<DriveClient> {
        let client = authenticated_client(api_url, token)?;
        tracing::debug!(api_url = %client.base_url(), "client ready");
        Ok(client)
    };

    match cli.command {
        Commands::Browse { location } => {
            let client = connect()?;
            let dashboard = location.dashboard(View::MyDrive);
            let listing = dashboard
                .load(&client)
                .await
                .context("Failed to load files")?;
            ui.show_listing(&dashboard, &listing)?;
        }
        Commands::Files { command } => run_files(&ui, &connect()?, cli.yes, command).await?,
        Commands::Folders { command } => run_folders(&ui, &connect()?, cli.yes, command).await?,
        Commands::Storage => {
            let client = connect()?;
            let info = storage::get_storage_info(&client)
                .await
                .context("Failed to load storage info")?;
            ui.show(&info, |w| storage_formatter::format_storage(&info, w))?;
        }
        Commands::Auth { command } => run_auth(&ui, api_url, token, command).await?,
    }

    Ok(())
}

async fn run_files(ui: &Ui, client: &DriveClient, yes: bool, command: FilesCommands) -> Result<()> {
    match command {
        FilesCommands::List { location } => {
            let dashboard = location.dashboard(View::MyDrive);
            let files = files::list_files(client, &dashboard.file_query())
                .await
                .context("Failed to load files")?;
            let listing = Listing {
                folders: Vec::new(),
                files,
            };
            ui.show(&listing.files, |w| {
                file_formatter::format_listing(&dashboard, &listing, w)
            })?;
        }
        FilesCommands::Upload { path, location } => {
            let dashboard = location.dashboard(View::MyDrive);
            let outcome = actions::upload_file(client, &dashboard, &path).await?;
            ui.after_action(
                &dashboard,
                outcome,
                &format!("Uploaded {}", path.display()),
                "Nothing uploaded",
            )?;
        }
        FilesCommands::Download { file_id, output } => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            let path = actions::download_file(client, file_id, output.as_deref(), &cwd, yes).await?;

            match ui.format {
                OutputFormat::Human => ui.success(&format!("Saved to {}", path.display()))?,
                _ => ui.show(&serde_json::json!({ "file_id": file_id, "path": path }), |_| Ok(()))?,
            }
        }
        FilesCommands::Rename { file_id, name, location } => {
            let dashboard = location.dashboard(View::MyDrive);
            let outcome = actions::rename_file(client, &dashboard, file_id, &name).await?;
            ui.after_action(
                &dashboard,
                outcome,
                &format!("Renamed file #{} to {}", file_id, name),
                "Name is empty, nothing renamed",
            )?;
        }
        FilesCommands::Trash { file_id, location } => {
            let dashboard = location.dashboard(View::MyDrive);
            let outcome = actions::trash_file(client, &dashboard, file_id).await?;
            ui.after_action(&dashboard, outcome, &format!("Moved file #{} to trash", file_id), "")?;
        }
        FilesCommands::Restore { file_id, location } => {
            let dashboard = location.dashboard(View::Trash);
            let outcome = actions::restore_file(client, &dashboard, file_id).await?;
            ui.after_action(&dashboard, outcome, &format!("Restored file #{}", file_id), "")?;
        }
        FilesCommands::Delete { file_id, location } => {
            let dashboard = location.dashboard(View::Trash);
            let mut confirm = confirmer(yes);
            let outcome = actions::delete_file(client, &dashboard, file_id, confirm.as_mut()).await?;
            ui.after_action(
                &dashboard,
                outcome,
                &format!("Permanently deleted file #{}", file_id),
                "Cancelled",
            )?;
        }
    }

    Ok(())
}

async fn run_folders(ui: &Ui, client: &DriveClient, yes: bool, command: FoldersCommands) -> Result<()> {
    match command {
        FoldersCommands::List { parent } => {
            let dashboard = Dashboard::new(View::MyDrive, parent, None);
            let folders = folders::list_folders(client, parent)
                .await
                .context("Failed to load folders")?;
            let listing = Listing {
                folders,
                files: Vec::new(),
            };
            ui.show(&listing.folders, |w| {
                file_formatter::format_listing(&dashboard, &listing, w)
            })?;
        }
        FoldersCommands::Create { name, parent } => {
            let dashboard = Dashboard::new(View::MyDrive, parent, None);
            let outcome = actions::create_folder(client, &dashboard, &name).await?;
            ui.after_action(
                &dashboard,
                outcome,
                &format!("Created folder {}", name.trim()),
                "Folder name is empty, nothing created",
            )?;
        }
        FoldersCommands::Delete { folder_id, parent } => {
            let dashboard = Dashboard::new(View::MyDrive, parent, None);
            let mut confirm = confirmer(yes);
            let outcome = actions::delete_folder(client, &dashboard, folder_id, confirm.as_mut()).await?;
            ui.after_action(
                &dashboard,
                outcome,
                &format!("Deleted folder #{}", folder_id),
                "Cancelled",
            )?;
        }
    }

    Ok(())
}

async fn run_auth(ui: &Ui, api_url: &str, explicit_token: Option<&str>, command: AuthCommands) -> Result<()> {
    match command {
        AuthCommands::Login { username, password } => {
            let password = read_password(password)?;
            let client = DriveClient::new(api_url, None)?;
            let response = auth::login(&client, &username, &password)
                .await
                .context("Failed to log in")?;

            store_session(api_url, &response.user.username, &response.token)?;
            ui.success(&format!("Logged in as {}", response.user.username))?;
        }
        AuthCommands::Register {
            username,
            email,
            password,
            first_name,
            last_name,
        } => {
            let password = read_password(password)?;
            let client = DriveClient::new(api_url, None)?;
            let request = RegisterRequest {
                username: &username,
                email: &email,
                password: &password,
                password2: &password,
                first_name: &first_name,
                last_name: &last_name,
            };
            let response = auth::register(&client, &request)
                .await
                .context("Failed to register")?;

            store_session(api_url, &response.user.username, &response.token)?;
            ui.success(&format!("Registered and logged in as {}", response.user.username))?;
        }
        AuthCommands::Logout => {
            if let Ok(client) = authenticated_client(api_url, explicit_token) {
                // The server keeps no session state; a failure here must not keep the local token
                if let Err(e) = auth::logout(&client).await {
                    tracing::warn!("Server logout failed: {}", e);
                }
            }

            if config::clear_session()? {
                ui.success("Logged out")?;
            } else {
                ui.success("No saved session")?;
            }
        }
        AuthCommands::Whoami => {
            let client = authenticated_client(api_url, explicit_token)?;
            let user = auth::current_user(&client)
                .await
                .context("Failed to load current user")?;
            ui.show(&user, |w| auth_formatter::format_user(&user, client.base_url(), w))?;
        }
    }

    Ok(())
}

fn store_session(api_url: &str, username: &str, token: &str) -> Result<()> {
    let session = Session {
        api_url: api_url.trim_end_matches('/').to_string(),
        username: username.to_string(),
        token: token.to_string(),
    };
    let path = config::save_session(&session)?;
    tracing::debug!(path = %path.display(), "session stored");
    Ok(())
}
