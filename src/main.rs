use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use migration_console::api::ApiClient;
use migration_console::config::{self, AppConfig};
use migration_console::controllers::{AdminAction, AdminController, FilesController, RestoreStatus, SearchController, StatsRefresher};
use migration_console::error::ConsoleError;
use migration_console::render;
use migration_console::restore::RestoreFormat;

#[derive(Parser, Debug)]
#[command(name = "migration-console", version, about = "Admin console for the Quip to Google Drive migration API")]
struct Cli {
    /// Base URL of the migration API (overrides api.base_url)
    #[arg(long, global = true, env = "MIGRATION_CONSOLE_BASE_URL")]
    base_url: Option<String>,
    /// Directory for downloads and exports (overrides output.download_dir)
    #[arg(long, global = true)]
    download_dir: Option<PathBuf>,
    /// Ignore migration-console.toml, MIGRATION_CONSOLE_CONFIG and MIGRATION_CONSOLE__* variables
    #[arg(long, global = true)]
    no_config: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check API and database health
    Health {
        #[arg(long)]
        save: bool,
    },
    /// List source documents and folders
    Documents {
        #[arg(long)]
        save: bool,
    },
    /// Show a single source document
    Document {
        id: String,
        #[arg(long)]
        save: bool,
    },
    /// Show recent migration logs
    Logs {
        #[arg(long)]
        save: bool,
    },
    /// Trigger a dump import on the server
    ImportDump {
        #[arg(long)]
        save: bool,
    },
    /// Show migration statistics, optionally refreshing until Ctrl-C
    Stats {
        #[arg(long)]
        watch: bool,
    },
    /// Search by Quip document ID, Google Drive ID or Google Docs URL
    Search {
        input: String,
        /// Restore the found document (docx, pdf or html)
        #[arg(long)]
        restore: Option<RestoreFormat>,
        /// Print inline (HTML) restore content
        #[arg(long)]
        print: bool,
    },
    /// List migrated Google Drive files
    Files {
        #[arg(long, default_value_t = 1)]
        page: i64,
        #[arg(long)]
        per_page: Option<u32>,
        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
        /// Save the raw response as a JSON snapshot
        #[arg(long)]
        save: bool,
        /// Export the complete listing as CSV
        #[arg(long)]
        export_csv: bool,
        /// Browse pages interactively
        #[arg(long)]
        interactive: bool,
    },
    /// Copy text (e.g. a Drive file ID) to the clipboard
    Copy { text: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging (stderr + daily file rotation under ./logs); stdout carries command output
    std::fs::create_dir_all("logs").ok();
    let (stderr_nb, stderr_guard) = tracing_appender::non_blocking(std::io::stderr());
    let file_appender = tracing_appender::rolling::daily("logs", "migration-console.log");
    let (file_nb, file_guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,reqwest=warn,hyper=warn".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(stderr_nb))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(file_nb))
        .init();
    let _log_guards = (stderr_guard, file_guard);

    let cli = Cli::parse();

    // Configuration: embedded defaults -> migration-console.toml -> env/.env, then CLI overrides
    let mut app_cfg = if cli.no_config { AppConfig::default() } else { config::load()? };
    if let Some(url) = cli.base_url.clone() {
        app_cfg.api.base_url = url;
    }
    if let Some(dir) = cli.download_dir.clone() {
        app_cfg.output.download_dir = dir;
    }
    config::validate(&app_cfg)?;

    let client = ApiClient::new(&app_cfg.api.base_url, app_cfg.request_timeout())?;
    info!("Using migration API at {}", client.base_url());

    run(cli.command, client, &app_cfg).await
}

async fn run(command: Command, client: ApiClient, cfg: &AppConfig) -> anyhow::Result<()> {
    let downloads = cfg.output.download_dir.clone();
    match command {
        Command::Health { save } => admin_action(client, &downloads, save, AdminAction::Health).await,
        Command::Documents { save } => admin_action(client, &downloads, save, AdminAction::Documents).await,
        Command::Document { id, save } => admin_action(client, &downloads, save, AdminAction::Document(id)).await,
        Command::Logs { save } => admin_action(client, &downloads, save, AdminAction::MigrationLogs).await,
        Command::ImportDump { save } => admin_action(client, &downloads, save, AdminAction::ImportDump).await,
        Command::Stats { watch } => {
            let mut admin = AdminController::new(client);
            if !watch {
                println!("{}", admin.quick_stats().await);
                return Ok(());
            }
            watch_stats(admin, cfg).await
        }
        Command::Search { input, restore, print } => {
            let mut search = SearchController::new(client, downloads);
            match search.search(&input).await {
                Ok(_) => {}
                Err(ConsoleError::InvalidInput(msg)) => {
                    eprintln!("{}", msg);
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            }
            if let Some(view) = &search.state().view {
                println!("{}", view.to_text());
            }
            if let Some(format) = restore {
                match search.restore(format).await {
                    Ok(status) => {
                        eprintln!("{}", status.message());
                        if let RestoreStatus::Restored { path, inline, .. } = status {
                            println!("Saved to {}", path.display());
                            if print {
                                if let Some(content) = inline {
                                    println!("{}", content);
                                }
                            }
                        }
                    }
                    Err(e) => eprintln!("{}", e),
                }
            }
            Ok(())
        }
        Command::Files { page, per_page, json, save, export_csv, interactive } => {
            let per_page = match per_page {
                Some(n) => cfg.files.check_per_page(n)?,
                None => cfg.files.default_per_page,
            };
            let mut files = FilesController::new(client, per_page);
            files.load().await;
            if page != 1 {
                if let Err(e) = files.go_to_page(page).await {
                    eprintln!("{}", e);
                }
            }
            print_files(&files, json);
            if save {
                report_export(files.export_response(&downloads));
            }
            if export_csv {
                match files.export_csv(&downloads).await {
                    Ok((path, rows)) => println!("Exported {} files to {}", rows, path.display()),
                    Err(e) => eprintln!("Error exporting data: {}", e),
                }
            }
            if interactive {
                browse_files(files, cfg, json).await?;
            }
            Ok(())
        }
        Command::Copy { text } => {
            let files = FilesController::new(client, cfg.files.default_per_page);
            match files.copy_id(&text).await {
                Ok(feedback) => {
                    println!("{}", feedback.label);
                    if let Some(hint) = feedback.hint {
                        println!("{}", hint);
                    }
                }
                Err(e) => eprintln!("{}", e),
            }
            Ok(())
        }
    }
}

async fn admin_action(client: ApiClient, downloads: &Path, save: bool, action: AdminAction) -> anyhow::Result<()> {
    let mut admin = AdminController::new(client);
    admin.perform(&action).await;
    println!("{}", admin.panel().content());
    if save {
        report_export(admin.export_response(downloads));
    }
    Ok(())
}

fn report_export(result: Result<Option<PathBuf>, ConsoleError>) {
    match result {
        Ok(Some(path)) => println!("Saved response to {}", path.display()),
        Ok(None) => eprintln!("Nothing to export"),
        Err(e) => eprintln!("Export failed: {}", e),
    }
}

async fn watch_stats(admin: AdminController, cfg: &AppConfig) -> anyhow::Result<()> {
    let admin = Arc::new(Mutex::new(admin));
    let cancel = CancellationToken::new();
    let refresher = StatsRefresher::spawn(admin, cfg.stats_refresh_interval(), cancel.clone(), |stats| {
        println!("{}\n", render::stats_summary(&stats.documents, stats.logs.as_ref()));
    });
    info!("Refreshing statistics every {}s, Ctrl-C to stop", cfg.admin.stats_refresh_secs);
    shutdown_signal().await;
    refresher.stop().await;
    Ok(())
}

fn print_files(files: &FilesController, json: bool) {
    if json {
        println!("{}", files.panel().content());
        return;
    }
    println!("{}", files.summary());
    println!("{}", files.render_table());
    let p = files.pagination();
    println!(
        "{}{}{}",
        p.page_info(),
        if p.has_prev() { "  [p] prev" } else { "" },
        if p.has_next() { "  [n] next" } else { "" }
    );
}

const BROWSE_HELP: &str = "n: next  p: prev  g N: go to page  s N: page size  r: refresh  e: export CSV  j: save response  c ID: copy ID  x: clear response  q: quit";

async fn browse_files(mut files: FilesController, cfg: &AppConfig, json: bool) -> anyhow::Result<()> {
    let downloads = cfg.output.download_dir.as_path();
    println!("{}", BROWSE_HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let mut parts = line.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        let arg = parts.next();
        let result = match (cmd, arg) {
            ("q", _) => break,
            ("n", _) => files.next_page().await,
            ("p", _) => files.prev_page().await,
            ("r", _) => files.refresh().await,
            ("g", Some(n)) => match n.parse::<i64>() {
                Ok(page) => files.go_to_page(page).await,
                Err(_) => Err(ConsoleError::PageOutOfRange { requested: 0, total_pages: files.pagination().total_pages() }),
            },
            ("s", Some(n)) => match n.parse::<u32>() {
                Ok(size) => match cfg.files.check_per_page(size) {
                    Ok(size) => files.set_per_page(size).await,
                    Err(e) => Err(e),
                },
                Err(_) => Err(ConsoleError::InvalidInput(format!("Invalid page size: {}", n))),
            },
            ("e", _) => {
                match files.export_csv(downloads).await {
                    Ok((path, rows)) => println!("Exported {} files to {}", rows, path.display()),
                    Err(e) => eprintln!("Error exporting data: {}", e),
                }
                continue;
            }
            ("j", _) => {
                report_export(files.export_response(downloads));
                continue;
            }
            ("x", _) => {
                files.clear_response();
                println!("{}", files.panel().content());
                continue;
            }
            ("c", Some(id)) => {
                match files.copy_id(id).await {
                    Ok(feedback) => println!("{}", feedback.hint.unwrap_or_else(|| feedback.label.to_string())),
                    Err(e) => eprintln!("{}", e),
                }
                continue;
            }
            _ => {
                println!("{}", BROWSE_HELP);
                continue;
            }
        };
        match result {
            Ok(_) => print_files(&files, json),
            Err(e) => eprintln!("{}", e),
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut term = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received. Stopping...");
}
