use std::io::Write;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use yansi::Paint;

use vmpanel::config;
use vmpanel::models::{AppState, VmRow};
use vmpanel::services::{
    generate_password_hash, partition_deletions, CredentialStore, HostScripts, JobProbe,
    ProcessCountProbe, ScriptVmCommands, SentinelProbe, VmCommands,
};

fn build_probe(scripts: &HostScripts) -> Arc<dyn JobProbe> {
    match config::get_job_status_file() {
        Some(path) => {
            tracing::info!(path = %path.display(), "Reading job phase from status file");
            Arc::new(SentinelProbe::new(path))
        }
        None => Arc::new(ProcessCountProbe::new(scripts.clone())),
    }
}

fn build_state(users_file: &Path) -> AppState {
    let credentials = match CredentialStore::load(users_file) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(%e, "Failed to load credentials");
            eprintln!("{}: {}", "Cannot start".red(), e);
            process::exit(1);
        }
    };
    if credentials.is_empty() {
        tracing::warn!(path = %users_file.display(), "Credential file has no users; nobody can log in");
    }
    let scripts = HostScripts::new(config::get_scripts_dir());
    AppState {
        credentials: Arc::new(credentials),
        protected_hosts: Arc::new(config::get_protected_hosts()),
        vms: Arc::new(ScriptVmCommands::new(scripts.clone())),
        probe: build_probe(&scripts),
        refresh_seconds: config::get_refresh_seconds(),
    }
}

async fn start_server(state: AppState, host: &str, port: u16) {
    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            eprintln!("{}: {}", "Invalid host/port format".red(), e);
            process::exit(1);
        }
    };
    tracing::info!(
        %addr,
        users = state.credentials.len(),
        protected_hosts = state.protected_hosts.len(),
        "Starting VM panel"
    );
    let app = vmpanel::build_router(state);
    println!("{} {}", "Web server running on".green(), format!("http://{}", addr).cyan());
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(%e, "Server encountered an error while running");
                eprintln!("{}: {}", "Server error".red(), e);
                process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!(
                "{}: {}\n{}",
                format!("Failed to bind to {}", addr).red(),
                e,
                "Please stop any process using this port, or start the server with a different --port value.".yellow()
            );
            process::exit(1);
        }
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

#[derive(Parser)]
#[command(
    name = "vmpanel",
    author,
    version,
    about = "Web panel for creating and deleting UI test VMs",
    long_about = r#"vmpanel serves a small password-protected web page where operators submit a discovery image URL and a node count, watch the host while VMs are created, and delete running VMs.

All VM work is done by the scripts in SCRIPTS_DIR (default ./host_scripts). Credentials come from a `username=hash` file (default ../users). Configuration is read from the environment and an optional .env file.

Examples:
  1) Run the panel:
      vmpanel serve --host 0.0.0.0 --port 5000
  2) Add an operator:
      vmpanel users add designer 's3cret'
  3) Inspect the host:
      vmpanel vms list
      vmpanel vms status
"#,
    after_help = "Use `vmpanel <subcommand> --help` to get subcommand specific options and usage examples."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Path to .env file
    #[arg(long, global = true)]
    env_file: Option<String>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Host to bind to (defaults to HOST or 127.0.0.1)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (defaults to PORT or 8080)
        #[arg(long)]
        port: Option<u16>,
        /// Credential file (defaults to USERS_FILE or ../users)
        #[arg(long)]
        users_file: Option<PathBuf>,
    },
    /// Validate configuration, credentials and host scripts
    #[command(about = "Validate configuration", long_about = "Load the credential file, list the protected hosts and check that every host script exists in the scripts directory.")]
    CheckConfig,
    /// Manage the credential file
    Users {
        #[command(subcommand)]
        sub: UserCommands,
    },
    /// Inspect and delete VMs through the host scripts
    #[command(about = "Inspect and delete VMs", long_about = "These commands run the same host scripts the web UI uses. Protected hosts are refused unless --force is given.")]
    Vms {
        #[command(subcommand)]
        sub: VmCommandsCli,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    #[command(about = "List users in the credential file")]
    List {
        #[arg(long)]
        users_file: Option<PathBuf>,
    },
    #[command(about = "Add a user", long_about = "Hash the password and append a `username=hash` line to the credential file. Existing users are never overwritten.")]
    Add {
        username: String,
        password: String,
        #[arg(long)]
        users_file: Option<PathBuf>,
    },
    #[command(about = "Print a password hash", long_about = "Print a hash suitable for the right-hand side of a credential file line.")]
    Hash { password: String },
}

#[derive(Subcommand)]
enum VmCommandsCli {
    #[command(about = "List running VMs")]
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    #[command(about = "Show whether an image download or VM creation is running")]
    Status,
    #[command(about = "Delete VMs by name")]
    Delete {
        #[arg(required = true)]
        names: Vec<String>,
        /// Also delete protected hosts
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

fn resolve_users_file(flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(config::get_users_file)
}

fn load_store_or_exit(path: &Path) -> CredentialStore {
    match CredentialStore::load(path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("{}: {}", "Invalid credential file".red(), e);
            process::exit(1);
        }
    }
}

fn append_user(path: &Path, username: &str, hash: &str) -> std::io::Result<()> {
    let needs_newline = match std::fs::read(path) {
        Ok(bytes) => bytes.last().map(|b| *b != b'\n').unwrap_or(false),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => return Err(e),
    };
    let mut file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;
    if needs_newline {
        writeln!(file)?;
    }
    writeln!(file, "{}={}", username, hash)
}

fn run_users(sub: UserCommands) {
    match sub {
        UserCommands::List { users_file } => {
            let path = resolve_users_file(users_file);
            let store = load_store_or_exit(&path);
            println!("{}", "username".bold().underline());
            for name in store.usernames() {
                println!("{}", name);
            }
        }
        UserCommands::Add { username, password, users_file } => {
            let uname = username.trim().to_string();
            if uname.is_empty() || uname.contains('=') || uname.chars().any(char::is_whitespace) {
                eprintln!("{} '{}'", "Invalid username".red(), uname);
                process::exit(1);
            }
            let path = resolve_users_file(users_file);
            if path.exists() && load_store_or_exit(&path).contains(&uname) {
                eprintln!("{} '{}' {}", "User".red(), uname, "already exists".red());
                process::exit(1);
            }
            if let Err(e) = append_user(&path, &uname, &generate_password_hash(&password)) {
                eprintln!("{} {}: {}", "Failed to write".red(), path.display(), e);
                process::exit(1);
            }
            println!("{} '{}' {}", "User".green(), uname, "added".green());
        }
        UserCommands::Hash { password } => {
            println!("{}", generate_password_hash(&password));
        }
    }
}

async fn run_vms(sub: VmCommandsCli) {
    let scripts = HostScripts::new(config::get_scripts_dir());
    let vms = ScriptVmCommands::new(scripts.clone());
    let protected = config::get_protected_hosts();
    match sub {
        VmCommandsCli::List { json } => {
            let running = vms.list_running().await.unwrap_or_else(|e| exit_with(e));
            let rows = VmRow::from_listing(&running, &protected);
            if json {
                match serde_json::to_string_pretty(&rows) {
                    Ok(s) => println!("{}", s),
                    Err(e) => exit_with(e),
                }
                return;
            }
            let mut table = new_table();
            table.set_header(vec!["Name", "Protected"]);
            for row in &rows {
                table.add_row(vec![row.name.clone(), if row.protected { "yes".into() } else { String::new() }]);
            }
            println!("\n{table}\n");
            println!("{}", format!("{} running VM(s)", rows.len()).dim());
        }
        VmCommandsCli::Status => {
            let phase = build_probe(&scripts).job_phase().await.unwrap_or_else(|e| exit_with(e));
            if phase.is_busy() {
                println!("{} {}", phase.to_string().yellow().bold(), phase.describe());
            } else {
                println!("{}", "idle".green());
            }
        }
        VmCommandsCli::Delete { names, force } => {
            let (to_delete, refused) = if force {
                (names, Vec::new())
            } else {
                partition_deletions(&names, &protected)
            };
            for name in &refused {
                eprintln!("{} '{}' {}", "Skipping".yellow(), name, "(protected; use --force)".yellow());
            }
            if to_delete.is_empty() {
                process::exit(1);
            }
            vms.delete(&to_delete).await.unwrap_or_else(|e| exit_with(e));
            println!("{} {}", "Deleted".green(), to_delete.join(", "));
        }
    }
}

fn run_check_config() {
    let mut ok = true;
    let users_file = config::get_users_file();
    match CredentialStore::load(&users_file) {
        Ok(store) => println!("{} {} ({} users)", "Credentials:".bold(), users_file.display(), store.len()),
        Err(e) => {
            eprintln!("{}: {}", "Credentials".red(), e);
            ok = false;
        }
    }

    let mut protected: Vec<String> = config::get_protected_hosts().into_iter().collect();
    protected.sort();
    if protected.is_empty() {
        println!("{} {}", "Protected hosts:".bold(), "(none)".dim());
    } else {
        println!("{} {}", "Protected hosts:".bold(), protected.join(", "));
    }

    let scripts = HostScripts::new(config::get_scripts_dir());
    let missing = scripts.missing(config::ALL_SCRIPTS);
    if missing.is_empty() {
        println!("{} {}", "Scripts:".bold(), scripts.dir().display());
    } else {
        eprintln!(
            "{} {}: {}",
            "Missing scripts in".red(),
            scripts.dir().display(),
            missing.join(", ")
        );
        ok = false;
    }

    match config::get_job_status_file() {
        Some(path) => println!("{} status file {}", "Job phase:".bold(), path.display()),
        None => println!("{} process counts", "Job phase:".bold()),
    }

    if ok {
        println!("{}", "Configuration looks valid".green());
    } else {
        process::exit(1);
    }
}

fn exit_with<T>(e: impl std::fmt::Display) -> T {
    eprintln!("{}: {}", "Error".red(), e);
    process::exit(1)
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    config::load_env_file(cli.env_file.as_deref());

    // Serve the web app when no command is given
    match cli.command.unwrap_or(Commands::Serve { host: None, port: None, users_file: None }) {
        Commands::Serve { host, port, users_file } => {
            let state = build_state(&resolve_users_file(users_file));
            let host = host.unwrap_or_else(config::get_host);
            let port = port.unwrap_or_else(config::get_port);
            start_server(state, &host, port).await;
        }
        Commands::CheckConfig => run_check_config(),
        Commands::Users { sub } => run_users(sub),
        Commands::Vms { sub } => run_vms(sub).await,
    }
}
