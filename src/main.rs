use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use zapdash::{
    cli, config,
    types::{TargetMonth, parse_target_month},
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in against the charging vendor and store the access token
    Login(LoginOptions),

    /// Forget the stored access token
    Logout,

    /// Show session state and configuration
    Status,

    /// Pull charging history into the backend
    Sync(SyncOptions),

    /// Generate the monthly invoice PDFs
    Generate(GenerateOptions),

    /// List generated invoices
    Invoices(InvoicesOptions),

    #[clap(about = "Legacy single-step data pull (deprecated, use sync + generate)")]
    Refresh,

    /// Serve the dashboard page locally
    Serve(ServeOptions),

    /// Hosted backend-as-a-service helpers
    Baas(BaasOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct LoginOptions {
    /// Vendor account name
    #[clap(long, short, env = "ZAPDASH_USERNAME")]
    pub username: String,

    /// Vendor password; read from stdin when omitted
    #[clap(long, env = "ZAPDASH_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct SyncOptions {
    /// Days of charging history to pull (default: ZAPDASH_HISTORY_DAYS or 30)
    #[clap(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub history_days: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateOptions {
    /// Billing month (YYYY-MM), defaults to the last completed month
    #[clap(long, value_parser = parse_target_month)]
    pub month: Option<TargetMonth>,
}

#[derive(Parser, Debug, Clone)]
pub struct InvoicesOptions {
    /// Open the PDF of the invoice with this id in the browser
    #[clap(long)]
    pub open: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to bind (default: SERVER_ADDRESS or 127.0.0.1:5173)
    #[clap(long)]
    pub addr: Option<String>,

    /// Open the dashboard in the default browser
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct BaasOptions {
    #[command(subcommand)]
    pub command: BaasSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum BaasSubcommand {
    /// Register a user
    SignUp(BaasCredentials),

    /// Read rows from a table
    Select(BaasSelectOpts),

    /// Insert rows (JSON object or array) into a table
    Insert(BaasInsertOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct BaasCredentials {
    #[clap(long)]
    pub email: String,
    #[clap(long)]
    pub password: String,
}

#[derive(Parser, Debug, Clone)]
pub struct BaasSelectOpts {
    #[clap(long)]
    pub table: String,

    /// Columns for the `select` query parameter
    #[clap(long, default_value = "*")]
    pub columns: String,

    /// Sign in with this email for the duration of the command
    #[clap(long, requires = "password")]
    pub email: Option<String>,

    #[clap(long, requires = "email")]
    pub password: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct BaasInsertOpts {
    #[clap(long)]
    pub table: String,

    /// Rows as JSON
    #[clap(long)]
    pub rows: String,

    /// Sign in with this email for the duration of the command
    #[clap(long, requires = "password")]
    pub email: Option<String>,

    #[clap(long, requires = "email")]
    pub password: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn credentials(email: Option<String>, password: Option<String>) -> cli::Credentials {
    email.zip(password)
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Login(opt) => cli::login(opt.username, opt.password).await,
        Command::Logout => cli::logout().await,
        Command::Status => cli::status().await,
        Command::Sync(opt) => cli::sync(opt.history_days).await,
        Command::Generate(opt) => cli::generate(opt.month).await,
        Command::Invoices(opt) => cli::invoices(opt.open).await,
        Command::Refresh => cli::refresh().await,
        Command::Serve(opt) => cli::serve(opt.addr, opt.open).await,
        Command::Baas(opt) => match opt.command {
            BaasSubcommand::SignUp(c) => cli::baas_sign_up(c.email, c.password).await,
            BaasSubcommand::Select(s) => {
                cli::baas_select(s.table, s.columns, credentials(s.email, s.password)).await
            }
            BaasSubcommand::Insert(i) => {
                cli::baas_insert(i.table, i.rows, credentials(i.email, i.password)).await
            }
        },
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
