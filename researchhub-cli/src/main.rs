//! `ResearchHub` CLI (`researchhub`)
//!
//! Signs in against a `ResearchHub` backend and exposes every screen of the
//! web client as a subcommand. The credential is kept between runs under the
//! data directory.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use researchhub_core::models::{EquipmentStatus, ExperimentStatus, ProjectStatus};
use researchhub_core::{Role, DEFAULT_BASE_URL};
use tracing_subscriber::EnvFilter;

mod commands;
mod context;
mod output;

use context::Context;

#[derive(Parser)]
#[command(name = "researchhub")]
#[command(author, version, about = "ResearchHub CLI - research management from the terminal", long_about = None)]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "RESEARCHHUB_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Directory holding the stored credential (defaults to the platform data dir)
    #[arg(long, global = true, env = "RESEARCHHUB_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "RESEARCHHUB_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    // ─────────────────────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────────────────────
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "RESEARCHHUB_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and sign in with it
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "RESEARCHHUB_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, default_value = "user")]
        role: Role,
    },

    /// Forget the stored credential
    Logout,

    /// Show the signed-in account
    Whoami,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Resolve a client path the way the web client would
    Open { path: String },

    /// List the screens available to the signed-in account
    Menu,

    /// Show the dashboard of the signed-in account
    Home,

    // ─────────────────────────────────────────────────────────────────────────
    // Screens
    // ─────────────────────────────────────────────────────────────────────────
    /// Search and save published papers
    Papers {
        #[command(subcommand)]
        action: PapersAction,
    },

    /// Manage projects
    Projects {
        #[command(subcommand)]
        action: ProjectsAction,
    },

    /// Manage experiments
    Experiments {
        #[command(subcommand)]
        action: ExperimentsAction,
    },

    /// Manage laboratory equipment
    Equipment {
        #[command(subcommand)]
        action: EquipmentAction,
    },

    /// Manage equipment reservations
    Reservations {
        #[command(subcommand)]
        action: ReservationsAction,
    },

    /// Manage accounts
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Subcommand enums
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum PapersAction {
    /// Search papers by title and research field
    Search {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Save a paper
    Save { project_id: u64 },
    /// Remove a saved paper
    Unsave { project_id: u64 },
    /// List saved papers
    Saved,
}

#[derive(clap::Args)]
struct ProjectFields {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    #[arg(long, default_value = "pending")]
    status: ProjectStatus,
    /// YYYY-MM-DD
    #[arg(long)]
    start_date: String,
    /// YYYY-MM-DD
    #[arg(long)]
    end_date: Option<String>,
}

#[derive(Subcommand)]
enum ProjectsAction {
    /// List projects
    List,
    /// Create a project
    Create {
        #[command(flatten)]
        fields: ProjectFields,
    },
    /// Replace a project's fields
    Update {
        id: u64,
        #[command(flatten)]
        fields: ProjectFields,
    },
    /// Delete a project
    Delete { id: u64 },
    /// List the experiments of a project
    Experiments { id: u64 },
}

#[derive(Subcommand)]
enum ExperimentsAction {
    /// List experiments
    List,
    /// Record an experiment
    Create {
        #[arg(long)]
        project_id: u64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        protocol: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date_performed: String,
        #[arg(long, default_value = "in_progress")]
        status: ExperimentStatus,
    },
}

#[derive(clap::Args)]
struct EquipmentFields {
    #[arg(long)]
    name: String,
    #[arg(long)]
    model_number: String,
    #[arg(long, default_value = "available")]
    status: EquipmentStatus,
    #[arg(long)]
    manufacturer: String,
    #[arg(long)]
    location: String,
}

#[derive(Subcommand)]
enum EquipmentAction {
    /// List equipment
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Add equipment
    Create {
        #[command(flatten)]
        fields: EquipmentFields,
    },
    /// Replace an equipment's fields
    Update {
        id: u64,
        #[command(flatten)]
        fields: EquipmentFields,
    },
    /// Remove equipment
    Delete { id: u64 },
}

#[derive(Subcommand)]
enum ReservationsAction {
    /// List reservations
    List,
    /// Reserve equipment for a project
    Create {
        #[arg(long)]
        equipment_id: u64,
        #[arg(long)]
        project_id: u64,
        /// YYYY-MM-DD HH:MM
        #[arg(long)]
        start_time: String,
        /// YYYY-MM-DD HH:MM
        #[arg(long)]
        end_time: String,
        #[arg(long)]
        purpose: String,
    },
    /// Cancel a reservation
    Delete { id: u64 },
}

#[derive(Subcommand)]
enum UsersAction {
    /// List accounts
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Create an account
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "RESEARCHHUB_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, default_value = "user")]
        role: Role,
    },
    /// Delete an account
    Delete { id: u64 },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            output::print_error(&report);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> eyre::Result<()> {
    let ctx = Context::open(&cli.base_url, cli.data_dir, cli.timeout_secs)?;

    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&ctx, &email, &password).await,
        Commands::Register {
            name,
            email,
            password,
            role,
        } => commands::auth::register(&ctx, name, email, password, role).await,
        Commands::Logout => {
            commands::auth::logout(&ctx);
            Ok(())
        }
        Commands::Whoami => {
            commands::auth::whoami(&ctx).await;
            Ok(())
        }
        Commands::Open { path } => commands::navigation::open(&ctx, &path).await,
        Commands::Menu => commands::navigation::menu(&ctx).await,
        Commands::Home => commands::navigation::home(&ctx).await,
        Commands::Papers { action } => match action {
            PapersAction::Search {
                title,
                category,
                page,
            } => commands::papers::search(&ctx, title, category, page).await,
            PapersAction::Save { project_id } => commands::papers::save(&ctx, project_id).await,
            PapersAction::Unsave { project_id } => commands::papers::unsave(&ctx, project_id).await,
            PapersAction::Saved => commands::papers::saved(&ctx).await,
        },
        Commands::Projects { action } => match action {
            ProjectsAction::List => commands::projects::list(&ctx).await,
            ProjectsAction::Create { fields } => commands::projects::create(&ctx, fields.into()).await,
            ProjectsAction::Update { id, fields } => {
                commands::projects::update(&ctx, id, fields.into()).await
            }
            ProjectsAction::Delete { id } => commands::projects::delete(&ctx, id).await,
            ProjectsAction::Experiments { id } => commands::projects::experiments(&ctx, id).await,
        },
        Commands::Experiments { action } => match action {
            ExperimentsAction::List => commands::experiments::list(&ctx).await,
            ExperimentsAction::Create {
                project_id,
                name,
                protocol,
                date_performed,
                status,
            } => {
                let input = researchhub_core::models::ExperimentInput {
                    name,
                    protocol,
                    date_performed,
                    status,
                    project_id,
                };
                commands::experiments::create(&ctx, input).await
            }
        },
        Commands::Equipment { action } => match action {
            EquipmentAction::List { page } => commands::equipment::list(&ctx, page).await,
            EquipmentAction::Create { fields } => commands::equipment::create(&ctx, fields.into()).await,
            EquipmentAction::Update { id, fields } => {
                commands::equipment::update(&ctx, id, fields.into()).await
            }
            EquipmentAction::Delete { id } => commands::equipment::delete(&ctx, id).await,
        },
        Commands::Reservations { action } => match action {
            ReservationsAction::List => commands::reservations::list(&ctx).await,
            ReservationsAction::Create {
                equipment_id,
                project_id,
                start_time,
                end_time,
                purpose,
            } => {
                let input = researchhub_core::models::ReservationInput {
                    equipment_id,
                    project_id,
                    start_time,
                    end_time,
                    purpose,
                };
                commands::reservations::create(&ctx, input).await
            }
            ReservationsAction::Delete { id } => commands::reservations::delete(&ctx, id).await,
        },
        Commands::Users { action } => match action {
            UsersAction::List { page } => commands::users::list(&ctx, page).await,
            UsersAction::Create {
                name,
                email,
                password,
                role,
            } => commands::users::create(&ctx, name, email, password, role).await,
            UsersAction::Delete { id } => commands::users::delete(&ctx, id).await,
        },
    }
}

impl From<ProjectFields> for researchhub_core::models::ProjectInput {
    fn from(fields: ProjectFields) -> Self {
        Self {
            title: fields.title,
            description: fields.description,
            status: fields.status,
            start_date: fields.start_date,
            end_date: fields.end_date,
        }
    }
}

impl From<EquipmentFields> for researchhub_core::models::EquipmentInput {
    fn from(fields: EquipmentFields) -> Self {
        Self {
            name: fields.name,
            model_number: fields.model_number,
            status: fields.status,
            manufacturer: fields.manufacturer,
            location: fields.location,
        }
    }
}
