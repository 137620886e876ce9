use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Select};
use journal_cli::accounts;
use journal_cli::seeder::{self, SeedConfig};
use journal_core::Role;
use journal_db::{DbPool, init_db_pool};
use journal_models::NewUser;

#[derive(Parser)]
#[command(name = "journal-cli")]
#[command(about = "Journal CLI - Administrative tools for the journal database", long_about = None)]
struct Cli {
    /// SQLite database path or `sqlite:` URL
    #[arg(long, env = "STORAGE_PATH", global = true, default_value = "journal.db")]
    storage_path: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,
    /// Create a user (missing fields are prompted for)
    CreateUser {
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        #[arg(short = 'f', long)]
        first_name: Option<String>,

        #[arg(short = 'p', long)]
        patronymic: Option<String>,

        #[arg(short = 'e', long)]
        email: Option<String>,

        /// admin, teacher or student
        #[arg(short = 'r', long)]
        role: Option<Role>,
    },
    /// Create a discipline
    CreateDiscipline {
        #[arg(short = 'n', long)]
        name: Option<String>,
    },
    /// Mint a bearer token for an email
    IssueToken {
        #[arg(short = 'e', long)]
        email: String,

        /// Token lifetime in seconds
        #[arg(long, default_value = "86400")]
        ttl_secs: u64,

        /// Signing secret
        #[arg(long, env = "SECRET", hide_env_values = true)]
        secret: String,
    },
    /// Seed the database with fake users, disciplines and courses
    Seed {
        #[arg(long, default_value = "10")]
        teachers: usize,

        #[arg(long, default_value = "100")]
        students: usize,

        #[arg(long, default_value = "12")]
        disciplines: usize,

        #[arg(long, default_value = "5")]
        courses: usize,

        /// Subjects (discipline + teacher) per course
        #[arg(long, default_value = "4")]
        subjects: usize,

        /// Students enrolled per course
        #[arg(long, default_value = "25")]
        enrolled: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::IssueToken {
            email,
            ttl_secs,
            secret,
        } => {
            let token =
                journal_auth::create_token(&email, Duration::from_secs(ttl_secs), &secret)
                    .map_err(|err| anyhow::anyhow!("failed to mint token: {}", err))?;
            println!("{}", token);
        }
        Commands::Migrate => {
            let pool = open_pool(&cli.storage_path).await?;
            sqlx::migrate!("../../migrations").run(&pool).await?;
            println!("✅ Migrations applied");
        }
        Commands::CreateUser {
            last_name,
            first_name,
            patronymic,
            email,
            role,
        } => {
            let user = NewUser {
                last_name: prompt_missing(last_name, "Last name")?,
                first_name: prompt_missing(first_name, "First name")?,
                patronymic: patronymic.filter(|p| !p.is_empty()),
                email: prompt_missing(email, "Email address")?,
                role: match role {
                    Some(role) => role,
                    None => prompt_role()?,
                },
            };

            let pool = open_pool(&cli.storage_path).await?;
            let id = accounts::create_user(&pool, &user).await?;
            println!("\n✅ User created");
            println!("   Id: {}", id);
            println!("   Email: {}", user.email);
            println!("   Role: {}", user.role);
        }
        Commands::CreateDiscipline { name } => {
            let name = prompt_missing(name, "Discipline name")?;
            let pool = open_pool(&cli.storage_path).await?;
            let id = accounts::create_discipline(&pool, &name).await?;
            println!("✅ Discipline `{}` created with id {}", name, id);
        }
        Commands::Seed {
            teachers,
            students,
            disciplines,
            courses,
            subjects,
            enrolled,
        } => {
            let config = SeedConfig {
                teachers,
                students,
                disciplines,
                courses,
                subjects_per_course: subjects,
                students_per_course: enrolled,
            };
            let pool = open_pool(&cli.storage_path).await?;
            seeder::seed_all(&pool, config).await?;
        }
    }

    Ok(())
}

async fn open_pool(storage_path: &str) -> anyhow::Result<DbPool> {
    init_db_pool(storage_path, Duration::from_secs(60))
        .await
        .with_context(|| format!("failed to open {}", storage_path))
}

fn prompt_missing(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Input::new()
            .with_prompt(prompt)
            .interact_text()
            .with_context(|| format!("failed to read {}", prompt.to_lowercase())),
    }
}

fn prompt_role() -> anyhow::Result<Role> {
    let labels: Vec<&str> = Role::ALL.iter().map(|role| role.as_str()).collect();
    let selection = Select::new()
        .with_prompt("Role")
        .items(&labels)
        .default(2)
        .interact()
        .context("failed to read role")?;

    Ok(Role::ALL[selection])
}
