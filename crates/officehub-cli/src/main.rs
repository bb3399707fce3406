use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use officehub_cli::admin::{AdminInput, create_admin, prepare_admin};
use officehub_cli::seeder;
use officehub_config::DatabaseConfig;
use officehub_db::{MIGRATOR, PgIdentityStore, PgPool, init_db_pool};

#[derive(Parser)]
#[command(name = "officehub-cli")]
#[command(about = "OfficeHub CLI - Administrative tools for OfficeHub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an Admin account
    CreateAdmin {
        /// Full name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed fake managers and employees
    SeedEmployees {
        /// Number of employees
        #[arg(short = 'c', long, default_value = "20")]
        count: usize,

        /// Number of managers
        #[arg(short = 'm', long, default_value = "3")]
        managers: usize,

        /// Password shared by every seeded account
        #[arg(long, default_value = "Welcome123")]
        password: String,
    },
    /// Delete seeded accounts (keeps Admins)
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("\n❌ {err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = DatabaseConfig::from_lookup(&|key: &str| std::env::var(key).ok())?;
    let pool = init_db_pool(&config)
        .await
        .context("Failed to connect to database")?;
    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    match cli.command {
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => handle_create_admin(pool, name, email, password).await,
        Commands::SeedEmployees {
            count,
            managers,
            password,
        } => seeder::seed_employees(&pool, count, managers, &password)
            .await
            .map(|_| ()),
        Commands::ClearSeed => seeder::clear_seeded(&pool).await.map(|_| ()),
    }
}

async fn handle_create_admin(
    pool: PgPool,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::new().with_prompt("Full name").interact_text()?,
    };
    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let request = match prepare_admin(AdminInput {
        name,
        email,
        password,
    }) {
        Ok(request) => request,
        Err(errors) => bail!("Invalid input:\n  {}", errors.join("\n  ")),
    };

    let identities = PgIdentityStore::new(pool);
    let admin = create_admin(&identities, request)
        .await
        .map_err(|e| e.error)?;

    println!("\n✅ Admin created successfully!");
    println!("   Id:    {}", admin.id);
    println!("   Email: {}", admin.email);
    println!("   Name:  {}", admin.name);
    Ok(())
}
