use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use schoolhub_cli::admin::{NewAdmin, create_admin};
use schoolhub_cli::seeder::{self, SeedConfig};
use schoolhub_config::DatabaseConfig;
use schoolhub_db::{PgPool, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "schoolhub-cli")]
#[command(about = "SchoolHub CLI - Administrative tools for SchoolHub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account
    CreateAdmin {
        #[arg(short = 'u', long)]
        username: Option<String>,

        #[arg(short = 'e', long)]
        email: Option<String>,

        #[arg(short = 'f', long)]
        first_name: Option<String>,

        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Apply pending database migrations
    Migrate,
    /// Seed the database with fake teachers and students
    Seed {
        /// Number of teachers to create
        #[arg(short = 't', long, default_value = "10")]
        teachers: usize,

        /// Number of students assigned to each teacher
        #[arg(short = 's', long, default_value = "15")]
        students_per_teacher: usize,

        /// Number of students without a teacher
        #[arg(long, default_value = "5")]
        unassigned: usize,
    },
    /// Delete seeded teachers and students
    ClearSeed,
}

fn prompt(label: &str, value: Option<String>) -> Result<String, dialoguer::Error> {
    match value {
        Some(value) => Ok(value),
        None => Input::new().with_prompt(label).interact_text(),
    }
}

fn prompt_optional(label: &str, value: Option<String>) -> Result<String, dialoguer::Error> {
    match value {
        Some(value) => Ok(value),
        None => Input::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text(),
    }
}

async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env()?;
    Ok(init_db_pool(&config).await?)
}

async fn handle_create_admin(
    pool: &PgPool,
    username: Option<String>,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    password: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let admin = NewAdmin {
        username: prompt("Username", username)?,
        email: prompt("Email address", email)?,
        first_name: prompt_optional("First name", first_name)?,
        last_name: prompt_optional("Last name", last_name)?,
        password: match password {
            Some(password) => password,
            None => Password::new()
                .with_prompt("Password")
                .with_confirmation("Confirm password", "Passwords don't match")
                .interact()?,
        },
    };

    let user = create_admin(pool, &admin).await?;
    println!("\n✅ Admin created successfully!");
    println!("   Username: {}", user.username);
    println!("   Email: {}", user.email);
    Ok(())
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect().await?;

    match cli.command {
        Commands::CreateAdmin {
            username,
            email,
            first_name,
            last_name,
            password,
        } => handle_create_admin(&pool, username, email, first_name, last_name, password).await,
        Commands::Migrate => {
            run_migrations(&pool).await?;
            println!("✅ Migrations applied");
            Ok(())
        }
        Commands::Seed {
            teachers,
            students_per_teacher,
            unassigned,
        } => {
            let config = SeedConfig::new(teachers)
                .with_students_per_teacher(students_per_teacher)
                .with_unassigned_students(unassigned);
            seeder::seed_all(&pool, &config).await
        }
        Commands::ClearSeed => {
            let (teachers, students) = seeder::clear_all(&pool).await?;
            println!(
                "✅ Deleted {} seeded teachers and {} seeded students",
                teachers, students
            );
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("\n❌ {}", e);
        std::process::exit(1);
    }
}
