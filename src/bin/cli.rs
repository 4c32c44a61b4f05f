use clap::{Args, Parser, Subcommand};
use qmta_portal::{
    cli::{
        account,
        db::{db_generate, db_list, db_migrate, db_revert},
        onboarding,
    },
    core::db::init_pool,
    settings::get_config,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database related command
    Db(DbArgs),
    /// Account related command
    Account(AccountArgs),
    /// Onboarding related command
    Onboarding(OnboardingArgs),
}

#[derive(Debug, Args)]
struct AccountArgs {
    #[command(subcommand)]
    command: AccountCommands,
}

#[derive(Debug, Subcommand)]
enum AccountCommands {
    /// Create new account with a blank onboarding profile
    Create {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
}

#[derive(Debug, Args)]
struct OnboardingArgs {
    #[command(subcommand)]
    command: OnboardingCommands,
}

#[derive(Debug, Subcommand)]
enum OnboardingCommands {
    /// Send an account back to account type selection
    Reset {
        #[arg(short, long)]
        email: String,
    },
}

#[derive(Debug, Args)]
struct DbArgs {
    #[command(subcommand)]
    command: DbCommands,
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Generate new migration file
    Generate { migration_name: String },
    /// List all migration
    List,
    /// Run all pending migration
    Migrate,
    /// Revert latest migration
    Revert,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Db(db_args) => match &db_args.command {
            DbCommands::Generate { migration_name } => {
                println!("generate migration: {migration_name:?}");
                db_generate(migration_name).await?;
            }
            DbCommands::List => {
                println!("list migration");
                let config = get_config()?;
                db_list(&config).await?;
            }
            DbCommands::Migrate => {
                println!("run all pending migration");
                let config = get_config()?;
                println!("run migration on {}", config.database_url);
                db_migrate(&config).await?;
            }
            DbCommands::Revert => {
                println!("revert latest migration");
                let config = get_config()?;
                println!("{}", config.database_url);
                db_revert(&config).await?;
            }
        },
        Commands::Account(account_args) => match &account_args.command {
            AccountCommands::Create {
                email,
                username,
                password,
            } => {
                println!("create account: {email:?}");
                let config = get_config()?;
                let pool = init_pool(&config).await?;
                let created = account::create(&pool, email, username, password).await?;
                println!("account created with id {}", created.id);
            }
        },
        Commands::Onboarding(onboarding_args) => match &onboarding_args.command {
            OnboardingCommands::Reset { email } => {
                println!("reset onboarding: {email:?}");
                let config = get_config()?;
                let pool = init_pool(&config).await?;
                onboarding::reset(&pool, email).await?;
            }
        },
    }
    Ok(())
}
