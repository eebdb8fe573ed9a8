use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Reviewer accounts
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Debug, Subcommand)]
enum UserCommands {
    /// Create an account and print its API token
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        superuser: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    get_command(cli)?.call()
}

fn get_command(cli: Cli) -> Result<Box<dyn movie_review::console::commands::CallableTrait>, String> {
    match cli.command {
        Commands::User { command } => match command {
            UserCommands::Create {
                username,
                email,
                superuser,
            } => Ok(Box::new(
                movie_review::console::commands::user::CreateCommand::new(username, email, superuser),
            )),
        },
    }
}
