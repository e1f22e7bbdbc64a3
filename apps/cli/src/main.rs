//! ZTLog admin - terminal client for the ZTLog blog admin API.

mod commands;
mod output;
mod terminal;

use clap::{Args, Parser, Subcommand};
use commands::{AppContext, PostInput};
use std::path::PathBuf;
use tracing::debug;
use ztlog_config::{init_logging, Config, Paths};

/// ZTLog admin - manage posts, tags and your account from the terminal.
#[derive(Parser)]
#[command(name = "ztlog")]
#[command(about = "ZTLog blog admin client")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text", global = true)]
    format: output::OutputFormat,

    /// Log level (trace, debug, info, warn, error); defaults to the config file value
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also write JSONL logs under ~/.ztlog/logs
    #[arg(long, global = true)]
    log_file: bool,

    /// Backend API base URL
    #[arg(long, global = true, env = "ZTLOG_API_BASE_URL")]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Login with user ID and password
    Login {
        /// User ID (prompted when omitted)
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Logout and clear the stored credential
    Logout,

    /// Check authentication status
    Status,

    /// Create an account
    Signup {
        /// Username (prompted when omitted)
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Show counters, recent posts and tags
    Dashboard,

    /// Manage posts
    Posts {
        #[command(subcommand)]
        command: PostCommands,
    },

    /// Manage tags
    Tags {
        #[command(subcommand)]
        command: TagCommands,
    },

    /// Manage your account
    Account {
        #[command(subcommand)]
        command: AccountCommands,
    },
}

#[derive(Args, Debug, Default)]
struct PostArgs {
    /// Post title
    #[arg(short, long)]
    title: Option<String>,
    /// Post body markup
    #[arg(short, long, conflicts_with = "body_file")]
    body: Option<String>,
    /// Read the body from a file
    #[arg(long)]
    body_file: Option<PathBuf>,
    /// Tag IDs (comma separated); replaces the current selection
    #[arg(long, value_delimiter = ',')]
    tags: Option<Vec<i64>>,
}

impl From<PostArgs> for PostInput {
    fn from(args: PostArgs) -> Self {
        Self {
            title: args.title,
            body: args.body,
            body_file: args.body_file,
            tags: args.tags,
        }
    }
}

#[derive(Subcommand)]
enum PostCommands {
    /// List posts
    List {
        /// Page number
        #[arg(short, long, default_value = "1")]
        page: u32,
        /// Filter the page by title
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show post details
    Show {
        /// Post ID
        id: i64,
    },
    /// Create a post
    Create {
        #[command(flatten)]
        post: PostArgs,
    },
    /// Edit a post
    Edit {
        /// Post ID
        id: i64,
        #[command(flatten)]
        post: PostArgs,
    },
    /// Delete a post
    Delete {
        /// Post ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum TagCommands {
    /// List tags
    List {
        /// Page number
        #[arg(short, long, default_value = "1")]
        page: u32,
    },
    /// Add a tag
    Add {
        /// Tag name (at most 15 characters)
        name: String,
    },
    /// Rename a tag
    Rename {
        /// Tag ID
        id: i64,
        /// New name
        name: String,
    },
    /// Delete a tag
    Delete {
        /// Tag ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum AccountCommands {
    /// Change your password
    Password,
    /// Delete your account
    Withdraw {
        /// Confirmation phrase (prompted when omitted)
        #[arg(long)]
        confirm: Option<String>,
    },
}

fn load_config(cli: &Cli, paths: &Paths) -> anyhow::Result<Config> {
    let mut config = Config::load(paths)?;
    if let Some(url) = &cli.api_url {
        config.api_base_url = url.trim().to_string();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    config.validate()?;
    Ok(config)
}

async fn run(command: Commands, ctx: &AppContext) -> anyhow::Result<()> {
    match command {
        Commands::Login { user } => commands::login(ctx, user).await,
        Commands::Logout => commands::logout(ctx).await,
        Commands::Status => commands::status(ctx).await,
        Commands::Signup { user } => commands::signup(ctx, user).await,
        Commands::Dashboard => commands::dashboard(ctx).await,
        Commands::Posts { command } => match command {
            PostCommands::List { page, search } => commands::posts_list(ctx, page, search).await,
            PostCommands::Show { id } => commands::posts_show(ctx, id).await,
            PostCommands::Create { post } => commands::posts_create(ctx, post.into()).await,
            PostCommands::Edit { id, post } => commands::posts_edit(ctx, id, post.into()).await,
            PostCommands::Delete { id, yes } => commands::posts_delete(ctx, id, yes).await,
        },
        Commands::Tags { command } => match command {
            TagCommands::List { page } => commands::tags_list(ctx, page).await,
            TagCommands::Add { name } => commands::tags_add(ctx, &name).await,
            TagCommands::Rename { id, name } => commands::tags_rename(ctx, id, &name).await,
            TagCommands::Delete { id, yes } => commands::tags_delete(ctx, id, yes).await,
        },
        Commands::Account { command } => match command {
            AccountCommands::Password => commands::account_password(ctx).await,
            AccountCommands::Withdraw { confirm } => {
                commands::account_withdraw(ctx, confirm).await
            }
        },
    }
}

/// Commands that end the session on purpose.
fn ends_session(command: &Commands) -> bool {
    matches!(
        command,
        Commands::Logout
            | Commands::Account {
                command: AccountCommands::Withdraw { .. }
            }
    )
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let paths = match Paths::new() {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let config = match load_config(&cli, &paths) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.log_level, cli.log_file);
    debug!(api = %config.api_base_url, "Configuration loaded");

    let format = cli.format;
    let ctx = match AppContext::open(&paths, config, format) {
        Ok(ctx) => ctx,
        Err(e) => {
            output::print_error(&format!("{:#}", e), &format);
            std::process::exit(1);
        }
    };

    let command = cli.command.unwrap_or(Commands::Status);
    let expected_logout = ends_session(&command);
    let was_logged_in = ctx.services.session.is_authenticated();
    let result = run(command, &ctx).await;

    if was_logged_in && !expected_logout && ctx.navigator.sent_to_login() {
        eprintln!("Session expired. Run 'ztlog login' to sign in again.");
    }

    if let Err(e) = result {
        output::print_error(&format!("{:#}", e), &format);
        std::process::exit(1);
    }
}
