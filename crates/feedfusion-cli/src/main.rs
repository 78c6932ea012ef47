use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use feedfusion_core::post::Platform;

mod commands;
mod context;

#[derive(Parser)]
#[command(name = "feedfusion")]
#[command(about = "FeedFusion client - aggregated feeds, bookmarks, and interests", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and persist the session token
    Login {
        /// Account name
        username: String,
        /// Account password
        #[arg(long)]
        password: String,
    },
    /// Register a new account
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Password confirmation; must match --password
        #[arg(long)]
        confirm: String,
    },
    /// Sign out and remove the persisted token
    Logout,
    /// Show the current session state
    Status,
    /// Fetch the aggregated feed
    Feed {
        /// Filter by source platform (reddit or youtube)
        #[arg(long)]
        platform: Option<Platform>,
        /// Filter by keyword
        #[arg(long)]
        keyword: Option<String>,
        /// Filter by interest tags (comma-separated)
        #[arg(long, value_delimiter = ',')]
        interests: Vec<String>,
        /// Use the saved interest selection instead
        #[arg(long, conflicts_with = "interests")]
        personalized: bool,
    },
    /// Inspect bookmarks
    Bookmarks {
        #[command(subcommand)]
        action: BookmarksAction,
    },
    /// Add or remove a bookmark
    Bookmark {
        #[command(subcommand)]
        action: BookmarkAction,
    },
    /// Show or change the interest selection
    Interests {
        #[command(subcommand)]
        action: InterestsAction,
    },
}

#[derive(Subcommand)]
enum BookmarksAction {
    /// List the full bookmarked posts
    List,
    /// List only the bookmarked post ids
    Ids,
}

#[derive(Subcommand)]
enum BookmarkAction {
    /// Bookmark a post
    Add { post_id: String },
    /// Remove a bookmark
    Remove { post_id: String },
}

#[derive(Subcommand)]
enum InterestsAction {
    /// Print the saved interest tags
    Show,
    /// Replace the saved interest tags
    Set {
        #[arg(value_delimiter = ',')]
        tags: Vec<String>,
    },
    /// Add the tag if absent, remove it if present
    Toggle { tag: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let ctx = context::build().await?;

    match cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(&ctx, username, password).await?
        }
        Commands::Signup {
            username,
            email,
            password,
            confirm,
        } => commands::auth::signup(&ctx, username, email, password, confirm).await?,
        Commands::Logout => commands::auth::logout(&ctx).await,
        Commands::Status => commands::auth::status(&ctx).await,
        Commands::Feed {
            platform,
            keyword,
            interests,
            personalized,
        } => commands::feed::show(&ctx, platform, keyword, interests, personalized).await?,
        Commands::Bookmarks { action } => match action {
            BookmarksAction::List => commands::bookmarks::list(&ctx).await?,
            BookmarksAction::Ids => commands::bookmarks::ids(&ctx).await,
        },
        Commands::Bookmark { action } => match action {
            BookmarkAction::Add { post_id } => commands::bookmarks::add(&ctx, &post_id).await?,
            BookmarkAction::Remove { post_id } => {
                commands::bookmarks::remove(&ctx, &post_id).await?
            }
        },
        Commands::Interests { action } => match action {
            InterestsAction::Show => commands::interests::show(&ctx).await,
            InterestsAction::Set { tags } => commands::interests::set(&ctx, tags).await?,
            InterestsAction::Toggle { tag } => commands::interests::toggle(&ctx, &tag).await?,
        },
    }

    Ok(())
}
