use clap::{ArgAction, Parser, Subcommand};

mod commands;
mod logging;
mod output;

use commands::{account, config, details, movies, reviews, watched};

#[derive(Parser)]
#[command(name = "cinecircle")]
#[command(about = "CineCircle - Descubre películas y comparte reseñas")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog's paginated movie lists
    Movies {
        #[command(subcommand)]
        list: MovieListCommands,
    },
    /// Search movies in the catalog (server-side keyword search)
    Search {
        query: String,

        /// 1-based result page
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one movie: details, trailers and similar titles
    Details { movie_id: u64 },
    /// Read and write movie reviews
    Reviews {
        #[command(subcommand)]
        cmd: ReviewCommands,
    },
    /// Manage your watched-movies list
    Watched {
        #[command(subcommand)]
        cmd: WatchedCommands,
    },
    /// Sign in locally: record the active identity used for reviews and
    /// watched lists
    Login {
        uid: String,

        #[arg(long)]
        email: Option<String>,

        /// Display name shown on reviews
        #[arg(long)]
        name: Option<String>,

        /// Avatar URL
        #[arg(long)]
        photo: Option<String>,
    },
    /// Sign out locally
    Logout,
    /// Show the active identity
    Whoami,
    /// View or change configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum MovieListCommands {
    /// Popular movies
    Popular {
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Reduced projection (id, title, poster, rating)
        #[arg(long, action = ArgAction::SetTrue)]
        lite: bool,
    },
    /// Top rated movies
    TopRated {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, action = ArgAction::SetTrue)]
        lite: bool,
    },
    /// Upcoming releases
    Upcoming {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, action = ArgAction::SetTrue)]
        lite: bool,
    },
    /// Movies currently in theaters
    NowPlaying {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
}

#[derive(Subcommand)]
enum ReviewCommands {
    /// All reviews for one movie, newest first
    List { movie_id: u64 },
    /// The most recent reviews across all movies (capped at 10)
    Recent,
    /// Follow a movie's reviews live; prints a snapshot after every change
    Follow { movie_id: u64 },
    /// Post a review (requires login)
    Add {
        movie_id: u64,

        /// Star rating
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,

        #[arg(long)]
        content: String,
    },
    /// Edit one of your reviews
    Edit {
        review_id: String,

        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,

        #[arg(long)]
        content: String,
    },
    /// Delete one of your reviews
    Delete { review_id: String },
}

#[derive(Subcommand)]
enum WatchedCommands {
    /// Toggle a movie's watched status (requires login)
    Toggle { movie_id: u64 },
    /// List your watched movies
    List,
    /// Check whether a movie is on your watched list
    Check { movie_id: u64 },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks sensitive data)
    Show {
        /// Show full configuration including masked values
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Set TMDB catalog credentials
    Tmdb {
        #[arg(long)]
        api_key: Option<String>,

        #[arg(long)]
        access_token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // The follow mode runs until interrupted; its logs go to the rolling
    // file so the terminal stays free for snapshots
    let log_file = match &cli.command {
        Commands::Reviews {
            cmd: ReviewCommands::Follow { .. },
        } => Some(movie_club_config::PathManager::default().log_file()),
        _ => None,
    };
    logging::init_logging(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Movies { list } => {
            let ctx = commands::AppContext::init()?;
            match list {
                MovieListCommands::Popular { page, lite } => {
                    movies::run_list(&ctx, movies::Listing::Popular, page, lite, &output).await
                }
                MovieListCommands::TopRated { page, lite } => {
                    movies::run_list(&ctx, movies::Listing::TopRated, page, lite, &output).await
                }
                MovieListCommands::Upcoming { page, lite } => {
                    movies::run_list(&ctx, movies::Listing::Upcoming, page, lite, &output).await
                }
                MovieListCommands::NowPlaying { page } => {
                    movies::run_list(&ctx, movies::Listing::NowPlaying, page, false, &output).await
                }
            }
        }
        Commands::Search { query, page } => {
            let ctx = commands::AppContext::init()?;
            movies::run_search(&ctx, &query, page, &output).await
        }
        Commands::Details { movie_id } => {
            let ctx = commands::AppContext::init()?;
            details::run_details(&ctx, movie_id, &output).await
        }
        Commands::Reviews { cmd } => {
            let ctx = commands::AppContext::init()?;
            match cmd {
                ReviewCommands::List { movie_id } => {
                    reviews::run_list(&ctx, movie_id, &output).await
                }
                ReviewCommands::Recent => reviews::run_recent(&ctx, &output).await,
                ReviewCommands::Follow { movie_id } => {
                    reviews::run_follow(&ctx, movie_id, &output).await
                }
                ReviewCommands::Add {
                    movie_id,
                    rating,
                    content,
                } => reviews::run_add(&ctx, movie_id, rating, &content, &output).await,
                ReviewCommands::Edit {
                    review_id,
                    rating,
                    content,
                } => reviews::run_edit(&ctx, &review_id, rating, &content, &output).await,
                ReviewCommands::Delete { review_id } => {
                    reviews::run_delete(&ctx, &review_id, &output).await
                }
            }
        }
        Commands::Watched { cmd } => {
            let ctx = commands::AppContext::init()?;
            match cmd {
                WatchedCommands::Toggle { movie_id } => {
                    watched::run_toggle(&ctx, movie_id, &output).await
                }
                WatchedCommands::List => watched::run_list(&ctx, &output).await,
                WatchedCommands::Check { movie_id } => {
                    watched::run_check(&ctx, movie_id, &output).await
                }
            }
        }
        Commands::Login {
            uid,
            email,
            name,
            photo,
        } => {
            let ctx = commands::AppContext::init()?;
            account::run_login(&ctx, &uid, email, name, photo, &output).await
        }
        Commands::Logout => {
            let ctx = commands::AppContext::init()?;
            account::run_logout(&ctx, &output)
        }
        Commands::Whoami => {
            let ctx = commands::AppContext::init()?;
            account::run_whoami(&ctx, &output).await
        }
        Commands::Config { cmd } => match cmd {
            ConfigCommands::Show { full } => config::run_show(full, &output),
            ConfigCommands::Tmdb {
                api_key,
                access_token,
            } => config::run_tmdb(api_key, access_token, &output),
        },
    }
}
