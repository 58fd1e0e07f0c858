//! Renova CLI
//!
//! Command-line front end for the showroom data layer

use clap::{Parser, Subcommand};

mod commands;

use commands::GlobalArgs;

#[derive(Debug, Parser)]
#[command(name = "renova")]
#[command(about = "Renova Auto - showroom catalog, leads and admin data", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Public catalog with brand filter and search
    Catalog(commands::catalog::CatalogArgs),
    /// Car inventory
    Cars(commands::cars::CarsArgs),
    /// News posts
    News(commands::news::NewsArgs),
    /// Contact inquiries, test-drive bookings and the admin inbox
    Inbox(commands::inbox::InboxArgs),
    /// Customer testimonials
    Testimonials(commands::testimonials::TestimonialsArgs),
    /// About page content
    About(commands::about::AboutArgs),
    /// Image upload and resolution
    Images(commands::images::ImagesArgs),
    /// Sign up, sign in and session state
    Account(commands::account::AccountArgs),
    /// Admin dashboard statistics
    Dashboard,
    /// Registered users (admin)
    Users,
    /// Local data utilities: export, import, clear, reset
    Data(commands::data::DataArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match commands::Context::open(&cli.global).await {
        Ok(ctx) => match cli.command {
            Commands::Catalog(args) => commands::catalog::execute(&ctx, args).await,
            Commands::Cars(args) => commands::cars::execute(&ctx, args).await,
            Commands::News(args) => commands::news::execute(&ctx, args).await,
            Commands::Inbox(args) => commands::inbox::execute(&ctx, args).await,
            Commands::Testimonials(args) => commands::testimonials::execute(&ctx, args).await,
            Commands::About(args) => commands::about::execute(&ctx, args).await,
            Commands::Images(args) => commands::images::execute(&ctx, args).await,
            Commands::Account(args) => commands::account::execute(&ctx, args).await,
            Commands::Dashboard => commands::admin::dashboard(&ctx).await,
            Commands::Users => commands::admin::users(&ctx).await,
            Commands::Data(args) => commands::data::execute(&ctx, args),
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
