//! About page commands

use std::path::PathBuf;

use clap::{Args, Subcommand};
use renova_core::AboutData;

use super::{read_json, Context};

#[derive(Debug, Args)]
pub struct AboutArgs {
    #[command(subcommand)]
    pub command: AboutCommand,
}

#[derive(Debug, Subcommand)]
pub enum AboutCommand {
    /// Print the about page content
    Show,
    /// Replace the about page content from a JSON file (admin)
    Set { file: PathBuf },
}

pub async fn execute(ctx: &Context, args: AboutArgs) -> anyhow::Result<()> {
    match args.command {
        AboutCommand::Show => {
            let about = ctx.showroom.about().await?;
            if ctx.json {
                return ctx.print_json(&about);
            }
            println!("{}", about.description);
            println!();
            println!("Mission: {}", about.mission);
            for image in &about.gallery {
                println!("  {}", image);
            }
            Ok(())
        }
        AboutCommand::Set { file } => {
            let about: AboutData = read_json(&file)?;
            ctx.showroom.update_about(about).await?;
            println!("About page updated");
            Ok(())
        }
    }
}
