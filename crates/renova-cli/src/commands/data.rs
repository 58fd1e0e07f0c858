//! Local data utilities
//!
//! Usage: renova data <export|import|clear|reset|status|images|delete-image>
//!
//! Only available on the local backend.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Subcommand};
use renova_store::seed::backup::RestoreReport;
use renova_core::ImageToken;
use renova_store::LocalSnapshot;

use super::{read_json, Context};

#[derive(Debug, Args)]
pub struct DataArgs {
    #[command(subcommand)]
    pub command: DataCommand,
}

#[derive(Debug, Subcommand)]
pub enum DataCommand {
    /// Write every collection as one JSON document
    Export {
        /// Output file (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Restore the collections present in a JSON export
    Import { file: PathBuf },
    /// Empty every collection without reseeding
    Clear,
    /// Wipe everything and restore the default dataset
    Reset,
    /// Collections that already received their one-time seed
    Status,
    /// Uploaded images held in the database
    Images,
    /// Remove an uploaded image
    DeleteImage { token: String },
}

fn print_report(report: &RestoreReport) {
    for (collection, count) in report {
        println!("  {:<14}{}", collection, count);
    }
}

pub fn execute(ctx: &Context, args: DataArgs) -> anyhow::Result<()> {
    let store = ctx.showroom.backend().local_store()?;
    match args.command {
        DataCommand::Export { output } => {
            let snapshot = store.export_data()?;
            let json = serde_json::to_string_pretty(&snapshot)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("write {}", path.display()))?;
                    println!("Exported to {}", path.display());
                }
                None => println!("{}", json),
            }
            Ok(())
        }
        DataCommand::Import { file } => {
            let snapshot: LocalSnapshot = read_json(&file)?;
            let report = store.import_data(&snapshot)?;
            println!("Imported:");
            print_report(&report);
            Ok(())
        }
        DataCommand::Clear => {
            store.clear_all_data()?;
            println!("All local data cleared");
            Ok(())
        }
        DataCommand::Reset => {
            let report = store.force_initialize_defaults()?;
            println!("Restored defaults:");
            print_report(&report);
            Ok(())
        }
        DataCommand::Status => {
            let seeded = store.seeded_collections()?;
            if ctx.json {
                return ctx.print_json(&seeded);
            }
            println!("Seeded: {}", seeded.join(", "));
            Ok(())
        }
        DataCommand::Images => {
            let images = store.images().list_images()?;
            if ctx.json {
                return ctx.print_json(&images);
            }
            for image in &images {
                println!(
                    "{}\t{}\t{} bytes\t{}",
                    image.token, image.content_type, image.size, image.uploaded_at
                );
            }
            Ok(())
        }
        DataCommand::DeleteImage { token } => {
            store.images().delete_image(&ImageToken::new(token.clone()))?;
            println!("Deleted image {}", token);
            Ok(())
        }
    }
}
