//! Image commands

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Subcommand};
use renova_core::ImageToken;

use super::Context;

#[derive(Debug, Args)]
pub struct ImagesArgs {
    #[command(subcommand)]
    pub command: ImagesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ImagesCommand {
    /// Upload an image file and print its token (admin)
    Upload { file: PathBuf },
    /// Print the displayable URL for a token
    Resolve { token: String },
}

pub async fn execute(ctx: &Context, args: ImagesArgs) -> anyhow::Result<()> {
    match args.command {
        ImagesCommand::Upload { file } => {
            let bytes = std::fs::read(&file).with_context(|| format!("read {}", file.display()))?;
            let file_name = file
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| anyhow::anyhow!("{} has no usable file name", file.display()))?;
            let token = ctx.showroom.upload_image(bytes, file_name).await?;
            println!("{}", token);
            Ok(())
        }
        ImagesCommand::Resolve { token } => {
            let url = ctx.showroom.resolve_image(&ImageToken::new(token)).await?;
            println!("{}", url);
            Ok(())
        }
    }
}
