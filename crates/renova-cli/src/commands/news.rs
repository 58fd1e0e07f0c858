//! News commands

use std::path::PathBuf;

use clap::{Args, Subcommand};
use renova_core::model::{NewsPostDraft, NewsPostPatch};

use super::{read_json, Context};

#[derive(Debug, Args)]
pub struct NewsArgs {
    #[command(subcommand)]
    pub command: NewsCommand,
}

#[derive(Debug, Subcommand)]
pub enum NewsCommand {
    /// List posts, newest first
    List,
    /// Show one post
    Show { id: String },
    /// Publish a post from a JSON draft file (admin)
    Add { file: PathBuf },
    /// Apply a JSON patch file to a post (admin)
    Update { id: String, file: PathBuf },
    /// Delete a post (admin)
    Delete { id: String },
}

pub async fn execute(ctx: &Context, args: NewsArgs) -> anyhow::Result<()> {
    match args.command {
        NewsCommand::List => {
            let posts = ctx.showroom.news().await?;
            if ctx.json {
                return ctx.print_json(&posts);
            }
            for post in &posts {
                println!("{}\t{}\t{}\t{}", post.id, post.date, post.title, post.excerpt);
            }
            Ok(())
        }
        NewsCommand::Show { id } => {
            let post = ctx
                .showroom
                .news_post(&id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("news post {} not found", id))?;
            if ctx.json {
                return ctx.print_json(&post);
            }
            println!("{}", post.title);
            println!("{} - {}", post.date, post.author);
            println!();
            println!("{}", post.content);
            Ok(())
        }
        NewsCommand::Add { file } => {
            let draft: NewsPostDraft = read_json(&file)?;
            let post = ctx.showroom.create_news(draft).await?;
            if ctx.json {
                return ctx.print_json(&post);
            }
            println!("Created news post {}", post.id);
            Ok(())
        }
        NewsCommand::Update { id, file } => {
            let patch: NewsPostPatch = read_json(&file)?;
            let post = ctx.showroom.update_news(&id, patch).await?;
            if ctx.json {
                return ctx.print_json(&post);
            }
            println!("Updated news post {}", post.id);
            Ok(())
        }
        NewsCommand::Delete { id } => {
            ctx.showroom.delete_news(&id).await?;
            println!("Deleted news post {}", id);
            Ok(())
        }
    }
}
