//! Testimonial commands

use clap::{Args, Subcommand};
use renova_core::ops::testimonial_ops::TestimonialSubmission;
use renova_core::Testimonial;

use super::Context;

#[derive(Debug, Args)]
pub struct TestimonialsArgs {
    #[command(subcommand)]
    pub command: TestimonialsCommand,
}

#[derive(Debug, Subcommand)]
pub enum TestimonialsCommand {
    /// Visible testimonials, newest first
    List {
        /// Only the first N (home page strip)
        #[arg(long)]
        latest: Option<usize>,
        /// Include hidden ones (admin)
        #[arg(long, conflicts_with = "latest")]
        all: bool,
    },
    /// Submit a review
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        role: String,
        /// 1 to 5
        #[arg(long)]
        rating: u8,
        #[arg(long)]
        comment: String,
    },
    /// Hide a testimonial from the public pages (admin)
    Hide { id: String },
    /// Show a hidden testimonial again (admin)
    Show { id: String },
    /// Delete a testimonial (admin)
    Delete { id: String },
}

fn print_testimonial_line(t: &Testimonial) {
    let stars = "*".repeat(usize::from(t.rating));
    let hidden = if t.is_visible { "" } else { "\t(hidden)" };
    println!("{}\t{}\t{}\t{}\t{}{}", t.id, t.date, stars, t.name, t.comment, hidden);
}

pub async fn execute(ctx: &Context, args: TestimonialsArgs) -> anyhow::Result<()> {
    match args.command {
        TestimonialsCommand::List { latest, all } => {
            let testimonials = match (latest, all) {
                (_, true) => ctx.showroom.manage_testimonials().await?,
                (Some(n), false) => ctx.showroom.latest_testimonials(n).await?,
                (None, false) => ctx.showroom.testimonials().await?,
            };
            if ctx.json {
                return ctx.print_json(&testimonials);
            }
            for t in &testimonials {
                print_testimonial_line(t);
            }
            Ok(())
        }
        TestimonialsCommand::Submit {
            name,
            role,
            rating,
            comment,
        } => {
            let testimonial = ctx
                .showroom
                .submit_testimonial(TestimonialSubmission {
                    name,
                    role,
                    rating,
                    comment,
                })
                .await?;
            if ctx.json {
                return ctx.print_json(&testimonial);
            }
            println!("Thank you! Testimonial {} published", testimonial.id);
            Ok(())
        }
        TestimonialsCommand::Hide { id } => {
            ctx.showroom.set_testimonial_visibility(&id, false).await?;
            println!("Hid testimonial {}", id);
            Ok(())
        }
        TestimonialsCommand::Show { id } => {
            ctx.showroom.set_testimonial_visibility(&id, true).await?;
            println!("Testimonial {} is visible", id);
            Ok(())
        }
        TestimonialsCommand::Delete { id } => {
            ctx.showroom.delete_testimonial(&id).await?;
            println!("Deleted testimonial {}", id);
            Ok(())
        }
    }
}
