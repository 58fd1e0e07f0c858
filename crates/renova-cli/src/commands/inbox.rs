//! Lead capture and inbox commands
//!
//! `send` and `test-drive` are the public contact forms; the rest need an
//! admin session.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use renova_core::catalog::InboxFilter;
use renova_core::ops::inbox_ops::{GeneralInquiry, TestDriveRequest};
use renova_core::InboxMessage;

use super::Context;

#[derive(Debug, Args)]
pub struct InboxArgs {
    #[command(subcommand)]
    pub command: InboxCommand,
}

#[derive(Debug, Subcommand)]
pub enum InboxCommand {
    /// List messages, newest first (admin)
    List {
        /// all, general or test-drive
        #[arg(long, default_value = "all")]
        filter: InboxFilter,
    },
    /// Mark a message as read (admin)
    MarkRead { id: String },
    /// Delete a message (admin)
    Delete { id: String },
    /// Send a general inquiry
    Send {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
    /// Book a test drive
    TestDrive {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        /// Car name as shown in the catalog
        #[arg(long)]
        car: String,
        /// Preferred date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        message: Option<String>,
    },
}

fn print_message_line(message: &InboxMessage) {
    let marker = if message.is_read { " " } else { "*" };
    println!(
        "{}{}\t{}\t{}\t{} <{}>\t{}",
        marker, message.id, message.date, message.kind, message.name, message.email, message.subject
    );
}

fn print_receipt(ctx: &Context, message: &InboxMessage) -> anyhow::Result<()> {
    if ctx.json {
        return ctx.print_json(message);
    }
    println!("Message received ({}): {}", message.id, message.subject);
    Ok(())
}

pub async fn execute(ctx: &Context, args: InboxArgs) -> anyhow::Result<()> {
    match args.command {
        InboxCommand::List { filter } => {
            let messages = ctx.showroom.inbox(filter).await?;
            if ctx.json {
                return ctx.print_json(&messages);
            }
            for message in &messages {
                print_message_line(message);
            }
            Ok(())
        }
        InboxCommand::MarkRead { id } => {
            let message = ctx.showroom.mark_message_read(&id).await?;
            println!("Marked {} as read", message.id);
            Ok(())
        }
        InboxCommand::Delete { id } => {
            ctx.showroom.delete_message(&id).await?;
            println!("Deleted message {}", id);
            Ok(())
        }
        InboxCommand::Send {
            name,
            email,
            subject,
            message,
        } => {
            let received = ctx
                .showroom
                .send_inquiry(GeneralInquiry {
                    name,
                    email,
                    subject,
                    message,
                })
                .await?;
            print_receipt(ctx, &received)
        }
        InboxCommand::TestDrive {
            name,
            email,
            phone,
            car,
            date,
            message,
        } => {
            let received = ctx
                .showroom
                .book_test_drive(TestDriveRequest {
                    name,
                    email,
                    phone,
                    car_name: car,
                    booking_date: date,
                    message,
                })
                .await?;
            print_receipt(ctx, &received)
        }
    }
}
