//! Account commands
//!
//! Sign-in state lives with the identity provider: the local backend keeps
//! it in the database file, the remote backend only for this process.

use clap::{Args, Subcommand};
use renova_core::User;
use renova_core_types::Sensitive;

use super::Context;

#[derive(Debug, Args)]
pub struct AccountArgs {
    #[command(subcommand)]
    pub command: AccountCommand,
}

#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Register a new account and sign in
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
    },
    /// Sign in
    Signin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// End the current session
    Signout,
    /// Print the signed-in user
    Whoami,
}

fn print_user(ctx: &Context, user: &User) -> anyhow::Result<()> {
    if ctx.json {
        return ctx.print_json(user);
    }
    println!("{} <{}> ({})", user.name, user.email, user.role);
    Ok(())
}

pub async fn execute(ctx: &Context, args: AccountArgs) -> anyhow::Result<()> {
    match args.command {
        AccountCommand::Signup {
            email,
            password,
            name,
        } => {
            let user = ctx
                .showroom
                .sign_up(&email, &Sensitive::new(password), &name)
                .await?;
            print_user(ctx, &user)
        }
        AccountCommand::Signin { email, password } => {
            let user = ctx
                .showroom
                .sign_in(&email, &Sensitive::new(password))
                .await?;
            print_user(ctx, &user)
        }
        AccountCommand::Signout => {
            ctx.showroom.sign_out().await?;
            println!("Signed out");
            Ok(())
        }
        AccountCommand::Whoami => match ctx.showroom.current_user()? {
            Some(user) => print_user(ctx, &user),
            None => {
                println!("Not signed in");
                Ok(())
            }
        },
    }
}
