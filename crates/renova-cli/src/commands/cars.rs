//! Car inventory commands
//!
//! Reads are public; add, update and delete need an admin session.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use renova_core::catalog::{format_mileage, format_rupiah};
use renova_core::{CarDraft, CarPatch};

use super::catalog::print_car_line;
use super::{read_json, Context};

#[derive(Debug, Args)]
pub struct CarsArgs {
    #[command(subcommand)]
    pub command: CarsCommand,
}

#[derive(Debug, Subcommand)]
pub enum CarsCommand {
    /// List the inventory, optionally searching name and brand (admin)
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one car
    Show { id: String },
    /// Add a car from a JSON draft file (`-` for stdin)
    Add { file: PathBuf },
    /// Apply a JSON patch file to a car
    Update { id: String, file: PathBuf },
    /// Delete a car
    Delete { id: String },
}

pub async fn execute(ctx: &Context, args: CarsArgs) -> anyhow::Result<()> {
    match args.command {
        CarsCommand::List { search } => {
            let cars = match search {
                Some(query) => ctx.showroom.search_inventory(&query).await?,
                None => ctx.showroom.cars().await?,
            };
            if ctx.json {
                return ctx.print_json(&cars);
            }
            for car in &cars {
                print_car_line(car);
            }
            Ok(())
        }
        CarsCommand::Show { id } => {
            let car = ctx
                .showroom
                .car(&id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("car {} not found", id))?;
            if ctx.json {
                return ctx.print_json(&car);
            }
            println!("{} {} ({})", car.brand, car.name, car.year);
            println!("Price:        {}", format_rupiah(car.price));
            println!("Mileage:      {}", format_mileage(car.mileage));
            println!("Engine:       {} / {}", car.engine, car.transmission);
            println!("Fuel / body:  {} / {}", car.fuel_type, car.body_type);
            println!("Color:        {} / {}", car.color, car.interior_color);
            println!(
                "Condition:    {:?}, {} previous owner(s)",
                car.condition, car.previous_owners
            );
            println!("Tax date:     {}", car.tax_date);
            println!("Plate:        {}", car.plate_number);
            println!("Location:     {}", car.location);
            println!("Seats:        {}", car.seats);
            println!("Gallery:      {} image(s)", car.gallery.len());
            println!();
            println!("{}", car.description);
            Ok(())
        }
        CarsCommand::Add { file } => {
            let draft: CarDraft = read_json(&file)?;
            let car = ctx.showroom.create_car(draft).await?;
            if ctx.json {
                return ctx.print_json(&car);
            }
            println!("Created car {}", car.id);
            Ok(())
        }
        CarsCommand::Update { id, file } => {
            let patch: CarPatch = read_json(&file)?;
            let car = ctx.showroom.update_car(&id, patch).await?;
            if ctx.json {
                return ctx.print_json(&car);
            }
            println!("Updated car {}", car.id);
            Ok(())
        }
        CarsCommand::Delete { id } => {
            ctx.showroom.delete_car(&id).await?;
            println!("Deleted car {}", id);
            Ok(())
        }
    }
}
