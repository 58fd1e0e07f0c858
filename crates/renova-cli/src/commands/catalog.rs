//! Public catalog command
//!
//! Usage: renova catalog [--brand <BRAND>] [--search <TEXT>] [--featured]

use clap::Args;
use renova_core::catalog::{format_mileage, format_rupiah, BrandFilter};
use renova_core::Car;

use super::Context;

#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Brand name, or `Semua`/`all` for every brand
    #[arg(long, default_value = "Semua")]
    pub brand: String,

    /// Case-insensitive match on name or brand
    #[arg(long, default_value = "")]
    pub search: String,

    /// Only featured cars (home page)
    #[arg(long, conflicts_with_all = ["brands"])]
    pub featured: bool,

    /// List the available brands instead of cars
    #[arg(long)]
    pub brands: bool,
}

pub fn print_car_line(car: &Car) {
    println!(
        "{}\t{} {}\t{}\t{}\t{}",
        car.id,
        car.brand,
        car.name,
        car.year,
        format_rupiah(car.price),
        format_mileage(car.mileage)
    );
}

pub async fn execute(ctx: &Context, args: CatalogArgs) -> anyhow::Result<()> {
    if args.brands {
        let brands = ctx.showroom.brands().await?;
        if ctx.json {
            return ctx.print_json(&brands);
        }
        for brand in brands {
            println!("{}", brand);
        }
        return Ok(());
    }

    let cars = if args.featured {
        ctx.showroom.featured_cars().await?
    } else {
        ctx.showroom
            .catalog(&BrandFilter::parse(&args.brand), &args.search)
            .await?
    };

    if ctx.json {
        return ctx.print_json(&cars);
    }
    if cars.is_empty() {
        println!("No cars match.");
    }
    for car in &cars {
        print_car_line(car);
    }
    Ok(())
}
