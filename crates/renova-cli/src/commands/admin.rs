//! Admin overview commands

use super::Context;

pub async fn dashboard(ctx: &Context) -> anyhow::Result<()> {
    let stats = ctx.showroom.dashboard().await?;
    if ctx.json {
        return ctx.print_json(&stats);
    }
    println!("Cars:            {}", stats.total_cars);
    println!("News posts:      {}", stats.total_news);
    println!("Unread messages: {}", stats.unread_messages);
    println!();
    println!("Cars per brand:");
    for entry in &stats.cars_per_brand {
        println!("  {:<16}{}", entry.brand, entry.count);
    }
    println!();
    println!("Recent messages:");
    for message in &stats.recent_messages {
        println!("  {}\t{}\t{}", message.date, message.name, message.subject);
    }
    Ok(())
}

pub async fn users(ctx: &Context) -> anyhow::Result<()> {
    let users = ctx.showroom.users().await?;
    if ctx.json {
        return ctx.print_json(&users);
    }
    for user in &users {
        println!("{}\t{}\t{}\t{}", user.id, user.role, user.email, user.name);
    }
    Ok(())
}
