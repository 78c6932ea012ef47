//! Interest selection commands.

use anyhow::Result;

use crate::context::AppContext;

pub async fn show(ctx: &AppContext) {
    let interests = ctx.interests.selected().await;
    print_selection(&interests);
}

pub async fn set(ctx: &AppContext, tags: Vec<String>) -> Result<()> {
    let stored = ctx.interests.replace(tags).await?;
    print_selection(&stored);
    Ok(())
}

pub async fn toggle(ctx: &AppContext, tag: &str) -> Result<()> {
    let stored = ctx.interests.toggle(tag).await?;
    print_selection(&stored);
    Ok(())
}

fn print_selection(interests: &[String]) {
    if interests.is_empty() {
        println!("No interests selected.");
        return;
    }
    println!("Interests: {}", interests.join(", "));
}
