//! Bookmark commands.

use anyhow::{Result, bail};

use crate::commands::feed::print_posts;
use crate::context::AppContext;

pub async fn list(ctx: &AppContext) -> Result<()> {
    match ctx.feed.bookmarked_posts().await {
        Ok(posts) => {
            print_posts(&posts);
            Ok(())
        }
        Err(err) => bail!(err),
    }
}

pub async fn ids(ctx: &AppContext) {
    ctx.session.refresh_bookmark_ids().await;
    let mut ids: Vec<String> = ctx.session.bookmarked_post_ids().await.into_iter().collect();
    ids.sort();

    if ids.is_empty() {
        println!("No bookmarks.");
        return;
    }
    for id in ids {
        println!("{id}");
    }
}

pub async fn add(ctx: &AppContext, post_id: &str) -> Result<()> {
    if ctx.session.add_bookmark(post_id).await {
        println!("Bookmarked {post_id}.");
        Ok(())
    } else {
        bail!(failure_message(ctx, "Failed to add bookmark.").await)
    }
}

pub async fn remove(ctx: &AppContext, post_id: &str) -> Result<()> {
    if ctx.session.remove_bookmark(post_id).await {
        println!("Removed bookmark {post_id}.");
        Ok(())
    } else {
        bail!(failure_message(ctx, "Failed to remove bookmark.").await)
    }
}

async fn failure_message(ctx: &AppContext, fallback: &str) -> String {
    if !ctx.session.is_authenticated().await {
        return "Not signed in.".to_string();
    }
    ctx.session
        .last_error()
        .await
        .unwrap_or_else(|| fallback.to_string())
}
