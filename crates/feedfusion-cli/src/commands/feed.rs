//! Feed listing command.

use anyhow::Result;

use feedfusion_core::post::{FeedPost, FeedQuery, Platform};

use crate::context::AppContext;

pub async fn show(
    ctx: &AppContext,
    platform: Option<Platform>,
    keyword: Option<String>,
    interests: Vec<String>,
    personalized: bool,
) -> Result<()> {
    let result = if personalized {
        ctx.feed.personalized().await
    } else {
        let mut query = FeedQuery::new().with_interests(interests);
        query.platform = platform;
        query.keyword = keyword;
        ctx.feed.search(query).await
    };

    match result {
        Ok(posts) => print_posts(&posts),
        Err(err) => {
            // An unreachable feed degrades to an empty listing.
            eprintln!("Failed to fetch feed: {err}");
            println!("No posts.");
        }
    }
    Ok(())
}

pub(crate) fn print_posts(posts: &[FeedPost]) {
    if posts.is_empty() {
        println!("No posts.");
        return;
    }

    for post in posts {
        let author = post.author.as_deref().unwrap_or("unknown");
        println!("[{}] {} - {}", post.platform, post.title, author);
        println!("    {}  (id: {})", post.link, post.id);
    }
}
