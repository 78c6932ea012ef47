//! Login, signup, logout, and status commands.

use anyhow::{Result, bail};

use feedfusion_core::auth::{AuthPhase, Credentials, SignupForm};

use crate::context::AppContext;

pub async fn login(ctx: &AppContext, username: String, password: String) -> Result<()> {
    let identifier = username.clone();
    if ctx.session.login(Credentials::new(username, password)).await {
        let who = ctx
            .session
            .user()
            .await
            .map(|user| user.username)
            .unwrap_or(identifier);
        println!("Signed in as {who}.");
        Ok(())
    } else {
        let message = ctx
            .session
            .last_error()
            .await
            .unwrap_or_else(|| "Login failed.".to_string());
        bail!(message)
    }
}

pub async fn signup(
    ctx: &AppContext,
    username: String,
    email: String,
    password: String,
    confirm: String,
) -> Result<()> {
    let form = SignupForm::new(username, email, password, confirm);
    if ctx.session.signup(form).await {
        match ctx.session.phase().await {
            AuthPhase::Authenticated => println!("Account created; you are signed in."),
            _ => println!("Account created; run `feedfusion login` to sign in."),
        }
        Ok(())
    } else {
        let message = ctx
            .session
            .last_error()
            .await
            .unwrap_or_else(|| "Signup failed.".to_string());
        bail!(message)
    }
}

pub async fn logout(ctx: &AppContext) {
    ctx.session.logout().await;
    println!("Signed out.");
}

pub async fn status(ctx: &AppContext) {
    let snapshot = ctx.session.snapshot().await;
    if snapshot.is_authenticated() {
        let who = snapshot
            .user
            .map(|user| user.username)
            .unwrap_or_else(|| "(unknown user)".to_string());
        println!("Signed in as {who}.");
        println!("Bookmarked posts: {}", snapshot.bookmarked_post_ids.len());
    } else {
        println!("Not signed in.");
    }
    if let Some(error) = snapshot.error {
        println!("Last error: {error}");
    }
}
