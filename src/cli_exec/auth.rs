use anyhow::{Context, Result};
use tracing::warn;

use botdash::session::Session;

use super::Ctx;

pub(super) async fn login(ctx: &Ctx, code: Option<String>) -> Result<()> {
    let client = ctx.anonymous_client()?;

    let Some(code) = code else {
        let url = client.login_url().await?;
        println!("Open this URL and authorize the application:");
        println!("  {}", url);
        println!("Then run `botdash login --code <code>` with the code from the redirect.");
        return Ok(());
    };

    let grant = client.exchange_code(&code).await?;
    let session = Session::begin(grant.token, grant.user);
    ctx.store
        .session_store()
        .save(&session)
        .context("store session")?;
    println!("Logged in as {}", session.user.display_name());
    Ok(())
}

pub(super) async fn logout(ctx: &Ctx) -> Result<()> {
    let sessions = ctx.store.session_store();
    let Some(session) = sessions.load()? else {
        println!("Not logged in");
        return Ok(());
    };

    if !session.is_expired() {
        let client = ctx.anonymous_client()?.with_token(&session.token);
        if let Err(err) = client.logout().await {
            warn!(error = %format!("{:#}", err), "remote logout failed; clearing local session anyway");
        }
    }
    session.teardown(&sessions)?;
    println!("Logged out");
    Ok(())
}

pub(super) async fn whoami(ctx: &Ctx, json: bool) -> Result<()> {
    let (client, session) = ctx.client()?;
    let user = client.me().await?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "user": user,
                "session_expires_at": session
                    .expires_at
                    .format(&time::format_description::well_known::Rfc3339)
                    .context("format expiry")?,
            }))
            .context("serialize whoami json")?
        );
    } else {
        println!("user: {} ({})", user.username, user.id);
        println!(
            "session expires: {}",
            session
                .expires_at
                .format(&time::format_description::well_known::Rfc3339)
                .context("format expiry")?
        );
    }
    Ok(())
}
