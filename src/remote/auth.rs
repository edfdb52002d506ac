//! Discord OAuth handshake and session endpoints.

use super::*;

impl BotApiClient {
    /// Discord authorize URL the operator has to visit.
    pub async fn login_url(&self) -> Result<String> {
        let resp = self
            .get("/api/auth/login")
            .send()
            .await
            .context("login url request")?;
        let body: LoginUrl = self
            .ensure_ok(resp, "login url")
            .await?
            .json()
            .await
            .context("parse login url")?;
        Ok(body.url)
    }

    /// Trades the OAuth `code` from the redirect for an API token.
    pub async fn exchange_code(&self, code: &str) -> Result<LoginGrant> {
        let resp = self
            .get("/api/auth/callback")
            .query(&[("code", code)])
            .send()
            .await
            .context("oauth callback request")?;

        if resp.status() == reqwest::StatusCode::BAD_REQUEST {
            let body: ErrorBody = resp.json().await.context("parse oauth error")?;
            anyhow::bail!("login rejected: {}", body.error);
        }

        let grant: LoginGrant = self
            .ensure_ok(resp, "oauth callback")
            .await?
            .json()
            .await
            .context("parse login grant")?;
        Ok(grant)
    }

    pub async fn me(&self) -> Result<User> {
        let resp = self
            .get("/api/auth/me")
            .send()
            .await
            .context("me request")?;
        let me: Me = self
            .ensure_ok(resp, "me")
            .await?
            .json()
            .await
            .context("parse me")?;
        Ok(me.into())
    }

    pub async fn logout(&self) -> Result<()> {
        let resp = self
            .post("/api/auth/logout")
            .send()
            .await
            .context("logout request")?;
        self.ensure_ok(resp, "logout").await?;
        Ok(())
    }
}
