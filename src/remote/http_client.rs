use super::*;

impl BotApiClient {
    pub(super) async fn ensure_ok(
        &self,
        resp: reqwest::Response,
        label: &str,
    ) -> Result<reqwest::Response> {
        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            anyhow::bail!("unauthorized (session missing or expired; run `botdash login`)");
        }
        if status == reqwest::StatusCode::FORBIDDEN {
            anyhow::bail!("forbidden (this account may not manage the bot)");
        }
        if status.is_success() {
            return Ok(resp);
        }

        let body: Option<ErrorBody> = resp.json().await.ok();
        match body {
            Some(body) => anyhow::bail!("{} failed ({}): {}", label, status, body.error),
            None => anyhow::bail!("{} failed ({})", label, status),
        }
    }

    pub(super) fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.client.get(self.url(path)))
    }

    pub(super) fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.client.post(self.url(path)))
    }

    pub(super) fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.client.patch(self.url(path)))
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token)),
            None => req,
        }
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
