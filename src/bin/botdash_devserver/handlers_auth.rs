use super::*;

use botdash::remote::{LoginGrant, LoginUrl, Me};

#[derive(Debug, serde::Deserialize)]
pub(super) struct CallbackQuery {
    #[serde(default)]
    code: Option<String>,
}

pub(super) async fn login_url() -> Json<LoginUrl> {
    Json(LoginUrl {
        url: "https://discord.com/oauth2/authorize?client_id=dev&response_type=code&scope=identify%20guilds"
            .to_string(),
    })
}

/// Accepts any non-empty code and mints a fresh bearer token for the operator.
pub(super) async fn oauth_callback(
    State(state): State<Arc<AppState>>,
    Query(q): Query<CallbackQuery>,
) -> Result<Json<LoginGrant>, Response> {
    let Some(code) = q.code.filter(|c| !c.trim().is_empty()) else {
        return Err(bad_request("missing code"));
    };
    debug!(code_len = code.len(), "oauth callback");

    let token = generate_token_secret().map_err(internal_error)?;
    {
        let mut tokens = state.tokens.write().await;
        tokens.insert(hash_token(&token), state.operator.id.clone());
    }
    info!(user = %state.operator.username, "token minted");

    Ok(Json(LoginGrant {
        token,
        user: state.operator.clone(),
    }))
}

pub(super) async fn me(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
) -> Result<Json<Me>, Response> {
    if subject.user_id != state.operator.id {
        return Err(not_found("user"));
    }
    Ok(Json(Me {
        user_id: state.operator.id.clone(),
        username: state.operator.username.clone(),
        avatar: state.operator.avatar.clone(),
    }))
}

pub(super) async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
) -> Json<serde_json::Value> {
    let mut tokens = state.tokens.write().await;
    tokens.remove(&subject.token_hash);
    Json(serde_json::json!({"status": "ok"}))
}
