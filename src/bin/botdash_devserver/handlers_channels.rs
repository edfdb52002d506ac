use super::*;

use botdash::remote::{ChannelCommandPatch, ChannelList};

pub(super) async fn list_channels(State(state): State<Arc<AppState>>) -> Json<ChannelList> {
    let channels = state.channels.read().await;
    Json(ChannelList::Wrapped {
        channels: channels.clone(),
    })
}

/// Adds or removes one command from a channel's allow-list.
///
/// Idempotent: adding a present command or removing an absent one is a no-op.
pub(super) async fn patch_channel_command(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<ChannelCommandPatch>,
) -> Result<Json<Channel>, Response> {
    if state.fail_command.as_deref() == Some(payload.command.as_str()) {
        warn!(channel = %id, command = %payload.command, "injected failure");
        return Err(internal_error(anyhow::anyhow!(
            "failed to update {} in channel {}",
            payload.command,
            id
        )));
    }

    let mut channels = state.channels.write().await;
    let Some(channel) = channels.iter_mut().find(|c| c.id == id) else {
        return Err(not_found("channel"));
    };
    if !channel.is_editable() {
        return Err(bad_request("channel is not in restricted mode"));
    }

    let change = botdash::model::PendingChange::new(&id, &payload.command, payload.action);
    channel.allowed_commands =
        botdash::pending::replay(&channel.allowed_commands, std::iter::once(&change));
    debug!(change = %change, "channel updated");
    Ok(Json(channel.clone()))
}
