use super::*;

use botdash::remote::{CommandList, CommandToggled, SetCommandEnabled};

pub(super) async fn list_commands(State(state): State<Arc<AppState>>) -> Json<CommandList> {
    let commands = state.commands.read().await;
    Json(CommandList {
        commands: commands.clone(),
    })
}

pub(super) async fn set_command_enabled(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(payload): Json<SetCommandEnabled>,
) -> Result<Json<CommandToggled>, Response> {
    let mut commands = state.commands.write().await;
    let Some(cmd) = commands.iter_mut().find(|c| c.name == name) else {
        return Err(not_found("command"));
    };
    cmd.enabled = payload.enabled;
    info!(command = %cmd.name, enabled = cmd.enabled, "command toggled");
    Ok(Json(CommandToggled {
        command: cmd.name.clone(),
        enabled: cmd.enabled,
    }))
}
