//! Entities exchanged with the bot management API.

mod change;
mod channel;
mod command;
mod stats;
mod user;

pub use self::change::{ChangeAction, PendingChange};
pub use self::channel::{Channel, CommandMode};
pub use self::command::Command;
pub use self::stats::{ActivityPoint, CommandUsage, GuildInfo, StatsOverview};
pub use self::user::User;

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod tests;
