//! Operator console for a Discord bot's management API.
//!
//! Channel allow-list edits are staged in a [`pending::PendingChangeSet`],
//! previewed locally and committed as one concurrent batch through
//! [`manager::ChannelManager`].

pub mod catalog;
pub mod manager;
pub mod model;
pub mod pending;
pub mod remote;
pub mod session;
pub mod source;
pub mod store;
pub mod tui;
