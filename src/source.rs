//! Read side of the management API, as seen by the controllers.
//!
//! The write side is [`crate::pending::ApplyChange`].

use std::future::Future;

use anyhow::Result;

use crate::model::{Channel, Command};

pub trait ChannelSource: Send + Sync + 'static {
    /// Authoritative channel snapshot.
    fn list_channels(&self) -> impl Future<Output = Result<Vec<Channel>>> + Send;
}

pub trait CommandSource: Send + Sync + 'static {
    fn list_commands(&self) -> impl Future<Output = Result<Vec<Command>>> + Send;
}
