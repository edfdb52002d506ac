use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum CommandCommands {
    /// List the command catalog
    List {
        /// Only this category (cog)
        #[arg(long)]
        category: Option<String>,
        /// Glob over names and aliases, e.g. `ban*`
        #[arg(long = "match", value_name = "GLOB")]
        pattern: Option<String>,
        /// Include hidden commands
        #[arg(long)]
        hidden: bool,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Enable a command bot-wide
    Enable { name: String },

    /// Disable a command bot-wide
    Disable { name: String },
}

#[derive(Subcommand)]
pub(crate) enum ChannelCommands {
    /// List channels and their allow-lists
    List {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one channel
    Show {
        id: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Stage allow-list edits for a channel and commit them as one batch
    Edit {
        id: String,
        /// Command to allow (repeatable)
        #[arg(long = "add", value_name = "COMMAND")]
        add: Vec<String>,
        /// Command to disallow (repeatable)
        #[arg(long = "remove", value_name = "COMMAND")]
        remove: Vec<String>,
        /// Print the resulting allow-list without committing
        #[arg(long)]
        dry_run: bool,
    },
}
