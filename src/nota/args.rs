use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "nota")]
#[command(about = "Read and edit Notion pages from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a page
    #[command(alias = "p")]
    Page {
        /// Page ID (defaults to the configured main page)
        id: Option<String>,
    },

    /// Work with the task stack
    #[command(alias = "s")]
    Stack {
        #[command(subcommand)]
        action: StackAction,
    },

    /// Create or update the local configuration
    #[command(alias = "c")]
    Config,
}

#[derive(Subcommand, Debug)]
pub enum StackAction {
    /// Show the stack
    #[command(alias = "l")]
    Ls,

    /// Add a new entry
    #[command(alias = "a")]
    Add {
        /// Entry text
        text: String,
    },

    /// Mark the entry matching the query as done
    #[command(alias = "d")]
    Do {
        /// Part of the entry text
        query: String,
    },

    /// Mark the entry matching the query as not done
    #[command(alias = "u")]
    Undo {
        /// Part of the entry text
        query: String,
    },

    /// Remove the entry matching the query
    #[command(alias = "r")]
    Rm {
        /// Part of the entry text
        query: String,
    },

    /// Replace the text of the entry matching the query
    #[command(alias = "m")]
    Mod {
        /// Part of the current entry text
        query: String,
        /// New entry text
        text: String,
    },
}
