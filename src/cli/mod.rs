use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Talk to the assistant in the terminal (/reset starts over, /quit exits)
    Chat {
        /// Resume a named session instead of starting a fresh one
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Recommend and price a build without the conversation
    Recommend {
        /// Total budget in US dollars
        #[arg(short, long)]
        budget: u32,

        /// gaming, office, editing, or a short description
        #[arg(short, long)]
        use_case: String,

        /// Extra wishes (repeatable), e.g. --preference "white case"
        #[arg(short, long = "preference")]
        preferences: Vec<String>,
    },

    /// Look up store listings for a single part
    Lookup {
        query: String,

        #[arg(short, long, default_value = "3")]
        num: usize,
    },

    /// Start MCP (Model Context Protocol) server on stdio for integration with AI tools
    Mcp,
}
