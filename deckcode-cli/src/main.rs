use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use deckcode_cli::commands::{self, TableOptions};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "deckcode")]
#[command(about = "Deckcode - Hide short messages in the order of a deck of cards", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    tables: TableArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct TableArgs {
    /// Abbreviation file, one "<short> <full>" pair per line
    #[arg(long, global = true)]
    abbreviations: Option<String>,

    /// Word lexicon for the words domain, one word per line
    #[arg(long, global = true)]
    words: Option<String>,

    /// Lexicon of names and places, one word per line
    #[arg(long, global = true)]
    names: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a message into a deck
    Encode {
        /// Message to encode
        #[arg(short, long)]
        text: String,

        /// Write the deck to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Print the deck as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Decode a deck back into its message
    Decode {
        /// Deck as 52 whitespace or comma separated cards
        #[arg(short, long, conflicts_with = "input")]
        deck: Option<String>,

        /// File holding the deck
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Show how a deck was built
    Inspect {
        /// Deck as 52 whitespace or comma separated cards
        #[arg(short, long, conflicts_with = "input")]
        deck: Option<String>,

        /// File holding the deck
        #[arg(short, long)]
        input: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let tables = TableOptions {
        abbreviations: cli.tables.abbreviations,
        words: cli.tables.words,
        names: cli.tables.names,
    };

    // Execute command
    match cli.command {
        Commands::Encode { text, output, json } => {
            commands::encode::execute(&text, output.as_deref(), json, &tables)
        }

        Commands::Decode { deck, input } => {
            commands::decode::execute(deck.as_deref(), input.as_deref(), &tables)
        }

        Commands::Inspect { deck, input, json } => {
            commands::inspect::execute(deck.as_deref(), input.as_deref(), json, &tables)
        }
    }
}
