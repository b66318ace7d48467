//! `mimir` — command-line front end for the search client.
//!
//! This binary is the composition root: it parses arguments, wires
//! `tracing-subscriber` (filtered by `RUST_LOG`), constructs a
//! [`SearchClient`], and streams output as plain lines (`ids`), JSON lines
//! (`metadata`, `results`), or raw HTML (`render`). The scoped result-set
//! handle releases the backend query on every exit path, including errors
//! mid-stream.

use clap::{Parser, Subcommand};
use mimir_client::SearchClient;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mimir",
    about = "Query a Mímir search backend and stream the results"
)]
struct Cli {
    /// Base URL of the backend's search endpoint,
    /// e.g. http://host:8080/mimir/news/search/
    #[arg(long, env = "MIMIR_ENDPOINT")]
    endpoint: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the document id of every result, one per line
    Ids {
        /// Query in the backend's query language
        query: String,
    },
    /// Print result metadata as JSON lines
    Metadata {
        /// Query in the backend's query language
        query: String,
        /// Metadata field names to fetch alongside title and URI
        #[arg(long, value_delimiter = ',')]
        fields: Option<Vec<String>>,
    },
    /// Print fully assembled result records as JSON lines
    Results {
        /// Query in the backend's query language
        query: String,
        /// Metadata field names to fetch alongside title and URI
        #[arg(long, value_delimiter = ',')]
        fields: Option<Vec<String>>,
        /// Stop after this many results
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print the HTML rendering of one result
    Render {
        /// Query in the backend's query language
        query: String,
        /// Zero-based rank of the result to render
        #[arg(long, default_value_t = 0)]
        rank: u64,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let client = SearchClient::new(&cli.endpoint)?;

    match cli.command {
        Command::Ids { query } => {
            let set = client.query(&query)?;
            for id in set.ids() {
                println!("{}", id?);
            }
        }
        Command::Metadata { query, fields } => {
            let set = client.query(&query)?;
            for record in set.metadata(fields.as_deref()) {
                println!("{}", serde_json::to_string(&record?)?);
            }
        }
        Command::Results {
            query,
            fields,
            limit,
        } => {
            let set = client.query(&query)?;
            let records = set
                .results(fields.as_deref())
                .take(limit.unwrap_or(usize::MAX));
            for record in records {
                println!("{}", serde_json::to_string(&record?)?);
            }
        }
        Command::Render { query, rank } => {
            let set = client.query(&query)?;
            print!("{}", set.render_document(rank)?);
        }
    }

    Ok(())
}
