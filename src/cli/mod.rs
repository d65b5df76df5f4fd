pub mod client;
pub mod utils;

use std::io::Read;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::types::MovieId;
use client::ApiClient;

#[derive(Parser)]
#[command(name = "movies")]
#[command(about = "Movies CLI - command-line client for the Movies API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, env = "MOVIES_API_URL", default_value = "http://localhost:5000", help = "Base URL of the Movies API")]
    pub url: String,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List all movies")]
    List,

    #[command(about = "Show a single movie")]
    Get {
        #[arg(help = "Movie ID")]
        id: MovieId,
    },

    #[command(about = "Create a movie from --data or stdin")]
    Create {
        #[arg(long, help = "JSON payload (reads stdin when omitted)")]
        data: Option<String>,
    },

    #[command(about = "Update fields of a movie from --data or stdin")]
    Update {
        #[arg(help = "Movie ID")]
        id: MovieId,
        #[arg(long, help = "JSON payload with the fields to change (reads stdin when omitted)")]
        data: Option<String>,
    },

    #[command(about = "Delete a movie")]
    Delete {
        #[arg(help = "Movie ID")]
        id: MovieId,
    },

    #[command(about = "Check server health")]
    Health,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = ApiClient::new(&cli.url)?;

    match cli.command {
        Commands::List => {
            let movies = client.list().await?;
            utils::output_movies(output_format, &movies)
        }
        Commands::Get { id } => {
            let movie = client.get(id).await?;
            utils::output_movie(output_format, &movie)
        }
        Commands::Create { data } => {
            let movie = client.create(&read_payload(data)?).await?;
            utils::output_movie(output_format, &movie)
        }
        Commands::Update { id, data } => {
            let movie = client.update(id, &read_payload(data)?).await?;
            utils::output_movie(output_format, &movie)
        }
        Commands::Delete { id } => {
            client.delete(id).await?;
            utils::output_success(output_format, &format!("Deleted movie {}", id))
        }
        Commands::Health => {
            let health = client.health().await?;
            utils::output_value(output_format, &health)
        }
    }
}

fn read_payload(data: Option<String>) -> anyhow::Result<Value> {
    let raw = match data {
        Some(raw) => raw,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read payload from stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("payload is not valid JSON")
}
