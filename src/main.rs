// src/main.rs

pub mod checks;
pub mod cnpj;
pub mod config;
pub mod contract;
pub mod error;
pub mod export;
pub mod extract;
pub mod orgao;
pub mod period;
pub mod registry;
pub mod report;
pub mod search;

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use tracing_subscriber::EnvFilter;
//
use crate::{
    config::Config,
    export::ExportDocument,
    registry::RegistryClient,
    report::Report,
    search::{SearchInput, Searcher},
};

/// Public-procurement contracts of a government body, from the PNCP registry.
#[derive(Parser, Debug)]
#[command(name = "pncp-contract-search", version)]
struct Args {
    /// CNPJ of the procuring body, any formatting
    #[arg(long)]
    cnpj: String,

    /// First day of the window (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    start: String,

    /// Last day of the window (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    end: String,

    /// Registry result page, 1-based
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,

    /// Show every field of each contract
    #[arg(long)]
    details: bool,

    /// Write the result as contratos<cnpj>.json
    #[arg(long)]
    export: bool,

    /// Directory for the exported file (overrides PNCP_EXPORT_DIR)
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// Registry root URL (overrides PNCP_BASE_URL)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pncp_contract_search=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = Config::new();
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(export_dir) = args.export_dir {
        config.export_dir = export_dir;
    }

    let client = RegistryClient::new(&config)?;
    tracing::debug!(endpoint = client.endpoint(), "registry client ready");

    let searcher = Searcher::new(client);

    let input = SearchInput {
        cnpj: args.cnpj.clone(),
        data_inicial: args.start,
        data_final: args.end,
        pagina: args.page,
    };

    let result = match searcher.search(&input).await {
        Ok(result) => result,
        Err(err) => {
            eprintln!("{}", err);
            return Ok(ExitCode::FAILURE);
        }
    };

    print!(
        "{}",
        Report {
            result: &result,
            details: args.details,
        }
    );

    if args.export {
        if result.contratos.is_empty() {
            tracing::warn!("nothing to export, no contracts in the window");
        } else {
            let state = searcher.state().await;
            let path = export::write(
                &config.export_dir,
                &args.cnpj,
                &ExportDocument::from_state(&state),
            )
            .await?;
            println!("\nArquivo exportado: {}", path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}
