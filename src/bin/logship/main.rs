// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use std::process::ExitCode;
use tokio::select;
use tokio::signal::unix::{signal, SignalKind};
use tokio_util::sync::CancellationToken;
use tower::BoxError;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use logship::elastic::client::{init_crypto_provider, ElasticClient};
use logship::init::agent::Agent;
use logship::init::args::{ElasticArgs, IngestArgs};
use logship::search::executor::SearchExecutor;
use logship::search::request::SearchRequest;

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Run the ingestion agent
    Start(Box<StartArgs>),

    /// Compile a query, optionally executing it against the backend
    Query(Box<QueryArgs>),

    /// Return version
    Version,
}

#[derive(Debug, clap::Args)]
struct StartArgs {
    #[command(flatten)]
    elastic: ElasticArgs,

    #[command(flatten)]
    ingest: IngestArgs,
}

#[derive(Debug, clap::Args)]
struct QueryArgs {
    /// The query to compile, e.g. 'level == "ERROR" AND message CONTAINS "timeout"'
    query: String,

    /// Execute the compiled query against the backend and print the results
    #[arg(long)]
    execute: bool,

    /// Offset into the result set
    #[arg(long)]
    from: Option<u64>,

    /// Page size, clamped to 1..=200
    #[arg(long)]
    size: Option<u64>,

    #[command(flatten)]
    elastic: ElasticArgs,
}

#[derive(Debug, Parser)]
#[command(name = "logship")]
#[command(bin_name = "logship")]
#[command(version, about, long_about = None)]
#[command(subcommand_required = true)]
struct Arguments {
    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let opt = Arguments::parse();
    match opt.command {
        Some(Commands::Version) => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Some(Commands::Start(args)) => run_agent(*args),
        Some(Commands::Query(args)) => run_query(*args),
        None => ExitCode::FAILURE,
    }
}

fn run_agent(args: StartArgs) -> ExitCode {
    let elastic = args.elastic.build_config();
    let ingest = args.ingest.build_config();

    let runtime = match build_runtime() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("ERROR: failed to build runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result: Result<(), BoxError> = runtime.block_on(async move {
        init_crypto_provider()?;

        let cancel = CancellationToken::new();
        let signal_cancel = cancel.clone();
        tokio::spawn(async move {
            wait_for_shutdown_signal().await;
            info!("shutdown signal received");
            signal_cancel.cancel();
        });

        Agent::new(elastic, ingest).run(cancel).await
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("agent failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_query(args: QueryArgs) -> ExitCode {
    if !args.execute {
        return match logship::query::parse(&args.query) {
            Ok(parsed) => {
                println!("{}", parsed.query_string);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("ERROR: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let elastic = args.elastic.build_config();
    let runtime = match build_runtime() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("ERROR: failed to build runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result: Result<String, BoxError> = runtime.block_on(async move {
        init_crypto_provider()?;

        let client = ElasticClient::new(&elastic)?;
        let executor =
            SearchExecutor::new(client, elastic.index.clone(), elastic.search_active());
        let request = SearchRequest {
            query: args.query,
            from: args.from,
            size: args.size,
        };
        let response = executor.search(&request).await?;
        serde_json::to_string_pretty(&response).map_err(BoxError::from)
    });

    match result {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn build_runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread().enable_all().build()
}

async fn wait_for_shutdown_signal() {
    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = terminate.recv() => {}
            }
        }
        Err(_) => {
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}
