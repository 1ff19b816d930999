//! txlens CLI: locate a transaction across EVM chains and decode it.
//!
//! # Commands
//! ```text
//! txlens tx       <hash>              locate + decode call, events, batch
//! txlens calldata <hex>               decode transaction input
//! txlens error    <hex>               decode revert data
//! txlens batch    --calldata <hex>    decode a batch-posting call's payload
//! txlens batch    --payload <hex>     classify a raw batch payload
//! txlens networks                     list configured networks
//! ```

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

use txlens::{init_tracing, TxLens, TxLensConfig};

mod output;

#[derive(Parser)]
#[command(
    name = "txlens",
    about = "Find a transaction on any configured EVM chain and decode it",
    long_about = "
txlens searches every configured network for a transaction hash at once,
then decodes its call data and event logs against a public
selector-sharded signature archive. Arbitrum batch-posting calls have
their payload classified as rollup data or a DA certificate.

Without --config the built-in network list and archive are used.
",
    version
)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Locate a transaction and decode everything about it
    Tx {
        /// Transaction hash (0x + 64 hex chars)
        hash: String,
    },

    /// Decode transaction input against the signature archive
    Calldata {
        /// Raw input (0x-prefixed hex)
        data: String,
    },

    /// Decode revert data (Error, Panic or a custom error)
    Error {
        /// Raw revert data (0x-prefixed hex)
        data: String,
    },

    /// Classify a rollup batch payload
    #[command(group(ArgGroup::new("input").required(true).args(["calldata", "payload"])))]
    Batch {
        /// Full input of a SequencerInbox batch-posting call
        #[arg(long)]
        calldata: Option<String>,
        /// The batch `data` argument on its own
        #[arg(long)]
        payload: Option<String>,
    },

    /// List configured networks
    Networks,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => TxLensConfig::from_file(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => TxLensConfig::default(),
    };
    if cli.verbose {
        config.log.level = "debug".into();
    }
    init_tracing(&config.log)?;

    let lens = TxLens::from_config(&config).context("initialise txlens")?;
    tracing::debug!(networks = lens.networks().len(), "ready");

    match cli.command {
        Commands::Tx { hash } => cmd_tx(&lens, &hash, cli.json).await,
        Commands::Calldata { data } => cmd_calldata(&lens, &data, cli.json).await,
        Commands::Error { data } => cmd_error(&lens, &data, cli.json).await,
        Commands::Batch { calldata, payload } => {
            cmd_batch(&lens, calldata.as_deref(), payload.as_deref(), cli.json).await
        }
        Commands::Networks => cmd_networks(&config, cli.json),
    }
}

async fn cmd_tx(lens: &TxLens, hash: &str, as_json: bool) -> Result<()> {
    let report = lens
        .inspect(hash)
        .await
        .with_context(|| format!("inspect transaction {hash}"))?;

    let Some(report) = report else {
        if as_json {
            println!("null");
        } else {
            println!("Transaction {hash} not found on any configured network");
        }
        return Ok(());
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::print_report(&report);
    }
    Ok(())
}

async fn cmd_calldata(lens: &TxLens, data: &str, as_json: bool) -> Result<()> {
    let call = lens.decode_call(data).await.context("decode calldata")?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&call)?);
    } else {
        output::print_call(&call);
    }
    Ok(())
}

async fn cmd_error(lens: &TxLens, data: &str, as_json: bool) -> Result<()> {
    let decoded = lens.decode_error(data).await.context("decode revert data")?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&decoded)?);
    } else {
        output::print_error(&decoded);
    }
    Ok(())
}

async fn cmd_batch(
    lens: &TxLens,
    calldata: Option<&str>,
    payload: Option<&str>,
    as_json: bool,
) -> Result<()> {
    let batch = match (calldata, payload) {
        (Some(calldata), _) => {
            let call = lens.decode_call(calldata).await.context("decode calldata")?;
            if !call.is_resolved() {
                anyhow::bail!("calldata could not be decoded; is this a batch-posting call?");
            }
            lens.classify_and_decode_batch(&call)
                .context("decode batch payload")?
        }
        (None, Some(payload)) => {
            let bytes = txlens_core::hexutil::parse_hex(payload).context("invalid payload hex")?;
            Some(txlens_evm::classify_payload(&bytes).context("decode batch payload")?)
        }
        (None, None) => None,
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&batch)?);
    } else {
        match &batch {
            Some(b) => output::print_batch(b),
            None => println!("Not a batch-posting call"),
        }
    }
    Ok(())
}

fn cmd_networks(config: &TxLensConfig, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(&config.networks)?);
        return Ok(());
    }
    println!("{:<12} {:<20} {:<6} RPC", "CHAIN ID", "NAME", "SYMBOL");
    for n in &config.networks {
        println!(
            "{:<12} {:<20} {:<6} {}",
            n.chain_id, n.name, n.native_symbol, n.rpc_url
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn batch_requires_one_input() {
        assert!(Cli::try_parse_from(["txlens", "batch"]).is_err());
        assert!(Cli::try_parse_from(["txlens", "batch", "--payload", "0x88"]).is_ok());
        assert!(
            Cli::try_parse_from(["txlens", "batch", "--payload", "0x88", "--calldata", "0x"])
                .is_err()
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["txlens", "calldata", "0x", "--json", "-c", "a.yaml"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("a.yaml")));
    }
}
