//! rusty-calldata: decode nested Safe / MultiSend calldata from the terminal

use clap::Parser;
use eyre::{eyre, Result, WrapErr};

use rusty_calldata_adapters::{HttpSignatureRegistry, InMemorySignatureRegistry, ResolverConfig};
use rusty_calldata_core::{blob, DecodedNode, Decoder, RawValue, SignatureResolver};

mod cli;
mod render;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays a clean tree / JSON document
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let decoder = Decoder::new(build_resolver(&cli)?);

    let mut root = match &cli.signature {
        Some(signature) => {
            let value = blob::parse_hex(&cli.calldata).wrap_err("invalid calldata")?;
            let mut node = DecodedNode::leaf(RawValue::Bytes(value))
                .with_candidates(vec![signature.clone()])
                .collapsible();
            decoder
                .select_signature(&mut node, signature)
                .await
                .wrap_err_with(|| format!("calldata does not match {signature}"))?;
            node
        }
        None => decoder
            .resolve_and_decode(&cli.calldata)
            .await
            .wrap_err("failed to decode calldata")?,
    };

    for selection in &cli.selections {
        let node = root
            .node_mut(&selection.path)
            .ok_or_else(|| eyre!("no decoded value at path {:?}", selection.path))?;
        decoder
            .select_signature(node, &selection.signature)
            .await
            .wrap_err_with(|| {
                format!(
                    "failed to decode path {:?} as {}",
                    selection.path, selection.signature
                )
            })?;
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&root)?);
    } else {
        print!("{}", render::render(&root)?);
    }
    Ok(())
}

fn build_resolver(cli: &Cli) -> Result<Box<dyn SignatureResolver>> {
    if !cli.offline_signatures.is_empty() {
        let mut registry = InMemorySignatureRegistry::new();
        for signature in &cli.offline_signatures {
            registry.register(signature)?;
        }
        tracing::debug!(selectors = registry.len(), "using offline signatures");
        return Ok(Box::new(registry));
    }

    let config = ResolverConfig {
        registry: cli.registry,
        base_url: cli.registry_url.clone(),
        timeout_ms: cli.timeout_ms,
        ..Default::default()
    };
    tracing::debug!(registry = %config.registry, url = %config.base_url(), "using signature registry");
    let registry = HttpSignatureRegistry::with_config(config).wrap_err("failed to build HTTP client")?;
    Ok(Box::new(registry))
}
