use clap::Parser;

use rusty_calldata_adapters::RegistryKind;

#[derive(Debug, Parser)]
#[command(name = "rusty-calldata", version, about = "Decode nested Safe / MultiSend calldata")]
pub struct Cli {
    /// Calldata to decode (hex, `0x` optional)
    pub calldata: String,

    /// Decode with this signature instead of looking one up
    #[arg(long)]
    pub signature: Option<String>,

    /// Pick a signature for an ambiguous value, e.g. `0=Multisend`.
    /// PATH is dot-separated parameter indices; empty for the top level.
    #[arg(long = "select", value_name = "PATH=SIGNATURE", value_parser = parse_selection)]
    pub selections: Vec<Selection>,

    /// Signature registry to query
    #[arg(long, env = "RUSTY_CALLDATA_REGISTRY", default_value = "4byte")]
    pub registry: RegistryKind,

    /// Override the registry endpoint
    #[arg(long, env = "RUSTY_CALLDATA_REGISTRY_URL")]
    pub registry_url: Option<String>,

    #[arg(long, env = "RUSTY_CALLDATA_TIMEOUT_MS", default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Resolve only against these signatures, without network access
    #[arg(long = "offline-signature", value_name = "SIGNATURE")]
    pub offline_signatures: Vec<String>,

    /// Print the tree as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub path: Vec<usize>,
    pub signature: String,
}

pub fn parse_selection(raw: &str) -> Result<Selection, String> {
    let (path, signature) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected PATH=SIGNATURE, got '{raw}'"))?;
    let signature = signature.trim();
    if signature.is_empty() {
        return Err("signature must not be empty".to_owned());
    }

    let path = path.trim();
    let path = if path.is_empty() {
        vec![]
    } else {
        path.split('.')
            .map(|idx| {
                idx.parse::<usize>()
                    .map_err(|_| format!("invalid path segment '{idx}'"))
            })
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(Selection {
        path,
        signature: signature.to_owned(),
    })
}
