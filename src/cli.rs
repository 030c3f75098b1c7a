use clap::Parser;
use serde::{Serialize, Serializer};

fn is_false(b: &bool) -> bool {
    !b
}

fn negated<S: Serializer>(b: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_bool(!b)
}

// Only flags explicitly passed on the command line end up overriding
// the environment, the other ones are skipped at serialization.
#[derive(Debug, Parser, Serialize)]
#[command(name = "softball-proxy", about = "NCAA softball rankings and stat leaders proxy")]
pub struct Cli {
    /// Port to listen on
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Cache time-to-live, in seconds
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_ttl: Option<u64>,

    /// Always refresh from upstream (stale copies are still kept as fallback)
    #[arg(long)]
    #[serde(
        rename = "cache_enabled",
        serialize_with = "negated",
        skip_serializing_if = "is_false"
    )]
    pub no_cache: bool,
}
