use structopt::StructOpt;

use crate::error::Result;

#[derive(Debug, StructOpt)]
#[structopt(name = "circa", about = "circa command line arguments")]
pub struct CliOpt {
    /// Output encoding: 'j' for JSON lines, 't' for N-Triples.
    #[structopt(long = "encode", short = "e", default_value = "j")]
    pub encode: String,

    /// Symmetric uncertainty radius, in days, applied to 'ca.' dates.
    #[structopt(long = "fuzz-days", short = "f", default_value = "365", parse(try_from_str = parse_fuzz_days))]
    pub fuzz_days: i64,

    /// Prefix for emitted subject identifiers.
    #[structopt(long = "base-uri", short = "b", default_value = "urn:archival:")]
    pub base_uri: String,
}

fn parse_fuzz_days(s: &str) -> Result<i64> {
    let days = s
        .parse::<i64>()
        .map_err(|e| ("fuzz radius parsing failed", e))?;
    if days <= 0 {
        return Err("fuzz radius must be greater than 0 days".into());
    }
    Ok(days)
}
