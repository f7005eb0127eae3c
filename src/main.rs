use std::io::{self, BufReader};

use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

use circa::cliopt::CliOpt;
use circa::engine::Normalizer;
use circa::input::{JsonDecoder, LineReader, RecordReader};
use circa::mapping::RecordMapper;
use circa::model::Defaults;
use circa::output::{
    encoder::{Encoder, SemJsonEncoder, TriplesEncoder},
    LineWriter,
};
use circa::runner::Runner;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let opt = CliOpt::from_args();

    let records = RecordReader::new(
        Box::new(LineReader::new(BufReader::new(io::stdin()))),
        Box::new(JsonDecoder::new()),
    );

    let mapper = RecordMapper::new(Normalizer::new(Defaults::sentinel(), opt.fuzz_days)?);

    let encoder: Box<dyn Encoder> = match opt.encode.as_str() {
        "j" => Box::new(SemJsonEncoder::new(&opt.base_uri)),
        "t" => Box::new(TriplesEncoder::new(&opt.base_uri)),
        other => return Err(format!("unsupported encoding '{}'", other).into()),
    };

    let mut runner = Runner::new(
        records,
        mapper,
        encoder,
        Box::new(LineWriter::new(io::stdout())),
    );

    runner.run()?;

    Ok(())
}
