use clap::Parser;
use rust_htslib::bcf::Read;

use dupnorm::dupnorm::DupNorm;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Rewrite duplication SV records in a VCF to a canonical encoding:
/// REF becomes the reference base at POS, ALT becomes <DUP>, and INFO/SVTYPE
/// becomes DUP. Records are selected by a substring match against the ID
/// column; everything else streams through unchanged.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// input VCF or BCF. Use '-' for stdin
    #[arg(short, long)]
    input: String,

    /// output VCF or BCF; format and compression chosen by extension. Use '-' for stdout
    #[arg(short, long)]
    output: String,

    /// reference genome FASTA (indexed, or indexable in place)
    #[arg(short, long)]
    genome: String,

    /// case-sensitive keyword matched against record IDs
    #[arg(short, long, default_value = "DUP")]
    keyword: String,
}

fn process(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut dupnorm = DupNorm::new(&args.input, &args.output, &args.genome, &args.keyword)?;
    let mut reader = dupnorm.reader();
    let mut writer = dupnorm.writer();

    for r in reader.records() {
        let mut record = r?;
        writer.translate(&mut record);
        dupnorm.process_record(&mut record);
        writer.write(&record)?;
    }
    dupnorm.finish();
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if let Err(e) = process(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
