use rust_htslib::bcf::{self, Read};

use crate::genome::ReferenceGenome;
use crate::transform::{transform, Outcome};

/// `DupNorm` owns the streams for one run: the VCF reader, the VCF writer
/// (header copied from the input), and the reference genome. The caller takes
/// the reader and writer and drives the record loop, calling `process_record`
/// on each record and `finish` once at the end.
pub struct DupNorm {
    vcf_reader: Option<bcf::Reader>,
    writer: Option<bcf::Writer>,
    genome: ReferenceGenome,
    keyword: String,
    records_seen: usize,
    records_processed: usize,
}

fn get_vcf_format(path: &str) -> bcf::Format {
    if path.ends_with(".bcf") || path.ends_with(".bcf.gz") {
        bcf::Format::Bcf
    } else {
        bcf::Format::Vcf
    }
}

impl DupNorm {
    /// Open the input VCF (`-` or `stdin` for stdin), the output VCF/BCF
    /// (`-` for stdout, format chosen by extension), and the indexed genome
    /// FASTA. Any failure here is fatal to the run.
    pub fn new(
        vcf_path: &str,
        output: &str,
        genome_path: &str,
        keyword: &str,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        if keyword.is_empty() {
            return Err("keyword must not be empty".into());
        }
        let genome = ReferenceGenome::open(genome_path)?;

        let mut reader = match vcf_path {
            "-" | "stdin" => bcf::Reader::from_stdin()?,
            _ => bcf::Reader::from_path(vcf_path)?,
        };
        _ = reader.set_threads(2);

        let mut header = bcf::header::Header::from_template(reader.header());
        // the rewrite writes INFO/SVTYPE unconditionally, so the output header
        // must declare it even when the input header does not
        if reader.header().info_type(b"SVTYPE").is_err() {
            header.push_record(
                br#"##INFO=<ID=SVTYPE,Number=1,Type=String,Description="Type of structural variant">"#,
            );
        }

        let writer = if output == "-" {
            bcf::Writer::from_stdout(&header, true, bcf::Format::Vcf)?
        } else {
            let format = get_vcf_format(output);
            let mut wtr =
                bcf::Writer::from_path(output, &header, !output.ends_with(".gz"), format)?;
            _ = wtr.set_threads(2);
            wtr
        };

        Ok(DupNorm {
            vcf_reader: Some(reader),
            writer: Some(writer),
            genome,
            keyword: keyword.to_string(),
            records_seen: 0,
            records_processed: 0,
        })
    }

    /// Take ownership of the bcf::Reader object.
    pub fn reader(&mut self) -> bcf::Reader {
        self.vcf_reader.take().expect("reader already taken")
    }

    /// Take ownership of the bcf::Writer object.
    pub fn writer(&mut self) -> bcf::Writer {
        self.writer.take().expect("writer already taken")
    }

    /// Rewrite one record in place if it matches the keyword. Per-record
    /// failures surface as warnings and the record passes through unchanged.
    pub fn process_record(&mut self, record: &mut bcf::Record) -> Outcome {
        self.records_seen += 1;
        let outcome = transform(record, &self.genome, &self.keyword);
        if outcome == Outcome::Processed {
            self.records_processed += 1;
        }
        outcome
    }

    pub fn records_processed(&self) -> usize {
        self.records_processed
    }

    /// Log the run summary. Call once, after the last record.
    pub fn finish(&self) {
        log::info!(
            "rewrote {} of {} records matching '{}'",
            self.records_processed,
            self.records_seen,
            self.keyword
        );
    }
}
