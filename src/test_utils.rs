use std::io::Write;

use rust_htslib::bcf::{self, Read};
use tempfile::{NamedTempFile, TempDir};

/// Write VCF text to a temp file htslib can open. The file must outlive the
/// reader, so the handle is returned alongside the path.
pub fn make_temp_vcf(contents: &str) -> (NamedTempFile, String) {
    let mut file = tempfile::Builder::new()
        .suffix(".vcf")
        .tempfile()
        .expect("error creating temp vcf");
    file.write_all(contents.as_bytes())
        .expect("error writing temp vcf");
    file.flush().expect("error flushing temp vcf");
    let path = file.path().to_str().unwrap().to_string();
    (file, path)
}

/// Write a FASTA into a temp dir. htslib builds the .fai on first open, so
/// the dir must stay alive for the duration of the test.
pub fn make_temp_fasta(records: &[(&str, &str)]) -> (TempDir, String) {
    let dir = tempfile::tempdir().expect("error creating temp dir");
    let path = dir.path().join("genome.fa");
    let mut file = std::fs::File::create(&path).expect("error creating temp fasta");
    for (name, seq) in records {
        writeln!(file, ">{}", name).expect("error writing temp fasta");
        writeln!(file, "{}", seq).expect("error writing temp fasta");
    }
    file.flush().expect("error flushing temp fasta");
    (dir, path.to_str().unwrap().to_string())
}

pub fn read_records(path: &str) -> Vec<bcf::Record> {
    let mut reader = bcf::Reader::from_path(path).expect("error opening vcf");
    reader
        .records()
        .map(|r| r.expect("error reading record"))
        .collect()
}
