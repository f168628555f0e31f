use log::warn;
use rust_htslib::bcf;

use crate::genome::ReferenceGenome;

/// Symbolic allele written for every rewritten record.
pub const DUP_ALT: &[u8] = b"<DUP>";

/// What happened to a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keyword matched and REF/ALT/SVTYPE were rewritten.
    Processed,
    /// Keyword did not match; record untouched.
    Skipped,
    /// Keyword matched but the contig is absent from the reference genome.
    ContigNotFound,
    /// Keyword matched but the lookup or the field write failed.
    Error,
}

/// ID column split into individual identifiers. htslib stores the column as a
/// single byte string with ';' separators and "." for missing.
fn identifiers(record: &bcf::Record) -> Vec<Vec<u8>> {
    let id = record.id();
    if id == b"." {
        return Vec::new();
    }
    id.split(|&b| b == b';').map(|s| s.to_vec()).collect()
}

fn contains_subslice(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle)
}

/// True if any identifier contains the keyword as a case-sensitive substring.
pub fn matches_keyword(record: &bcf::Record, keyword: &str) -> bool {
    identifiers(record)
        .iter()
        .any(|id| contains_subslice(id, keyword.as_bytes()))
}

fn record_contig(record: &bcf::Record) -> Result<String, Box<dyn std::error::Error>> {
    let rid = record.rid().ok_or("record has no contig")?;
    let name = record.header().rid2name(rid)?;
    Ok(String::from_utf8_lossy(name).into_owned())
}

fn rewrite(record: &mut bcf::Record, base: u8) -> Result<(), rust_htslib::errors::Error> {
    let ref_allele = [base];
    record.set_alleles(&[&ref_allele[..], DUP_ALT])?;
    record.push_info_string(b"SVTYPE", &[&b"DUP"[..]])?;
    Ok(())
}

/// Rewrite one record in place if its ID matches the keyword.
///
/// Matching records get REF set to the reference base at POS, ALT set to
/// `<DUP>`, and INFO/SVTYPE set to `DUP` (added or overwritten). The genome
/// lookup happens before any mutation, so a failed lookup leaves the record
/// exactly as it was read; failures are warnings, never fatal.
pub fn transform(record: &mut bcf::Record, genome: &ReferenceGenome, keyword: &str) -> Outcome {
    if !matches_keyword(record, keyword) {
        return Outcome::Skipped;
    }
    let pos = record.pos() + 1; // htslib is 0-based, VCF is 1-based
    let contig = match record_contig(record) {
        Ok(c) => c,
        Err(e) => {
            warn!("could not resolve contig for record at POS={}: {}", pos, e);
            return Outcome::Error;
        }
    };
    if !genome.has_contig(&contig) {
        warn!(
            "contig {} not in reference genome, record at POS={} left unmodified",
            contig, pos
        );
        return Outcome::ContigNotFound;
    }
    let base = match genome.base_at(&contig, pos as u64) {
        Ok(b) => b,
        Err(e) => {
            warn!("error looking up {}:{}: {}", contig, pos, e);
            return Outcome::Error;
        }
    };
    match rewrite(record, base) {
        Ok(()) => Outcome::Processed,
        Err(e) => {
            warn!("error rewriting record at {}:{}: {}", contig, pos, e);
            Outcome::Error
        }
    }
}
