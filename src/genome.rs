use rust_htslib::faidx;
use rustc_hash::FxHashSet;

/// Random-access handle to an indexed reference FASTA.
/// The contig set is snapshotted at open so missing-contig lookups can be
/// distinguished from other htslib errors.
pub struct ReferenceGenome {
    reader: faidx::Reader,
    contigs: FxHashSet<String>,
}

impl ReferenceGenome {
    /// Open a FASTA file, building the .fai index if htslib needs to.
    pub fn open(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let reader = faidx::Reader::from_path(path)?;
        let mut contigs = FxHashSet::default();
        for i in 0..reader.n_seqs() {
            contigs.insert(reader.seq_name(i as i32)?);
        }
        Ok(ReferenceGenome { reader, contigs })
    }

    pub fn has_contig(&self, name: &str) -> bool {
        self.contigs.contains(name)
    }

    /// Base at a 1-based position, uppercased. htslib wants a 0-based
    /// inclusive range, so position P maps to [P-1, P-1].
    pub fn base_at(&self, contig: &str, pos: u64) -> Result<u8, Box<dyn std::error::Error>> {
        if pos == 0 {
            return Err(format!("invalid 1-based position 0 on contig {}", contig).into());
        }
        let start = (pos - 1) as usize;
        let seq = self.reader.fetch_seq(contig, start, start)?;
        match seq.first() {
            Some(base) => Ok(base.to_ascii_uppercase()),
            None => Err(format!("position {} is past the end of contig {}", pos, contig).into()),
        }
    }
}
