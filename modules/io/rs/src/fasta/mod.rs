use std::path::Path;

use eyre::{ensure, Result, WrapErr};

use framekit_core_rs::seq::SequenceStore;

use crate::traits::ReadRecord;

mod reader;
mod record;

pub use reader::Reader;
pub use record::{validate_id, validate_seq, Record};

/// Loads every record of a FASTA file into a sequence store keyed by sequence name.
/// Duplicate names are rejected.
pub fn load_store(path: impl AsRef<Path>) -> Result<SequenceStore<String>> {
    let path = path.as_ref();
    let mut reader = Reader::from_path(path)?;

    let mut store = SequenceStore::new();
    let mut record = Record::default();
    while reader
        .read_record(&mut record)
        .wrap_err_with(|| format!("Failed to read FASTA file {}", path.display()))?
    {
        let name = record.name().to_owned();
        ensure!(
            !store.contains(&name),
            "Duplicate sequence name in {}: {name}",
            path.display()
        );
        let (_, seq) = std::mem::take(&mut record).dissolve();
        store.insert(name, seq);
    }
    log::debug!("Loaded {} sequences from {}", store.len(), path.display());
    Ok(store)
}
