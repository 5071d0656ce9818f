use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use eyre::{ensure, Result, WrapErr};
use flate2::read::MultiGzDecoder;

pub enum DecompressedStream {
    PlainText(File),
    Gzip(MultiGzDecoder<File>),
}

impl DecompressedStream {
    pub fn is_compressed(&self) -> bool {
        matches!(self, DecompressedStream::Gzip(_))
    }

    pub fn box_bufread(self) -> Box<dyn BufRead + Send + Sync + 'static> {
        match self {
            DecompressedStream::PlainText(file) => Box::new(BufReader::new(file)),
            DecompressedStream::Gzip(decoder) => Box::new(BufReader::new(decoder)),
        }
    }
}

/// Opens a plain-text or gzip/bgzip-compressed file. Compression is detected from the file
/// signature, not from the extension.
pub fn read_file(path: impl AsRef<Path>) -> Result<DecompressedStream> {
    let path = path.as_ref();
    ensure!(path.exists(), "File {} does not exist", path.display());

    let kind = infer::get_from_path(path)
        .wrap_err_with(|| format!("Failed to read the signature of {}", path.display()))?;
    let file = File::open(path).wrap_err_with(|| format!("Failed to open {}", path.display()))?;

    let stream = match kind.map(|x| (x.extension(), x.mime_type())) {
        Some(("gz", "application/gzip")) => DecompressedStream::Gzip(MultiGzDecoder::new(file)),
        // Always assume plain text if there is no clear match
        _ => DecompressedStream::PlainText(file),
    };
    log::debug!(
        "Opened {} as {}",
        path.display(),
        if stream.is_compressed() { "gzip" } else { "plain text" }
    );
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::path::PathBuf;

    #[test]
    fn test_plain_and_gzip_detection() -> Result<()> {
        let resources = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../../resources");

        let plain = read_file(resources.join("fasta/example.fa"))?;
        assert!(!plain.is_compressed());
        let gzip = read_file(resources.join("fasta/example.fa.gz"))?;
        assert!(gzip.is_compressed());

        let mut plain_text = String::new();
        read_file(resources.join("fasta/example.fa"))?
            .box_bufread()
            .read_to_string(&mut plain_text)?;
        let mut gzip_text = String::new();
        gzip.box_bufread().read_to_string(&mut gzip_text)?;
        assert_eq!(plain_text, gzip_text);
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        assert!(read_file("/definitely/not/here.fa").is_err());
    }
}
