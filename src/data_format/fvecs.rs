//! Reader and writer for the `.fvecs` vector file format.
//!
//! Each record is a little-endian `i32` dimension `d` followed by `d`
//! little-endian `f32` values. Records repeat until end of input. This is the
//! layout of the SIFT/GIST benchmark corpora.

use crate::error::{KnnError, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Size of the per-record dimension header in bytes.
const HEADER_BYTES: usize = 4;

/// Read up to `max_vectors` vectors from an `.fvecs` file.
///
/// `None` reads every record in the file.
pub fn read_fvecs(path: impl AsRef<Path>, max_vectors: Option<usize>) -> Result<Vec<Vec<f32>>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| KnnError::from(e).context(path.display()))?;
    let vectors = read_fvecs_from(BufReader::new(file), max_vectors)
        .map_err(|e| e.context(path.display()))?;
    debug!(path = %path.display(), count = vectors.len(), "read fvecs file");
    Ok(vectors)
}

/// Read up to `max_vectors` vectors from any reader.
///
/// A record cut short by end of input ends the read; the vectors decoded
/// before it are returned.
pub fn read_fvecs_from<R: Read>(mut reader: R, max_vectors: Option<usize>) -> Result<Vec<Vec<f32>>> {
    let mut vectors = Vec::new();

    while max_vectors.map_or(true, |max| vectors.len() < max) {
        let mut header = [0u8; HEADER_BYTES];
        match read_record(&mut reader, &mut header)? {
            Fill::Complete => {}
            Fill::Empty => break,
            Fill::Partial => {
                warn!(records = vectors.len(), "truncated fvecs header at end of input");
                break;
            }
        }

        let dim = i32::from_le_bytes(header);
        if dim < 0 {
            return Err(KnnError::data_loss(format!(
                "record {} has negative dimension {}",
                vectors.len(),
                dim
            )));
        }

        // Bounded by the bytes actually present, not by the header.
        let expected = dim as u64 * 4;
        let mut payload = Vec::new();
        reader.by_ref().take(expected).read_to_end(&mut payload)?;
        if (payload.len() as u64) < expected {
            warn!(
                records = vectors.len(),
                dim, "truncated fvecs record at end of input"
            );
            break;
        }

        vectors.push(
            payload
                .chunks_exact(4)
                .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
                .collect(),
        );
    }

    Ok(vectors)
}

/// Write vectors to an `.fvecs` file, replacing any existing file.
pub fn write_fvecs(path: impl AsRef<Path>, vectors: &[Vec<f32>]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| KnnError::from(e).context(path.display()))?;
    let mut writer = BufWriter::new(file);
    write_fvecs_to(&mut writer, vectors)?;
    writer.flush()?;
    Ok(())
}

/// Write vectors in `.fvecs` layout to any writer.
pub fn write_fvecs_to<W: Write>(mut writer: W, vectors: &[Vec<f32>]) -> Result<()> {
    for (i, vector) in vectors.iter().enumerate() {
        let dim = i32::try_from(vector.len()).map_err(|_| {
            KnnError::invalid_argument(format!(
                "vector {} has {} components, more than fvecs can store",
                i,
                vector.len()
            ))
        })?;
        writer.write_all(&dim.to_le_bytes())?;
        for value in vector {
            writer.write_all(&value.to_le_bytes())?;
        }
    }
    Ok(())
}

/// How much of a buffer a read managed to fill.
enum Fill {
    Complete,
    Empty,
    Partial,
}

fn read_record<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<Fill> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(if filled == buf.len() {
        Fill::Complete
    } else if filled == 0 {
        Fill::Empty
    } else {
        Fill::Partial
    })
}
