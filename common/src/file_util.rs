use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Seek, SeekFrom, Write};

use crate::err::DbResult;

/// Reads `len` bytes starting at `start`, the fixed-offset read every block
/// access in the page store is built on.
pub fn read_file_bytes(path: &str, start: u64, len: usize) -> DbResult<Vec<u8>> {
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(len, file);
    reader.seek(SeekFrom::Start(start))?;
    let r = reader.fill_buf()?;
    Ok(r.to_vec())
}

/// Overwrites the bytes at `start` with `data`, without truncating the rest
/// of the file.
pub fn update_file_bytes(path: &str, start: u64, data: &[u8]) -> DbResult<()> {
    let mut f = OpenOptions::new().write(true).append(false).open(path)?;
    f.seek(SeekFrom::Start(start))?;
    f.write_all(data)?;
    Ok(f.flush()?)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[test]
    fn round_trips_a_byte_range() {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(&[0u8; 32]).unwrap();
        let path = tmp.path().to_str().unwrap().to_string();

        update_file_bytes(&path, 8, &[1, 2, 3, 4]).unwrap();
        let got = read_file_bytes(&path, 8, 4).unwrap();
        assert_eq!(got, vec![1, 2, 3, 4]);
    }
}
