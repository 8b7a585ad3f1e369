//! Record framing: drift correction and padding checks.

use crate::diagnostics::{report, Diagnostic, DiagnosticSink};
use crate::error::Result;
use super::reader::BinaryReader;

/// Forces the cursor to `start + size` when the record reader ended elsewhere.
///
/// Records are sometimes a few bytes longer or shorter than modeled (newer
/// format revisions add trailing fields). Skipping to the declared boundary
/// keeps the rest of the chunk in sync.
pub fn realign(
    reader: &mut BinaryReader,
    sink: &mut dyn DiagnosticSink,
    start: usize,
    size: usize,
) -> Result<()> {
    let expected = start + size;
    let actual = reader.position();
    if actual != expected {
        report(sink, Diagnostic::Drift { start, expected, actual });
        reader.seek(expected)?;
    }
    Ok(())
}

/// Reads `count` fixed-size records, realigning after each one
pub fn read_records<T>(
    reader: &mut BinaryReader,
    sink: &mut dyn DiagnosticSink,
    count: u32,
    item_size: usize,
    mut read_one: impl FnMut(&mut BinaryReader, &mut dyn DiagnosticSink) -> Result<T>,
) -> Result<Vec<T>> {
    let mut records = Vec::with_capacity((count as usize).min(reader.remaining()));
    for _ in 0..count {
        let start = reader.position();
        let record = read_one(reader, sink)?;
        realign(reader, sink, start, item_size)?;
        records.push(record);
    }
    Ok(records)
}

/// Consumes `n` bytes that should be zero; anything else is reported, not rejected
pub fn check_padding(reader: &mut BinaryReader, sink: &mut dyn DiagnosticSink, n: usize) -> Result<()> {
    let offset = reader.position();
    if !reader.read_padding(n)? {
        report(sink, Diagnostic::NonZeroPadding { offset, len: n });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::EventCollector;

    #[test]
    fn test_realign_short_read() {
        let data = [0u8; 16];
        let mut reader = BinaryReader::new(&data);
        let mut sink = EventCollector::new();

        reader.skip(6).unwrap();
        realign(&mut reader, &mut sink, 0, 8).unwrap();
        assert_eq!(reader.position(), 8);
        assert_eq!(sink.events(), &[Diagnostic::Drift { start: 0, expected: 8, actual: 6 }]);
    }

    #[test]
    fn test_realign_long_read() {
        let data = [0u8; 16];
        let mut reader = BinaryReader::new(&data);
        let mut sink = EventCollector::new();

        reader.seek(4).unwrap();
        reader.skip(11).unwrap();
        realign(&mut reader, &mut sink, 4, 8).unwrap();
        assert_eq!(reader.position(), 12);
        assert_eq!(sink.events().len(), 1);
    }

    #[test]
    fn test_realign_exact_is_silent() {
        let data = [0u8; 8];
        let mut reader = BinaryReader::new(&data);
        let mut sink = EventCollector::new();

        reader.skip(8).unwrap();
        realign(&mut reader, &mut sink, 0, 8).unwrap();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_read_records_keeps_sync() {
        // Three 3-byte records, reader only models the first byte
        let data = [1, 0xAA, 0xAA, 2, 0xBB, 0xBB, 3, 0xCC, 0xCC];
        let mut reader = BinaryReader::new(&data);
        let mut sink = EventCollector::new();

        let ids = read_records(&mut reader, &mut sink, 3, 3, |r, _| r.read_u8()).unwrap();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(reader.is_empty());
        assert_eq!(sink.count(|e| matches!(e, Diagnostic::Drift { .. })), 3);
    }

    #[test]
    fn test_check_padding() {
        let data = [0, 0, 0, 7];
        let mut reader = BinaryReader::new(&data);
        let mut sink = EventCollector::new();

        check_padding(&mut reader, &mut sink, 2).unwrap();
        assert!(sink.is_empty());
        check_padding(&mut reader, &mut sink, 2).unwrap();
        assert_eq!(sink.events(), &[Diagnostic::NonZeroPadding { offset: 2, len: 2 }]);
    }
}
