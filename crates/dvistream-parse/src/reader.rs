//! Seekable big-endian byte cursor over an abstract byte source.
//!
//! [`StreamReader`] is the pure leaf of the interpreter stack: fixed-width
//! unsigned/signed integer reads, fixed-length byte/string reads, absolute
//! and relative seeking, single-byte peeks, and end-of-stream detection. It
//! knows nothing about the DVI format. All reads past the end of the source
//! report [`ReaderError::PrematureEnd`] rather than returning partial data.

use std::io::{ErrorKind, Read, Seek, SeekFrom};

use crate::error::ReaderError;

/// Observer fed every byte consumed through the hashing read variants.
///
/// Callers that need content checksums implement this over their digest of
/// choice; the cursor treats the sink as opaque.
pub trait HashSink {
    /// Absorb `data` into the running hash.
    fn process(&mut self, data: &[u8]);
}

/// A seekable big-endian reader over a byte source.
///
/// The source is owned externally in spirit: because `&mut R` implements
/// `Read + Seek` whenever `R` does, a caller can lend a mutable borrow for
/// the cursor's lifetime. The total length is computed once at construction
/// so [`at_end`](StreamReader::at_end) and peeks stay cheap.
#[derive(Debug)]
pub struct StreamReader<R> {
    source: R,
    len: u64,
}

impl<R: Read + Seek> StreamReader<R> {
    /// Wraps `source`, measuring its length and rewinding to the start.
    pub fn new(mut source: R) -> Result<Self, ReaderError> {
        let len = source.seek(SeekFrom::End(0))?;
        source.seek(SeekFrom::Start(0))?;
        Ok(Self { source, len })
    }

    /// Total length of the byte source.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether the byte source is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current cursor position.
    pub fn tell(&mut self) -> Result<u64, ReaderError> {
        Ok(self.source.stream_position()?)
    }

    /// Repositions the cursor to the absolute position `pos`.
    pub fn seek(&mut self, pos: u64) -> Result<(), ReaderError> {
        self.source.seek(SeekFrom::Start(pos))?;
        Ok(())
    }

    /// Repositions the cursor `back` bytes before the end of the source.
    pub fn seek_from_end(&mut self, back: u64) -> Result<(), ReaderError> {
        self.source.seek(SeekFrom::End(-(back as i64)))?;
        Ok(())
    }

    /// Moves the cursor by `n` bytes relative to its current position.
    pub fn skip(&mut self, n: i64) -> Result<(), ReaderError> {
        self.source.seek(SeekFrom::Current(n))?;
        Ok(())
    }

    /// Whether the cursor sits at or past the end of the source.
    pub fn at_end(&mut self) -> Result<bool, ReaderError> {
        Ok(self.tell()? >= self.len)
    }

    /// Returns the byte at the cursor without advancing, or `None` at the
    /// end of the source.
    pub fn peek(&mut self) -> Result<Option<u8>, ReaderError> {
        let pos = self.tell()?;
        if pos >= self.len {
            return Ok(None);
        }
        let mut buf = [0u8; 1];
        self.source.read_exact(&mut buf)?;
        self.seek(pos)?;
        Ok(Some(buf[0]))
    }

    /// Returns the byte at the absolute position `offset` without moving
    /// the cursor, or `None` past the end of the source.
    pub fn peek_at(&mut self, offset: u64) -> Result<Option<u8>, ReaderError> {
        let pos = self.tell()?;
        self.seek(offset)?;
        let byte = self.peek()?;
        self.seek(pos)?;
        Ok(byte)
    }

    /// Reads exactly one byte.
    pub fn read_u8(&mut self) -> Result<u8, ReaderError> {
        let mut buf = [0u8; 1];
        self.read_into(&mut buf)?;
        Ok(buf[0])
    }

    /// Reads `n` bytes (1–4) as a big-endian unsigned integer.
    pub fn read_unsigned(&mut self, n: usize) -> Result<u32, ReaderError> {
        debug_assert!((1..=4).contains(&n), "unsigned width must be 1..=4");
        let mut buf = [0u8; 4];
        self.read_into(&mut buf[..n])?;
        Ok(fold_unsigned(&buf[..n]))
    }

    /// Reads `n` bytes (1–4) as a big-endian signed integer, sign-extended
    /// from the most significant byte.
    pub fn read_signed(&mut self, n: usize) -> Result<i32, ReaderError> {
        debug_assert!((1..=4).contains(&n), "signed width must be 1..=4");
        let mut buf = [0u8; 4];
        self.read_into(&mut buf[..n])?;
        Ok(fold_signed(&buf[..n]))
    }

    /// Reads exactly `n` bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, ReaderError> {
        let mut buf = vec![0u8; n];
        self.read_into(&mut buf)?;
        Ok(buf)
    }

    /// Reads a fixed-length string of `n` bytes, replacing invalid UTF-8
    /// sequences.
    pub fn read_string(&mut self, n: usize) -> Result<String, ReaderError> {
        let bytes = self.read_bytes(n)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Like [`read_u8`](StreamReader::read_u8), feeding the byte to `hash`.
    pub fn read_u8_hashed(&mut self, hash: &mut dyn HashSink) -> Result<u8, ReaderError> {
        let byte = self.read_u8()?;
        hash.process(&[byte]);
        Ok(byte)
    }

    /// Like [`read_unsigned`](StreamReader::read_unsigned), feeding the raw
    /// bytes to `hash`.
    pub fn read_unsigned_hashed(
        &mut self,
        n: usize,
        hash: &mut dyn HashSink,
    ) -> Result<u32, ReaderError> {
        debug_assert!((1..=4).contains(&n), "unsigned width must be 1..=4");
        let mut buf = [0u8; 4];
        self.read_into(&mut buf[..n])?;
        hash.process(&buf[..n]);
        Ok(fold_unsigned(&buf[..n]))
    }

    /// Like [`read_signed`](StreamReader::read_signed), feeding the raw
    /// bytes to `hash`.
    pub fn read_signed_hashed(
        &mut self,
        n: usize,
        hash: &mut dyn HashSink,
    ) -> Result<i32, ReaderError> {
        debug_assert!((1..=4).contains(&n), "signed width must be 1..=4");
        let mut buf = [0u8; 4];
        self.read_into(&mut buf[..n])?;
        hash.process(&buf[..n]);
        Ok(fold_signed(&buf[..n]))
    }

    /// Like [`read_bytes`](StreamReader::read_bytes), feeding the bytes to
    /// `hash`.
    pub fn read_bytes_hashed(
        &mut self,
        n: usize,
        hash: &mut dyn HashSink,
    ) -> Result<Vec<u8>, ReaderError> {
        let bytes = self.read_bytes(n)?;
        hash.process(&bytes);
        Ok(bytes)
    }

    /// Consumes the cursor, returning the underlying source.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Shared access to the underlying source.
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Exclusive access to the underlying source. Seeking through this
    /// reference moves the cursor.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    /// Fills `buf` exactly, mapping short reads to
    /// [`ReaderError::PrematureEnd`] with the position the read started at.
    fn read_into(&mut self, buf: &mut [u8]) -> Result<(), ReaderError> {
        let start = self.tell()?;
        self.source.read_exact(buf).map_err(|e| {
            if e.kind() == ErrorKind::UnexpectedEof {
                ReaderError::PrematureEnd(start)
            } else {
                ReaderError::Io(e)
            }
        })
    }
}

fn fold_unsigned(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
}

fn fold_signed(bytes: &[u8]) -> i32 {
    let mut val = i32::from(bytes[0] as i8);
    for &b in &bytes[1..] {
        val = (val << 8) | i32::from(b);
    }
    val
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(bytes: &[u8]) -> StreamReader<Cursor<Vec<u8>>> {
        StreamReader::new(Cursor::new(bytes.to_vec())).unwrap()
    }

    struct Md5Sink(md5::Context);

    impl Md5Sink {
        fn new() -> Self {
            Self(md5::Context::new())
        }

        fn finish(self) -> md5::Digest {
            self.0.compute()
        }
    }

    impl HashSink for Md5Sink {
        fn process(&mut self, data: &[u8]) {
            self.0.consume(data);
        }
    }

    #[test]
    fn read_unsigned_big_endian() {
        let mut r = reader(&[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(r.read_unsigned(4).unwrap(), 0x0102_0304);
    }

    #[test]
    fn read_unsigned_widths() {
        let mut r = reader(&[0xAB, 0xCD, 0xEF]);
        assert_eq!(r.read_unsigned(1).unwrap(), 0xAB);
        assert_eq!(r.read_unsigned(2).unwrap(), 0xCDEF);
    }

    #[test]
    fn read_signed_sign_extends() {
        let mut r = reader(&[0xFF, 0x80, 0x00, 0x7F]);
        assert_eq!(r.read_signed(1).unwrap(), -1);
        assert_eq!(r.read_signed(1).unwrap(), -128);
        assert_eq!(r.read_signed(2).unwrap(), 0x7F);
    }

    #[test]
    fn read_signed_multibyte() {
        let mut r = reader(&[0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(r.read_signed(4).unwrap(), -1);
        let mut r = reader(&[0x80, 0x00, 0x00, 0x00]);
        assert_eq!(r.read_signed(4).unwrap(), i32::MIN);
        let mut r = reader(&[0x7F, 0xFF, 0xFF, 0xFF]);
        assert_eq!(r.read_signed(4).unwrap(), i32::MAX);
    }

    #[test]
    fn read_past_end_reports_start_offset() {
        let mut r = reader(&[0x01, 0x02]);
        r.read_u8().unwrap();
        let err = r.read_unsigned(4).unwrap_err();
        assert!(matches!(err, ReaderError::PrematureEnd(1)));
    }

    #[test]
    fn read_u8_at_end_fails() {
        let mut r = reader(&[]);
        assert!(matches!(r.read_u8(), Err(ReaderError::PrematureEnd(0))));
    }

    #[test]
    fn peek_does_not_advance() {
        let mut r = reader(&[0xAA, 0xBB]);
        assert_eq!(r.peek().unwrap(), Some(0xAA));
        assert_eq!(r.tell().unwrap(), 0);
        assert_eq!(r.read_u8().unwrap(), 0xAA);
        assert_eq!(r.peek().unwrap(), Some(0xBB));
    }

    #[test]
    fn peek_at_end_returns_none() {
        let mut r = reader(&[0xAA]);
        r.read_u8().unwrap();
        assert_eq!(r.peek().unwrap(), None);
    }

    #[test]
    fn peek_at_preserves_position() {
        let mut r = reader(&[0x10, 0x20, 0x30]);
        r.read_u8().unwrap();
        assert_eq!(r.peek_at(2).unwrap(), Some(0x30));
        assert_eq!(r.peek_at(5).unwrap(), None);
        assert_eq!(r.tell().unwrap(), 1);
    }

    #[test]
    fn seek_and_tell() {
        let mut r = reader(&[0, 1, 2, 3, 4]);
        r.seek(3).unwrap();
        assert_eq!(r.tell().unwrap(), 3);
        assert_eq!(r.read_u8().unwrap(), 3);
    }

    #[test]
    fn seek_from_end() {
        let mut r = reader(&[0, 1, 2, 3, 4]);
        r.seek_from_end(1).unwrap();
        assert_eq!(r.read_u8().unwrap(), 4);
    }

    #[test]
    fn skip_relative_both_directions() {
        let mut r = reader(&[0, 1, 2, 3, 4]);
        r.skip(3).unwrap();
        assert_eq!(r.read_u8().unwrap(), 3);
        r.skip(-2).unwrap();
        assert_eq!(r.read_u8().unwrap(), 2);
    }

    #[test]
    fn at_end_detection() {
        let mut r = reader(&[0xFF]);
        assert!(!r.at_end().unwrap());
        r.read_u8().unwrap();
        assert!(r.at_end().unwrap());
    }

    #[test]
    fn len_and_is_empty() {
        let r = reader(&[1, 2, 3]);
        assert_eq!(r.len(), 3);
        assert!(!r.is_empty());
        assert!(reader(&[]).is_empty());
    }

    #[test]
    fn read_bytes_exact() {
        let mut r = reader(&[1, 2, 3, 4]);
        assert_eq!(r.read_bytes(3).unwrap(), vec![1, 2, 3]);
        assert_eq!(r.tell().unwrap(), 3);
    }

    #[test]
    fn read_string_lossy() {
        let mut r = reader(b"cmr10\xFFx");
        assert_eq!(r.read_string(5).unwrap(), "cmr10");
        assert_eq!(r.read_string(2).unwrap(), "\u{FFFD}x");
    }

    #[test]
    fn hashed_reads_feed_every_byte() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        let mut r = reader(&data);
        let mut sink = Md5Sink::new();
        r.read_u8_hashed(&mut sink).unwrap();
        r.read_unsigned_hashed(2, &mut sink).unwrap();
        r.read_signed_hashed(1, &mut sink).unwrap();
        r.read_bytes_hashed(3, &mut sink).unwrap();
        assert_eq!(sink.finish(), md5::compute(data));
    }

    #[test]
    fn hashed_reads_return_same_values_as_plain() {
        let mut plain = reader(&[0xFF, 0x01, 0x02]);
        let mut hashed = reader(&[0xFF, 0x01, 0x02]);
        let mut sink = Md5Sink::new();
        assert_eq!(
            plain.read_signed(1).unwrap(),
            hashed.read_signed_hashed(1, &mut sink).unwrap()
        );
        assert_eq!(
            plain.read_unsigned(2).unwrap(),
            hashed.read_unsigned_hashed(2, &mut sink).unwrap()
        );
    }

    #[test]
    fn borrowed_source_works() {
        let mut cursor = Cursor::new(vec![0x12, 0x34]);
        {
            let mut r = StreamReader::new(&mut cursor).unwrap();
            assert_eq!(r.read_unsigned(2).unwrap(), 0x1234);
        }
        // Source handed back after the borrow ends.
        assert_eq!(cursor.get_ref().len(), 2);
    }
}
