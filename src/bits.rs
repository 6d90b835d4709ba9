//! MSB-first bit packing over byte streams.

use {
    crate::coding::Code,
    bitstream_io::{
        BigEndian, BitRead, BitReader as StreamReader, BitWrite, BitWriter as StreamWriter,
    },
    std::io::{self, Read, Write},
};

/// Packs codes into bytes, writing each byte as soon as it is full.
pub struct BitWriter<W: Write> {
    inner: StreamWriter<W, BigEndian>,
    bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    pub fn new(inner: W) -> Self {
        BitWriter {
            inner: StreamWriter::endian(inner, BigEndian),
            bits_written: 0,
        }
    }

    pub fn push_bit(&mut self, bit: bool) -> io::Result<()> {
        self.inner.write_bit(bit)?;
        self.bits_written += 1;
        Ok(())
    }

    pub fn push_code(&mut self, code: &Code) -> io::Result<()> {
        for bit in code.bits() {
            self.push_bit(bit)?;
        }
        Ok(())
    }

    /// Zero-pads the last partial byte and flushes it out.
    ///
    /// Returns the sink and the number of bytes written in total.
    pub fn finish(mut self) -> io::Result<(W, u64)> {
        self.inner.byte_align()?;
        Ok((self.inner.into_writer(), (self.bits_written + 7) / 8))
    }
}

/// Reads bits back out of a byte stream in the order `BitWriter` packed them.
pub struct BitReader<R: Read> {
    inner: StreamReader<R, BigEndian>,
    bits_read: u64,
}

impl<R: Read> BitReader<R> {
    pub fn new(inner: R) -> Self {
        BitReader {
            inner: StreamReader::endian(inner, BigEndian),
            bits_read: 0,
        }
    }

    /// The next bit, or `None` once the stream is exhausted.
    pub fn next_bit(&mut self) -> io::Result<Option<bool>> {
        match self.inner.read_bit() {
            Ok(bit) => {
                self.bits_read += 1;
                Ok(Some(bit))
            }
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Consumes the rest of the current byte, reporting whether it was all zero.
    pub fn rest_of_byte_is_zero(&mut self) -> io::Result<bool> {
        let mut zero = true;
        while !self.inner.byte_aligned() {
            zero &= !self.inner.read_bit()?;
            self.bits_read += 1;
        }
        Ok(zero)
    }

    /// Whether the stream has no bytes past the current one.
    pub fn at_end(&mut self) -> io::Result<bool> {
        self.rest_of_byte_is_zero()?;
        Ok(self.next_bit()?.is_none())
    }

    /// Bytes pulled from the underlying stream so far.
    pub fn bytes_read(&self) -> u64 {
        (self.bits_read + 7) / 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> Code {
        s.parse().unwrap()
    }

    #[test]
    fn packs_msb_first_with_zero_padding() {
        let mut writer = BitWriter::new(Vec::new());
        for c in &["1", "01", "111", "0000", "1"] {
            writer.push_code(&code(c)).unwrap();
        }
        let (bytes, written) = writer.finish().unwrap();
        assert_eq!(bytes, vec![0b1011_1100, 0b0010_0000]);
        assert_eq!(written, 2);
    }

    #[test]
    fn whole_bytes_get_no_padding_byte() {
        let mut writer = BitWriter::new(Vec::new());
        writer.push_code(&code("10101010")).unwrap();
        let (bytes, written) = writer.finish().unwrap();
        assert_eq!(bytes, vec![0b1010_1010]);
        assert_eq!(written, 1);
    }

    #[test]
    fn nothing_pushed_writes_nothing() {
        let (bytes, written) = BitWriter::new(Vec::new()).finish().unwrap();
        assert!(bytes.is_empty());
        assert_eq!(written, 0);
    }

    #[test]
    fn reads_back_in_packing_order() {
        let mut reader = BitReader::new(&[0b1011_0000u8, 0b1000_0000][..]);
        let mut bits = Vec::new();
        for _ in 0..5 {
            bits.push(reader.next_bit().unwrap().unwrap());
        }
        assert_eq!(bits, vec![true, false, true, true, false]);
        assert!(reader.rest_of_byte_is_zero().unwrap());
        assert_eq!(reader.bytes_read(), 1);
        assert!(!reader.at_end().unwrap());
        assert_eq!(reader.bytes_read(), 2);
    }

    #[test]
    fn detects_nonzero_tail_and_exhaustion() {
        let mut reader = BitReader::new(&[0b1000_0001u8][..]);
        assert_eq!(reader.next_bit().unwrap(), Some(true));
        assert!(!reader.rest_of_byte_is_zero().unwrap());
        assert!(reader.rest_of_byte_is_zero().unwrap());
        assert_eq!(reader.next_bit().unwrap(), None);
        assert!(reader.at_end().unwrap());
        assert_eq!(reader.bytes_read(), 1);
    }

    #[test]
    fn reader_and_writer_agree_on_bit_order() {
        let mut writer = BitWriter::new(Vec::new());
        writer.push_code(&code("1101001")).unwrap();
        writer.push_code(&code("011")).unwrap();
        let (bytes, _) = writer.finish().unwrap();

        let mut reader = BitReader::new(&bytes[..]);
        let mut text = String::new();
        for _ in 0..10 {
            let bit = reader.next_bit().unwrap().unwrap();
            text.push(if bit { '1' } else { '0' });
        }
        assert_eq!(text, "1101001011");
        assert!(reader.at_end().unwrap());
    }
}
