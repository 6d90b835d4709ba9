//! The archive layout and the compress/decompress drivers.
//!
//! An archive is a metadata section followed by the packed payload:
//!
//! ```text
//! original_size        u64 LE
//! entry_count          u64 LE
//! entry_count times, ascending by byte:
//!     byte             u8
//!     code_length      u64 LE
//!     code             code_length ASCII '0' / '1'
//! payload              MSB-first packed codes, zero padded to a byte
//! ```

use {
    crate::{
        bits::{BitReader, BitWriter},
        coding::{Code, CodeTable},
        decoder::Decoder,
        error::{Error, Result},
        frequency::ByteFrequency,
    },
    std::{
        convert::TryInto,
        fs::{self, File},
        io::{self, prelude::*, BufReader, BufWriter},
        path::Path,
    },
};

/// Longest code a tree over 256 leaves can produce.
const MAX_CODE_LENGTH: u64 = u8::MAX as u64;

/// Byte accounting for one compress or decompress call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Uncompressed bytes read (compress) or emitted (decompress).
    pub original_size: u64,
    /// Payload bytes written (compress) or consumed (decompress).
    pub compressed_size: u64,
    /// Metadata bytes written or consumed.
    pub extra_size: u64,
}

/// The metadata section.
#[derive(Debug)]
pub struct Header {
    pub original_size: u64,
    pub table: CodeTable,
}

impl Header {
    /// Writes the section and returns its length in bytes.
    pub fn write<W: Write>(&self, output: &mut W) -> io::Result<u64> {
        let mut written = 0;
        written += write_u64(output, self.original_size)?;
        written += write_u64(output, self.table.len() as u64)?;
        for (byte, code) in self.table.iter() {
            output.write_all(&[byte])?;
            written += 1;
            written += write_u64(output, code.len() as u64)?;
            let ascii = code.to_ascii();
            output.write_all(&ascii)?;
            written += ascii.len() as u64;
        }
        Ok(written)
    }

    /// Reads and validates the section, returning it with its length in bytes.
    pub fn read<R: Read>(input: &mut R) -> Result<(Self, u64)> {
        let original_size = read_u64(input)?;
        let entry_count = read_u64(input)?;
        let mut consumed = 16;

        if entry_count > 256 {
            return Err(Error::format(format!(
                "{} code table entries, at most 256 byte values exist",
                entry_count
            )));
        }
        if entry_count == 0 && original_size > 0 {
            return Err(Error::format(format!(
                "{} bytes declared but the code table is empty",
                original_size
            )));
        }

        let mut table = CodeTable::default();
        let mut previous: Option<u8> = None;
        for _ in 0..entry_count {
            let mut byte = [0u8; 1];
            input
                .read_exact(&mut byte)
                .map_err(|err| Error::truncated(err, "code table"))?;
            let byte = byte[0];
            if previous.map_or(false, |previous| byte <= previous) {
                return Err(Error::format(format!(
                    "code table entry {:#04x} is out of order",
                    byte
                )));
            }
            previous = Some(byte);

            let length = read_u64(input)?;
            if length == 0 || length > MAX_CODE_LENGTH {
                return Err(Error::format(format!(
                    "code for byte {:#04x} has length {}",
                    byte, length
                )));
            }
            let mut ascii = vec![0u8; length as usize];
            input
                .read_exact(&mut ascii)
                .map_err(|err| Error::truncated(err, "code table"))?;
            let code = Code::from_ascii(&ascii).map_err(|c| {
                Error::format(format!(
                    "code for byte {:#04x} contains {:?}",
                    byte, c as char
                ))
            })?;
            table.insert(byte, code);
            consumed += 1 + 8 + length;
        }

        log::trace!("Code table: {:?}", table);
        Ok((
            Header {
                original_size,
                table,
            },
            consumed,
        ))
    }
}

fn write_u64<W: Write>(output: &mut W, value: u64) -> io::Result<u64> {
    output.write_all(&value.to_le_bytes())?;
    Ok(8)
}

fn read_u64<R: Read>(input: &mut R) -> Result<u64> {
    let mut bytes = [0u8; 8];
    input
        .read_exact(&mut bytes)
        .map_err(|err| Error::truncated(err, "metadata"))?;
    Ok(u64::from_le_bytes(bytes))
}

/// Compresses everything `input` yields into `output`.
pub fn compress<R: Read, W: Write>(mut input: R, output: W) -> Result<Stats> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;
    encode(&bytes, output)
}

fn encode<W: Write>(bytes: &[u8], mut output: W) -> Result<Stats> {
    let byte_frequency = ByteFrequency::of(bytes);
    log::trace!("Byte frequency: {:?}", byte_frequency);

    let header = Header {
        original_size: bytes.len().try_into().map_err(|_| {
            Error::encoding(format!("{} bytes do not fit the size field", bytes.len()))
        })?,
        table: CodeTable::from_frequencies(&byte_frequency),
    };
    let extra_size = header.write(&mut output)?;

    let mut packer = BitWriter::new(output);
    for &byte in bytes {
        packer.push_code(header.table.code(byte)?)?;
    }
    let (mut output, compressed_size) = packer.finish()?;
    output.flush()?;

    let stats = Stats {
        original_size: header.original_size,
        compressed_size,
        extra_size,
    };
    log::debug!("Compressed: {:?}", stats);
    Ok(stats)
}

/// Restores the original bytes of the archive in `input` into `output`.
pub fn decompress<R: Read, W: Write>(input: R, mut output: W) -> Result<Stats> {
    let mut input = BufReader::new(input);
    let (header, extra_size) = Header::read(&mut input)?;
    let decoder = Decoder::new(&header.table)?;

    let mut bits = BitReader::new(input);
    decoder.decode(&mut bits, header.original_size, &mut output)?;
    output.flush()?;

    let stats = Stats {
        original_size: header.original_size,
        compressed_size: bits.bytes_read(),
        extra_size,
    };
    log::debug!("Decompressed: {:?}", stats);
    Ok(stats)
}

fn file_error(path: &Path) -> impl FnOnce(io::Error) -> Error + '_ {
    move |source| Error::File {
        path: path.to_owned(),
        source,
    }
}

/// Every I/O failure left after reading the input belongs to the output file.
fn blame_output(path: &Path) -> impl FnOnce(Error) -> Error + '_ {
    move |err| match err {
        Error::Io(source) => file_error(path)(source),
        other => other,
    }
}

/// Compresses the file at `input` into a new file at `output`.
pub fn compress_file(input: &Path, output: &Path) -> Result<Stats> {
    let bytes = fs::read(input).map_err(file_error(input))?;
    let sink = BufWriter::new(File::create(output).map_err(file_error(output))?);
    encode(&bytes, sink).map_err(blame_output(output))
}

/// Decompresses the archive at `input` into a new file at `output`.
pub fn decompress_file(input: &Path, output: &Path) -> Result<Stats> {
    let archive = fs::read(input).map_err(file_error(input))?;
    let sink = BufWriter::new(File::create(output).map_err(file_error(output))?);
    decompress(&archive[..], sink).map_err(blame_output(output))
}
