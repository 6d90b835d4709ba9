use {
    crate::{
        bits::BitReader,
        coding::{Code, CodeTable},
        error::{Error, Result},
    },
    std::io::{Read, Write},
};

#[derive(Debug, Copy, Clone)]
enum Slot {
    Branch([Option<usize>; 2]),
    Leaf(u8),
}

/// Decoding trie rebuilt from a code table, one arena slot per tree node.
#[derive(Debug)]
pub struct Decoder {
    slots: Vec<Slot>,
}

const ROOT: usize = 0;

impl Decoder {
    /// Rejects tables holding an empty code or a code that prefixes another.
    pub fn new(table: &CodeTable) -> Result<Self> {
        let mut this = Decoder {
            slots: vec![Slot::Branch([None, None])],
        };
        for (byte, code) in table.iter() {
            this.insert(byte, code)?;
        }
        Ok(this)
    }

    fn insert(&mut self, byte: u8, code: &Code) -> Result<()> {
        if code.is_empty() {
            return Err(Error::format(format!("byte {:#04x} has an empty code", byte)));
        }
        let clash = || {
            Error::format(format!(
                "code {} for byte {:#04x} is not prefix-free",
                code, byte
            ))
        };

        let mut at = ROOT;
        let last = code.len() - 1;
        for (depth, bit) in code.bits().enumerate() {
            let child = match self.slots[at] {
                Slot::Branch(children) => children[bit as usize],
                Slot::Leaf(_) => return Err(clash()),
            };
            match child {
                Some(_) if depth == last => return Err(clash()),
                Some(next) => at = next,
                None => {
                    let next = self.slots.len();
                    self.slots.push(if depth == last {
                        Slot::Leaf(byte)
                    } else {
                        Slot::Branch([None, None])
                    });
                    if let Slot::Branch(children) = &mut self.slots[at] {
                        children[bit as usize] = Some(next);
                    }
                    at = next;
                }
            }
        }
        Ok(())
    }

    /// Walks one code from the root and returns its byte.
    pub fn pull_byte<R: Read>(&self, bits: &mut BitReader<R>) -> Result<u8> {
        let mut at = ROOT;
        loop {
            match self.slots[at] {
                Slot::Leaf(byte) => return Ok(byte),
                Slot::Branch(children) => {
                    let bit = match bits.next_bit() {
                        Ok(Some(bit)) => bit,
                        Ok(None) => {
                            return Err(Error::format("payload ends before the declared byte count"))
                        }
                        Err(err) => return Err(Error::truncated(err, "payload")),
                    };
                    at = children[bit as usize]
                        .ok_or_else(|| Error::format("bit sequence in payload has no code"))?;
                }
            }
        }
    }

    /// Emits exactly `count` bytes, then checks the payload ends in zero padding.
    pub fn decode<R: Read, W: Write>(
        &self,
        bits: &mut BitReader<R>,
        count: u64,
        output: &mut W,
    ) -> Result<()> {
        let mut buf = Vec::with_capacity(8 * 1024);
        for _ in 0..count {
            buf.push(self.pull_byte(bits)?);
            if buf.len() == buf.capacity() {
                output.write_all(&buf)?;
                buf.clear();
            }
        }
        output.write_all(&buf)?;

        if !bits.rest_of_byte_is_zero()? {
            return Err(Error::format("padding bits are not zero"));
        }
        if !bits.at_end()? {
            return Err(Error::format("payload continues past the declared byte count"));
        }
        Ok(())
    }
}
