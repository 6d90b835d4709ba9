use {
    crate::{
        error::{Error, Result},
        frequency::ByteFrequency,
        tree::HuffmanTree,
    },
    arr_macro::arr,
    bitvec::prelude::*,
    std::{fmt, str::FromStr},
};

/// One prefix code: the root-to-leaf path of a byte, `false` for left.
pub struct Code(BitBox<Msb0, u8>);

impl Code {
    fn from_path(path: &BitVec<Msb0, u8>) -> Self {
        Code(path.clone().into_boxed_bitslice())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The bits in transmission order.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len() <= other.len() && self.bits().zip(other.bits()).all(|(a, b)| a == b)
    }

    /// Parses a string of ASCII `'0'`/`'1'`, reporting the first other byte.
    pub(crate) fn from_ascii(text: &[u8]) -> Result<Self, u8> {
        let mut bits = BitVec::<Msb0, u8>::new();
        for &c in text {
            match c {
                b'0' => bits.push(false),
                b'1' => bits.push(true),
                other => return Err(other),
            }
        }
        Ok(Code(bits.into_boxed_bitslice()))
    }

    pub(crate) fn to_ascii(&self) -> Vec<u8> {
        self.bits().map(|bit| if bit { b'1' } else { b'0' }).collect()
    }
}

impl FromStr for Code {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Code::from_ascii(s.as_bytes()).map_err(|c| {
            Error::encoding(format!(
                "bit string {:?} contains {:?}, expected only '0' and '1'",
                s, c as char
            ))
        })
    }
}

impl PartialEq for Code {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.bits().eq(other.bits())
    }
}

impl Eq for Code {}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self)
    }
}

/// Maps each byte value to its prefix code.
pub struct CodeTable {
    codings: [Option<Code>; u8::MAX as usize + 1],
}

impl Default for CodeTable {
    fn default() -> Self {
        CodeTable {
            // uuuuggggghhhh (Option<Code> is not Copy)
            codings: arr![None; 256],
        }
    }
}

impl fmt::Debug for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl CodeTable {
    /// Runs the tree builder; an empty frequency table gives an empty code table.
    pub fn from_frequencies(byte_frequency: &ByteFrequency) -> Self {
        match HuffmanTree::build(byte_frequency) {
            Some(tree) => CodeTable::of(&tree),
            None => CodeTable::default(),
        }
    }

    pub fn of(tree: &HuffmanTree) -> Self {
        let mut this = CodeTable::default();
        let mut path = BitVec::<Msb0, u8>::new();
        // A lone leaf is its own root, and the empty path would decode nothing.
        if tree.is_leaf() {
            path.push(false);
        }
        this.apply(tree, &mut path);
        log::trace!("Code table: {:?}", this);
        this
    }

    fn apply(&mut self, tree: &HuffmanTree, path: &mut BitVec<Msb0, u8>) {
        match tree {
            &HuffmanTree::Leaf { byte, .. } => {
                let coding = &mut self.codings[byte as usize];
                debug_assert!(coding.is_none());
                *coding = Some(Code::from_path(path));
            }
            HuffmanTree::Node { left, right, .. } => {
                path.push(false);
                self.apply(left, path);
                path.pop();
                path.push(true);
                self.apply(right, path);
                path.pop();
            }
        }
    }

    pub fn get(&self, byte: u8) -> Option<&Code> {
        self.codings[byte as usize].as_ref()
    }

    /// The code for a byte that must have one.
    pub fn code(&self, byte: u8) -> Result<&Code> {
        self.get(byte)
            .ok_or_else(|| Error::encoding(format!("byte {:#04x} has no code", byte)))
    }

    /// Sets the code for `byte`, returning the one it replaces.
    pub fn insert(&mut self, byte: u8, code: Code) -> Option<Code> {
        self.codings[byte as usize].replace(code)
    }

    /// Entries in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codings
            .iter()
            .enumerate()
            .filter_map(|(byte, coding)| coding.as_ref().map(|code| (byte as u8, code)))
    }

    pub fn len(&self) -> usize {
        self.codings.iter().filter(|coding| coding.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.codings.iter().all(Option::is_none)
    }

    /// Sum of frequency times code length: the payload size in bits.
    pub fn encoded_bits(&self, byte_frequency: &ByteFrequency) -> usize {
        byte_frequency
            .iter()
            .map(|(byte, frequency)| frequency * self.get(byte).map_or(0, Code::len))
            .sum()
    }
}
