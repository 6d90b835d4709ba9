use {
    crate::frequency::ByteFrequency,
    std::{cmp, collections::BinaryHeap},
};

/// A Huffman coding tree. Leaves carry the byte they stand for;
/// every node carries the summed frequency of the leaves below it.
#[derive(Debug)]
pub enum HuffmanTree {
    Leaf {
        byte: u8,
        frequency: usize,
    },
    Node {
        left: Box<HuffmanTree>,
        right: Box<HuffmanTree>,
        frequency: usize,
    },
}

/// A subtree waiting in the merge queue.
///
/// `order` is the tie-break between equal frequencies: leaves are queued in
/// ascending byte order and every merged node gets the next free number,
/// so the tree built for a given frequency table is always the same.
#[derive(Debug)]
struct Pending {
    frequency: usize,
    order: usize,
    tree: HuffmanTree,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == cmp::Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    // Reversed: BinaryHeap is a max-heap and we want the smallest first.
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        (other.frequency, other.order).cmp(&(self.frequency, self.order))
    }
}

impl HuffmanTree {
    /// Builds the tree by repeatedly merging the two least frequent subtrees.
    ///
    /// Returns `None` when no byte has a nonzero count.
    pub fn build(byte_frequency: &ByteFrequency) -> Option<Self> {
        let mut queue: BinaryHeap<Pending> = byte_frequency
            .iter()
            .enumerate()
            .map(|(order, (byte, frequency))| Pending {
                frequency,
                order,
                tree: HuffmanTree::Leaf { byte, frequency },
            })
            .collect();
        let mut next_order = queue.len();

        while queue.len() > 1 {
            let (left, right) = match (queue.pop(), queue.pop()) {
                (Some(left), Some(right)) => (left, right),
                _ => unreachable!("queue holds at least two subtrees"),
            };

            let frequency = left.frequency + right.frequency;
            queue.push(Pending {
                frequency,
                order: next_order,
                tree: HuffmanTree::Node {
                    left: Box::new(left.tree),
                    right: Box::new(right.tree),
                    frequency,
                },
            });
            next_order += 1;
        }

        let tree = queue.pop().map(|pending| pending.tree);
        log::trace!("Huffman tree: {:?}", tree);
        tree
    }

    pub fn frequency(&self) -> usize {
        match *self {
            HuffmanTree::Leaf { frequency, .. } | HuffmanTree::Node { frequency, .. } => frequency,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanTree::Leaf { .. })
    }
}
