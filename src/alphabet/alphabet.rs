use indexmap::IndexSet;

/// An ordered set of input symbols. Insertion order is the canonical column
/// order for transition tables and for the order in which the subset
/// construction expands symbols.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Alphabet {
    symbols: IndexSet<char>,
}

impl Alphabet {
    pub fn new() -> Self {
        Self {
            symbols: IndexSet::new(),
        }
    }

    /// Returns `false` (and leaves the alphabet unchanged) if `symbol` is
    /// already present.
    pub fn insert(&mut self, symbol: char) -> bool {
        self.symbols.insert(symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.symbols.contains(&symbol)
    }

    pub fn index_of(&self, symbol: char) -> Option<usize> {
        self.symbols.get_index_of(&symbol)
    }

    pub fn symbol_at(&self, idx: usize) -> Option<char> {
        self.symbols.get_index(idx).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols.iter().copied()
    }

    /// Whether `c` may be used as an alphabet symbol in the table format:
    /// printable, non-whitespace ASCII, and none of the characters the format
    /// reserves for cells.
    pub fn is_valid_symbol(c: char) -> bool {
        c.is_ascii_graphic() && !matches!(c, '#' | '[' | ']' | ',')
    }
}

impl FromIterator<char> for Alphabet {
    /// Duplicates are dropped, keeping the first occurrence.
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self {
            symbols: iter.into_iter().collect(),
        }
    }
}
