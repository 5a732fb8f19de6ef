use crate::alphabet::Alphabet;
use crate::error_handling::Error::{EmptyPattern, InvalidPatternSymbol};
use crate::error_handling::Result;
use crate::nfa::nfa::{State, NFA};
use crate::parser::PatternParser;

impl NFA {
    /// Builds an NFA recognizing every string over the pattern's symbols that
    /// contains `pattern` as a substring.
    ///
    /// The automaton has `len + 1` states: state 0 loops on every symbol and
    /// also guesses that a match starts on `pattern[0]`, state `i` advances on
    /// `pattern[i]`, and the last state loops on every symbol and accepts.
    /// The alphabet holds the distinct pattern symbols in first-occurrence
    /// order. Symbols must satisfy [`Alphabet::is_valid_symbol`], so
    /// whitespace and table-format characters are rejected.
    pub fn from_literal(pattern: &[char]) -> Result<NFA> {
        if pattern.is_empty() {
            return Err(EmptyPattern);
        }
        if let Some(symbol) = pattern.iter().find(|c| !Alphabet::is_valid_symbol(**c)) {
            return Err(InvalidPatternSymbol(*symbol));
        }

        let alphabet: Alphabet = pattern.iter().copied().collect();
        let len = pattern.len();
        let accept = State(len);
        let mut nfa = NFA::new(alphabet.clone(), len + 1);

        for symbol in alphabet.iter() {
            nfa.add_transition(NFA::START_STATE, symbol, NFA::START_STATE)?;
        }
        for (idx, symbol) in pattern.iter().enumerate() {
            nfa.add_transition(State(idx), *symbol, State(idx + 1))?;
        }
        for symbol in alphabet.iter() {
            nfa.add_transition(accept, symbol, accept)?;
        }
        nfa.add_accept_state(accept)?;

        Ok(nfa)
    }

    /// Parses `pattern` as a literal (escapes allowed, operators rejected) and
    /// builds the substring-recognizing NFA for it.
    pub fn from_pattern(pattern: &str) -> Result<NFA> {
        let mut parser = PatternParser::new();
        let literal = parser.parse_literal(pattern)?;
        Self::from_literal(&literal)
    }
}
