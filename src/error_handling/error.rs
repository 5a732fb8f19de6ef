use regex_syntax::ast;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("line {line}: {kind}")]
    Format { line: usize, kind: FormatErrorKind },
    #[error("symbol {symbol:?} at position {position} is not in the alphabet")]
    SymbolDomain { symbol: char, position: usize },
    #[error("transition {from} --{}--> {to} leaves the state range [0, {num_states})", symbol_label(.symbol))]
    InvalidTransition {
        from: usize,
        symbol: Option<char>,
        to: usize,
        num_states: usize,
    },
    #[error("state {state} is out of range [0, {num_states})")]
    StateOutOfRange { state: usize, num_states: usize },
    #[error("state {state} has {actual} transition columns but the alphabet has {expected}")]
    TableShapeMismatch {
        state: usize,
        expected: usize,
        actual: usize,
    },
    #[error("failed to parse pattern: {0}")]
    PatternParsingError(ast::Error),
    #[error("unsupported pattern construct: {0}")]
    UnsupportedAstNodeType(&'static str),
    #[error("pattern is empty")]
    EmptyPattern,
    #[error("pattern symbol {0:?} cannot be used as an alphabet symbol")]
    InvalidPatternSymbol(char),
    #[error("alphabet symbol {0:?} cannot be written to a table under the current markers")]
    UnwritableSymbol(char),
    #[error("failed to parse YAML: {0}")]
    YamlParsingError(serde_yaml::Error),
    #[error("invalid config value for key `{0}`")]
    InvalidConfig(&'static str),
    #[error("input contains non-ASCII byte 0x{0:02x}")]
    NonAsciiCharacter(u8),
    #[error("I/O error: {0}")]
    IOError(std::io::Error),
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum FormatErrorKind {
    #[error("the file is empty")]
    EmptyFile,
    #[error("the {0} section is missing")]
    MissingSection(&'static str),
    #[error("unexpected section after the accepting states")]
    UnexpectedSection,
    #[error("duplicate alphabet symbol {0:?}")]
    DuplicateSymbol(char),
    #[error("invalid alphabet symbol {0:?}")]
    InvalidSymbol(String),
    #[error("epsilon marker appears more than once")]
    DuplicateEpsilon,
    #[error("a DFA alphabet cannot contain the epsilon marker")]
    EpsilonInDfa,
    #[error("row has {actual} columns but the alphabet has {expected}")]
    ColumnCountMismatch { expected: usize, actual: usize },
    #[error("malformed transition cell {0:?}")]
    InvalidCell(String),
    #[error("malformed state id {0:?}")]
    InvalidStateId(String),
    #[error("state {state} is out of range [1, {num_states}]")]
    StateOutOfRange { state: usize, num_states: usize },
    #[error("DFA cell {0:?} must name exactly one state")]
    NondeterministicCell(String),
    #[error("transition table exceeds the limit of {max} states")]
    TooManyStates { max: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

fn symbol_label(symbol: &Option<char>) -> String {
    match symbol {
        Some(c) => c.to_string(),
        None => "ε".to_string(),
    }
}
