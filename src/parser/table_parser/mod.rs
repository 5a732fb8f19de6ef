pub(crate) mod parser;
mod writer;

pub use parser::parse_dfa;
pub use parser::parse_dfa_file;
pub use parser::parse_nfa;
pub use parser::parse_nfa_file;
pub use writer::write_dfa;
pub use writer::write_nfa;
