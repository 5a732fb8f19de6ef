pub(crate) mod dfa;
mod subset_construction;

pub use dfa::DfaSimulator;
pub use dfa::State;
pub use dfa::DFA;
pub use subset_construction::convert;
