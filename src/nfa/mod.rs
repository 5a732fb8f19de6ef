mod builder;
pub(crate) mod nfa;

pub use crate::nfa::nfa::State;
pub use crate::nfa::nfa::NFA;
