use crate::alphabet::Alphabet;
use crate::error_handling::Error::{
    InvalidTransition, StateOutOfRange, SymbolDomain, TableShapeMismatch,
};
use crate::error_handling::Result;
use crate::input::InputStream;
use crate::nfa;
use std::fmt::Debug;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct State(pub usize);

/// A deterministic finite automaton with a total transition function: every
/// state has exactly one target for every alphabet symbol.
#[derive(Clone, PartialEq, Eq)]
pub struct DFA {
    alphabet: Alphabet,
    start: State,
    accept: Vec<bool>,
    transitions: Vec<Vec<State>>, // from_state -> symbol index -> to_state
    sink: Option<State>,
    dfa_to_nfa_state_mapping: Vec<Option<Rc<Vec<nfa::State>>>>, // None for the sink or loaded tables
}

impl Debug for DFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DFA( start: {:?}, accept: {:?}, sink: {:?}, transitions: {{\n",
            self.start,
            self.accept_states().collect::<Vec<_>>(),
            self.sink
        )?;

        for (state_idx, row) in self.transitions.iter().enumerate() {
            match self.nfa_states_of(State(state_idx)) {
                Some(nfa_states) => write!(f, "\t{:?} {:?}:\n", State(state_idx), nfa_states)?,
                None => write!(f, "\t{:?}:\n", State(state_idx))?,
            }
            for (symbol, to_state) in self.alphabet.iter().zip(row.iter()) {
                write!(f, "\t\t{:?} -> {:?}\n", symbol, to_state)?;
            }
        }

        write!(f, "}} )")
    }
}

impl DFA {
    pub const START_STATE: State = State(0);

    /// Assembles a DFA from a full transition table. Row `i` holds the targets
    /// of state `i` in alphabet order; the start state is `State(0)`.
    pub fn from_table(
        alphabet: Alphabet,
        transitions: Vec<Vec<State>>,
        accept_states: &[State],
    ) -> Result<Self> {
        let num_states = transitions.len();
        let mapping = vec![None; num_states];
        let mut dfa = Self::from_parts(alphabet, transitions, vec![false; num_states], None, mapping);
        dfa.validate()?;
        for state in accept_states {
            if state.0 >= num_states {
                return Err(StateOutOfRange {
                    state: state.0,
                    num_states,
                });
            }
            dfa.accept[state.0] = true;
        }
        Ok(dfa)
    }

    pub(crate) fn from_parts(
        alphabet: Alphabet,
        transitions: Vec<Vec<State>>,
        accept: Vec<bool>,
        sink: Option<State>,
        dfa_to_nfa_state_mapping: Vec<Option<Rc<Vec<nfa::State>>>>,
    ) -> Self {
        DFA {
            alphabet,
            start: Self::START_STATE,
            accept,
            transitions,
            sink,
            dfa_to_nfa_state_mapping,
        }
    }

    fn validate(&self) -> Result<()> {
        let num_states = self.num_states();
        if self.start.0 >= num_states {
            return Err(StateOutOfRange {
                state: self.start.0,
                num_states,
            });
        }
        for (from, row) in self.transitions.iter().enumerate() {
            if row.len() != self.alphabet.len() {
                return Err(TableShapeMismatch {
                    state: from,
                    expected: self.alphabet.len(),
                    actual: row.len(),
                });
            }
            for (symbol, to) in self.alphabet.iter().zip(row.iter()) {
                if to.0 >= num_states {
                    return Err(InvalidTransition {
                        from,
                        symbol: Some(symbol),
                        to: to.0,
                        num_states,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn get_alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn get_root(&self) -> State {
        self.start
    }

    pub fn num_states(&self) -> usize {
        self.transitions.len()
    }

    /// The sink created by subset construction, if one was needed.
    pub fn get_sink(&self) -> Option<State> {
        self.sink
    }

    pub fn is_accept_state(&self, state: State) -> bool {
        self.accept.get(state.0).copied().unwrap_or(false)
    }

    pub fn accept_states(&self) -> impl Iterator<Item = State> + '_ {
        self.accept
            .iter()
            .enumerate()
            .filter(|(_, accepting)| **accepting)
            .map(|(idx, _)| State(idx))
    }

    /// The row of targets of `state`, in alphabet order.
    pub fn get_transitions(&self, state: State) -> &[State] {
        self.transitions
            .get(state.0)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// `None` when `symbol` is not in the alphabet or `state` does not exist.
    pub fn get_next_state(&self, state: State, symbol: char) -> Option<State> {
        let symbol_idx = self.alphabet.index_of(symbol)?;
        self.transitions.get(state.0)?.get(symbol_idx).copied()
    }

    /// The NFA subset a state was built from. `None` for the sink and for
    /// states of a DFA that was loaded from a table.
    pub fn nfa_states_of(&self, state: State) -> Option<&[nfa::State]> {
        self.dfa_to_nfa_state_mapping
            .get(state.0)?
            .as_deref()
            .map(Vec::as_slice)
    }

    pub fn simulate(&self, input: &str) -> Result<bool> {
        self.simulate_symbols(input.chars())
    }

    pub fn simulate_symbols<I: IntoIterator<Item = char>>(&self, symbols: I) -> Result<bool> {
        let mut current_state = self.start;
        for (position, symbol) in symbols.into_iter().enumerate() {
            current_state = self
                .get_next_state(current_state, symbol)
                .ok_or(SymbolDomain { symbol, position })?;
        }
        Ok(self.is_accept_state(current_state))
    }
}

/// Feeds a DFA one symbol at a time.
pub struct DfaSimulator {
    dfa: Rc<DFA>,
    current_state: State,
    num_consumed: usize,
}

impl DfaSimulator {
    pub fn new(dfa: Rc<DFA>) -> Self {
        DfaSimulator {
            current_state: dfa.get_root(),
            dfa,
            num_consumed: 0,
        }
    }

    pub fn reset_simulation(&mut self) {
        self.current_state = self.dfa.get_root();
        self.num_consumed = 0;
    }

    pub fn get_current_state(&self) -> State {
        self.current_state
    }

    pub fn is_accepting(&self) -> bool {
        self.dfa.is_accept_state(self.current_state)
    }

    // A symbol outside the alphabet leaves the simulator where it was.
    pub fn simulate_single_char(&mut self, input: char) -> Result<State> {
        let next_state = self
            .dfa
            .get_next_state(self.current_state, input)
            .ok_or(SymbolDomain {
                symbol: input,
                position: self.num_consumed,
            })?;
        self.current_state = next_state;
        self.num_consumed += 1;
        Ok(next_state)
    }

    /// Restarts the simulation and consumes `input_stream` to its end.
    /// With `skip_whitespace`, ASCII whitespace is dropped before it reaches
    /// the DFA and does not count towards reported positions.
    pub fn run(
        &mut self,
        input_stream: &mut dyn InputStream,
        skip_whitespace: bool,
    ) -> Result<bool> {
        self.reset_simulation();
        while let Some(c) = input_stream.get_next_char()? {
            if skip_whitespace && c.is_ascii_whitespace() {
                continue;
            }
            self.simulate_single_char(c)?;
        }
        Ok(self.is_accepting())
    }
}
