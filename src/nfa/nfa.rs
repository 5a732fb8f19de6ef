use crate::alphabet::Alphabet;
use crate::error_handling::Error::{
    InvalidTransition, StateOutOfRange, SymbolDomain, TableShapeMismatch,
};
use crate::error_handling::Result;
use std::collections::VecDeque;
use std::fmt::Debug;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct State(pub usize);

/// A nondeterministic finite automaton with epsilon moves.
///
/// States are dense ids in `[0, num_states)`. Every target set is kept
/// sorted and free of duplicates; an empty set means "no move".
#[derive(Clone)]
pub struct NFA {
    alphabet: Alphabet,
    start: State,
    accept: Vec<bool>,
    transitions: Vec<Vec<Vec<State>>>, // from_state -> symbol index -> to_states
    epsilon_transitions: Vec<Vec<State>>,
}

impl Debug for NFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "NFA( start: {:?}, accept: {:?}, alphabet: {:?}, transitions: {{\n",
            self.start,
            self.accept_states().collect::<Vec<_>>(),
            self.alphabet.iter().collect::<Vec<_>>()
        )?;

        for (state_idx, row) in self.transitions.iter().enumerate() {
            write!(f, "\t{:?}:\n", State(state_idx))?;
            for (symbol, to_states) in self.alphabet.iter().zip(row.iter()) {
                if !to_states.is_empty() {
                    write!(f, "\t\t{:?} -> {:?}\n", symbol, to_states)?;
                }
            }
            if !self.epsilon_transitions[state_idx].is_empty() {
                write!(
                    f,
                    "\t\tepsilon -> {:?}\n",
                    self.epsilon_transitions[state_idx]
                )?;
            }
        }

        write!(f, "}} )")
    }
}

impl NFA {
    pub const START_STATE: State = State(0);

    /// Creates an NFA with `num_states` states and no transitions. The start
    /// state is `State(0)` and no state accepts.
    pub fn new(alphabet: Alphabet, num_states: usize) -> Self {
        let width = alphabet.len();
        NFA {
            alphabet,
            start: Self::START_STATE,
            accept: vec![false; num_states],
            transitions: vec![vec![Vec::new(); width]; num_states],
            epsilon_transitions: vec![Vec::new(); num_states],
        }
    }

    /// Assembles an NFA from raw tables and checks that every state id it
    /// mentions is in range.
    pub fn from_table(
        alphabet: Alphabet,
        transitions: Vec<Vec<Vec<State>>>,
        mut epsilon_transitions: Vec<Vec<State>>,
        accept_states: &[State],
        start: State,
    ) -> Result<Self> {
        let num_states = transitions.len();
        if epsilon_transitions.len() < num_states {
            epsilon_transitions.resize(num_states, Vec::new());
        }
        let mut nfa = NFA {
            alphabet,
            start,
            accept: vec![false; num_states],
            transitions,
            epsilon_transitions,
        };
        nfa.validate()?;
        for row in nfa.transitions.iter_mut() {
            for to_states in row.iter_mut() {
                to_states.sort();
                to_states.dedup();
            }
        }
        for to_states in nfa.epsilon_transitions.iter_mut() {
            to_states.sort();
            to_states.dedup();
        }
        for state in accept_states {
            nfa.add_accept_state(*state)?;
        }
        Ok(nfa)
    }

    pub fn add_state(&mut self) -> State {
        let state = State(self.transitions.len());
        self.accept.push(false);
        self.transitions.push(vec![Vec::new(); self.alphabet.len()]);
        self.epsilon_transitions.push(Vec::new());
        state
    }

    /// Adds `from --symbol--> to`. A symbol not yet in the alphabet is
    /// appended to it.
    pub fn add_transition(&mut self, from: State, symbol: char, to: State) -> Result<()> {
        self.check_transition(from, Some(symbol), to)?;
        let symbol_idx = match self.alphabet.index_of(symbol) {
            Some(idx) => idx,
            None => {
                self.alphabet.insert(symbol);
                for row in self.transitions.iter_mut() {
                    row.push(Vec::new());
                }
                self.alphabet.len() - 1
            }
        };
        insert_sorted(&mut self.transitions[from.0][symbol_idx], to);
        Ok(())
    }

    pub fn add_epsilon_transition(&mut self, from: State, to: State) -> Result<()> {
        self.check_transition(from, None, to)?;
        insert_sorted(&mut self.epsilon_transitions[from.0], to);
        Ok(())
    }

    pub fn add_accept_state(&mut self, state: State) -> Result<()> {
        self.check_state(state)?;
        self.accept[state.0] = true;
        Ok(())
    }

    pub fn set_start(&mut self, state: State) -> Result<()> {
        self.check_state(state)?;
        self.start = state;
        Ok(())
    }

    pub fn get_alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn get_start(&self) -> State {
        self.start
    }

    pub fn num_states(&self) -> usize {
        self.transitions.len()
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

    /// Targets of `state` on the symbol at `symbol_idx` in the alphabet.
    pub fn get_transitions(&self, state: State, symbol_idx: usize) -> &[State] {
        self.transitions
            .get(state.0)
            .and_then(|row| row.get(symbol_idx))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn get_epsilon_transitions(&self, state: State) -> &[State] {
        self.epsilon_transitions
            .get(state.0)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_epsilon_transitions(&self) -> bool {
        self.epsilon_transitions.iter().any(|to| !to.is_empty())
    }

    /// Checks the structural invariants: table shape matches the alphabet and
    /// every referenced state is in `[0, num_states)`.
    pub fn validate(&self) -> Result<()> {
        let num_states = self.num_states();
        self.check_state(self.start)?;
        if self.epsilon_transitions.len() > num_states {
            return Err(StateOutOfRange {
                state: num_states,
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
            for (symbol, to_states) in self.alphabet.iter().zip(row.iter()) {
                for to in to_states {
                    self.check_transition(State(from), Some(symbol), *to)?;
                }
            }
            for to in self.get_epsilon_transitions(State(from)) {
                self.check_transition(State(from), None, *to)?;
            }
        }
        Ok(())
    }

    fn check_state(&self, state: State) -> Result<()> {
        if state.0 >= self.num_states() {
            return Err(StateOutOfRange {
                state: state.0,
                num_states: self.num_states(),
            });
        }
        Ok(())
    }

    fn check_transition(&self, from: State, symbol: Option<char>, to: State) -> Result<()> {
        let num_states = self.num_states();
        if from.0 >= num_states || to.0 >= num_states {
            return Err(InvalidTransition {
                from: from.0,
                symbol,
                to: to.0,
                num_states,
            });
        }
        Ok(())
    }
}

impl NFA {
    /// The smallest superset of `states` closed under epsilon moves, sorted by
    /// state id. The sorted form is the canonical key the subset construction
    /// uses for DFA states.
    pub fn epsilon_closure(&self, states: &[State]) -> Result<Vec<State>> {
        let mut in_closure = vec![false; self.num_states()];
        let mut worklist = VecDeque::new();

        for state in states {
            self.check_state(*state)?;
            if !in_closure[state.0] {
                in_closure[state.0] = true;
                worklist.push_back(*state);
            }
        }

        while let Some(state) = worklist.pop_front() {
            for to in &self.epsilon_transitions[state.0] {
                if !in_closure[to.0] {
                    in_closure[to.0] = true;
                    worklist.push_back(*to);
                }
            }
        }

        Ok(collect_states(&in_closure))
    }

    /// The union of the moves of `states` on the symbol at `symbol_idx`,
    /// sorted by state id. Epsilon moves are not followed.
    pub fn move_on_symbol(&self, states: &[State], symbol_idx: usize) -> Vec<State> {
        let mut reached = vec![false; self.num_states()];
        for state in states {
            for to in self.get_transitions(*state, symbol_idx) {
                reached[to.0] = true;
            }
        }
        collect_states(&reached)
    }

    /// Decides membership by tracking every state the NFA can be in, without
    /// building a DFA.
    pub fn accepts(&self, input: &str) -> Result<bool> {
        let mut current = self.epsilon_closure(&[self.start])?;
        for (position, symbol) in input.chars().enumerate() {
            let symbol_idx = self
                .alphabet
                .index_of(symbol)
                .ok_or(SymbolDomain { symbol, position })?;
            let moved = self.move_on_symbol(&current, symbol_idx);
            current = self.epsilon_closure(&moved)?;
        }
        Ok(current.iter().any(|state| self.is_accept_state(*state)))
    }
}

fn insert_sorted(to_states: &mut Vec<State>, state: State) {
    if let Err(pos) = to_states.binary_search(&state) {
        to_states.insert(pos, state);
    }
}

fn collect_states(marked: &[bool]) -> Vec<State> {
    marked
        .iter()
        .enumerate()
        .filter(|(_, marked)| **marked)
        .map(|(idx, _)| State(idx))
        .collect()
}
