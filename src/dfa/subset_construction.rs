use crate::dfa::dfa::{State, DFA};
use crate::error_handling::Result;
use crate::nfa::{self, NFA};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

/// Converts `nfa` into an equivalent DFA. Shorthand for [`DFA::from_nfa`].
pub fn convert(nfa: &NFA) -> Result<DFA> {
    DFA::from_nfa(nfa)
}

impl DFA {
    /// Subset construction.
    ///
    /// DFA states are numbered in breadth-first discovery order starting from
    /// the epsilon closure of the NFA start state, expanding symbols in
    /// alphabet order, so the output depends only on the input NFA. Moves that
    /// reach no NFA state go to a single non-accepting sink, which is created
    /// the first time it is needed and loops to itself on every symbol.
    pub fn from_nfa(nfa: &NFA) -> Result<DFA> {
        nfa.validate()?;
        let alphabet = nfa.get_alphabet().clone();
        let num_symbols = alphabet.len();

        // variables to create the DFA
        let mut dfa_transitions: Vec<Vec<State>> = Vec::new();
        let mut dfa_to_nfa_state_mapping: Vec<Option<Rc<Vec<nfa::State>>>> = Vec::new();
        let mut sink: Option<State> = None;

        // local variables to drive the construction
        let mut l_worklist: VecDeque<State> = VecDeque::new();
        let mut l_nfa_states_to_dfa_mapping: HashMap<Rc<Vec<nfa::State>>, State> = HashMap::new();

        let start_epi_closure = nfa.epsilon_closure(&[nfa.get_start()])?;
        if start_epi_closure.is_empty() {
            let sink_state = DFA::START_STATE;
            return Ok(DFA::from_parts(
                alphabet,
                vec![vec![sink_state; num_symbols]],
                vec![false],
                Some(sink_state),
                vec![None],
            ));
        }

        let start_epi_closure = Rc::new(start_epi_closure);
        dfa_transitions.push(Vec::new());
        dfa_to_nfa_state_mapping.push(Some(start_epi_closure.clone()));
        l_nfa_states_to_dfa_mapping.insert(start_epi_closure, DFA::START_STATE);
        l_worklist.push_back(DFA::START_STATE);

        while let Some(dfa_state) = l_worklist.pop_front() {
            // Only subset states are ever queued, never the sink.
            let Some(nfa_states) = dfa_to_nfa_state_mapping[dfa_state.0].clone() else {
                continue;
            };

            let mut row = Vec::with_capacity(num_symbols);
            for symbol_idx in 0..num_symbols {
                let moved = nfa.move_on_symbol(&nfa_states, symbol_idx);
                let destination_nfa_states = nfa.epsilon_closure(&moved)?;

                let destination_dfa_state = if destination_nfa_states.is_empty() {
                    match sink {
                        Some(sink_state) => sink_state,
                        None => {
                            let sink_state = State(dfa_transitions.len());
                            dfa_transitions.push(vec![sink_state; num_symbols]);
                            dfa_to_nfa_state_mapping.push(None);
                            sink = Some(sink_state);
                            sink_state
                        }
                    }
                } else {
                    let destination_nfa_states = Rc::new(destination_nfa_states);
                    match l_nfa_states_to_dfa_mapping.get(&destination_nfa_states) {
                        Some(existing) => *existing,
                        None => {
                            let new_state = State(dfa_transitions.len());
                            dfa_transitions.push(Vec::new());
                            dfa_to_nfa_state_mapping.push(Some(destination_nfa_states.clone()));
                            l_nfa_states_to_dfa_mapping.insert(destination_nfa_states, new_state);
                            l_worklist.push_back(new_state);
                            new_state
                        }
                    }
                };
                row.push(destination_dfa_state);
            }
            dfa_transitions[dfa_state.0] = row;
        }

        let dfa_accept: Vec<bool> = dfa_to_nfa_state_mapping
            .iter()
            .map(|nfa_states| {
                nfa_states.as_ref().map_or(false, |nfa_states| {
                    nfa_states.iter().any(|state| nfa.is_accept_state(*state))
                })
            })
            .collect();

        Ok(DFA::from_parts(
            alphabet,
            dfa_transitions,
            dfa_accept,
            sink,
            dfa_to_nfa_state_mapping,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use crate::error_handling::Error;

    fn alphabet(symbols: &str) -> Alphabet {
        symbols.chars().collect()
    }

    fn all_strings(alphabet: &Alphabet, max_len: usize) -> Vec<String> {
        let mut strings = vec![String::new()];
        let mut frontier = vec![String::new()];
        for _ in 0..max_len {
            let mut next = Vec::new();
            for prefix in &frontier {
                for symbol in alphabet.iter() {
                    let mut s = prefix.clone();
                    s.push(symbol);
                    next.push(s);
                }
            }
            strings.extend(next.iter().cloned());
            frontier = next;
        }
        strings
    }

    fn assert_total(dfa: &DFA) {
        for idx in 0..dfa.num_states() {
            let row = dfa.get_transitions(State(idx));
            assert_eq!(row.len(), dfa.get_alphabet().len());
            for to_state in row {
                assert!(to_state.0 < dfa.num_states());
            }
        }
    }

    fn assert_equivalent(nfa: &NFA, dfa: &DFA, max_len: usize) -> Result<()> {
        for input in all_strings(nfa.get_alphabet(), max_len) {
            assert_eq!(dfa.simulate(&input)?, nfa.accepts(&input)?, "input {:?}", input);
        }
        Ok(())
    }

    // (a|ab) with epsilon moves: 0 -ε-> 1, 0 -ε-> 3, 1 -a-> 2, 3 -a-> 4 -b-> 5
    fn create_union_nfa() -> Result<NFA> {
        let mut nfa = NFA::new(alphabet("ab"), 6);
        nfa.add_epsilon_transition(NFA::START_STATE, nfa::State(1))?;
        nfa.add_epsilon_transition(NFA::START_STATE, nfa::State(3))?;
        nfa.add_transition(nfa::State(1), 'a', nfa::State(2))?;
        nfa.add_transition(nfa::State(3), 'a', nfa::State(4))?;
        nfa.add_transition(nfa::State(4), 'b', nfa::State(5))?;
        nfa.add_accept_state(nfa::State(2))?;
        nfa.add_accept_state(nfa::State(5))?;
        Ok(nfa)
    }

    // c* followed by "ab": 0 -c-> 0, 0 -ε-> 1, 1 -a-> 2, 2 -b-> 3
    fn create_star_nfa() -> Result<NFA> {
        let mut nfa = NFA::new(alphabet("abc"), 4);
        nfa.add_transition(NFA::START_STATE, 'c', NFA::START_STATE)?;
        nfa.add_epsilon_transition(NFA::START_STATE, nfa::State(1))?;
        nfa.add_transition(nfa::State(1), 'a', nfa::State(2))?;
        nfa.add_transition(nfa::State(2), 'b', nfa::State(3))?;
        nfa.add_accept_state(nfa::State(3))?;
        Ok(nfa)
    }

    #[test]
    fn test_union_nfa_to_dfa() -> Result<()> {
        let nfa = create_union_nfa()?;
        let dfa = DFA::from_nfa(&nfa)?;
        println!("{:?}", dfa);

        // {0,1,3} -a-> {2,4} -b-> {5}, everything else to the sink
        assert_eq!(dfa.num_states(), 4);
        assert_eq!(dfa.get_root(), State(0));
        assert_eq!(
            dfa.nfa_states_of(State(0)),
            Some(&[NFA::START_STATE, nfa::State(1), nfa::State(3)][..])
        );
        assert_eq!(dfa.get_transitions(State(0)), &[State(1), State(2)]);
        assert_eq!(dfa.get_sink(), Some(State(2)));
        assert_eq!(dfa.nfa_states_of(State(2)), None);
        assert_eq!(
            dfa.nfa_states_of(State(1)),
            Some(&[nfa::State(2), nfa::State(4)][..])
        );
        assert_eq!(dfa.get_transitions(State(1)), &[State(2), State(3)]);
        assert_eq!(dfa.get_transitions(State(2)), &[State(2), State(2)]);
        assert_eq!(dfa.get_transitions(State(3)), &[State(2), State(2)]);
        assert_eq!(
            dfa.accept_states().collect::<Vec<_>>(),
            vec![State(1), State(3)]
        );

        assert_eq!(dfa.simulate("a")?, true);
        assert_eq!(dfa.simulate("ab")?, true);
        assert_eq!(dfa.simulate("aa")?, false);
        assert_eq!(dfa.simulate("abb")?, false);
        assert_eq!(dfa.simulate("")?, false);
        assert_total(&dfa);
        assert_equivalent(&nfa, &dfa, 6)
    }

    #[test]
    fn test_star_nfa_to_dfa() -> Result<()> {
        let nfa = create_star_nfa()?;
        let dfa = DFA::from_nfa(&nfa)?;

        assert_eq!(dfa.simulate("ab")?, true);
        assert_eq!(dfa.simulate("cab")?, true);
        assert_eq!(dfa.simulate("ccccab")?, true);
        assert_eq!(dfa.simulate("c")?, false);
        assert_eq!(dfa.simulate("abc")?, false);
        assert_eq!(dfa.simulate("")?, false);
        assert_total(&dfa);
        assert_equivalent(&nfa, &dfa, 7)
    }

    #[test]
    fn test_accepting_start_closure() -> Result<()> {
        // 0 -ε-> 1 (accepting), 1 -a-> 1
        let mut nfa = NFA::new(alphabet("a"), 2);
        nfa.add_epsilon_transition(NFA::START_STATE, nfa::State(1))?;
        nfa.add_transition(nfa::State(1), 'a', nfa::State(1))?;
        nfa.add_accept_state(nfa::State(1))?;

        let dfa = convert(&nfa)?;
        assert_eq!(dfa.num_states(), 2);
        assert_eq!(dfa.get_sink(), None);
        assert_eq!(dfa.simulate("")?, true);
        assert_eq!(dfa.simulate("aaa")?, true);
        Ok(())
    }

    #[test]
    fn test_dead_start_goes_to_sink() -> Result<()> {
        // No symbol moves at all: every non-empty input falls into the sink.
        let mut nfa = NFA::new(alphabet("ab"), 2);
        nfa.add_epsilon_transition(NFA::START_STATE, nfa::State(1))?;
        nfa.add_accept_state(nfa::State(1))?;

        let dfa = DFA::from_nfa(&nfa)?;
        assert_eq!(dfa.num_states(), 2);
        let sink = dfa.get_sink().unwrap();
        assert_eq!(sink, State(1));
        assert!(!dfa.is_accept_state(sink));
        assert_eq!(dfa.get_transitions(sink), &[sink, sink]);
        assert_total(&dfa);

        assert_eq!(dfa.simulate("")?, true);
        for input in ["a", "b", "ab", "bbbb", "abab"] {
            assert_eq!(dfa.simulate(input)?, false);
        }
        Ok(())
    }

    #[test]
    fn test_sink_absorbs() -> Result<()> {
        let nfa = create_union_nfa()?;
        let dfa = DFA::from_nfa(&nfa)?;
        let sink = dfa.get_sink().unwrap();

        for prefix in ["b", "aa", "abb"] {
            let mut state = dfa.get_root();
            for symbol in prefix.chars() {
                state = dfa.get_next_state(state, symbol).unwrap();
            }
            assert_eq!(state, sink);
            for suffix in all_strings(dfa.get_alphabet(), 4) {
                let mut state = state;
                for symbol in suffix.chars() {
                    state = dfa.get_next_state(state, symbol).unwrap();
                }
                assert_eq!(state, sink);
                assert!(!dfa.is_accept_state(state));
            }
        }
        Ok(())
    }

    #[test]
    fn test_construction_is_deterministic() -> Result<()> {
        let nfa = create_star_nfa()?;
        let first = DFA::from_nfa(&nfa)?;
        let second = DFA::from_nfa(&nfa.clone())?;
        assert_eq!(first, second);
        assert_eq!(first.get_root(), State(0));
        Ok(())
    }

    #[test]
    fn test_nfa_without_states() {
        let nfa = NFA::new(alphabet("a"), 0);
        assert!(matches!(
            DFA::from_nfa(&nfa),
            Err(Error::StateOutOfRange {
                state: 0,
                num_states: 0
            })
        ));
    }

    #[test]
    fn test_alphabet_without_symbols() -> Result<()> {
        let mut nfa = NFA::new(Alphabet::new(), 1);
        nfa.add_accept_state(NFA::START_STATE)?;
        let dfa = DFA::from_nfa(&nfa)?;
        assert_eq!(dfa.num_states(), 1);
        assert_eq!(dfa.simulate("")?, true);
        assert!(dfa.simulate("a").is_err());
        Ok(())
    }
}
