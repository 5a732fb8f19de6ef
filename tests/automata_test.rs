use fsm_toolkit::alphabet::Alphabet;
use fsm_toolkit::dfa::{self, DfaSimulator, DFA};
use fsm_toolkit::error_handling::{Error, Result};
use fsm_toolkit::input::StrStream;
use fsm_toolkit::nfa::{self, NFA};

use std::rc::Rc;

fn all_strings(symbols: &[char], max_len: usize) -> Vec<String> {
    let mut strings = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..max_len {
        let mut next = Vec::new();
        for prefix in &frontier {
            for symbol in symbols {
                let mut s = prefix.clone();
                s.push(*symbol);
                next.push(s);
            }
        }
        strings.extend(next.iter().cloned());
        frontier = next;
    }
    strings
}

fn assert_same_language(nfa: &NFA, dfa: &DFA, max_len: usize) -> Result<()> {
    let symbols: Vec<char> = nfa.get_alphabet().iter().collect();
    for input in all_strings(&symbols, max_len) {
        assert_eq!(dfa.simulate(&input)?, nfa.accepts(&input)?, "input {:?}", input);
    }
    Ok(())
}

fn assert_total(dfa: &DFA) {
    for idx in 0..dfa.num_states() {
        let row = dfa.get_transitions(dfa::State(idx));
        assert_eq!(row.len(), dfa.get_alphabet().len());
        assert!(row.iter().all(|to| to.0 < dfa.num_states()));
    }
}

#[test]
fn test_repeated_symbol_pattern() -> Result<()> {
    let nfa = NFA::from_pattern("aa")?;
    assert_eq!(nfa.num_states(), 3);

    let dfa = DFA::from_nfa(&nfa)?;
    assert_total(&dfa);
    assert_eq!(dfa.simulate("aa")?, true);
    assert_eq!(dfa.simulate("a")?, false);
    assert_eq!(dfa.simulate("")?, false);
    assert_eq!(dfa.simulate("aaa")?, true);
    Ok(())
}

#[test]
fn test_two_symbol_pattern() -> Result<()> {
    let nfa = NFA::from_pattern("ab")?;
    let dfa = DFA::from_nfa(&nfa)?;
    assert_total(&dfa);
    assert_eq!(dfa.simulate("aab")?, true);
    assert_eq!(dfa.simulate("ba")?, false);
    assert_eq!(dfa.simulate("abab")?, true);
    assert_same_language(&nfa, &dfa, 7)
}

#[test]
fn test_symbol_outside_alphabet() -> Result<()> {
    let dfa = DFA::from_nfa(&NFA::from_pattern("ab")?)?;
    assert!(matches!(
        dfa.simulate("c"),
        Err(Error::SymbolDomain {
            symbol: 'c',
            position: 0
        })
    ));
    assert!(matches!(
        dfa.simulate("abxa"),
        Err(Error::SymbolDomain {
            symbol: 'x',
            position: 2
        })
    ));
    Ok(())
}

#[test]
fn test_dead_start_goes_to_sink() -> Result<()> {
    let alphabet: Alphabet = "ab".chars().collect();
    let mut nfa = NFA::new(alphabet, 2);
    nfa.add_transition(nfa::State(1), 'a', nfa::State(1))?;
    nfa.add_accept_state(nfa::State(1))?;

    let dfa = DFA::from_nfa(&nfa)?;
    assert_total(&dfa);
    assert_eq!(dfa.num_states(), 2);
    let sink = dfa.get_sink().unwrap();
    assert!(!dfa.is_accept_state(sink));

    assert_eq!(dfa.simulate("")?, false);
    for input in all_strings(&['a', 'b'], 5).iter().skip(1) {
        assert_eq!(dfa.simulate(input)?, false);
    }
    Ok(())
}

#[test]
fn test_epsilon_nfa_equivalence() -> Result<()> {
    // (a|b)*ab with epsilon moves between the loop and the suffix
    let alphabet: Alphabet = "ab".chars().collect();
    let mut nfa = NFA::new(alphabet, 4);
    nfa.add_transition(nfa::State(0), 'a', nfa::State(0))?;
    nfa.add_transition(nfa::State(0), 'b', nfa::State(0))?;
    nfa.add_epsilon_transition(nfa::State(0), nfa::State(1))?;
    nfa.add_transition(nfa::State(1), 'a', nfa::State(2))?;
    nfa.add_transition(nfa::State(2), 'b', nfa::State(3))?;
    nfa.add_accept_state(nfa::State(3))?;

    let dfa = DFA::from_nfa(&nfa)?;
    assert_total(&dfa);
    assert_eq!(dfa.get_sink(), None);
    assert_eq!(dfa.nfa_states_of(DFA::START_STATE), Some(&[nfa::State(0), nfa::State(1)][..]));
    assert!(dfa.simulate("bbab")?);
    assert!(!dfa.simulate("aba")?);
    assert_same_language(&nfa, &dfa, 8)
}

#[test]
fn test_sink_absorbs() -> Result<()> {
    let alphabet: Alphabet = "ab".chars().collect();
    let mut nfa = NFA::new(alphabet, 2);
    nfa.add_transition(nfa::State(0), 'a', nfa::State(1))?;
    nfa.add_accept_state(nfa::State(1))?;

    let dfa = DFA::from_nfa(&nfa)?;
    let sink = dfa.get_sink().unwrap();
    for symbol in ['a', 'b'] {
        assert_eq!(dfa.get_next_state(sink, symbol), Some(sink));
    }
    assert!(dfa.simulate("a")?);
    assert!(!dfa.simulate("ab")?);
    assert!(!dfa.simulate("b")?);
    assert_same_language(&nfa, &dfa, 5)
}

#[test]
fn test_conversion_is_deterministic() -> Result<()> {
    let nfa = NFA::from_pattern("abba")?;
    let first = DFA::from_nfa(&nfa)?;
    let second = fsm_toolkit::dfa::convert(&nfa)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_whitespace_pattern_rejected() -> Result<()> {
    // The stream driver drops whitespace, so it can never be a pattern symbol.
    assert!(matches!(
        NFA::from_pattern("a b"),
        Err(Error::InvalidPatternSymbol(' '))
    ));

    let dfa = DFA::from_nfa(&NFA::from_pattern("ab")?)?;
    let mut dfa_simulator = DfaSimulator::new(Rc::new(dfa));
    assert!(dfa_simulator.run(&mut StrStream::new("a b"), true)?);
    assert!(!dfa_simulator.run(&mut StrStream::new("b a"), true)?);
    Ok(())
}
