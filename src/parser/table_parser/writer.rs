use crate::alphabet::Alphabet;
use crate::dfa::{self, DFA};
use crate::error_handling::Error::UnwritableSymbol;
use crate::error_handling::Result;
use crate::nfa::{self, NFA};
use crate::parser::ToolkitConfig;

fn write_alphabet_line(alphabet: &Alphabet, config: &ToolkitConfig) -> Result<String> {
    let mut symbols = Vec::with_capacity(alphabet.len());
    for symbol in alphabet.iter() {
        if !config.is_symbol(symbol) {
            return Err(UnwritableSymbol(symbol));
        }
        symbols.push(symbol.to_string());
    }
    Ok(symbols.join(" "))
}

fn write_accepting_line(mut ids: Vec<usize>) -> String {
    ids.sort_unstable();
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

// The table format has no start marker: row 1 is the start state. States are
// renumbered by swapping the start with state 0, which is its own inverse.
struct Renumbering {
    start: usize,
}

impl Renumbering {
    fn row_of(&self, state: usize) -> usize {
        match state {
            s if s == self.start => 0,
            0 => self.start,
            s => s,
        }
    }

    fn external_id(&self, state: usize) -> usize {
        self.row_of(state) + 1
    }
}

fn write_nfa_cell(
    to_states: &[nfa::State],
    renumbering: &Renumbering,
    config: &ToolkitConfig,
) -> String {
    if to_states.is_empty() {
        return config.get_empty_cell().to_string();
    }
    let mut ids: Vec<usize> = to_states
        .iter()
        .map(|state| renumbering.external_id(state.0))
        .collect();
    ids.sort_unstable();
    let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    format!("[{}]", ids.join(","))
}

/// Serializes an NFA as an alphabet line ending in the epsilon column, a
/// blank line, one row per state, a blank line and the accepting states.
///
/// The start state is written as row 1. Fails with `UnwritableSymbol` when an
/// alphabet symbol would collide with the table syntax or a configured marker.
pub fn write_nfa(nfa: &NFA, config: &ToolkitConfig) -> Result<String> {
    let alphabet = nfa.get_alphabet();
    let renumbering = Renumbering {
        start: nfa.get_start().0,
    };
    let mut result = write_alphabet_line(alphabet, config)?;
    if !result.is_empty() {
        result += " ";
    }
    result.push(config.get_epsilon());
    result += "\n\n";

    for row_idx in 0..nfa.num_states() {
        // the swap maps rows back to states as well
        let state = nfa::State(renumbering.row_of(row_idx));
        let mut cells: Vec<String> = (0..alphabet.len())
            .map(|symbol_idx| {
                write_nfa_cell(nfa.get_transitions(state, symbol_idx), &renumbering, config)
            })
            .collect();
        cells.push(write_nfa_cell(
            nfa.get_epsilon_transitions(state),
            &renumbering,
            config,
        ));
        result += &cells.join(" ");
        result += "\n";
    }

    result += "\n";
    result += &write_accepting_line(
        nfa.accept_states()
            .map(|state| renumbering.external_id(state.0))
            .collect(),
    );
    result += "\n";
    Ok(result)
}

/// Serializes a DFA in the same layout as [`write_nfa`], with one target id
/// per cell and no epsilon column. Rows follow state id order.
pub fn write_dfa(dfa: &DFA, config: &ToolkitConfig) -> Result<String> {
    let mut result = write_alphabet_line(dfa.get_alphabet(), config)?;
    result += "\n\n";

    for state_idx in 0..dfa.num_states() {
        let row: Vec<String> = dfa
            .get_transitions(dfa::State(state_idx))
            .iter()
            .map(|to_state| (to_state.0 + 1).to_string())
            .collect();
        result += &row.join(" ");
        result += "\n";
    }

    result += "\n";
    result += &write_accepting_line(dfa.accept_states().map(|state| state.0 + 1).collect());
    result += "\n";
    Ok(result)
}
