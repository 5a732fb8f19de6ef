use crate::alphabet::Alphabet;
use crate::dfa::{self, DFA};
use crate::error_handling::Error::{Format, IOError};
use crate::error_handling::{Error, FormatErrorKind, Result};
use crate::nfa::{self, NFA};
use crate::parser::ToolkitConfig;
use std::path::Path;

// A run of non-blank lines, each paired with its 1-based line number.
struct Section<'a> {
    lines: Vec<(usize, &'a str)>,
}

impl<'a> Section<'a> {
    fn first_line(&self) -> usize {
        self.lines.first().map_or(0, |(line, _)| *line)
    }

    fn tokens(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        self.lines
            .iter()
            .flat_map(|&(line, text)| text.split_whitespace().map(move |token| (line, token)))
    }
}

enum Column {
    Symbol,
    Epsilon,
}

// The three sections of an automaton table, after section-level checks.
struct Layout<'a> {
    alphabet: Alphabet,
    columns: Vec<Column>,
    rows: &'a Section<'a>,
    accepting: Option<&'a Section<'a>>,
}

fn format_error(line: usize, kind: FormatErrorKind) -> Error {
    Format { line, kind }
}

fn split_sections(text: &str) -> Vec<Section<'_>> {
    let mut sections = Vec::new();
    let mut current: Vec<(usize, &str)> = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                sections.push(Section {
                    lines: std::mem::take(&mut current),
                });
            }
            continue;
        }
        current.push((idx + 1, line));
    }
    if !current.is_empty() {
        sections.push(Section { lines: current });
    }
    sections
}

fn parse_layout<'a>(
    sections: &'a [Section<'a>],
    config: &ToolkitConfig,
    allow_epsilon: bool,
) -> Result<Layout<'a>> {
    let Some(alphabet_section) = sections.first() else {
        return Err(format_error(0, FormatErrorKind::EmptyFile));
    };
    let Some(rows) = sections.get(1) else {
        return Err(format_error(
            0,
            FormatErrorKind::MissingSection("transition table"),
        ));
    };
    if let Some(extra) = sections.get(3) {
        return Err(format_error(
            extra.first_line(),
            FormatErrorKind::UnexpectedSection,
        ));
    }

    let mut alphabet = Alphabet::new();
    let mut columns = Vec::new();
    for (line, token) in alphabet_section.tokens() {
        let mut chars = token.chars();
        let symbol = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(format_error(
                    line,
                    FormatErrorKind::InvalidSymbol(token.to_string()),
                ))
            }
        };

        if symbol == config.get_epsilon() {
            if !allow_epsilon {
                return Err(format_error(line, FormatErrorKind::EpsilonInDfa));
            }
            if columns.iter().any(|column| matches!(column, Column::Epsilon)) {
                return Err(format_error(line, FormatErrorKind::DuplicateEpsilon));
            }
            columns.push(Column::Epsilon);
            continue;
        }
        if !config.is_symbol(symbol) {
            return Err(format_error(
                line,
                FormatErrorKind::InvalidSymbol(token.to_string()),
            ));
        }
        if !alphabet.insert(symbol) {
            return Err(format_error(line, FormatErrorKind::DuplicateSymbol(symbol)));
        }
        columns.push(Column::Symbol);
    }

    if let Some(max) = config.get_max_states() {
        if let Some((line, _)) = rows.lines.get(max) {
            return Err(format_error(*line, FormatErrorKind::TooManyStates { max }));
        }
    }

    Ok(Layout {
        alphabet,
        columns,
        rows,
        accepting: sections.get(2),
    })
}

// External ids are 1-based.
fn parse_state_id(token: &str, line: usize, num_states: usize) -> Result<usize> {
    let id: usize = token
        .trim()
        .parse()
        .map_err(|_| format_error(line, FormatErrorKind::InvalidStateId(token.to_string())))?;
    if id == 0 || id > num_states {
        return Err(format_error(
            line,
            FormatErrorKind::StateOutOfRange {
                state: id,
                num_states,
            },
        ));
    }
    Ok(id - 1)
}

fn parse_nfa_cell(
    cell: &str,
    line: usize,
    num_states: usize,
    config: &ToolkitConfig,
) -> Result<Vec<nfa::State>> {
    let mut cell_chars = cell.chars();
    if let (Some(c), None) = (cell_chars.next(), cell_chars.next()) {
        if c == config.get_empty_cell() {
            return Ok(Vec::new());
        }
    }

    if let Some(inner) = cell.strip_prefix('[') {
        let Some(inner) = inner.strip_suffix(']') else {
            return Err(format_error(
                line,
                FormatErrorKind::InvalidCell(cell.to_string()),
            ));
        };
        if inner.trim().is_empty() {
            return Ok(Vec::new());
        }
        return inner
            .split(',')
            .map(|token| parse_state_id(token, line, num_states).map(nfa::State))
            .collect();
    }

    if cell.chars().all(|c| c.is_ascii_digit()) {
        return Ok(vec![nfa::State(parse_state_id(cell, line, num_states)?)]);
    }
    Err(format_error(
        line,
        FormatErrorKind::InvalidCell(cell.to_string()),
    ))
}

fn parse_dfa_cell(
    cell: &str,
    line: usize,
    num_states: usize,
    config: &ToolkitConfig,
) -> Result<dfa::State> {
    let is_empty_cell = cell.len() == 1 && cell.starts_with(config.get_empty_cell());
    if is_empty_cell || cell.starts_with('[') {
        return Err(format_error(
            line,
            FormatErrorKind::NondeterministicCell(cell.to_string()),
        ));
    }
    Ok(dfa::State(parse_state_id(cell, line, num_states)?))
}

fn parse_accepting(
    accepting: Option<&Section<'_>>,
    num_states: usize,
) -> Result<Vec<usize>> {
    let mut accept_states = Vec::new();
    if let Some(section) = accepting {
        for (line, token) in section.tokens() {
            accept_states.push(parse_state_id(token, line, num_states)?);
        }
    }
    if accept_states.is_empty() {
        eprintln!("[WARN] The accepting states section is empty; the automaton accepts nothing");
    }
    Ok(accept_states)
}

fn check_row_width(line: usize, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(format_error(
            line,
            FormatErrorKind::ColumnCountMismatch { expected, actual },
        ));
    }
    Ok(())
}

/// Parses an NFA table. The first row is the start state.
pub fn parse_nfa(text: &str, config: &ToolkitConfig) -> Result<NFA> {
    let sections = split_sections(text);
    let layout = parse_layout(&sections, config, true)?;
    let num_states = layout.rows.lines.len();

    let mut transitions = Vec::with_capacity(num_states);
    let mut epsilon_transitions = Vec::with_capacity(num_states);
    for (line, row) in &layout.rows.lines {
        let cells: Vec<&str> = row.split_whitespace().collect();
        check_row_width(*line, layout.columns.len(), cells.len())?;

        let mut symbol_row = Vec::with_capacity(layout.alphabet.len());
        let mut epsilon_row = Vec::new();
        for (column, cell) in layout.columns.iter().zip(cells) {
            let to_states = parse_nfa_cell(cell, *line, num_states, config)?;
            match column {
                Column::Symbol => symbol_row.push(to_states),
                Column::Epsilon => epsilon_row = to_states,
            }
        }
        transitions.push(symbol_row);
        epsilon_transitions.push(epsilon_row);
    }

    let accept_states: Vec<nfa::State> = parse_accepting(layout.accepting, num_states)?
        .into_iter()
        .map(nfa::State)
        .collect();

    NFA::from_table(
        layout.alphabet,
        transitions,
        epsilon_transitions,
        &accept_states,
        NFA::START_STATE,
    )
}

/// Parses a DFA table. Every cell must name exactly one state; the first row
/// is the start state.
pub fn parse_dfa(text: &str, config: &ToolkitConfig) -> Result<DFA> {
    let sections = split_sections(text);
    let layout = parse_layout(&sections, config, false)?;
    let num_states = layout.rows.lines.len();

    let mut transitions = Vec::with_capacity(num_states);
    for (line, row) in &layout.rows.lines {
        let cells: Vec<&str> = row.split_whitespace().collect();
        check_row_width(*line, layout.columns.len(), cells.len())?;
        let row = cells
            .into_iter()
            .map(|cell| parse_dfa_cell(cell, *line, num_states, config))
            .collect::<Result<Vec<_>>>()?;
        transitions.push(row);
    }

    let accept_states: Vec<dfa::State> = parse_accepting(layout.accepting, num_states)?
        .into_iter()
        .map(dfa::State)
        .collect();

    DFA::from_table(layout.alphabet, transitions, &accept_states)
}

pub fn parse_nfa_file<P: AsRef<Path>>(path: P, config: &ToolkitConfig) -> Result<NFA> {
    let text = std::fs::read_to_string(path).map_err(IOError)?;
    parse_nfa(&text, config)
}

pub fn parse_dfa_file<P: AsRef<Path>>(path: P, config: &ToolkitConfig) -> Result<DFA> {
    let text = std::fs::read_to_string(path).map_err(IOError)?;
    parse_dfa(&text, config)
}
