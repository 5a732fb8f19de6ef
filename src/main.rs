use fsm_toolkit::dfa::{DfaSimulator, DFA};
use fsm_toolkit::error_handling::Error::IOError;
use fsm_toolkit::error_handling::Result;
use fsm_toolkit::input::BufferedFileStream;
use fsm_toolkit::nfa::NFA;
use fsm_toolkit::parser::table_parser;
use fsm_toolkit::parser::ToolkitConfig;

use clap::{Arg, ArgMatches, Command};
use std::process::ExitCode;
use std::rc::Rc;

fn cli() -> Command {
    let output_arg = Arg::new("output")
        .short('o')
        .long("output")
        .help("Write the table to this file instead of stdout")
        .value_name("FILE");

    Command::new("fsm-toolkit")
        .version(fsm_toolkit::version())
        .about("Builds, converts and runs finite automata")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to the YAML config file")
                .value_name("FILE")
                .global(true),
        )
        .subcommand(
            Command::new("build")
                .about("Build the substring NFA of a literal pattern")
                .arg(
                    Arg::new("pattern")
                        .help("Literal pattern")
                        .required(true)
                        .value_name("PATTERN"),
                )
                .arg(output_arg.clone()),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert an NFA table into a DFA table")
                .arg(
                    Arg::new("nfa")
                        .help("Path to the NFA table")
                        .required(true)
                        .value_name("NFA_FILE"),
                )
                .arg(output_arg),
        )
        .subcommand(
            Command::new("run")
                .about("Run a DFA table on an input file")
                .arg(
                    Arg::new("dfa")
                        .help("Path to the DFA table")
                        .required(true)
                        .value_name("DFA_FILE"),
                )
                .arg(input_arg()),
        )
        .subcommand(
            Command::new("run-nfa")
                .about("Convert an NFA table and run it on an input file")
                .arg(
                    Arg::new("nfa")
                        .help("Path to the NFA table")
                        .required(true)
                        .value_name("NFA_FILE"),
                )
                .arg(input_arg()),
        )
        .subcommand(
            Command::new("match")
                .about("Check whether an input file contains a literal pattern")
                .arg(
                    Arg::new("pattern")
                        .help("Literal pattern")
                        .required(true)
                        .value_name("PATTERN"),
                )
                .arg(input_arg())
                .arg(
                    Arg::new("nfa-out")
                        .long("nfa-out")
                        .help("Also write the intermediate NFA table")
                        .value_name("FILE"),
                )
                .arg(
                    Arg::new("dfa-out")
                        .long("dfa-out")
                        .help("Also write the converted DFA table")
                        .value_name("FILE"),
                ),
        )
}

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Path to the input file")
        .required(true)
        .value_name("INPUT_FILE")
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .expect("required arguments are enforced by clap")
}

fn emit(table: &str, output: Option<&String>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, table).map_err(IOError)?;
            eprintln!("[INFO] Wrote {}", path);
        }
        None => print!("{}", table),
    }
    Ok(())
}

fn simulate_file(dfa: DFA, input_path: &str, config: &ToolkitConfig) -> Result<()> {
    let mut input_stream = BufferedFileStream::new(input_path)?;
    let mut dfa_simulator = DfaSimulator::new(Rc::new(dfa));
    let accepted = dfa_simulator.run(&mut input_stream, config.skip_whitespace())?;
    println!("{}", config.get_verdict().get(accepted));
    Ok(())
}

fn run(matches: &ArgMatches) -> Result<()> {
    let config = match matches.get_one::<String>("config") {
        Some(path) => ToolkitConfig::parse_from_file(path)?,
        None => ToolkitConfig::default(),
    };

    match matches.subcommand() {
        Some(("build", sub_matches)) => {
            let nfa = NFA::from_pattern(required(sub_matches, "pattern"))?;
            emit(
                &table_parser::write_nfa(&nfa, &config)?,
                sub_matches.get_one("output"),
            )
        }
        Some(("convert", sub_matches)) => {
            let nfa = table_parser::parse_nfa_file(required(sub_matches, "nfa"), &config)?;
            let dfa = DFA::from_nfa(&nfa)?;
            emit(
                &table_parser::write_dfa(&dfa, &config)?,
                sub_matches.get_one("output"),
            )
        }
        Some(("run", sub_matches)) => {
            let dfa = table_parser::parse_dfa_file(required(sub_matches, "dfa"), &config)?;
            simulate_file(dfa, required(sub_matches, "input"), &config)
        }
        Some(("run-nfa", sub_matches)) => {
            let nfa = table_parser::parse_nfa_file(required(sub_matches, "nfa"), &config)?;
            let dfa = DFA::from_nfa(&nfa)?;
            simulate_file(dfa, required(sub_matches, "input"), &config)
        }
        Some(("match", sub_matches)) => {
            let nfa = NFA::from_pattern(required(sub_matches, "pattern"))?;
            if let Some(path) = sub_matches.get_one::<String>("nfa-out") {
                emit(&table_parser::write_nfa(&nfa, &config)?, Some(path))?;
            }
            let dfa = DFA::from_nfa(&nfa)?;
            if let Some(path) = sub_matches.get_one::<String>("dfa-out") {
                emit(&table_parser::write_dfa(&dfa, &config)?, Some(path))?;
            }
            simulate_file(dfa, required(sub_matches, "input"), &config)
        }
        _ => unreachable!("subcommand_required is set"),
    }
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            ExitCode::FAILURE
        }
    }
}
