pub mod alphabet;
pub mod dfa;
pub mod error_handling;
pub mod input;
pub mod nfa;
pub mod parser;

const VERSION: &str = "0.0.1";

pub fn version() -> &'static str {
    VERSION
}
