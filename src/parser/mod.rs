pub(crate) mod regex_parser;

mod config_parser;
pub mod table_parser;

pub use config_parser::parser::ToolkitConfig;
pub use config_parser::parser::Verdict;
pub use regex_parser::parser::PatternParser;
