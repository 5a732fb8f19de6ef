use crate::alphabet::Alphabet;
use crate::error_handling::Error::{IOError, InvalidConfig, YamlParsingError};
use crate::error_handling::Result;
use indexmap::IndexMap;
use serde_yaml::Value;
use std::io::Read;
use std::path::Path;

/// The literals printed for a simulation verdict.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub accept: String,
    pub reject: String,
}

impl Verdict {
    pub fn get(&self, accepted: bool) -> &str {
        match accepted {
            true => &self.accept,
            false => &self.reject,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolkitConfig {
    epsilon: char,
    empty_cell: char,
    max_states: Option<usize>,
    skip_whitespace: bool,
    verdict: Verdict,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            epsilon: Self::DEFAULT_EPSILON,
            empty_cell: Self::DEFAULT_EMPTY_CELL,
            max_states: Some(Self::DEFAULT_MAX_STATES),
            skip_whitespace: true,
            verdict: Verdict {
                accept: "accept".to_string(),
                reject: "reject".to_string(),
            },
        }
    }
}

impl ToolkitConfig {
    pub fn get_epsilon(&self) -> char {
        self.epsilon
    }

    pub fn get_empty_cell(&self) -> char {
        self.empty_cell
    }

    /// Upper bound on transition table rows accepted by the loader.
    pub fn get_max_states(&self) -> Option<usize> {
        self.max_states
    }

    pub fn skip_whitespace(&self) -> bool {
        self.skip_whitespace
    }

    pub fn get_verdict(&self) -> &Verdict {
        &self.verdict
    }
}

impl ToolkitConfig {
    const DEFAULT_EPSILON: char = '$';
    const DEFAULT_EMPTY_CELL: char = '#';
    const DEFAULT_MAX_STATES: usize = 100_000;

    const EPSILON_KEY: &'static str = "epsilon";
    const EMPTY_CELL_KEY: &'static str = "empty_cell";
    const MAX_STATES_KEY: &'static str = "max_states";
    const SKIP_WHITESPACE_KEY: &'static str = "skip_whitespace";
    const VERDICT_KEY: &'static str = "verdict";
    const ACCEPT_KEY: &'static str = "accept";
    const REJECT_KEY: &'static str = "reject";

    pub fn parse_from_file<P: AsRef<Path>>(yaml_file_path: P) -> Result<ToolkitConfig> {
        match std::fs::File::open(yaml_file_path) {
            Ok(mut file) => {
                let mut contents = String::new();
                if let Err(e) = file.read_to_string(&mut contents) {
                    return Err(IOError(e));
                }
                Self::parse_from_str(contents.as_str())
            }
            Err(e) => Err(IOError(e)),
        }
    }

    pub fn parse_from_str(yaml_content: &str) -> Result<ToolkitConfig> {
        if yaml_content.trim().is_empty() {
            return Ok(Self::default());
        }
        match Self::load_kv_pairs_from_yaml_content(yaml_content) {
            Ok(kv_pairs) => Self::load_from_kv_pairs(kv_pairs),
            Err(e) => Err(YamlParsingError(e)),
        }
    }

    fn load_kv_pairs_from_yaml_content(
        yaml_content: &str,
    ) -> serde_yaml::Result<IndexMap<String, Value>> {
        let kv_map_result: IndexMap<String, Value> = serde_yaml::from_str(yaml_content)?;
        Ok(kv_map_result)
    }

    fn load_from_kv_pairs(kv_pairs: IndexMap<String, Value>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = kv_pairs.get(Self::EPSILON_KEY) {
            config.epsilon = Self::parse_marker(value, Self::EPSILON_KEY)?;
        }
        if let Some(value) = kv_pairs.get(Self::EMPTY_CELL_KEY) {
            config.empty_cell = Self::parse_marker(value, Self::EMPTY_CELL_KEY)?;
        }
        if config.epsilon == config.empty_cell {
            return Err(InvalidConfig(Self::EMPTY_CELL_KEY));
        }

        // Handle the state cap, 0 disables it
        if let Some(value) = kv_pairs.get(Self::MAX_STATES_KEY) {
            match value.as_u64() {
                Some(0) => config.max_states = None,
                Some(max) => {
                    config.max_states =
                        Some(usize::try_from(max).map_err(|_| InvalidConfig(Self::MAX_STATES_KEY))?)
                }
                None => return Err(InvalidConfig(Self::MAX_STATES_KEY)),
            }
        }

        if let Some(value) = kv_pairs.get(Self::SKIP_WHITESPACE_KEY) {
            config.skip_whitespace = value
                .as_bool()
                .ok_or(InvalidConfig(Self::SKIP_WHITESPACE_KEY))?;
        }

        // Handle verdict literals
        if let Some(value) = kv_pairs.get(Self::VERDICT_KEY) {
            let Value::Mapping(map) = value else {
                return Err(InvalidConfig(Self::VERDICT_KEY));
            };
            for (key, value) in map {
                match (key, value) {
                    (Value::String(name), Value::String(literal))
                        if name == Self::ACCEPT_KEY && !literal.is_empty() =>
                    {
                        config.verdict.accept = literal.clone();
                    }
                    (Value::String(name), Value::String(literal))
                        if name == Self::REJECT_KEY && !literal.is_empty() =>
                    {
                        config.verdict.reject = literal.clone();
                    }
                    _ => return Err(InvalidConfig(Self::VERDICT_KEY)),
                }
            }
        }

        Ok(config)
    }

    // Markers share the character class of alphabet symbols so they can sit
    // in the same whitespace-separated lines. Digits would read as state ids.
    fn parse_marker(value: &Value, key: &'static str) -> Result<char> {
        let Value::String(s) = value else {
            return Err(InvalidConfig(key));
        };
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None)
                if c.is_ascii_graphic()
                    && !c.is_ascii_digit()
                    && !matches!(c, '[' | ']' | ',') =>
            {
                Ok(c)
            }
            _ => Err(InvalidConfig(key)),
        }
    }
}

impl ToolkitConfig {
    /// Whether `c` can be an alphabet symbol under this configuration.
    pub fn is_symbol(&self, c: char) -> bool {
        Alphabet::is_valid_symbol(c) && c != self.epsilon && c != self.empty_cell
    }
}
