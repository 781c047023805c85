use anagramer_core::RoundRules;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordSourceKind {
    Local,
    Remote,
}

impl FromStr for WordSourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(WordSourceKind::Local),
            "remote" => Ok(WordSourceKind::Remote),
            other => Err(format!("unknown word source '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionSourceKind {
    Http,
    Dict,
}

impl FromStr for DefinitionSourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" => Ok(DefinitionSourceKind::Http),
            "dict" => Ok(DefinitionSourceKind::Dict),
            other => Err(format!("unknown definition source '{}'", other)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid {name}: '{value}'")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub chat_url: String,
    pub dictionary_path: PathBuf,
    pub word_source: WordSourceKind,
    pub definition_source: DefinitionSourceKind,
    pub dict_server: String,
    pub seed_length: usize,
    pub minimum_word_size: usize,
    pub typing_timeout: Duration,
    pub definition_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from any variable lookup, falling back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            api_base_url: lookup("ANAGRAMER_API_URL").unwrap_or(defaults.api_base_url),
            chat_url: lookup("ANAGRAMER_CHAT_URL").unwrap_or(defaults.chat_url),
            dictionary_path: lookup("DICTIONARY_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.dictionary_path),
            word_source: parse_var(&lookup, "WORD_SOURCE", defaults.word_source)?,
            definition_source: parse_var(
                &lookup,
                "DEFINITION_SOURCE",
                defaults.definition_source,
            )?,
            dict_server: lookup("DICT_SERVER").unwrap_or(defaults.dict_server),
            seed_length: parse_var(&lookup, "SEED_LENGTH", defaults.seed_length)?,
            minimum_word_size: parse_var(&lookup, "MINIMUM_WORD_SIZE", defaults.minimum_word_size)?,
            typing_timeout: Duration::from_millis(parse_var(
                &lookup,
                "TYPING_TIMEOUT_MS",
                defaults.typing_timeout.as_millis() as u64,
            )?),
            definition_timeout: Duration::from_secs(parse_var(
                &lookup,
                "DEFINITION_TIMEOUT_SECONDS",
                defaults.definition_timeout.as_secs(),
            )?),
        })
    }

    pub fn round_rules(&self) -> RoundRules {
        RoundRules {
            small_pool_min_length: self.minimum_word_size,
            ..RoundRules::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://0.0.0.0:8080".to_string(),
            chat_url: "ws://0.0.0.0:8080/chat".to_string(),
            dictionary_path: PathBuf::from("/usr/share/dict/words"),
            word_source: WordSourceKind::Local,
            definition_source: DefinitionSourceKind::Http,
            dict_server: "dict.org:2628".to_string(),
            seed_length: 7,
            minimum_word_size: 3,
            typing_timeout: Duration::from_millis(2500),
            definition_timeout: Duration::from_secs(5),
        }
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError { name, value }),
        None => Ok(default),
    }
}
