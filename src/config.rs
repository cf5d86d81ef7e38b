use std::{ io, fmt };
use std::io::{ BufRead, BufReader };
use std::fs::File;
use std::path::{ Path, PathBuf };
use log::LevelFilter;
use crate::executor::{ DEFAULT_MAX_REPEAT_DEPTH, DEFAULT_PROGRAM_DIR };

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Fixed prompt text; `None` renders `user@host:cwd seashell$ `.
    pub prompt: Option<String>,
    pub program_dir: String,
    pub max_repeat_depth: usize,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config() -> Config {
        Config {
            prompt: None,
            program_dir: DEFAULT_PROGRAM_DIR.to_string(),
            max_repeat_depth: DEFAULT_MAX_REPEAT_DEPTH,
            log_level: LevelFilter::Warn,
            log_file: None,
        }
    }

    /// `~/.seashellrc`, when HOME is set.
    pub fn default_path() -> Option<PathBuf> {
        std::env::var_os("HOME").map(|home| Path::new(&home).join(".seashellrc"))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path).map_err(ConfigError::Io)?;
        let mut src = String::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(ConfigError::Io)?;
            src.push_str(&line);
            src.push('\n');
        }
        Self::load_from_str(&src)
    }

    pub fn load_from_str(src: &str) -> Result<Config, ConfigError> {
        let mut config = ConfigLoader::default_config();

        for (lineno, line) in src.lines().enumerate() {
            let lineno = lineno + 1;
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Parse(format!("Line {}: No '=' found: {}", lineno, line)));
            };
            let key = key.trim();
            // The prompt keeps its surrounding blanks, everything else is trimmed
            let value = if key == "prompt" { value } else { value.trim() };

            match key {
                "prompt" => config.prompt = Some(value.to_string()),
                "program_dir" => {
                    if value.is_empty() {
                        return Err(ConfigError::Parse(format!("Line {}: program_dir is empty", lineno)));
                    }
                    config.program_dir = value.to_string();
                }
                "max_repeat_depth" => match value.parse::<usize>() {
                    Ok(n) => config.max_repeat_depth = n,
                    Err(_) => return Err(ConfigError::Parse(format!("Line {}: Invalid usize: {}", lineno, line))),
                },
                "log_level" => match value.parse::<LevelFilter>() {
                    Ok(level) => config.log_level = level,
                    Err(_) => return Err(ConfigError::Parse(format!("Line {}: Invalid log level: {}", lineno, value))),
                },
                "log_file" => config.log_file = Some(PathBuf::from(value)),
                _ => return Err(ConfigError::Parse(format!("Line {}: Unknown key: {}", lineno, key))),
            }
        }

        Ok(config)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(_) => None,
        }
    }
}
