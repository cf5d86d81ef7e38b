use std::path::PathBuf;

pub const DEFAULT_PROGRAM_DIR: &str = "/bin/";

/// Maps a bare command name onto the single program directory.
///
/// There is no PATH search: `ls` always means `<dir>/ls`.
#[derive(Debug, Clone)]
pub struct PathResolver {
    prefix: String,
}

impl PathResolver {
    pub fn new(dir: &str) -> Self {
        let mut prefix = dir.to_string();
        if !prefix.ends_with('/') {
            prefix.push('/');
        }
        PathResolver { prefix }
    }

    pub fn dir(&self) -> &str {
        &self.prefix
    }

    pub fn resolve(&self, command: &str) -> PathBuf {
        PathBuf::from(format!("{}{}", self.prefix, command))
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        PathResolver::new(DEFAULT_PROGRAM_DIR)
    }
}
