use std::env;
use nix::unistd::gethostname;

pub struct ShellPrompt {
    template: Option<String>,
}

impl ShellPrompt {
    pub fn new(template: Option<String>) -> Self {
        ShellPrompt { template }
    }

    /// Text shown before each line. A configured template is used as is.
    pub fn render(&self) -> String {
        if let Some(template) = &self.template {
            return template.clone();
        }
        format!(
            "\x1b[1;32m{}@{}\x1b[0m:\x1b[1;34m{}\x1b[0m \x1b[1;36mseashell\x1b[0m\x1b[1;33m$\x1b[0m ",
            user(),
            host(),
            cwd()
        )
    }
}

impl Default for ShellPrompt {
    fn default() -> Self {
        Self::new(None)
    }
}

fn user() -> String {
    env::var("USER").unwrap_or_else(|_| "?".to_string())
}

fn host() -> String {
    gethostname()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| "?".to_string())
}

fn cwd() -> String {
    env::current_dir()
        .map(|dir| dir.display().to_string())
        .unwrap_or_else(|_| "?".to_string())
}
