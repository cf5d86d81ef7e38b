use std::path::PathBuf;
use std::process::ExitCode;
use argh::FromArgs;
use log::LevelFilter;
use seashell::config::{Config, ConfigLoader};
use seashell::error::ShellError;
use seashell::logging;
use seashell::prompt::ShellPrompt;
use seashell::repl::Repl;
use seashell::shell::Shell;

#[derive(FromArgs)]
/// A small interactive shell with pipes, redirects and `!!`.
struct Args {
    /// configuration file (default: ~/.seashellrc when present)
    #[argh(option)]
    config: Option<PathBuf>,

    /// directory external programs are looked up in
    #[argh(option)]
    program_dir: Option<String>,

    /// log at debug level
    #[argh(switch, short = 'v')]
    verbose: bool,

    /// run a single line and exit with its status
    #[argh(option, short = 'c')]
    command: Option<String>,
}

fn load_config(args: &Args) -> Result<Config, ShellError> {
    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => match ConfigLoader::default_path() {
            Some(path) if path.is_file() => ConfigLoader::load_from_file(path)?,
            _ => ConfigLoader::default_config(),
        },
    };
    if let Some(dir) = &args.program_dir {
        config.program_dir = dir.clone();
    }
    if args.verbose {
        config.log_level = LevelFilter::Debug;
    }
    Ok(config)
}

fn run(args: Args) -> Result<u8, ShellError> {
    let config = load_config(&args)?;
    logging::init(&config)?;

    let mut shell = Shell::new(&config);
    if let Some(line) = &args.command {
        return Ok(shell.run_line(line).code() as u8);
    }

    let mut repl = Repl::new(shell, ShellPrompt::new(config.prompt.clone()))?;
    repl.run()?;
    Ok(0)
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();
    match run(args) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("seashell: {}", e);
            ExitCode::FAILURE
        }
    }
}
