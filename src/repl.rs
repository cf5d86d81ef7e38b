use log::debug;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use crate::error::ShellError;
use crate::executor::ExecStatus;
use crate::prompt::ShellPrompt;
use crate::shell::Shell;

pub struct Repl {
    shell: Shell,
    prompt: ShellPrompt,
    editor: DefaultEditor,
}

impl Repl {
    pub fn new(shell: Shell, prompt: ShellPrompt) -> Result<Self, ShellError> {
        Ok(Repl {
            shell,
            prompt,
            editor: DefaultEditor::new()?,
        })
    }

    /// Read and run lines until `exit` or end of input.
    pub fn run(&mut self) -> Result<ExecStatus, ShellError> {
        loop {
            let line = match self.editor.readline(&self.prompt.render()) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => {
                    // Ctrl-D
                    println!();
                    return Ok(ExecStatus::Exit);
                }
                Err(e) => return Err(e.into()),
            };

            let status = self.shell.run_line(&line);
            debug!("line finished with {:?}", status);
            if status == ExecStatus::Exit {
                return Ok(status);
            }
        }
    }
}
