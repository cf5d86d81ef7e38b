use std::os::fd::OwnedFd;
use std::process::{Child, Stdio};
use log::{debug, warn};
use nix::fcntl::OFlag;
use crate::executor::ExecError;

/// Where the next stage reads its standard input from when it has no
/// `<` redirection of its own.
#[derive(Debug)]
pub enum Upstream {
    /// No process feeds this stage; it shares the interpreter's stdin.
    Inherit,
    /// Read end of the pipe written by the previous stage.
    Pipe(OwnedFd),
    /// The previous stage was meant to feed this one but never started.
    Closed,
}

impl Upstream {
    pub fn into_stdio(self) -> Stdio {
        match self {
            Upstream::Inherit => Stdio::inherit(),
            Upstream::Pipe(fd) => Stdio::from(fd),
            Upstream::Closed => Stdio::null(),
        }
    }

    pub fn is_inherit(&self) -> bool {
        matches!(self, Upstream::Inherit)
    }
}

/// A `(read, write)` pair. Both ends are close-on-exec so that only the
/// stage that gets one as stdin/stdout keeps it open.
pub fn pipe() -> Result<(OwnedFd, OwnedFd), ExecError> {
    let (read, write) = nix::unistd::pipe2(OFlag::O_CLOEXEC)?;
    Ok((read, write))
}

/// Foreground children connected by pipes. They run concurrently and are
/// waited for together once the group is complete.
#[derive(Default)]
pub struct PipeGroup {
    children: Vec<(String, Child)>,
}

impl PipeGroup {
    pub fn push(&mut self, name: &str, child: Child) {
        self.children.push((name.to_string(), child));
    }

    /// Block until every child in the group has terminated.
    pub fn wait(&mut self) {
        for (name, mut child) in self.children.drain(..) {
            match child.wait() {
                Ok(status) => debug!("{} (pid {}) finished: {}", name, child.id(), status),
                Err(e) => warn!("waiting for {} failed: {}", name, e),
            }
        }
    }
}
