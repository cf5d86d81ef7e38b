use std::process::{Child, ExitStatus};
use log::{info, warn};

/// A stage started with a trailing `&`.
#[derive(Debug)]
pub struct Job {
    pub id: usize,
    pub name: String,
    child: Child,
}

impl Job {
    pub fn pid(&self) -> u32 {
        self.child.id()
    }
}

/// Background children that nobody waits for in the foreground.
///
/// They are polled without blocking so that finished ones do not linger as
/// zombies for the lifetime of the interpreter.
#[derive(Debug, Default)]
pub struct JobTable {
    jobs: Vec<Job>,
    next_id: usize,
}

impl JobTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &str, child: Child) -> usize {
        self.next_id += 1;
        info!("[{}] {} started in background (pid {})", self.next_id, name, child.id());
        self.jobs.push(Job {
            id: self.next_id,
            name: name.to_string(),
            child,
        });
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Collect every job that has terminated since the last call.
    pub fn reap(&mut self) -> Vec<(usize, String, ExitStatus)> {
        let mut finished = Vec::new();
        let mut running = Vec::with_capacity(self.jobs.len());
        for mut job in self.jobs.drain(..) {
            match job.child.try_wait() {
                Ok(Some(status)) => {
                    info!("[{}] {} (pid {}) done: {}", job.id, job.name, job.pid(), status);
                    finished.push((job.id, job.name, status));
                }
                Ok(None) => running.push(job),
                Err(e) => warn!("[{}] {}: cannot poll: {}", job.id, job.name, e),
            }
        }
        self.jobs = running;
        finished
    }
}
