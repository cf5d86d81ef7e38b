use std::fs::{File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;
use log::warn;
use crate::ast::{CommandNode, RedirectKind};
use crate::executor::ExecError;

// rw-r--r--, the mode the interpreter has always created output files with
const OUTPUT_MODE: libc::mode_t = libc::S_IRUSR | libc::S_IWUSR | libc::S_IRGRP | libc::S_IROTH;

pub fn open_input(path: &str) -> Result<File, ExecError> {
    File::open(path).map_err(|source| ExecError::Redirect {
        path: path.to_string(),
        source,
    })
}

pub fn open_output(kind: RedirectKind, path: &str) -> Result<File, ExecError> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).mode(OUTPUT_MODE as u32);
    match kind {
        RedirectKind::Append => options.append(true),
        _ => options.truncate(true),
    };
    options.open(path).map_err(|source| ExecError::Redirect {
        path: path.to_string(),
        source,
    })
}

/// Files a stage reads from and writes to instead of its default streams.
#[derive(Debug, Default)]
pub struct StageFiles {
    pub stdin: Option<File>,
    pub stdout: Option<File>,
}

impl StageFiles {
    /// Open the redirections of `stage`. A target that cannot be opened is
    /// reported and skipped; the stage keeps its default stream for it.
    pub fn open(stage: &CommandNode) -> StageFiles {
        let stdin = stage
            .redirect(RedirectKind::In)
            .and_then(|path| report(open_input(path)));
        let stdout = stage
            .effective_output()
            .and_then(|(kind, path)| report(open_output(kind, path)));
        StageFiles { stdin, stdout }
    }
}

fn report(res: Result<File, ExecError>) -> Option<File> {
    match res {
        Ok(f) => Some(f),
        Err(e) => {
            warn!("redirection failed: {}", e);
            eprintln!("-seashell: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, read_to_string};
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use crate::parser::parse_line;

    fn make_unique_temp_dir(tag: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        p.push(format!("seashell_redirect_{}_{}_{}", tag, std::process::id(), nanos));
        fs::create_dir_all(&p).unwrap();
        p
    }

    #[test]
    fn test_truncate_and_append() {
        let dir = make_unique_temp_dir("modes");
        let path = dir.join("out.txt");
        let path_str = path.to_str().unwrap();

        open_output(RedirectKind::Out, path_str).unwrap().write_all(b"one\n").unwrap();
        open_output(RedirectKind::Append, path_str).unwrap().write_all(b"two\n").unwrap();
        assert_eq!(read_to_string(&path).unwrap(), "one\ntwo\n");

        open_output(RedirectKind::Out, path_str).unwrap().write_all(b"three\n").unwrap();
        assert_eq!(read_to_string(&path).unwrap(), "three\n");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_created_file_mode() {
        let dir = make_unique_temp_dir("mode");
        let path = dir.join("new.txt");
        open_output(RedirectKind::Out, path.to_str().unwrap()).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        // umask may only clear bits
        assert_eq!(mode & !0o644, 0);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_input_is_redirect_error() {
        let err = open_input("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, ExecError::Redirect { ref path, .. } if path == "/definitely/not/here.txt"));
    }

    #[test]
    fn test_stage_files_skip_failed_targets() {
        let dir = make_unique_temp_dir("stage");
        let out = dir.join("out.txt");
        let line = format!("cat < /definitely/not/here.txt > {}", out.display());
        let files = StageFiles::open(&parse_line(&line));
        assert!(files.stdin.is_none());
        assert!(files.stdout.is_some());
        assert!(out.exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_stage_files_honor_truncate_over_append() {
        let dir = make_unique_temp_dir("precedence");
        let a = dir.join("a.txt");
        let b = dir.join("b.txt");
        let line = format!("ls >{} >>{}", a.display(), b.display());
        let files = StageFiles::open(&parse_line(&line));
        assert!(files.stdout.is_some());
        assert!(a.exists());
        assert!(!b.exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
