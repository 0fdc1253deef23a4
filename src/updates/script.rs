//! Install script execution.
//!
//! The script is written to a self-cleaning temporary file and run as a
//! subprocess. Its combined stdout/stderr, exit code, and wall-clock
//! duration are handed back for the caller to interpret.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tempfile::{Builder, TempPath};

use crate::error::{DopplerError, Result};
use crate::shell::Platform;

/// Arguments passed to every install script invocation.
pub const SCRIPT_ARGS: &[&str] = &["--debug"];

/// Prefix of the temporary script file name.
const SCRIPT_FILE_PREFIX: &str = ".install.sh.";

/// Exit code reported when the script was terminated by a signal.
pub const SIGNALED_EXIT_CODE: i32 = -1;

/// How often spawning is retried while the fresh script is still busy.
const SPAWN_RETRIES: u32 = 5;

/// How the script file is turned into a process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Execute the file itself (relies on its shebang).
    Direct,
    /// Hand the file to an interpreter: `<interpreter> <file> --debug`.
    Shell { interpreter: String },
}

impl Invocation {
    /// Pick the strategy for a platform.
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            // Windows refuses to exec the file: "%1 is not a valid Win32 application"
            Platform::Windows => Invocation::Shell {
                interpreter: "sh".to_string(),
            },
            Platform::Unix => Invocation::Direct,
        }
    }

    fn command(&self, script: &Path) -> Command {
        match self {
            Invocation::Direct => Command::new(script),
            Invocation::Shell { interpreter } => {
                let mut cmd = Command::new(interpreter);
                cmd.arg(script);
                cmd
            }
        }
    }

    /// Render the full command line, for debug logging.
    pub fn describe(&self, script: &Path) -> String {
        let mut parts = Vec::new();
        if let Invocation::Shell { interpreter } = self {
            parts.push(interpreter.clone());
        }
        parts.push(script.display().to_string());
        parts.extend(SCRIPT_ARGS.iter().map(|a| a.to_string()));
        parts.join(" ")
    }
}

/// Result of running the install script.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Interleaved stdout and stderr.
    pub output: String,

    /// Process exit code ([`SIGNALED_EXIT_CODE`] if killed by a signal).
    pub exit_code: i32,

    /// Execution duration.
    pub duration: Duration,
}

impl ExecutionResult {
    /// Whether the script exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn duration_ms(&self) -> i64 {
        i64::try_from(self.duration.as_millis()).unwrap_or(i64::MAX)
    }
}

/// Writes and runs install scripts.
#[derive(Debug, Clone)]
pub struct ScriptExecutor {
    invocation: Invocation,
    debug: bool,
    temp_dir: Option<PathBuf>,
}

impl ScriptExecutor {
    /// Create an executor. With `debug` set, raw script output is echoed to stderr.
    pub fn new(invocation: Invocation, debug: bool) -> Self {
        Self {
            invocation,
            debug,
            temp_dir: None,
        }
    }

    /// Place temporary script files in `dir` instead of the system temp directory.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Run `script` and capture its output.
    ///
    /// A nonzero exit is not an error; it is reported in the result. The
    /// temporary file is removed before this returns, whatever the outcome.
    pub fn execute(&self, script: &[u8]) -> Result<ExecutionResult> {
        self.execute_echoing(script, &mut io::stderr())
    }

    /// Like [`execute`](Self::execute), with debug output echoed to `echo`.
    fn execute_echoing(&self, script: &[u8], echo: &mut dyn Write) -> Result<ExecutionResult> {
        let path = self.write_script(script).map_err(DopplerError::Persistence)?;

        tracing::debug!("Executing install script");
        self.run(&path, echo)
    }

    fn write_script(&self, script: &[u8]) -> io::Result<TempPath> {
        let mut builder = Builder::new();
        builder.prefix(SCRIPT_FILE_PREFIX);

        let mut file = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(script)?;
        file.flush()?;

        // Close our handle so the file can be executed.
        let path = file.into_temp_path();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o555))?;
        }

        Ok(path)
    }

    fn run(&self, script: &Path, echo: &mut dyn Write) -> Result<ExecutionResult> {
        let start = Instant::now();

        // One pipe for both streams keeps the output interleaved.
        let (mut reader, writer) = io::pipe()?;

        let mut command = self.invocation.command(script);
        command
            .args(SCRIPT_ARGS)
            .stdin(Stdio::null())
            .stdout(writer.try_clone()?)
            .stderr(writer);

        let mut child = spawn(&mut command)?;
        // Release our copies of the write end, or the read below never sees EOF.
        drop(command);

        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;
        let status = child.wait()?;

        let duration = start.elapsed();
        let output = String::from_utf8_lossy(&raw).into_owned();

        tracing::debug!("Executing \"{}\"", self.invocation.describe(script));
        if self.debug {
            // Bypass tracing so the output isn't prefixed a second time.
            let _ = writeln!(echo, "{}", output);
        }

        Ok(ExecutionResult {
            output,
            exit_code: status.code().unwrap_or(SIGNALED_EXIT_CODE),
            duration,
        })
    }
}

fn spawn(command: &mut Command) -> io::Result<Child> {
    let mut attempts = 0;
    loop {
        match command.spawn() {
            Err(e) if is_text_file_busy(&e) && attempts < SPAWN_RETRIES => {
                attempts += 1;
                tracing::debug!("Install script busy, retrying spawn ({})", attempts);
                thread::sleep(Duration::from_millis(20 * u64::from(attempts)));
            }
            result => return result,
        }
    }
}

#[cfg(unix)]
fn is_text_file_busy(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::ETXTBSY)
}

#[cfg(not(unix))]
fn is_text_file_busy(_err: &io::Error) -> bool {
    false
}
