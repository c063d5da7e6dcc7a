//! Out-of-process text input.
//!
//! A request is one JSON line written to a helper's stdin, which is then
//! closed. The helper's entire stdout, up to exit, is the answer. Helpers are
//! spawned ahead of time so the prompt window appears without start-up lag.

use std::env;
use std::ffi::OsString;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::logging::{debug, trace, warn};

pub const HELPER_BIN: &str = "easel_modal";

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ModalRequest {
    pub title: String,
    pub prompt: String,
}

impl ModalRequest {
    pub fn new(title: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            prompt: prompt.into(),
        }
    }

    /// The wire form: compact JSON terminated by a newline.
    pub fn to_line(&self) -> Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

/// How to launch a helper process.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ModalCommand {
    program: OsString,
    args: Vec<OsString>,
    current_dir: Option<PathBuf>,
}

impl ModalCommand {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Picks the helper: an explicit path if configured, else the
    /// `easel_modal` binary next to the running executable, else
    /// `cargo run` inside this crate.
    pub fn resolve(configured: Option<&Path>) -> Self {
        if let Some(path) = configured {
            return Self::new(path);
        }

        let sibling = env::current_exe().ok().and_then(|exe| {
            let name = format!("{}{}", HELPER_BIN, env::consts::EXE_SUFFIX);
            let path = exe.parent()?.join(name);
            path.is_file().then_some(path)
        });
        if let Some(path) = sibling {
            return Self::new(path);
        }

        Self::new("cargo")
            .arg("run")
            .arg("--quiet")
            .arg("--features")
            .arg("modal")
            .arg("--bin")
            .arg(HELPER_BIN)
            .arg("--")
            .current_dir(env!("CARGO_MANIFEST_DIR"))
    }

    fn spawn(&self) -> Result<Child> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }
        Ok(command.spawn()?)
    }
}

/// One pre-spawned helper. Killed on drop unless it already exited.
pub struct ModalProcess {
    child: Child,
}

impl ModalProcess {
    pub fn spawn(command: &ModalCommand) -> Result<Self> {
        let child = command.spawn()?;
        trace!("Spawned text input helper {}", child.id());
        Ok(Self { child })
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Sends the request, closes stdin, and blocks until the helper exits.
    pub fn communicate(mut self, request: &ModalRequest) -> Result<String> {
        let line = request.to_line()?;

        let mut stdin = self
            .child
            .stdin
            .take()
            .ok_or_else(|| io::Error::other("helper stdin is not piped"))?;
        stdin.write_all(line.as_bytes())?;
        drop(stdin);

        let mut bytes = Vec::new();
        self.child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("helper stdout is not piped"))?
            .read_to_end(&mut bytes)?;

        let status = self.child.wait()?;
        trace!("Text input helper {} exited with {}", self.id(), status);

        Ok(String::from_utf8(bytes)?)
    }
}

impl Drop for ModalProcess {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

/// A stack of warm helpers. The most recently spawned helper is used first
/// and the pool is topped back up as soon as one is taken.
pub struct ModalPool {
    command: ModalCommand,
    target: usize,
    handles: Vec<ModalProcess>,
}

impl ModalPool {
    pub fn new(command: ModalCommand, target: usize) -> Self {
        Self {
            command,
            target,
            handles: Vec::with_capacity(target),
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn command(&self) -> &ModalCommand {
        &self.command
    }

    /// Spawns helpers until the pool is at its target size.
    pub fn fill(&mut self) -> Result<()> {
        while self.handles.len() < self.target {
            self.handles.push(ModalProcess::spawn(&self.command)?);
        }
        Ok(())
    }

    /// Start-up fill. A helper that fails to launch here only matters once a
    /// program actually asks for text, so failures are logged.
    pub fn warm_up(&mut self) {
        match self.fill() {
            Ok(()) => debug!("Warmed {} text input helpers", self.len()),
            Err(e) => warn!(
                "Could not pre-spawn text input helpers ({}/{}): {}",
                self.len(),
                self.target,
                e
            ),
        }
    }

    /// Pops the newest helper (spawning one if the pool is empty) and refills
    /// before returning it.
    pub fn take(&mut self) -> Result<ModalProcess> {
        let process = match self.handles.pop() {
            Some(process) => process,
            None => ModalProcess::spawn(&self.command)?,
        };
        self.fill()?;
        Ok(process)
    }

    pub fn request(&mut self, request: &ModalRequest) -> Result<String> {
        self.take()?.communicate(request)
    }

    /// Kills every idle helper.
    pub fn shutdown(&mut self) {
        if !self.handles.is_empty() {
            debug!("Stopping {} text input helpers", self.handles.len());
        }
        self.handles.clear();
    }
}

impl Drop for ModalPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}
