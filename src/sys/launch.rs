use crate::home::dispatch::{App, LaunchSurface};
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::process::{Command, Stdio};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ExecCommand(String);

crate::impl_string_newtype!(ExecCommand);

/// Runs an external program through `sh -c` and waits for it to exit. The
/// surface is suspended for the duration so the program is not covered.
#[derive(Debug, Clone)]
pub struct CommandApp {
    pub name: String,
    pub exec: ExecCommand,
}

impl CommandApp {
    pub fn new(name: impl Into<String>, exec: ExecCommand) -> Self {
        Self {
            name: name.into(),
            exec,
        }
    }
}

impl<S: LaunchSurface + ?Sized> App<S> for CommandApp {
    fn run(&self, surface: &S) {
        if self.exec.trim().is_empty() {
            log::error!("App '{}' has no command to run", self.name);
            return;
        }

        log::info!("Launching '{}': {}", self.name, self.exec);
        surface.suspend();
        match Command::new("sh")
            .arg("-c")
            .arg(self.exec.as_str())
            .stdin(Stdio::null())
            .status()
        {
            Ok(status) if status.success() => log::info!("'{}' exited", self.name),
            Ok(status) => log::warn!("'{}' exited with {}", self.name, status),
            Err(e) => log::error!("Failed to launch '{}': {}", self.name, e),
        }
        surface.resume();
    }
}
