//! Navigation for a terminal: hand URLs to the desktop opener, or print them.

use std::ffi::OsString;
use std::io;
use std::process::{Command, Stdio};

use tracing::debug;
use url::Url;

use envgate_core::{EnvgateError, EnvgateResult, Navigator};

#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenCommand {
    program: &'static str,
    prefix_args: Vec<OsString>,
}

impl OpenCommand {
    fn for_os(target_os: &str) -> EnvgateResult<Self> {
        match target_os {
            "macos" => Ok(Self {
                program: "open",
                prefix_args: Vec::new(),
            }),
            "linux" | "freebsd" | "openbsd" | "netbsd" => Ok(Self {
                program: "xdg-open",
                prefix_args: Vec::new(),
            }),
            "windows" => Ok(Self {
                program: "cmd",
                prefix_args: vec![
                    OsString::from("/C"),
                    OsString::from("start"),
                    OsString::from(""),
                ],
            }),
            _ => Err(EnvgateError::navigation(format!(
                "Opening URLs is unsupported on {}",
                target_os
            ))),
        }
    }

    fn args_for(&self, url: &Url) -> Vec<OsString> {
        let mut args = self.prefix_args.clone();
        args.push(OsString::from(url.as_str()));
        args
    }
}

/// Opens URLs in the user's browser through the platform opener
#[derive(Debug, Clone)]
pub struct SystemNavigator {
    command: OpenCommand,
}

impl SystemNavigator {
    pub fn new() -> EnvgateResult<Self> {
        Ok(Self {
            command: OpenCommand::for_os(std::env::consts::OS)?,
        })
    }
}

impl Navigator for SystemNavigator {
    fn navigate(&self, url: &Url) -> EnvgateResult<()> {
        debug!("Opening {} with {}", url, self.command.program);
        let status = Command::new(self.command.program)
            .args(self.command.args_for(url))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => EnvgateError::navigation(format!(
                    "URL opener {} was not found, open {} manually",
                    self.command.program, url
                )),
                _ => EnvgateError::navigation(format!(
                    "Failed to run {}: {}",
                    self.command.program, e
                )),
            })?;

        if !status.success() {
            return Err(EnvgateError::navigation(format!(
                "{} exited with {} for {}",
                self.command.program, status, url
            )));
        }
        Ok(())
    }
}

/// Prints the URL instead of opening it (`--no-open`)
#[derive(Debug, Clone, Default)]
pub struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn navigate(&self, url: &Url) -> EnvgateResult<()> {
        println!("{}", url);
        Ok(())
    }
}
