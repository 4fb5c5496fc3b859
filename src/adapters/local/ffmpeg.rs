//! `ffmpeg` backed stream-copy extraction.

use crate::ports::tools::TranscodeExecutor;
use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::{Output, Stdio};
use tokio::process::Command as TokioCommand;

#[derive(Clone, Debug)]
pub struct Ffmpeg {
    bin: String,
}

impl Ffmpeg {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    /// Copy `[start, end)` of `source` into `dest` without re-encoding.
    pub fn cut_args(source: &Path, start: f64, end: f64, dest: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-hide_banner", "-nostdin", "-v", "error", "-y", "-i"]
            .into_iter()
            .map(OsString::from)
            .collect();
        args.push(source.as_os_str().to_owned());
        args.push("-ss".into());
        args.push(start.to_string().into());
        args.push("-to".into());
        args.push(end.to_string().into());
        args.push("-c".into());
        args.push("copy".into());
        args.push(dest.as_os_str().to_owned());
        args
    }
}

#[async_trait]
impl TranscodeExecutor for Ffmpeg {
    async fn cut(&self, source: &Path, start: f64, end: f64, dest: &Path) -> io::Result<Output> {
        TokioCommand::new(&self.bin)
            .args(Self::cut_args(source, start, end, dest))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
    }
}
