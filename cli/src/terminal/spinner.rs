use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

const TIP: &str = "Press Ctrl-C to cancel";

static SPINNER: Mutex<Option<ProgressBar>> = Mutex::new(None);

fn current() -> MutexGuard<'static, Option<ProgressBar>> {
    SPINNER.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the spinner when dropped.
pub struct SpinnerGuard;

impl Drop for SpinnerGuard {
    fn drop(&mut self) {
        if let Some(pb) = current().take() {
            pb.finish_and_clear();
        }
    }
}

/// Shows a spinner with `msg` until the returned guard is dropped.
pub fn start(msg: &str) -> SpinnerGuard {
    let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]);

    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.set_message(format!("{} {}", msg, TIP.italic().dimmed()));
    pb.enable_steady_tick(Duration::from_millis(100));

    if let Some(previous) = current().replace(pb) {
        previous.finish_and_clear();
    }
    SpinnerGuard
}

/// Log sink that keeps output above a running spinner.
pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf);
        let msg = msg.trim_end();

        match current().as_ref() {
            Some(pb) if !pb.is_hidden() => pb.println(msg),
            _ => writeln!(std::io::stdout().lock(), "{msg}")?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::stdout().flush()
    }
}
