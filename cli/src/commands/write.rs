use tagforge_common::config::Config;
use tagforge_common::tag::intent::TargetIntent;
use tagforge_common::tag::state::WriteOutcome;
use tagforge_core::{composer, hardware};

use crate::terminal::notify::Notifier;
use crate::terminal::{format, print, spinner};

pub async fn write(intent: TargetIntent, cfg: &Config, notifier: &Notifier) -> anyhow::Result<()> {
    let record = composer::compose(&intent)?;
    let session = hardware::open_session(cfg)?;

    print::header("writing tag", cfg.quiet);
    if cfg.quiet < 2 {
        print::as_tree_one_level(format::outbound_to_details(&record));
    }

    let outcome = {
        let _spinner = spinner::start("Hold a tag near the reader...");
        tokio::select! {
            outcome = session.write(record) => outcome?,
            _ = tokio::signal::ctrl_c() => {
                session.cancel();
                WriteOutcome::Cancelled
            }
        }
    };

    match outcome {
        WriteOutcome::Succeeded => {
            notifier.success("Tag written.");
            Ok(())
        }
        WriteOutcome::Failed(err) => Err(err.into()),
        WriteOutcome::Cancelled => {
            notifier.info("Write cancelled.");
            Ok(())
        }
    }
}
