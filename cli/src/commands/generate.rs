use tagforge_common::config::Config;
use tagforge_core::generation::{GeminiConfig, GeminiProducer};
use tagforge_core::prefill::{self, Prefill};

use super::{compose, write};
use crate::terminal::notify::Notifier;
use crate::terminal::spinner;

pub async fn generate(
    prompt: &str,
    write_now: bool,
    cfg: &Config,
    notifier: &Notifier,
) -> anyhow::Result<()> {
    let producer = GeminiProducer::new(GeminiConfig::new(cfg.api_key.clone()))?;

    let prefilled = {
        let _spinner = spinner::start("Generating...");
        prefill::prefill(&producer, prompt).await
    };

    match prefilled {
        Prefill::Skipped => {
            notifier.info("Describe what the tag should say.");
            Ok(())
        }
        Prefill::Unavailable { message } => {
            notifier.error(message);
            Ok(())
        }
        Prefill::Ready(intent) => {
            notifier.success("Content generated! Ready to write.");
            if write_now {
                write::write(intent, cfg, notifier).await
            } else {
                compose::compose(intent, cfg)
            }
        }
    }
}
