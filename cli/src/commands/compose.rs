use tagforge_common::config::Config;
use tagforge_common::tag::intent::TargetIntent;
use tagforge_core::composer;

use crate::terminal::{format, print};

pub fn compose(intent: TargetIntent, cfg: &Config) -> anyhow::Result<()> {
    let record = composer::compose(&intent)?;

    print::header("composed record", cfg.quiet);
    print::as_tree_one_level(format::outbound_to_details(&record));
    Ok(())
}
