use colored::*;
use tagforge_common::config::Config;
use tagforge_core::registry;

use crate::terminal::{colors, print};

pub fn platforms(cfg: &Config) {
    print::header("social platforms", cfg.quiet);

    for (idx, (platform, entry)) in registry::entries().enumerate() {
        if cfg.quiet > 1 {
            print::print_status(platform.id());
            continue;
        }

        let native = match entry.native_scheme {
            Some(scheme) => scheme.color(colors::URL),
            None => "none, web link only".color(colors::SEPARATOR),
        };

        print::tree_head(idx, platform.id());
        print::as_tree_one_level(vec![
            ("Web".to_string(), entry.web_prefix.color(colors::URL)),
            ("Native".to_string(), native),
        ]);
    }
}
