use colored::*;
use tagforge_common::config::Config;
use tagforge_common::error::ReadError;
use tagforge_common::tag::record::ScanReport;
use tagforge_core::hardware;
use tokio::sync::mpsc;

use crate::mprint;
use crate::terminal::notify::Notifier;
use crate::terminal::{colors, format, print, spinner};

pub async fn read(cfg: &Config, notifier: &Notifier) -> anyhow::Result<()> {
    let session = hardware::open_session(cfg)?;

    let (tx, mut rx) = mpsc::unbounded_channel::<Result<ScanReport, ReadError>>();
    let err_tx = tx.clone();
    session
        .start_scan(
            move |report| {
                let _ = tx.send(Ok(report));
            },
            move |err| {
                let _ = err_tx.send(Err(err));
            },
        )
        .await?;

    let prompt = notifier.info("Approach an NFC tag to read it.");

    let result = {
        let _spinner = spinner::start("Listening...");
        tokio::select! {
            result = rx.recv() => result,
            _ = tokio::signal::ctrl_c() => {
                session.cancel();
                None
            }
        }
    };
    notifier.dismiss(prompt);

    match result {
        Some(Ok(report)) => {
            notifier.success(format!(
                "Tag detected! Serial: {}",
                report.serial_number.as_deref().unwrap_or("unknown")
            ));
            print_report(&report, cfg);
            Ok(())
        }
        Some(Err(err)) => Err(err.into()),
        None => {
            notifier.info("Scan cancelled.");
            Ok(())
        }
    }
}

fn print_report(report: &ScanReport, cfg: &Config) {
    if report.records.is_empty() {
        print::header("empty tag", cfg.quiet);
        print::no_results();
        return;
    }

    if cfg.quiet > 0 {
        mprint!();
    }

    print::header("tag records", cfg.quiet);
    for (idx, record) in report.records.iter().enumerate() {
        match cfg.quiet {
            2 => print::print_status(record.content.color(colors::TEXT_DEFAULT).to_string()),
            _ => {
                print::tree_head(idx, &record.record_type);
                print::as_tree_one_level(format::record_to_details(record));
            }
        }
    }

    if cfg.quiet == 0 {
        mprint!();
        print::print_status(format!(
            "{} record(s) on tag {}",
            report.records.len().to_string().color(colors::ACCENT).bold(),
            report
                .serial_number
                .as_deref()
                .unwrap_or("unknown")
                .color(colors::PRIMARY)
        ));
    }
}
