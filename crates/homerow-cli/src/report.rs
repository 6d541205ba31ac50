//! Terminal output for the CLI.

use colored::*;

use homerow_core::channel::ChannelKind;
use homerow_core::telemetry::TelemetryEvent;
use homerow_hub::home::ChannelStatus;
use homerow_hub::telemetry::RecordingTelemetry;

fn yes_no(value: bool) -> ColoredString {
    if value { "yes".green() } else { "no".red() }
}

pub fn print_status(status: &[ChannelStatus], locale_override: Option<&str>) {
    let device = locale_override.unwrap_or("from environment");
    println!("{} {}", "📺 Device locale:".cyan(), device.bold());
    println!();
    println!(
        "  {:<10} {:<10} {:<10} {:<10} {:<10} {}",
        "CHANNEL".dimmed(),
        "SHOWN".dimmed(),
        "FLAG".dimmed(),
        "LOCALE".dimmed(),
        "REMOVABLE".dimmed(),
        "POLICY".dimmed()
    );
    for s in status {
        println!(
            "  {:<10} {:<10} {:<10} {:<10} {:<10} {}",
            s.kind.to_string().bold(),
            yes_no(s.enabled),
            yes_no(s.experiment_enabled),
            yes_no(s.locale_permitted),
            yes_no(s.items_removable),
            s.locale_policy
        );
    }
}

pub fn print_simulation(
    kind: ChannelKind,
    action: &str,
    ran: bool,
    recorder: &RecordingTelemetry,
) {
    if !ran {
        println!(
            "{}",
            format!("⚪ {} has no {} hook", kind, action).yellow()
        );
        return;
    }

    let records = recorder.records();
    println!(
        "{}",
        format!("🖱️  {} on {} emitted {} event(s)", action, kind, records.len()).cyan()
    );
    for record in records {
        let detail = match &record.event {
            TelemetryEvent::ContentClick { id } | TelemetryEvent::ContentImpression { id } => {
                format!("id={}", id)
            }
            TelemetryEvent::HomeTileClick { tile_id, source } => {
                format!("tile_id={} source={}", tile_id, source)
            }
        };
        println!(
            "  {} {} {}",
            record.at.format("%H:%M:%S%.3f").to_string().dimmed(),
            record.event.name().bold(),
            detail
        );
    }
}
