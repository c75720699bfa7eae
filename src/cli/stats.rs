use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error,
    report::{self, PlaylistReport},
    spotify::CatalogClient,
    stats::{DetailValue, OrderedPairs},
    success,
    types::{BreakdownTableRow, StatTableRow},
    warning,
};

pub async fn stats(playlist_id: String, json: bool) {
    let client = match CatalogClient::from_env() {
        Ok(client) => client,
        Err(e) => error!("Cannot set up Spotify client. Err: {}", e),
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Fetching playlist {}...", playlist_id));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = report::build_report(&client, &playlist_id).await;
    pb.finish_and_clear();

    let report = match result {
        Ok(report) => report,
        Err(e) if e.is_not_found() => error!("Playlist {} not found", playlist_id),
        Err(e) => error!("Failed to build stats for {}. Err: {}", playlist_id, e),
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(body) => println!("{}", body),
            Err(e) => error!("Failed to serialize stats. Err: {}", e),
        }
        return;
    }

    print_summary(&report);
}

fn print_summary(report: &PlaylistReport) {
    let meta = &report.playlist;
    success!(
        "{} by {} ({} tracks)",
        meta.name,
        meta.owner.as_deref().unwrap_or("unknown"),
        meta.track_count
    );

    if report.stats.raw.is_empty() {
        warning!("No statistics available for this playlist");
        return;
    }

    let rows: Vec<StatTableRow> = report
        .stats
        .raw
        .iter()
        .map(|(name, group)| StatTableRow {
            stat: name.to_string(),
            min: describe(&group.min.value, group.min.name.as_deref()),
            avg: describe(&group.avg.value, None),
            max: describe(&group.max.value, group.max.name.as_deref()),
        })
        .collect();
    println!("{}", Table::new(rows));

    let b = &report.stats.breakdowns;
    let breakdowns = [
        ("explicitness", &b.explicitness),
        ("keys", &b.keys),
        ("modes", &b.modes),
        ("title words", &b.title_words),
        ("top artists", &b.top_artists),
    ];
    let rows: Vec<BreakdownTableRow> = breakdowns
        .into_iter()
        .map(|(name, pairs)| BreakdownTableRow {
            breakdown: name.to_string(),
            top: top_entries(pairs, 5),
        })
        .collect();
    println!("{}", Table::new(rows));

    if let Some(generation) = &report.generation {
        success!(
            "Sounds like {} (average release year {})",
            generation.name,
            generation.year
        );
    }
}

fn describe(value: &DetailValue, track: Option<&str>) -> String {
    let value = match value {
        DetailValue::Number(n) => n.to_string(),
        DetailValue::Text(t) => t.clone(),
    };
    match track {
        Some(track) => format!("{} ({})", value, track),
        None => value,
    }
}

fn top_entries(pairs: &OrderedPairs, n: usize) -> String {
    pairs
        .keys
        .iter()
        .zip(&pairs.values)
        .take(n)
        .map(|(k, v)| format!("{}: {}", k, v))
        .collect::<Vec<_>>()
        .join(", ")
}
