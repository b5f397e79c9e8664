use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::info;

use crate::candidate::StreamCandidate;

const ILLEGAL_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Strip characters that break an `#EXTINF` line, turn curly double quotes
/// into `'` and collapse whitespace.
pub fn clean_channel_name(name: &str) -> String {
    let stripped: String = name
        .chars()
        .filter(|c| !ILLEGAL_NAME_CHARS.contains(c))
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' => '\'',
            c if c.is_control() => ' ',
            c => c,
        })
        .collect();
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render an M3U document. `comment` is the free-text line under the header;
/// an empty channel list still yields a valid document with a zero count.
pub fn render_playlist(channels: &[StreamCandidate], group: &str, comment: &str) -> String {
    let mut out = String::new();
    out.push_str("#EXTM3U\n");
    let _ = writeln!(out, "# {}", comment);
    let _ = writeln!(out, "# Total Channels: {}", channels.len());
    out.push('\n');

    let group = clean_channel_name(group);
    for (i, channel) in channels.iter().enumerate() {
        let idx = i + 1;
        let mut name = clean_channel_name(&channel.name);
        if name.is_empty() {
            name = format!("Channel_{}", idx);
        }
        let _ = writeln!(
            out,
            "#EXTINF:-1 tvg-id=\"channel{}\" tvg-name=\"{}\" group-title=\"{}\",{}",
            idx, name, group, name
        );
        let _ = writeln!(out, "{}", channel.url);
        out.push('\n');
    }
    out
}

/// Comment line for a playlist built from `host`.
pub fn generated_comment(host: &str) -> String {
    format!(
        "Playlist generated from {} on {}",
        host,
        Local::now().format("%Y-%m-%d %H:%M:%S")
    )
}

pub fn write_playlist(
    path: &Path,
    channels: &[StreamCandidate],
    group: &str,
    comment: &str,
) -> Result<()> {
    let body = render_playlist(channels, group, comment);
    std::fs::write(path, body)
        .with_context(|| format!("Failed to write playlist {}", path.display()))?;
    info!("Playlist created: {} ({} channels)", path.display(), channels.len());
    Ok(())
}

// ── Tests ──
