use crate::commands::cue::{DumpCommand, FormatCommand, InspectCommand};
use anyhow::bail;
use cuesheet::cue::encoding::encoding_for_label;
use cuesheet::cue::{CueSheet, LineEnding, SaveOptions};
use encoding_rs::Encoding;
use log::{debug, info, warn};

fn resolve_encoding(label: Option<&str>) -> anyhow::Result<Option<&'static Encoding>> {
    Ok(label.map(encoding_for_label).transpose()?)
}

pub async fn format_cue_sheet(cmd: FormatCommand) -> anyhow::Result<()> {
    let encoding = resolve_encoding(cmd.encoding.as_deref())?;
    let sheet = CueSheet::open(&cmd.input, encoding).await?;

    let line_ending = if cmd.crlf {
        LineEnding::CrLf
    } else {
        LineEnding::Lf
    };

    let Some(output) = cmd.output else {
        println!("{}", sheet.to_cue_string(line_ending));
        return Ok(());
    };

    if tokio::fs::try_exists(&output).await? && !cmd.force {
        bail!("Output file already exists: {output:?}, use --force to overwrite it");
    }

    sheet
        .save(
            &output,
            SaveOptions {
                encoding,
                line_ending,
            },
        )
        .await?;

    info!(
        "Wrote {} track(s) from {:?} to {output:?}",
        sheet.tracks().len(),
        cmd.input
    );

    Ok(())
}

pub async fn inspect_cue_sheet(cmd: InspectCommand) -> anyhow::Result<()> {
    let encoding = resolve_encoding(cmd.encoding.as_deref())?;
    let sheet = CueSheet::open(&cmd.input, encoding).await?;

    info!("Title: {}", sheet.title());
    info!("Performer: {}", sheet.performer());
    if !sheet.catalog().is_empty() {
        info!("Catalog: {}", sheet.catalog());
    }
    for comment in sheet.comments() {
        debug!("REM {comment}");
    }
    for line in sheet.garbage() {
        warn!("Unrecognized line: {line}");
    }

    for track in sheet.tracks() {
        let file = track
            .data_file()
            .map(|f| format!(" [{} {}]", f.filename, f.file_type))
            .unwrap_or_default();
        let offset = track.offset();

        info!(
            "Track {:02} {} at {}:{:02}.{:03} {:?}{file}",
            track.number(),
            track.data_type(),
            offset.as_secs() / 60,
            offset.as_secs() % 60,
            offset.subsec_millis(),
            track.title(),
        );

        for line in track.garbage() {
            warn!("Unrecognized line in track {}: {line}", track.number());
        }
    }

    Ok(())
}

pub async fn dump_cue_sheet(cmd: DumpCommand) -> anyhow::Result<()> {
    let encoding = resolve_encoding(cmd.encoding.as_deref())?;
    let sheet = CueSheet::open(&cmd.input, encoding).await?;

    println!("{}", serde_json::to_string_pretty(&sheet)?);

    Ok(())
}
