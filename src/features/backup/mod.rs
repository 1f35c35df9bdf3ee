//! CSV backup of a user's schedules and the cards they refer to.
//!
//! The file has two sections, each introduced by a `# NAME` marker row and a
//! header row, separated by an empty row.

use chrono::NaiveDateTime;

use crate::data::models::{Card, Schedule};
use crate::srs::SrsError;

pub const BACKUP_FILENAME: &str = "flips_backup.csv";

const SCHEDULE_HEADER: [&str; 8] = [
    "id", "username", "card_id", "ease", "due", "interval_min", "status", "created_at",
];

const CARD_HEADER: [&str; 9] = [
    "id",
    "word",
    "translation",
    "definition",
    "meta",
    "pronunciation",
    "example",
    "example_translation",
    "created_at",
];

fn iso(stamp: NaiveDateTime) -> String {
    stamp.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

pub fn write_backup(rows: &[(Schedule, Card)]) -> Result<String, SrsError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    write_sections(&mut writer, rows).map_err(|e| {
        log::error!("Failed to write backup: {}", e);
        SrsError::Serialization(format!("backup serialization failed: {e}"))
    })?;

    let bytes = writer
        .into_inner()
        .map_err(|e| SrsError::Serialization(format!("backup flush failed: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| SrsError::Serialization(format!("backup is not UTF-8: {e}")))
}

fn write_sections(
    writer: &mut csv::Writer<Vec<u8>>,
    rows: &[(Schedule, Card)],
) -> Result<(), csv::Error> {
    writer.write_record(["# SCHEDULE"])?;
    writer.write_record(SCHEDULE_HEADER)?;
    for (schedule, _) in rows {
        writer.write_record([
            schedule.id.to_string(),
            schedule.username.clone(),
            schedule.card_id.clone(),
            schedule.ease.to_string(),
            schedule.due.map(iso).unwrap_or_default(),
            schedule.interval_min.map(|m| m.to_string()).unwrap_or_default(),
            schedule.status.code().to_string(),
            iso(schedule.created_at),
        ])?;
    }

    // csv quotes a lone empty field, so the separator goes straight to the buffer
    writer.flush()?;
    writer.get_mut().push(b'\n');
    writer.write_record(["# CARDS"])?;
    writer.write_record(CARD_HEADER)?;
    for (_, card) in rows {
        writer.write_record([
            card.id.as_str(),
            card.word.as_str(),
            card.translation.as_str(),
            card.definition.as_deref().unwrap_or(""),
            card.meta.as_deref().unwrap_or(""),
            card.pronunciation.as_deref().unwrap_or(""),
            card.example.as_deref().unwrap_or(""),
            card.example_translation.as_deref().unwrap_or(""),
            iso(card.created_at).as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
