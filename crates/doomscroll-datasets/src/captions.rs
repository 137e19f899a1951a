//! Caption grouping and output.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::PrepareError;

/// CSV header of the captions file.
pub const CSV_HEADER: [&str; 3] = ["video_id", "filename", "caption"];

/// Captions grouped by video id, in first-seen order.
///
/// The ungrouped `(video_id, caption)` rows are kept in dataset order for
/// the CSV.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptionIndex {
    by_video: IndexMap<String, Vec<String>>,
    rows: Vec<(String, String)>,
}

impl CaptionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one row's caption field. Lists contribute every element.
    pub fn push(&mut self, video_id: &str, caption: &Value) {
        let texts: Vec<String> = match caption {
            Value::Array(items) => items.iter().filter_map(caption_text).collect(),
            other => caption_text(other).into_iter().collect(),
        };
        self.rows
            .extend(texts.iter().map(|text| (video_id.to_string(), text.clone())));
        self.by_video
            .entry(video_id.to_string())
            .or_default()
            .extend(texts);
    }

    pub fn len(&self) -> usize {
        self.by_video.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_video.is_empty()
    }

    pub fn get(&self, video_id: &str) -> Option<&[String]> {
        self.by_video.get(video_id).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.by_video
            .iter()
            .map(|(id, captions)| (id.as_str(), captions.as_slice()))
    }

    /// Write `<video_id>.txt` (captions joined by newlines) for every video
    /// whose `<video_id>.mp4` exists in `dir`. Returns the number written.
    pub fn write_sidecars(&self, dir: &Path) -> Result<usize, PrepareError> {
        let mut written = 0;
        for (video_id, captions) in self.iter() {
            if !dir.join(format!("{video_id}.mp4")).exists() {
                continue;
            }
            fs::write(dir.join(format!("{video_id}.txt")), captions.join("\n"))?;
            written += 1;
        }
        Ok(written)
    }

    /// Write one CSV row per caption for videos present in `video_dir`, in
    /// dataset row order. Returns the number of data rows written.
    pub fn write_csv(&self, video_dir: &Path, csv_path: &Path) -> Result<usize, PrepareError> {
        if let Some(parent) = csv_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_path(csv_path)?;
        writer.write_record(CSV_HEADER)?;

        let mut written = 0;
        for (video_id, caption) in &self.rows {
            let filename = format!("{video_id}.mp4");
            if !video_dir.join(&filename).exists() {
                continue;
            }
            writer.write_record([video_id.as_str(), filename.as_str(), caption.as_str()])?;
            written += 1;
        }
        writer.flush()?;
        Ok(written)
    }
}

fn caption_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Video id of a DiDeMo row: the file stem of its `video` path.
pub fn video_id_from_path(video: &str) -> Option<String> {
    let name = video.rsplit(['/', '\\']).next()?;
    let stem = match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    };
    (!stem.is_empty()).then(|| stem.to_string())
}
