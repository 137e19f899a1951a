//! Flattening Panda-70M metadata rows into downloadable clips.

use doomscroll_core::DatasetRow;
use serde_json::Value;

use super::literal::parse_literal;
use super::timestamp::parse_timestamp;

/// One captioned time section of a YouTube video.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub video_id: String,
    pub clip_idx: usize,
    pub start_secs: f64,
    pub end_secs: f64,
    pub caption: String,
}

impl Clip {
    /// File stem of the clip's video and caption: `<video_id>_<clip_idx>`.
    pub fn stem(&self) -> String {
        format!("{}_{}", self.video_id, self.clip_idx)
    }

    /// Source page on YouTube.
    pub fn url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

/// Clips of one metadata row (`videoID`, `timestamp`, `caption`).
///
/// `timestamp` and `caption` may be lists or strings holding literal lists.
/// If either string fails to parse, both raw values are used as they are.
/// Only two-element timestamps with parseable bounds become clips.
pub fn clips_from_row(row: &DatasetRow) -> Vec<Clip> {
    let Some(video_id) = row.get("videoID").and_then(Value::as_str) else {
        return Vec::new();
    };
    let raw_timestamps = row.get("timestamp").cloned().unwrap_or(Value::Null);
    let raw_captions = row.get("caption").cloned().unwrap_or(Value::Null);

    let (timestamps, captions) = match (decode(&raw_timestamps), decode(&raw_captions)) {
        (Some(ts), Some(caps)) => (ts, caps),
        _ => (raw_timestamps, raw_captions),
    };

    as_list(timestamps)
        .into_iter()
        .zip(as_list(captions))
        .enumerate()
        .filter_map(|(clip_idx, (ts, caption))| {
            let Value::Array(bounds) = ts else {
                return None;
            };
            let [start, end] = bounds.as_slice() else {
                return None;
            };
            let (start_secs, end_secs) = match (seconds(start), seconds(end)) {
                (Some(start), Some(end)) => (start, end),
                _ => {
                    tracing::debug!(video_id, clip_idx, "Skipping clip with unreadable timestamp");
                    return None;
                }
            };
            Some(Clip {
                video_id: video_id.to_string(),
                clip_idx,
                start_secs,
                end_secs,
                caption: caption_text(caption),
            })
        })
        .collect()
}

/// Strings are literal-parsed; other values pass through.
fn decode(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => parse_literal(s).ok(),
        other => Some(other.clone()),
    }
}

fn as_list(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}

fn seconds(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => parse_timestamp(s).ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

fn caption_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> DatasetRow {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_string_literals_are_parsed() {
        let clips = clips_from_row(&row(json!({
            "videoID": "abc123",
            "timestamp": "[['0:00:00.000', '0:00:05.500'], ['0:00:10.000', '0:00:12.250']]",
            "caption": "['a dog runs', 'a cat sleeps']",
        })));

        assert_eq!(clips.len(), 2);
        assert_eq!(clips[0].stem(), "abc123_0");
        assert!((clips[0].end_secs - 5.5).abs() < 1e-9);
        assert_eq!(clips[1].caption, "a cat sleeps");
        assert!((clips[1].start_secs - 10.0).abs() < 1e-9);
        assert_eq!(clips[1].url(), "https://www.youtube.com/watch?v=abc123");
    }

    #[test]
    fn test_json_lists_pass_through() {
        let clips = clips_from_row(&row(json!({
            "videoID": "xyz",
            "timestamp": [["0:01.0", "0:02.0"]],
            "caption": ["someone cooking"],
        })));
        assert_eq!(clips.len(), 1);
        assert!((clips[0].start_secs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_timestamps_are_skipped_but_keep_indices() {
        let clips = clips_from_row(&row(json!({
            "videoID": "v",
            "timestamp": [["0:00:01.0"], ["0:00:01.0", "0:00:02.0", "x"], ["0:00:03.0", "0:00:04.0"]],
            "caption": ["one", "two", "three"],
        })));
        assert_eq!(clips.len(), 1);
        assert_eq!(clips[0].clip_idx, 2);
        assert_eq!(clips[0].caption, "three");
    }

    #[test]
    fn test_unparseable_caption_string_falls_back_to_raw_values() {
        // The caption is not a literal, so the timestamp string stays raw too
        // and is not a two-element list.
        let clips = clips_from_row(&row(json!({
            "videoID": "v",
            "timestamp": "[['0:00:00.000', '0:00:05.000']]",
            "caption": "a plain sentence",
        })));
        assert!(clips.is_empty());
    }

    #[test]
    fn test_zip_stops_at_shorter_list() {
        let clips = clips_from_row(&row(json!({
            "videoID": "v",
            "timestamp": [["0:00:00.0", "0:00:01.0"], ["0:00:01.0", "0:00:02.0"]],
            "caption": ["only one"],
        })));
        assert_eq!(clips.len(), 1);
    }

    #[test]
    fn test_row_without_video_id_has_no_clips() {
        assert!(clips_from_row(&row(json!({ "timestamp": [], "caption": [] }))).is_empty());
    }
}
