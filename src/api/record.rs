// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::Deserialize;

/// A single episode as returned by the episodes API, before formatting
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawEpisodeRecord {
    pub id: String,
    pub title: String,
    pub members: String,
    pub published_at: String,
    pub thumbnail: String,
    pub description: String,
    #[serde(default)]
    pub file: RawEpisodeFile,
}

/// The audio file attached to a raw episode record
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawEpisodeFile {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub duration: RawDuration,
}

/// Duration in seconds as the API sends it: a number, a numeric string,
/// nothing at all, or some other JSON value that cannot be a duration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawDuration {
    Number(f64),
    Text(String),
    #[default]
    Missing,
    Other(serde_json::Value),
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RECORD: &str = r#"{
        "id": "a-importancia-da-contribuicao-em-open-source",
        "title": "Faladev #30 | A importância da contribuição em Open Source",
        "members": "Diego Fernandes, João Pedro, Diego Schell e Bruno Lemos",
        "published_at": "2021-01-22 19:00:00",
        "thumbnail": "https://example.com/thumb.jpg",
        "description": "<p>Open source description</p>",
        "file": {
            "url": "https://example.com/episode.m4a",
            "type": "audio/x-m4a",
            "duration": 3981
        }
    }"#;

    #[test]
    fn deserializes_api_record() {
        let record: RawEpisodeRecord = serde_json::from_str(SAMPLE_RECORD).unwrap();

        assert_eq!(record.id, "a-importancia-da-contribuicao-em-open-source");
        assert_eq!(record.published_at, "2021-01-22 19:00:00");
        assert_eq!(record.file.url, "https://example.com/episode.m4a");
        assert_eq!(record.file.duration, RawDuration::Number(3981.0));
    }

    #[test]
    fn duration_accepts_numeric_string() {
        let file: RawEpisodeFile =
            serde_json::from_str(r#"{"url": "https://example.com/a.mp3", "duration": "1800"}"#)
                .unwrap();
        assert_eq!(file.duration, RawDuration::Text("1800".to_string()));
    }

    #[test]
    fn duration_accepts_null_and_absence() {
        let null: RawEpisodeFile =
            serde_json::from_str(r#"{"url": "https://example.com/a.mp3", "duration": null}"#)
                .unwrap();
        let absent: RawEpisodeFile =
            serde_json::from_str(r#"{"url": "https://example.com/a.mp3"}"#).unwrap();

        assert_eq!(null.duration, RawDuration::Missing);
        assert_eq!(absent.duration, RawDuration::Missing);
    }

    #[test]
    fn duration_keeps_unexpected_values() {
        let file: RawEpisodeFile =
            serde_json::from_str(r#"{"url": "https://example.com/a.mp3", "duration": true}"#)
                .unwrap();
        assert_eq!(file.duration, RawDuration::Other(serde_json::Value::Bool(true)));
    }

    #[test]
    fn missing_file_defaults_to_empty() {
        let record: RawEpisodeRecord = serde_json::from_str(
            r#"{
                "id": "no-file",
                "title": "No file",
                "members": "Nobody",
                "published_at": "2021-01-01",
                "thumbnail": "",
                "description": ""
            }"#,
        )
        .unwrap();

        assert_eq!(record.file, RawEpisodeFile::default());
    }
}
