use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use super::{Snippet, Transcript, TranscriptError, TranscriptSource};

const PLAYER_ENDPOINT: &str = "https://www.youtube.com/youtubei/v1/player";

// Innertube client identity; the ANDROID client returns caption tracks
// without the consent and ciphering hoops the web client adds.
const CLIENT_NAME: &str = "ANDROID";
const CLIENT_VERSION: &str = "20.10.38";

/// Fetches caption transcripts from YouTube's innertube player endpoint
pub struct YoutubeTranscriptFetcher {
    client: reqwest::Client,
    languages: Vec<String>,
}

impl YoutubeTranscriptFetcher {
    pub fn new(client: reqwest::Client, languages: Vec<String>) -> Self {
        Self { client, languages }
    }

    /// Resolve the video's caption track list via the player endpoint
    async fn player_response(&self, video_id: &str) -> Result<PlayerResponse, TranscriptError> {
        let body = json!({
            "context": {
                "client": {
                    "clientName": CLIENT_NAME,
                    "clientVersion": CLIENT_VERSION,
                }
            },
            "videoId": video_id,
        });

        let response = self
            .client
            .post(PLAYER_ENDPOINT)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<PlayerResponse>().await?)
    }

    /// Pick a caption track: preferred languages first (manual tracks over
    /// auto-generated), then whatever the video offers.
    fn select_track<'a>(
        &self,
        tracks: &'a [CaptionTrack],
    ) -> Option<&'a CaptionTrack> {
        for lang in &self.languages {
            let matching = tracks
                .iter()
                .filter(|track| track.language_code.starts_with(lang.as_str()));

            if let Some(track) = matching.clone().find(|track| !track.is_auto_generated()) {
                return Some(track);
            }
            if let Some(track) = matching.clone().next() {
                return Some(track);
            }
        }

        tracks.iter().find(|track| !track.is_auto_generated()).or_else(|| tracks.first())
    }

    /// Fetch a caption track in json3 format and parse it into snippets
    async fn fetch_track(&self, track: &CaptionTrack) -> Result<Vec<Snippet>, TranscriptError> {
        let mut url = Url::parse(&track.base_url)
            .map_err(|e| TranscriptError::Malformed(format!("bad caption track URL: {e}")))?;
        url.query_pairs_mut().append_pair("fmt", "json3");

        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_json3(&body)
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptFetcher {
    async fn fetch(&self, video_id: &str) -> Result<Transcript, TranscriptError> {
        tracing::debug!("Resolving caption tracks for video: {}", video_id);

        let player = self.player_response(video_id).await?;

        match player.playability_status.status.as_str() {
            "OK" => {}
            "ERROR" => {
                return Err(TranscriptError::NotFound(video_id.to_string()));
            }
            status => {
                return Err(TranscriptError::Unavailable {
                    video_id: video_id.to_string(),
                    reason: player
                        .playability_status
                        .reason
                        .unwrap_or_else(|| status.to_string()),
                });
            }
        }

        let tracks = player
            .captions
            .and_then(|captions| captions.renderer)
            .map(|renderer| renderer.caption_tracks)
            .unwrap_or_default();

        let track = self
            .select_track(&tracks)
            .ok_or_else(|| TranscriptError::CaptionsDisabled(video_id.to_string()))?;

        tracing::debug!(
            "Fetching caption track ({}, auto-generated: {})",
            track.language_code,
            track.is_auto_generated()
        );

        let snippets = self.fetch_track(track).await?;

        Ok(Transcript {
            video_id: video_id.to_string(),
            language: Some(track.language_code.clone()),
            snippets,
        })
    }
}

/// Parse a json3 caption payload into ordered snippets. Events without
/// text segments (window definitions, blank lines) are skipped.
fn parse_json3(body: &str) -> Result<Vec<Snippet>, TranscriptError> {
    let timed_text: TimedText = serde_json::from_str(body)
        .map_err(|e| TranscriptError::Malformed(format!("invalid json3 payload: {e}")))?;

    let snippets = timed_text
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event
                .segs?
                .iter()
                .map(|seg| seg.utf8.as_str())
                .collect::<String>()
                .replace('\n', " ")
                .trim()
                .to_string();

            if text.is_empty() {
                return None;
            }

            Some(Snippet {
                text,
                start: event.start_ms as f64 / 1000.0,
                duration: event.duration_ms.unwrap_or(0) as f64 / 1000.0,
            })
        })
        .collect();

    Ok(snippets)
}

// Subset of the innertube player response we care about

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    playability_status: PlayabilityStatus,
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayabilityStatus {
    status: String,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Captions {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    kind: Option<String>,
}

impl CaptionTrack {
    fn is_auto_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

// json3 caption track format

#[derive(Debug, Deserialize)]
struct TimedText {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
struct TimedTextEvent {
    #[serde(rename = "tStartMs", default)]
    start_ms: u64,
    #[serde(rename = "dDurationMs")]
    duration_ms: Option<u64>,
    segs: Option<Vec<TimedTextSeg>>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSeg {
    #[serde(default)]
    utf8: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(language_code: &str, kind: Option<&str>) -> CaptionTrack {
        CaptionTrack {
            base_url: "https://www.youtube.com/api/timedtext?v=abc".to_string(),
            language_code: language_code.to_string(),
            kind: kind.map(|k| k.to_string()),
        }
    }

    fn fetcher(languages: &[&str]) -> YoutubeTranscriptFetcher {
        YoutubeTranscriptFetcher::new(
            reqwest::Client::new(),
            languages.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn parses_json3_events_in_order() {
        let body = r#"{
            "events": [
                {"tStartMs": 0, "dDurationMs": 1500, "segs": [{"utf8": "Hello"}]},
                {"tStartMs": 1500, "dDurationMs": 2000, "segs": [{"utf8": "world"}]}
            ]
        }"#;

        let snippets = parse_json3(body).unwrap();
        assert_eq!(snippets.len(), 2);
        assert_eq!(snippets[0].text, "Hello");
        assert_eq!(snippets[0].start, 0.0);
        assert_eq!(snippets[0].duration, 1.5);
        assert_eq!(snippets[1].text, "world");
        assert_eq!(snippets[1].start, 1.5);
    }

    #[test]
    fn skips_events_without_segments() {
        let body = r#"{
            "events": [
                {"tStartMs": 0, "dDurationMs": 100},
                {"tStartMs": 100, "dDurationMs": 100, "segs": [{"utf8": "\n"}]},
                {"tStartMs": 200, "dDurationMs": 100, "segs": [{"utf8": "kept"}]}
            ]
        }"#;

        let snippets = parse_json3(body).unwrap();
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].text, "kept");
    }

    #[test]
    fn joins_multiple_segments_within_an_event() {
        let body = r#"{
            "events": [
                {"tStartMs": 0, "segs": [{"utf8": "Hello "}, {"utf8": "world"}]}
            ]
        }"#;

        let snippets = parse_json3(body).unwrap();
        assert_eq!(snippets[0].text, "Hello world");
    }

    #[test]
    fn malformed_payload_is_a_typed_error() {
        let err = parse_json3("<html>not json</html>").unwrap_err();
        assert!(matches!(err, TranscriptError::Malformed(_)));
    }

    #[test]
    fn prefers_manual_track_in_requested_language() {
        let tracks = vec![
            track("en", Some("asr")),
            track("en", None),
            track("es", None),
        ];

        let selected = fetcher(&["en"]).select_track(&tracks).unwrap();
        assert_eq!(selected.language_code, "en");
        assert!(!selected.is_auto_generated());
    }

    #[test]
    fn falls_back_to_auto_generated_track() {
        let tracks = vec![track("en", Some("asr"))];

        let selected = fetcher(&["en"]).select_track(&tracks).unwrap();
        assert!(selected.is_auto_generated());
    }

    #[test]
    fn falls_back_to_any_track_when_no_language_matches() {
        let tracks = vec![track("de", None)];

        let selected = fetcher(&["en"]).select_track(&tracks).unwrap();
        assert_eq!(selected.language_code, "de");
    }

    #[test]
    fn no_tracks_means_no_selection() {
        assert!(fetcher(&["en"]).select_track(&[]).is_none());
    }
}
