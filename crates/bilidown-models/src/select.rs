//! Stream selection policy.
//!
//! Two independent selections over the provider-returned format list:
//! video-only tracks preferring exactly 1080p, audio-only tracks preferring
//! a sample rate at or above the configured threshold. Both fall back to
//! the maximum available, first occurrence winning ties. This is the only
//! quality-control logic in the system.

use thiserror::Error;

use crate::stream::StreamFormat;

/// Result type for stream selection.
pub type SelectResult<'a> = Result<&'a StreamFormat, SelectError>;

/// Errors from stream selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("no video-only track available")]
    NoVideoTrack,

    #[error("no audio-only track available")]
    NoAudioTrack,
}

/// Video height preferred over any higher resolution.
pub const PREFERRED_VIDEO_HEIGHT: u32 = 1080;

/// Pick the video-only format: first with height exactly 1080, else the
/// first occurrence of the maximum height.
pub fn select_video(formats: &[StreamFormat]) -> SelectResult<'_> {
    let candidates: Vec<&StreamFormat> =
        formats.iter().filter(|f| f.is_video_only()).collect();
    if candidates.is_empty() {
        return Err(SelectError::NoVideoTrack);
    }

    if let Some(exact) = candidates
        .iter()
        .copied()
        .find(|f| f.height == Some(PREFERRED_VIDEO_HEIGHT))
    {
        return Ok(exact);
    }

    Ok(first_max_by_key(&candidates, |f| f.height.unwrap_or(0)))
}

/// Pick the audio-only format: first with sample rate at or above
/// `preferred_sample_rate`, else the first occurrence of the maximum rate.
pub fn select_audio(
    formats: &[StreamFormat],
    preferred_sample_rate: u32,
) -> SelectResult<'_> {
    let candidates: Vec<&StreamFormat> =
        formats.iter().filter(|f| f.is_audio_only()).collect();
    if candidates.is_empty() {
        return Err(SelectError::NoAudioTrack);
    }

    if let Some(preferred) = candidates
        .iter()
        .copied()
        .find(|f| f.asr.unwrap_or(0) >= preferred_sample_rate)
    {
        return Ok(preferred);
    }

    Ok(first_max_by_key(&candidates, |f| f.asr.unwrap_or(0)))
}

/// First occurrence of the maximum: `Iterator::max_by_key` keeps the last
/// of equal elements, so scan manually with a strict comparison.
fn first_max_by_key<'a, K: Ord>(
    candidates: &[&'a StreamFormat],
    key: impl Fn(&StreamFormat) -> K,
) -> &'a StreamFormat {
    let mut best = candidates[0];
    for &f in &candidates[1..] {
        if key(f) > key(best) {
            best = f;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, height: u32) -> StreamFormat {
        StreamFormat {
            format_id: id.to_string(),
            vcodec: Some("avc1".to_string()),
            acodec: Some("none".to_string()),
            height: Some(height),
            asr: None,
            ext: Some("mp4".to_string()),
        }
    }

    fn audio(id: &str, asr: u32) -> StreamFormat {
        StreamFormat {
            format_id: id.to_string(),
            vcodec: Some("none".to_string()),
            acodec: Some("mp4a".to_string()),
            height: None,
            asr: Some(asr),
            ext: Some("m4a".to_string()),
        }
    }

    fn muxed(id: &str) -> StreamFormat {
        StreamFormat {
            format_id: id.to_string(),
            vcodec: Some("avc1".to_string()),
            acodec: Some("mp4a".to_string()),
            height: Some(720),
            asr: Some(44100),
            ext: Some("mp4".to_string()),
        }
    }

    #[test]
    fn test_video_prefers_1080_regardless_of_position() {
        let formats = vec![video("a", 720), video("b", 1440), video("c", 1080)];
        assert_eq!(select_video(&formats).unwrap().format_id, "c");

        let formats = vec![video("x", 1080), video("y", 2160)];
        assert_eq!(select_video(&formats).unwrap().format_id, "x");
    }

    #[test]
    fn test_video_falls_back_to_max_height_first_wins() {
        let formats = vec![video("a", 480), video("b", 720), video("c", 720)];
        assert_eq!(select_video(&formats).unwrap().format_id, "b");
    }

    #[test]
    fn test_video_ignores_muxed_and_audio_formats() {
        let formats = vec![muxed("m"), audio("a", 48000), video("v", 360)];
        assert_eq!(select_video(&formats).unwrap().format_id, "v");
    }

    #[test]
    fn test_video_none_available() {
        let formats = vec![muxed("m"), audio("a", 48000)];
        assert_eq!(select_video(&formats), Err(SelectError::NoVideoTrack));
        assert_eq!(select_video(&[]), Err(SelectError::NoVideoTrack));
    }

    #[test]
    fn test_audio_prefers_first_at_or_above_threshold() {
        let formats = vec![audio("a", 44100), audio("b", 48000), audio("c", 96000)];
        assert_eq!(select_audio(&formats, 48000).unwrap().format_id, "b");
    }

    #[test]
    fn test_audio_falls_back_to_max_rate_first_wins() {
        let formats = vec![audio("a", 22050), audio("b", 44100), audio("c", 44100)];
        assert_eq!(select_audio(&formats, 48000).unwrap().format_id, "b");
    }

    #[test]
    fn test_audio_none_available() {
        let formats = vec![muxed("m"), video("v", 1080)];
        assert_eq!(
            select_audio(&formats, 48000),
            Err(SelectError::NoAudioTrack)
        );
    }

    #[test]
    fn test_missing_height_and_asr_rank_lowest() {
        let mut no_height = video("nh", 0);
        no_height.height = None;
        let formats = vec![no_height, video("v", 240)];
        assert_eq!(select_video(&formats).unwrap().format_id, "v");

        let mut no_asr = audio("na", 0);
        no_asr.asr = None;
        let formats = vec![no_asr, audio("a", 8000)];
        assert_eq!(select_audio(&formats, 48000).unwrap().format_id, "a");
    }
}
