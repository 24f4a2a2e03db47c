//! Look-ahead enqueue on `PlaybackNearlyFinished`
//!
//! At most one ENQUEUE is issued per playing track: `next_stream_enqueued`
//! stays set until the next `PlaybackStarted`/`PlaybackFinished` or a new play.

use crate::response::PlayDirective;
use tracing::debug;
use vault_core::SessionDocument;

/// Plan the ENQUEUE for the track after the current one, marking it issued
///
/// Returns `None` when an enqueue is already outstanding, when the play order
/// is empty, or when the next position would wrap past the end with loop off.
pub fn enqueue_next(session: &mut SessionDocument) -> Option<PlayDirective> {
    let loop_enabled = session.playback_setting.loop_enabled;
    let info = &session.playback_info;

    if info.next_stream_enqueued {
        debug!(token = %info.token, "Next stream already enqueued");
        return None;
    }

    let len = info.play_order.len();
    if len == 0 {
        return None;
    }

    let enqueue_index = (info.index + 1) % len;
    if enqueue_index == 0 && !loop_enabled {
        debug!(index = info.index, "End of play order, nothing to enqueue");
        return None;
    }

    let token = info.token_at(enqueue_index)?;
    let track = session.track_at(enqueue_index)?;
    let directive = PlayDirective::enqueue(track.url.clone(), token, info.token.clone());

    session.playback_info.next_stream_enqueued = true;
    debug!(
        enqueue_index,
        token = %directive.token,
        expected_previous_token = %session.playback_info.token,
        "Enqueued next stream"
    );
    Some(directive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::PlayBehavior;
    use vault_core::Track;

    fn session(index: usize, loop_enabled: bool) -> SessionDocument {
        let mut doc = SessionDocument::fresh(
            vec![
                Track::new("A", "https://cdn/a.mp3"),
                Track::new("B", "https://cdn/b.mp3"),
                Track::new("C", "https://cdn/c.mp3"),
            ],
            false,
        );
        doc.playback_setting.loop_enabled = loop_enabled;
        doc.playback_info.index = index;
        doc.playback_info.token = index.to_string();
        doc
    }

    #[test]
    fn enqueues_following_track() {
        let mut doc = session(0, false);
        let directive = enqueue_next(&mut doc).unwrap();
        assert_eq!(directive.behavior, PlayBehavior::Enqueue);
        assert_eq!(directive.url, "https://cdn/b.mp3");
        assert_eq!(directive.token, "1");
        assert_eq!(directive.expected_previous_token.as_deref(), Some("0"));
        assert_eq!(directive.offset_ms, 0);
        assert!(doc.playback_info.next_stream_enqueued);
    }

    #[test]
    fn second_call_is_a_no_op() {
        let mut doc = session(0, false);
        assert!(enqueue_next(&mut doc).is_some());
        assert!(enqueue_next(&mut doc).is_none());
    }

    #[test]
    fn does_not_wrap_without_loop() {
        let mut doc = session(2, false);
        assert!(enqueue_next(&mut doc).is_none());
        assert!(!doc.playback_info.next_stream_enqueued);
    }

    #[test]
    fn wraps_with_loop() {
        let mut doc = session(2, true);
        let directive = enqueue_next(&mut doc).unwrap();
        assert_eq!(directive.url, "https://cdn/a.mp3");
        assert_eq!(directive.token, "0");
        assert_eq!(directive.expected_previous_token.as_deref(), Some("2"));
    }

    #[test]
    fn follows_shuffled_order() {
        let mut doc = session(0, false);
        doc.playback_info.play_order = vec![2, 0, 1];
        doc.playback_info.token = "2".to_string();
        let directive = enqueue_next(&mut doc).unwrap();
        assert_eq!(directive.url, "https://cdn/a.mp3");
        assert_eq!(directive.token, "0");
    }

    #[test]
    fn empty_order_is_a_no_op() {
        let mut doc = SessionDocument::fresh(Vec::new(), false);
        assert!(enqueue_next(&mut doc).is_none());
    }
}
