//! Pure snapshot diffing for the reconciliation watcher.

use crate::model::SubtitleRecord;

/// Returns the entries of `new` that should be reported upward.
///
/// An entry qualifies when no entry in `old` carries the same id in the
/// same load state (so both fresh entries and state transitions count) and
/// its state is ready or loaded. Failed entries stay invisible to
/// consumers rather than surfacing as deletions. Order follows `new`.
pub fn new_reportable(new: &[SubtitleRecord], old: &[SubtitleRecord]) -> Vec<SubtitleRecord> {
    new.iter()
        .filter(|record| {
            let unchanged = old
                .iter()
                .any(|o| o.id == record.id && o.load_state == record.load_state);
            !unchanged && record.load_state.is_reportable()
        })
        .cloned()
        .collect()
}

/// Groups (video, record) pairs by video.
///
/// Videos appear in first-encounter order and records keep their relative
/// order within each group, so emission order is deterministic.
pub fn group_by_video(
    pairs: Vec<(String, SubtitleRecord)>,
) -> Vec<(String, Vec<SubtitleRecord>)> {
    let mut groups: Vec<(String, Vec<SubtitleRecord>)> = Vec::new();
    for (video_id, record) in pairs {
        match groups.iter_mut().find(|(v, _)| *v == video_id) {
            Some((_, entries)) => entries.push(record),
            None => groups.push((video_id, vec![record])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Candidate, LoadState, SourceKind, SubtitleRecord};

    fn record(id: &str, state: LoadState) -> SubtitleRecord {
        let mut r = SubtitleRecord::from_candidate(&Candidate {
            id: id.to_string(),
            kind: SourceKind::Local,
            src: format!("/media/{id}.srt"),
            data: None,
            rank: 1,
            language: None,
            format: "srt".to_string(),
            name: None,
        });
        r.load_state = state;
        r
    }

    #[test]
    fn reports_only_new_ready_or_loaded_entries() {
        let new = vec![
            record("ready", LoadState::Ready),
            record("loaded", LoadState::Loaded),
            record("failed", LoadState::Failed),
            record("loading", LoadState::Loading),
        ];
        let old = vec![];

        let ids: Vec<String> = new_reportable(&new, &old)
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["ready", "loaded"]);
    }

    #[test]
    fn unchanged_entries_never_reported() {
        let old = vec![record("a", LoadState::Ready)];
        let new = vec![record("a", LoadState::Ready), record("b", LoadState::Loaded)];

        let ids: Vec<String> = new_reportable(&new, &old)
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[test]
    fn state_transitions_count_as_new() {
        let old = vec![record("a", LoadState::Loading)];
        let new = vec![record("a", LoadState::Ready)];

        let delta = new_reportable(&new, &old);
        assert_eq!(delta.len(), 1);
        assert_eq!(delta[0].id, "a");
    }

    #[test]
    fn transition_to_failed_stays_invisible() {
        let old = vec![record("a", LoadState::Loading)];
        let new = vec![record("a", LoadState::Failed)];

        assert!(new_reportable(&new, &old).is_empty());
    }

    #[test]
    fn grouping_preserves_first_encounter_order() {
        let pairs = vec![
            ("vid1".to_string(), record("a", LoadState::Ready)),
            ("vid2".to_string(), record("b", LoadState::Loaded)),
            ("vid1".to_string(), record("c", LoadState::Ready)),
        ];

        let groups = group_by_video(pairs);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "vid1");
        assert_eq!(groups[0].1.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(groups[1].0, "vid2");
        assert_eq!(groups[1].1.len(), 1);
    }
}
