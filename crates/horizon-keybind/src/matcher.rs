//! Multi-step sequence tracking.
//!
//! Every registered sequence owns an independent cursor that advances as
//! matching events arrive. Cursors are driven purely by event timestamps:
//! a step deadline is `event time + timeout`, and expiry is resolved lazily
//! when the next relevant event is examined. No timers run in the
//! background, so tests can drive the matcher with synthetic instants.

use std::time::{Duration, Instant};

use slotmap::SecondaryMap;

use crate::binding::{KeyChord, SequenceBinding};
use crate::dispatch::KeyPhase;
use crate::registry::HandlerId;

// =============================================================================
// Cursor
// =============================================================================

/// Progress of one sequence through its steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cursor {
    /// No steps matched; waiting for the first step.
    Idle,
    /// `matched` leading steps have been seen; the next step must arrive by
    /// `deadline`.
    Partial { matched: usize, deadline: Instant },
}

/// Cursor state for a single registered sequence.
#[derive(Clone, Debug)]
struct SequenceTracker {
    steps: Vec<KeyChord>,
    timeout: Duration,
    phase: KeyPhase,
    enabled: bool,
    cursor: Cursor,
}

impl SequenceTracker {
    /// Whether this tracker examines events of the given phase at all.
    ///
    /// Events of other phases are invisible: they neither advance nor reset
    /// the cursor.
    fn observes(&self, phase: KeyPhase) -> bool {
        self.enabled && self.phase == phase
    }
}

// =============================================================================
// Sequence Matcher
// =============================================================================

/// Result of feeding one event through every sequence cursor.
#[derive(Debug, Default)]
pub(crate) struct AdvanceResult {
    /// Sequences completed by this event, in registration order.
    pub completed: Vec<HandlerId>,
    /// Whether any cursor is mid-sequence after this event.
    pub pending: bool,
}

/// Tracks partial progress for every registered sequence binding.
///
/// Each sequence advances independently: one event is matched against every
/// cursor, so sequences with shared prefixes stay simultaneously viable and
/// several sequences can complete on the same event.
#[derive(Debug, Default)]
pub(crate) struct SequenceMatcher {
    trackers: SecondaryMap<HandlerId, SequenceTracker>,
    order: Vec<HandlerId>,
}

impl SequenceMatcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Start tracking a newly registered sequence.
    pub(crate) fn insert(
        &mut self,
        id: HandlerId,
        binding: &SequenceBinding,
        phase: KeyPhase,
        enabled: bool,
    ) {
        self.trackers.insert(
            id,
            SequenceTracker {
                steps: binding.steps().to_vec(),
                timeout: binding.timeout(),
                phase,
                enabled,
                cursor: Cursor::Idle,
            },
        );
        self.order.push(id);
    }

    /// Stop tracking an unregistered sequence. No-op for unknown ids.
    pub(crate) fn remove(&mut self, id: HandlerId) {
        if self.trackers.remove(id).is_some() {
            self.order.retain(|&other| other != id);
        }
    }

    /// Drop all trackers.
    pub(crate) fn clear(&mut self) {
        self.trackers.clear();
        self.order.clear();
    }

    /// Reset every cursor to idle without forgetting the sequences.
    pub(crate) fn reset_all(&mut self) {
        for (_, tracker) in self.trackers.iter_mut() {
            tracker.cursor = Cursor::Idle;
        }
    }

    /// Feed one event through every cursor.
    ///
    /// A cursor that expects `chord` as its next step advances; reaching the
    /// final step completes the sequence and resets the cursor. A mismatched
    /// event resets a partial cursor, but may simultaneously start a fresh
    /// attempt when it equals the sequence's first step. Events whose phase a
    /// tracker does not observe leave that cursor untouched.
    pub(crate) fn advance(
        &mut self,
        chord: KeyChord,
        phase: KeyPhase,
        now: Instant,
    ) -> AdvanceResult {
        let mut result = AdvanceResult::default();

        for &id in &self.order {
            let Some(tracker) = self.trackers.get_mut(id) else {
                continue;
            };
            if !tracker.observes(phase) {
                continue;
            }

            // An expired partial match behaves exactly like an idle cursor.
            let matched = match tracker.cursor {
                Cursor::Partial { matched, deadline } if now <= deadline => matched,
                _ => 0,
            };

            if chord == tracker.steps[matched] {
                let matched = matched + 1;
                if matched == tracker.steps.len() {
                    tracing::trace!(
                        target: "horizon_keybind::matcher",
                        ?id,
                        steps = tracker.steps.len(),
                        "sequence completed"
                    );
                    result.completed.push(id);
                    tracker.cursor = Cursor::Idle;
                } else {
                    tracker.cursor = Cursor::Partial {
                        matched,
                        deadline: now + tracker.timeout,
                    };
                }
            } else if matched > 0 && chord == tracker.steps[0] {
                // The interloper itself restarts the sequence.
                tracker.cursor = Cursor::Partial {
                    matched: 1,
                    deadline: now + tracker.timeout,
                };
            } else {
                tracker.cursor = Cursor::Idle;
            }
        }

        result.pending = self.trackers.values().any(|tracker| {
            matches!(tracker.cursor, Cursor::Partial { deadline, .. } if now <= deadline)
        });

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Key;
    use slotmap::SlotMap;

    const TIMEOUT: Duration = Duration::from_millis(1000);

    fn chord(key: Key) -> KeyChord {
        KeyChord::key_only(key)
    }

    struct Fixture {
        slots: SlotMap<HandlerId, ()>,
        matcher: SequenceMatcher,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                slots: SlotMap::with_key(),
                matcher: SequenceMatcher::new(),
            }
        }

        fn add(&mut self, steps: Vec<KeyChord>, timeout: Duration) -> HandlerId {
            let id = self.slots.insert(());
            self.matcher.insert(
                id,
                &SequenceBinding::new(steps, timeout),
                KeyPhase::Down,
                true,
            );
            id
        }

        fn feed(&mut self, key: Key, now: Instant) -> AdvanceResult {
            self.matcher.advance(chord(key), KeyPhase::Down, now)
        }
    }

    #[test]
    fn test_sequence_completes_within_timeout() {        let mut fx = Fixture::new();
        let id = fx.add(vec![chord(Key::G), chord(Key::H)], TIMEOUT);
        let base = Instant::now();

        let first = fx.feed(Key::G, base);
        assert!(first.completed.is_empty());
        assert!(first.pending);

        let second = fx.feed(Key::H, base + Duration::from_millis(500));
        assert_eq!(second.completed, vec![id]);
        assert!(!second.pending);
    }

    #[test]
    fn test_completion_resets_the_cursor() {        let mut fx = Fixture::new();
        fx.add(vec![chord(Key::G), chord(Key::H)], TIMEOUT);
        let base = Instant::now();

        fx.feed(Key::G, base);
        fx.feed(Key::H, base + Duration::from_millis(100));

        // The tail of the completed sequence must not complete it again.
        let replay = fx.feed(Key::H, base + Duration::from_millis(200));
        assert!(replay.completed.is_empty());
        assert!(!replay.pending);
    }

    #[test]
    fn test_step_exactly_at_deadline_still_counts() {        let mut fx = Fixture::new();
        let id = fx.add(vec![chord(Key::G), chord(Key::H)], TIMEOUT);
        let base = Instant::now();

        fx.feed(Key::G, base);
        let result = fx.feed(Key::H, base + TIMEOUT);
        assert_eq!(result.completed, vec![id]);
    }

    #[test]
    fn test_step_after_deadline_is_discarded() {        let mut fx = Fixture::new();
        fx.add(vec![chord(Key::G), chord(Key::H)], TIMEOUT);
        let base = Instant::now();

        fx.feed(Key::G, base);
        let late = fx.feed(Key::H, base + TIMEOUT + Duration::from_millis(1));
        assert!(late.completed.is_empty());
        assert!(!late.pending);
    }

    #[test]
    fn test_mismatch_resets_partial_progress() {        let mut fx = Fixture::new();
        fx.add(vec![chord(Key::G), chord(Key::H)], TIMEOUT);
        let base = Instant::now();

        fx.feed(Key::G, base);
        let interloper = fx.feed(Key::X, base + Duration::from_millis(100));
        assert!(!interloper.pending);

        // The prior progress is gone, so the second step alone does nothing.
        let tail = fx.feed(Key::H, base + Duration::from_millis(200));
        assert!(tail.completed.is_empty());
    }

    #[test]
    fn test_mismatch_matching_first_step_restarts() {        let mut fx = Fixture::new();
        let id = fx.add(vec![chord(Key::G), chord(Key::H)], TIMEOUT);
        let base = Instant::now();

        // g g h: the second g is a mismatch for step two but restarts the
        // sequence, so the following h completes it.
        fx.feed(Key::G, base);
        let restart = fx.feed(Key::G, base + Duration::from_millis(900));
        assert!(restart.pending);

        // The restart refreshed the deadline, so a step that would have been
        // late for the original attempt still lands.
        let result = fx.feed(Key::H, base + Duration::from_millis(1800));
        assert_eq!(result.completed, vec![id]);
    }

    #[test]
    fn test_shared_prefix_keeps_both_sequences_viable() {        let mut fx = Fixture::new();
        let _gh = fx.add(vec![chord(Key::G), chord(Key::H)], TIMEOUT);
        let gi = fx.add(vec![chord(Key::G), chord(Key::I)], TIMEOUT);
        let base = Instant::now();

        let prefix = fx.feed(Key::G, base);
        assert!(prefix.pending);

        let result = fx.feed(Key::I, base + Duration::from_millis(100));
        assert_eq!(result.completed, vec![gi]);

        // The other branch lost its progress to the mismatch.
        let tail = fx.feed(Key::H, base + Duration::from_millis(200));
        assert!(tail.completed.is_empty());
    }

    #[test]
    fn test_completing_event_may_start_another_sequence() {        let mut fx = Fixture::new();
        let gh = fx.add(vec![chord(Key::G), chord(Key::H)], TIMEOUT);
        let hj = fx.add(vec![chord(Key::H), chord(Key::J)], TIMEOUT);
        let base = Instant::now();

        fx.feed(Key::G, base);
        let mid = fx.feed(Key::H, base + Duration::from_millis(100));
        assert_eq!(mid.completed, vec![gh]);
        // The same h began the second sequence.
        assert!(mid.pending);

        let result = fx.feed(Key::J, base + Duration::from_millis(200));
        assert_eq!(result.completed, vec![hj]);
    }

    #[test]
    fn test_identical_sequences_complete_together_in_registration_order() {        let mut fx = Fixture::new();
        let first = fx.add(vec![chord(Key::G), chord(Key::H)], TIMEOUT);
        let second = fx.add(vec![chord(Key::G), chord(Key::H)], TIMEOUT);
        let base = Instant::now();

        fx.feed(Key::G, base);
        let result = fx.feed(Key::H, base + Duration::from_millis(100));
        assert_eq!(result.completed, vec![first, second]);
    }

    #[test]
    fn test_single_step_sequence_completes_immediately() {        let mut fx = Fixture::new();
        let id = fx.add(vec![chord(Key::G)], TIMEOUT);

        let result = fx.feed(Key::G, Instant::now());
        assert_eq!(result.completed, vec![id]);
        assert!(!result.pending);
    }

    #[test]
    fn test_disabled_sequence_never_advances() {        let mut fx = Fixture::new();
        let id = fx.slots.insert(());
        fx.matcher.insert(
            id,
            &SequenceBinding::new(vec![chord(Key::G), chord(Key::H)], TIMEOUT),
            KeyPhase::Down,
            false,
        );
        let base = Instant::now();

        let first = fx.feed(Key::G, base);
        assert!(!first.pending);
        let second = fx.feed(Key::H, base + Duration::from_millis(100));
        assert!(second.completed.is_empty());
    }

    #[test]
    fn test_other_phases_are_invisible_to_the_cursor() {        let mut fx = Fixture::new();
        let id = fx.add(vec![chord(Key::G), chord(Key::H)], TIMEOUT);
        let base = Instant::now();

        fx.feed(Key::G, base);
        // A key-up for some other key must not reset the partial match.
        let up = fx
            .matcher
            .advance(chord(Key::X), KeyPhase::Up, base + Duration::from_millis(100));
        assert!(up.completed.is_empty());
        assert!(up.pending);

        let result = fx.feed(Key::H, base + Duration::from_millis(200));
        assert_eq!(result.completed, vec![id]);
    }

    #[test]
    fn test_removed_sequence_stops_matching() {        let mut fx = Fixture::new();
        let id = fx.add(vec![chord(Key::G)], TIMEOUT);
        fx.matcher.remove(id);

        let result = fx.feed(Key::G, Instant::now());
        assert!(result.completed.is_empty());
    }

    #[test]
    fn test_reset_all_abandons_partial_progress() {        let mut fx = Fixture::new();
        fx.add(vec![chord(Key::G), chord(Key::H)], TIMEOUT);
        let base = Instant::now();

        fx.feed(Key::G, base);
        fx.matcher.reset_all();

        let tail = fx.feed(Key::H, base + Duration::from_millis(100));
        assert!(tail.completed.is_empty());
    }
}
