use proptest::prelude::*;
use rov_qr_mission::tracker::{Observation, Point};
use rov_qr_mission::{ObjectId, ObjectTracker, TrackerConfig};

fn marker(payload: &str, x: f32, y: f32) -> Observation {
    Observation::new(
        payload,
        [
            Point::new(x - 15.0, y - 15.0),
            Point::new(x + 15.0, y - 15.0),
            Point::new(x + 15.0, y + 15.0),
            Point::new(x - 15.0, y + 15.0),
        ],
    )
}

#[test]
fn test_basic_tracking() {
    let mut tracker = ObjectTracker::new(TrackerConfig::default());

    // Frame 1: One marker
    let update = tracker.update(vec![marker("go left", 100.0, 100.0)]);
    assert_eq!(update.created, vec![ObjectId(1)]);

    // Frame 2: Same marker moved slightly
    let update = tracker.update(vec![marker("go left", 140.0, 120.0)]);
    assert_eq!(update.matched, vec![ObjectId(1)]);
    assert_eq!(tracker.len(), 1);

    // Frame 3: Marker out of view
    tracker.update(vec![]);
    assert_eq!(tracker.get(ObjectId(1)).unwrap().frames_unseen, 1);

    // Frame 4: Marker back, within the gate of its last position
    let update = tracker.update(vec![marker("go left", 150.0, 130.0)]);
    assert_eq!(update.matched, vec![ObjectId(1)]);
    assert_eq!(tracker.get(ObjectId(1)).unwrap().frames_unseen, 0);
}

#[test]
fn test_expiry_boundary() {
    let config = TrackerConfig {
        max_distance: 70.0,
        max_frames_unseen: 20,
    };
    let mut tracker = ObjectTracker::new(config);
    tracker.update(vec![marker("go left", 100.0, 100.0)]);

    for _ in 0..20 {
        let update = tracker.update(vec![]);
        assert!(update.expired.is_empty());
    }
    assert_eq!(tracker.get(ObjectId(1)).unwrap().frames_unseen, 20);

    let update = tracker.update(vec![]);
    assert_eq!(update.expired, vec![ObjectId(1)]);
    assert!(tracker.is_empty());
}

#[test]
fn test_expiry_while_other_markers_are_visible() {
    let mut tracker = ObjectTracker::new(TrackerConfig {
        max_distance: 70.0,
        max_frames_unseen: 2,
    });
    tracker.update(vec![marker("a", 0.0, 0.0), marker("b", 500.0, 0.0)]);

    for _ in 0..2 {
        tracker.update(vec![marker("b", 500.0, 0.0)]);
    }
    assert!(tracker.get(ObjectId(1)).is_some());

    let update = tracker.update(vec![marker("b", 500.0, 0.0)]);
    assert_eq!(update.expired, vec![ObjectId(1)]);
    assert_eq!(tracker.len(), 1);
}

#[test]
fn test_far_observation_creates_new_object() {
    let mut tracker = ObjectTracker::default();
    tracker.update(vec![marker("go left", 100.0, 100.0)]);

    let update = tracker.update(vec![marker("go left", 100.0, 171.0)]);
    assert_eq!(update.created, vec![ObjectId(2)]);
    assert!(update.matched.is_empty());
    assert_eq!(tracker.get(ObjectId(1)).unwrap().frames_unseen, 1);
}

#[test]
fn test_expired_ids_are_not_reused() {
    let mut tracker = ObjectTracker::new(TrackerConfig {
        max_distance: 70.0,
        max_frames_unseen: 0,
    });
    tracker.update(vec![marker("a", 0.0, 0.0)]);
    let update = tracker.update(vec![]);
    assert_eq!(update.expired, vec![ObjectId(1)]);

    let update = tracker.update(vec![marker("a", 0.0, 0.0)]);
    assert_eq!(update.created, vec![ObjectId(2)]);
}

#[test]
fn test_two_markers_keep_their_ids() {
    let mut tracker = ObjectTracker::default();
    tracker.update(vec![marker("go left", 100.0, 100.0), marker("go right", 400.0, 100.0)]);

    // Observation order swapped, both moved a little
    let update = tracker.update(vec![marker("go right", 390.0, 110.0), marker("go left", 110.0, 95.0)]);
    assert!(update.created.is_empty());
    assert_eq!(tracker.get(ObjectId(1)).unwrap().payload, "go left");
    assert_eq!(tracker.get(ObjectId(2)).unwrap().payload, "go right");
}

#[test]
fn test_greedy_matching_leaves_loser_unmatched() {
    let mut tracker = ObjectTracker::default();
    tracker.update(vec![marker("a", 0.0, 0.0), marker("b", 50.0, 0.0)]);

    // Both objects are closest to the marker at x=40; object 2 is closer and wins.
    // Object 1 does not fall back to the marker at x=60, which becomes a new object.
    let update = tracker.update(vec![marker("c", 40.0, 0.0), marker("d", 60.0, 0.0)]);
    assert_eq!(update.matched, vec![ObjectId(2)]);
    assert_eq!(update.created, vec![ObjectId(3)]);
    assert_eq!(tracker.get(ObjectId(2)).unwrap().payload, "c");
    assert_eq!(tracker.get(ObjectId(1)).unwrap().frames_unseen, 1);
    assert_eq!(tracker.get(ObjectId(3)).unwrap().payload, "d");
}

#[test]
fn test_iteration_order_is_creation_order() {
    let mut tracker = ObjectTracker::default();
    tracker.update(vec![marker("a", 300.0, 0.0)]);
    tracker.update(vec![marker("a", 300.0, 0.0), marker("b", 0.0, 0.0)]);
    let ids: Vec<ObjectId> = tracker.objects().map(|o| o.id).collect();
    assert_eq!(ids, vec![ObjectId(1), ObjectId(2)]);
}

proptest! {
    #[test]
    fn prop_id_stable_under_small_moves(
        steps in prop::collection::vec((-45.0f32..45.0, -45.0f32..45.0), 1..60)
    ) {
        let mut tracker = ObjectTracker::default();
        let (mut x, mut y) = (320.0f32, 240.0f32);
        tracker.update(vec![marker("go left", x, y)]);

        for (dx, dy) in steps {
            x += dx;
            y += dy;
            let update = tracker.update(vec![marker("go left", x, y)]);
            prop_assert_eq!(update.matched, vec![ObjectId(1)]);
            prop_assert!(update.created.is_empty());
        }
        prop_assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn prop_expiry_after_threshold_plus_one(max_unseen in 0u32..40) {
        let mut tracker = ObjectTracker::new(TrackerConfig {
            max_distance: 70.0,
            max_frames_unseen: max_unseen,
        });
        tracker.update(vec![marker("go left", 0.0, 0.0)]);

        for _ in 0..max_unseen {
            tracker.update(vec![]);
        }
        prop_assert_eq!(tracker.len(), 1);

        tracker.update(vec![]);
        prop_assert!(tracker.is_empty());
    }
}
