use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};

use crate::store::{BodyArrays, BodyStore};

fn store_with(count: usize) -> BodyStore {
    let mut store = BodyStore::new();
    for i in 0..count {
        store.add(
            Point2::new(i as f64, 0.0),
            Vector2::new(0.0, i as f64),
            1.0 + i as f64,
        );
    }
    store
}

#[test]
fn add_assigns_distinct_stable_ids() {
    let mut store = BodyStore::new();
    let a = store.add(Point2::origin(), Vector2::zeros(), 1.0);
    let b = store.add(Point2::origin(), Vector2::zeros(), 2.0);
    assert_ne!(a, b);

    store.remove(a);
    let c = store.add(Point2::origin(), Vector2::zeros(), 3.0);
    // Ids are never reused.
    assert_ne!(c, a);
    assert_ne!(c, b);
    assert_relative_eq!(store.get(b).unwrap().mass(), 2.0);
}

#[test]
fn add_with_density_applies_density_and_color() {
    let mut store = BodyStore::new();
    let id = store.add_with_density(
        Point2::new(1.0, 2.0),
        Vector2::zeros(),
        10.0,
        0.5,
        [0.2, 0.4, 0.6],
    );
    let body = store.get(id).unwrap();
    assert_relative_eq!(body.density(), 0.5);
    assert_eq!(body.color, [0.2, 0.4, 0.6]);
}

#[test]
fn remove_returns_the_body_and_clears_caches() {
    let mut store = store_with(3);
    let ids: Vec<_> = store.iter().map(|b| b.id).collect();

    store.select(ids[1]);
    store.begin_drag(ids[1]);
    assert_eq!(store.selected(), Some(ids[1]));
    assert_eq!(store.dragged(), Some(ids[1]));

    let removed = store.remove(ids[1]).unwrap();
    assert_eq!(removed.id, ids[1]);
    assert_eq!(store.len(), 2);
    assert_eq!(store.selected(), None);
    assert_eq!(store.dragged(), None);
}

#[test]
fn remove_unknown_id_is_none() {
    let mut store = store_with(1);
    let id = store.iter().next().unwrap().id;
    store.remove(id);
    assert!(store.remove(id).is_none());
}

#[test]
fn clear_empties_the_store() {
    let mut store = store_with(5);
    store.clear();
    assert!(store.is_empty());
    assert_eq!(store.selected(), None);
}

#[test]
fn find_by_position_picks_the_closest_within_tolerance() {
    let mut store = BodyStore::new();
    let near = store.add(Point2::new(0.0, 0.0), Vector2::zeros(), 1.0);
    let far = store.add(Point2::new(100.0, 0.0), Vector2::zeros(), 1.0);

    // Radius clamps to 2.0 for these masses, so the default pick margin is 4.
    assert_eq!(store.find_by_position(Point2::new(3.0, 0.0), None), Some(near));
    assert_eq!(store.find_by_position(Point2::new(50.0, 0.0), None), None);
    assert_eq!(
        store.find_by_position(Point2::new(98.0, 0.0), Some(5.0)),
        Some(far)
    );
}

#[test]
fn drag_zeroes_velocity_until_released() {
    let mut store = BodyStore::new();
    let id = store.add(Point2::origin(), Vector2::new(5.0, 0.0), 1.0);
    store.begin_drag(id);
    assert_eq!(store.get(id).unwrap().velocity, Vector2::zeros());
    assert!(store.get(id).unwrap().dragged);
    store.end_drag();
    assert!(!store.get(id).unwrap().dragged);
}

#[test]
fn aggregates_total_mass_momentum_and_com() {
    let mut store = BodyStore::new();
    store.add(Point2::new(0.0, 0.0), Vector2::new(1.0, 0.0), 1.0);
    store.add(Point2::new(4.0, 0.0), Vector2::new(-1.0, 0.0), 3.0);

    assert_relative_eq!(store.total_mass(), 4.0);
    assert_relative_eq!(store.center_of_mass().x, 3.0);
    assert_eq!(store.total_momentum(), Vector2::new(-2.0, 0.0));

    let (min, max) = store.bounding_box().unwrap();
    assert_eq!(min, Point2::new(0.0, 0.0));
    assert_eq!(max, Point2::new(4.0, 0.0));
}

#[test]
fn arrays_mirror_the_store_and_zero_forces() {
    let mut store = store_with(4);
    for body in store.iter_mut() {
        body.force = Vector2::new(9.0, 9.0);
    }
    store.as_mut_slice()[2].fixed = true;

    let mut arrays = BodyArrays::new();
    arrays.sync(&store);

    assert_eq!(arrays.len(), 4);
    assert_eq!(arrays.positions[3], Point2::new(3.0, 0.0));
    assert_relative_eq!(arrays.masses[1], 2.0);
    assert!(arrays.fixed[2]);
    assert!(arrays.forces.iter().all(|f| *f == Vector2::zeros()));

    arrays.forces[0] = Vector2::new(1.0, 2.0);
    store.apply_forces(&arrays);
    assert_eq!(store.as_slice()[0].force, Vector2::new(1.0, 2.0));
}
