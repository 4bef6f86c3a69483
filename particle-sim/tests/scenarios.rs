// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Behavioural scenarios for the tick: attraction, merging, boundary
//! reflection and drag

use particle_sim::sim::{run_tick, step, BodyRegistry, Color, DAMPING, GRAVITATIONAL_CONSTANT};

const HEAVY: f64 = 1e12;

#[test]
fn test_separated_pair_attracts() {
    let mut registry = BodyRegistry::new();
    // 25 apart: the radius boxes (half-extent 10 each) do not touch.
    let left = registry.add(400.0, 500.0, 10.0, Color::WHITE, HEAVY, 0.0, 0.0);
    let right = registry.add(425.0, 500.0, 10.0, Color::WHITE, HEAVY, 0.0, 0.0);

    run_tick(&mut registry);

    assert_eq!(registry.len(), 2);
    let (left_vx, _) = registry.get(left).unwrap().velocity();
    let (right_vx, _) = registry.get(right).unwrap().velocity();
    assert!(left_vx > 0.0, "left body should move right, vx = {left_vx}");
    assert!(right_vx < 0.0, "right body should move left, vx = {right_vx}");

    // First body: a = G * m / d² then one step of drag.
    let expected = GRAVITATIONAL_CONSTANT * HEAVY / 625.0 * DAMPING;
    assert!((left_vx - expected).abs() < 1e-12);
}

#[test]
fn test_overlapping_slow_pair_merges() {
    let mut registry = BodyRegistry::new();
    let survivor = registry.add(500.0, 500.0, 10.0, Color::new(10, 20, 30), HEAVY, 0.0, 0.0);
    let absorbed = registry.add(505.0, 500.0, 10.0, Color::new(30, 40, 50), HEAVY, 0.0, 0.0);

    let merges = step(registry.snapshot_mut());
    assert_eq!(merges, 1);
    assert!(registry.get(absorbed).unwrap().is_pending_removal());
    assert!(!registry.get(survivor).unwrap().is_pending_removal());

    assert_eq!(registry.compact(), 1);
    assert_eq!(registry.len(), 1);

    let body = registry.get(survivor).unwrap();
    assert_eq!(body.mass(), 2.0 * HEAVY);
    assert_eq!(body.radius(), 20.0);
    assert_eq!(body.color(), Color::new(21, 31, 41));
    assert!(registry.get(absorbed).is_none());
}

#[test]
fn test_overlapping_fast_pair_bounces() {
    let mut registry = BodyRegistry::new();
    // Relative speed far above sqrt(2 * G * 2e12 / 10) ≈ 5.1
    registry.add(500.0, 500.0, 10.0, Color::WHITE, HEAVY, 40.0, 0.0);
    registry.add(505.0, 500.0, 10.0, Color::WHITE, HEAVY, -40.0, 0.0);

    run_tick(&mut registry);

    assert_eq!(registry.len(), 2);
    assert!(registry.iter().all(|b| b.mass() == HEAVY));
}

#[test]
fn test_left_wall_reflects() {
    let mut registry = BodyRegistry::new();
    let id = registry.add(0.0, 500.0, 10.0, Color::WHITE, HEAVY, -5.0, 0.0);

    run_tick(&mut registry);

    let body = registry.get(id).unwrap();
    assert!(body.velocity().0 > 0.0);
    assert!((body.velocity().0 - 5.0 * DAMPING).abs() < 1e-12);
    assert_eq!(body.position(), (-5.0, 500.0));
}

#[test]
fn test_corner_reflects_both_axes() {
    let mut registry = BodyRegistry::new();
    let id = registry.add(999.0, 999.0, 5.0, Color::WHITE, 1.0, 2.0, 3.0);

    run_tick(&mut registry);

    let (vx, vy) = registry.get(id).unwrap().velocity();
    assert!(vx < 0.0 && vy < 0.0);
}

#[test]
fn test_isolated_body_slows_every_tick() {
    let mut registry = BodyRegistry::new();
    let id = registry.add(500.0, 500.0, 10.0, Color::WHITE, HEAVY, 1.0, 1.0);

    let mut previous = registry.get(id).unwrap().speed();
    for tick in 0..500 {
        run_tick(&mut registry);
        let speed = registry.get(id).unwrap().speed();
        assert!(speed < previous, "speed did not decrease at tick {tick}");
        assert!((speed - previous * DAMPING).abs() < 1e-12);
        previous = speed;
    }

    // Total travel per axis is bounded by 1 / (1 - DAMPING) = 200.
    let (x, y) = registry.get(id).unwrap().position();
    assert!(x < 700.0 && y < 700.0);
}

#[test]
fn test_body_outside_world_is_not_pulled_back() {
    let mut registry = BodyRegistry::new();
    let id = registry.add(1500.0, 500.0, 5.0, Color::WHITE, 1.0, 2.0, 0.0);

    for _ in 0..20 {
        run_tick(&mut registry);
        let (x, _) = registry.get(id).unwrap().position();
        assert!((1500.0..=1502.0).contains(&x), "x = {x}");
    }
}

#[test]
fn test_run_tick_after_uncompacted_step() {
    let mut registry = BodyRegistry::new();
    let survivor = registry.add(500.0, 500.0, 10.0, Color::WHITE, HEAVY, 0.0, 0.0);
    registry.add(505.0, 500.0, 10.0, Color::WHITE, HEAVY, 0.0, 0.0);

    // Flag without compacting; the next full tick must clean up.
    assert_eq!(step(registry.snapshot_mut()), 1);
    assert_eq!(registry.len(), 2);

    run_tick(&mut registry);

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get(survivor).unwrap().mass(), 2.0 * HEAVY);
    assert!(registry.iter().all(|b| !b.is_pending_removal()));
}
