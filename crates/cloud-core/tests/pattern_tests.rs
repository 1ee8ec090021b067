// Host-side tests for the pattern generators.

use cloud_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f64::consts::TAU;

#[test]
fn sphere_points_lie_on_radius_ten() {
    let mut rng = StdRng::seed_from_u64(7);
    for n in [1usize, 2, 3, 10, 97, 1000, 5000] {
        let pts = generate(PatternKind::Sphere, n, &mut rng);
        assert_eq!(pts.len(), n);
        for p in &pts {
            let r = (p.x as f64).hypot(p.y as f64).hypot(p.z as f64);
            assert!((r - 10.0).abs() < 1e-5, "n={n} radius={r}");
        }
    }
}

#[test]
fn sphere_covers_both_poles() {
    let mut rng = StdRng::seed_from_u64(7);
    let pts = generate(PatternKind::Sphere, 2000, &mut rng);
    let min_z = pts.iter().map(|p| p.z).fold(f32::MAX, f32::min);
    let max_z = pts.iter().map(|p| p.z).fold(f32::MIN, f32::max);
    assert!(min_z < -9.9);
    assert!(max_z > 9.9);
}

#[test]
fn sphere_and_spiral_are_deterministic() {
    let mut a = StdRng::seed_from_u64(1);
    let mut b = StdRng::seed_from_u64(2);
    for kind in [PatternKind::Sphere, PatternKind::Spiral] {
        assert_eq!(generate(kind, 300, &mut a), generate(kind, 300, &mut b));
    }
}

#[test]
fn spiral_follows_helix_formula() {
    let mut rng = StdRng::seed_from_u64(1);
    let pts = generate(PatternKind::Spiral, 500, &mut rng);
    for (i, p) in pts.iter().enumerate() {
        let fi = i as f32;
        assert!((p.x - 0.05 * fi * (0.1 * fi).cos()).abs() < 1e-4);
        assert!((p.z - 0.05 * fi * (0.1 * fi).sin()).abs() < 1e-4);
        assert!((p.y - (0.02 * fi - 10.0)).abs() < 1e-4);
    }
}

#[test]
fn spiral_grows_without_cap() {
    let mut rng = StdRng::seed_from_u64(1);
    let pts = generate(PatternKind::Spiral, 20_000, &mut rng);
    let last = pts[pts.len() - 1];
    assert!(last.x.hypot(last.z) > 900.0);
}

#[test]
fn heart_xy_on_scaled_shifted_curve() {
    let mut rng = StdRng::seed_from_u64(9);
    let n = 720;
    let pts = generate(PatternKind::Heart, n, &mut rng);
    assert_eq!(pts.len(), n);
    for (i, p) in pts.iter().enumerate() {
        let t = TAU * i as f64 / n as f64;
        let x = 16.0 * t.sin().powi(3) * 0.5;
        let y = (13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos())
            * 0.5
            + 5.0;
        assert!((p.x as f64 - x).abs() < 1e-4);
        assert!((p.y as f64 - y).abs() < 1e-4);
        assert!(p.z >= -2.5 && p.z <= 2.5);
    }
}

#[test]
fn heart_calls_differ_only_in_z() {
    let mut rng = StdRng::seed_from_u64(9);
    let a = generate(PatternKind::Heart, 400, &mut rng);
    let b = generate(PatternKind::Heart, 400, &mut rng);
    let mut z_differs = false;
    for (pa, pb) in a.iter().zip(&b) {
        assert_eq!(pa.x.to_bits(), pb.x.to_bits());
        assert_eq!(pa.y.to_bits(), pb.y.to_bits());
        z_differs |= pa.z != pb.z;
    }
    assert!(z_differs);
}

#[test]
fn heart_is_reproducible_from_seed() {
    let a = generate(PatternKind::Heart, 100, &mut StdRng::seed_from_u64(5));
    let b = generate(PatternKind::Heart, 100, &mut StdRng::seed_from_u64(5));
    assert_eq!(a, b);
}
