use flowtex_engine::seeds::{self, SeedError, SeedStrategy};
use flowtex_geo::{Bounds, Vec3};
use proptest::prelude::*;

fn inside(b: &Bounds, p: &Vec3) -> bool {
    p.x >= b.xmin && p.x <= b.xmax && p.y >= b.ymin && p.y <= b.ymax && p.z == 0.0
}

fn bounds_strategy() -> impl Strategy<Value = Bounds> {
    (-1.0e3f64..1.0e3, 1.0e-3f64..1.0e3, -1.0e3f64..1.0e3, 1.0e-3f64..1.0e3)
        .prop_map(|(x0, w, y0, h)| Bounds::planar(x0, x0 + w, y0, y0 + h))
}

proptest! {
    #[test]
    fn uniform_gives_k_squared_points_inside(k in 1usize..40, b in bounds_strategy()) {
        let s = seeds::uniform(k, &b).unwrap();
        prop_assert_eq!(s.len(), k * k);
        prop_assert!(s.iter().all(|p| inside(&b, p)));
    }

    #[test]
    fn random_gives_k_squared_points_inside(k in 1usize..40, b in bounds_strategy(), seed in any::<u64>()) {
        let s = seeds::random_seeded(k, &b, seed).unwrap();
        prop_assert_eq!(s.len(), k * k);
        prop_assert!(s.iter().all(|p| inside(&b, p)));
    }
}

#[test]
fn uniform_spans_corner_to_corner() {
    let b = Bounds::planar(-2.0, 2.0, 0.0, 1.0);
    let s = seeds::uniform(3, &b).unwrap();
    assert_eq!(s.points[0], Vec3::planar(-2.0, 0.0));
    assert_eq!(s.points[1], Vec3::planar(-2.0, 0.5));
    assert_eq!(s.points[3], Vec3::planar(0.0, 0.0));
    assert_eq!(s.points[8], Vec3::planar(2.0, 1.0));
}

#[test]
fn single_seed_is_lower_corner() {
    let b = Bounds::planar(3.0, 4.0, 5.0, 6.0);
    for strategy in [SeedStrategy::Uniform, SeedStrategy::Random] {
        let s = strategy.generate(1, &b, 9).unwrap();
        assert_eq!(s.len(), 1);
        assert!(inside(&b, &s.points[0]));
    }
    assert_eq!(seeds::uniform(1, &b).unwrap().points[0], Vec3::planar(3.0, 5.0));
}

#[test]
fn zero_count_is_rejected() {
    let b = Bounds::planar(0.0, 1.0, 0.0, 1.0);
    assert_eq!(seeds::uniform(0, &b), Err(SeedError::ZeroCount));
    assert_eq!(seeds::random_seeded(0, &b, 1), Err(SeedError::ZeroCount));
    assert_eq!(seeds::line(Vec3::ZERO, Vec3::planar(1.0, 1.0), 0), Err(SeedError::ZeroCount));
}

#[test]
fn random_is_reproducible_per_seed() {
    let b = Bounds::planar(0.0, 1.0, 0.0, 1.0);
    let a = seeds::random_seeded(10, &b, 42).unwrap();
    let again = seeds::random_seeded(10, &b, 42).unwrap();
    let other = seeds::random_seeded(10, &b, 43).unwrap();
    assert_eq!(a, again);
    assert_ne!(a, other);
}

#[test]
fn random_lands_on_the_lattice() {
    let b = Bounds::planar(0.0, 1.0, 0.0, 1.0);
    let s = seeds::random_seeded(8, &b, 7).unwrap();
    for p in &s {
        let d = p.x * f64::from(seeds::RANDOM_DENOM);
        assert!((d - d.round()).abs() < 1e-6);
    }
}

#[test]
fn seeding_line_is_evenly_spaced() {
    let s = seeds::line(Vec3::planar(0.0, 0.0), Vec3::planar(1.0, 2.0), 5).unwrap();
    assert_eq!(s.len(), 5);
    assert_eq!(s.points[2], Vec3::planar(0.5, 1.0));
    assert_eq!(s.points[4], Vec3::planar(1.0, 2.0));
}

#[test]
fn strategy_parses_from_text() {
    assert_eq!("uniform".parse::<SeedStrategy>(), Ok(SeedStrategy::Uniform));
    assert_eq!("Random".parse::<SeedStrategy>(), Ok(SeedStrategy::Random));
    assert!("poisson".parse::<SeedStrategy>().is_err());
}
