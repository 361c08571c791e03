use approx::assert_relative_eq;
use flowtex_engine::field::{GridField, ScalarField, UniformField};
use flowtex_engine::scalar::ScalarRange;
use flowtex_geo::{Bounds, Vec3};

#[test]
fn range_orders_its_ends() {
    let r = ScalarRange::new(5.0, -1.0);
    assert_eq!((r.min, r.max), (-1.0, 5.0));
    assert_eq!(r.span(), 6.0);
}

#[test]
fn range_from_values_ignores_non_finite() {
    let r = ScalarRange::from_values([3.0, f64::NAN, -2.0, 7.5, f64::INFINITY]).unwrap();
    assert_eq!(r, ScalarRange::new(-2.0, 7.5));
    assert!(ScalarRange::from_values(std::iter::empty()).is_none());
}

#[test]
fn normalize_clamps_and_handles_flat_ranges() {
    let r = ScalarRange::new(0.0, 4.0);
    assert_eq!(r.normalize(1.0), 0.25);
    assert_eq!(r.normalize(-3.0), 0.0);
    assert_eq!(r.normalize(9.0), 1.0);
    assert_eq!(ScalarRange::new(2.0, 2.0).normalize(2.0), 0.0);
}

#[test]
fn iso_values_are_evenly_spaced() {
    let r = ScalarRange::new(0.0, 1.0);
    assert!(r.iso_values(0).is_empty());
    assert_eq!(r.iso_values(1), vec![0.5]);
    let v = r.iso_values(10);
    assert_eq!(v.len(), 10);
    assert_eq!(v[0], 0.0);
    assert_eq!(v[9], 1.0);
    assert_relative_eq!(v[3], 1.0 / 3.0, epsilon = 1e-12);
}

#[test]
fn grid_scalars_default_to_speed() {
    let b = Bounds::planar(0.0, 1.0, 0.0, 1.0);
    let field = UniformField::new(b, Vec3::planar(3.0, 4.0));
    let grid = GridField::resample(&field, 3, 3).unwrap();
    assert_eq!(grid.dims(), (3, 3));
    assert_relative_eq!(grid.sample_scalar(Vec3::planar(0.3, 0.6)).unwrap(), 5.0, epsilon = 1e-12);
    assert_eq!(grid.scalar_range(), ScalarRange::new(5.0, 5.0));
}

#[test]
fn grid_scalars_can_be_replaced() {
    let b = Bounds::planar(0.0, 1.0, 0.0, 1.0);
    let grid = GridField::new(b, 2, 2, vec![Vec3::ZERO; 4]).unwrap();
    let grid = grid.with_scalars(vec![0.0, 1.0, 2.0, 3.0]).unwrap();
    assert_eq!(grid.scalar_range(), ScalarRange::new(0.0, 3.0));
    assert_relative_eq!(grid.sample_scalar(Vec3::planar(0.5, 0.5)).unwrap(), 1.5, epsilon = 1e-12);
    assert!(grid.clone().with_scalars(vec![1.0]).is_err());
}

#[test]
fn grid_rejects_bad_shapes() {
    use flowtex_engine::field::GridFieldError;
    let b = Bounds::planar(0.0, 1.0, 0.0, 1.0);
    assert_eq!(GridField::new(b, 1, 4, vec![Vec3::ZERO; 4]), Err(GridFieldError::TooSmall(1, 4)));
    assert_eq!(
        GridField::new(b, 2, 2, vec![Vec3::ZERO; 3]),
        Err(GridFieldError::BadLength { expected: 4, got: 3 })
    );
    assert_eq!(
        GridField::new(Bounds::planar(0.0, 1.0, 1.0, 1.0), 2, 2, vec![Vec3::ZERO; 4]),
        Err(GridFieldError::DegenerateBounds)
    );
}
