use approx::assert_relative_eq;
use flowtex_engine::field::{GridField, UniformField, VectorField, VortexField};
use flowtex_engine::seeds;
use flowtex_engine::streamline::{arc_length, trace_all, vertex_bytes, Direction, Rk4Tracer, StreamlineIntegrator, TraceParams};
use flowtex_geo::{Bounds, Vec3};

fn params(max_length: f64, step: f64, direction: Direction) -> TraceParams {
    TraceParams { max_length, initial_step: step, direction, ..TraceParams::default() }
}

#[test]
fn forward_trace_follows_uniform_flow() {
    let field = UniformField::new(Bounds::planar(0.0, 10.0, 0.0, 1.0), Vec3::planar(2.0, 0.0));
    let line = Rk4Tracer.trace(&field, Vec3::planar(1.0, 0.5), &params(3.0, 0.5, Direction::Forward));
    assert_eq!(line.len(), 7);
    assert_eq!(line[0], Vec3::planar(1.0, 0.5));
    assert_relative_eq!(line[6].x, 4.0, epsilon = 1e-12);
    assert_relative_eq!(arc_length(&line), 3.0, epsilon = 1e-12);
}

#[test]
fn both_directions_join_at_the_seed() {
    let field = UniformField::new(Bounds::planar(0.0, 10.0, 0.0, 1.0), Vec3::planar(1.0, 0.0));
    let start = Vec3::planar(5.0, 0.5);
    let line = Rk4Tracer.trace(&field, start, &params(1.0, 0.25, Direction::Both));
    assert_eq!(line.len(), 9);
    assert_eq!(line[4], start);
    assert!(line.windows(2).all(|w| w[1].x > w[0].x));
    let back = Rk4Tracer.trace(&field, start, &params(1.0, 0.25, Direction::Backward));
    assert_eq!(back.len(), 5);
    assert_eq!(back[4], start);
}

#[test]
fn trace_stops_at_the_boundary() {
    let field = UniformField::new(Bounds::planar(0.0, 1.0, 0.0, 1.0), Vec3::planar(1.0, 0.0));
    let line = Rk4Tracer.trace(&field, Vec3::planar(0.9, 0.5), &params(5.0, 0.05, Direction::Forward));
    assert!(line.iter().all(|p| p.x <= 1.0));
    assert!(line.len() >= 2);
}

#[test]
fn stagnant_or_outside_seed_gives_empty_line() {
    let b = Bounds::planar(0.0, 1.0, 0.0, 1.0);
    let p = params(1.0, 0.1, Direction::Both);
    assert!(Rk4Tracer.trace(&UniformField::zero(b), Vec3::planar(0.5, 0.5), &p).is_empty());
    let moving = UniformField::new(b, Vec3::planar(1.0, 1.0));
    assert!(Rk4Tracer.trace(&moving, Vec3::planar(2.0, 0.5), &p).is_empty());
    assert!(Rk4Tracer.trace(&moving, Vec3::planar(0.5, 0.5), &params(1.0, 0.0, Direction::Both)).is_empty());
}

#[test]
fn vortex_trace_keeps_its_radius() {
    let field = VortexField::centered(Bounds::planar(-1.0, 1.0, -1.0, 1.0));
    let line = Rk4Tracer.trace(&field, Vec3::planar(0.5, 0.0), &params(2.0, 0.01, Direction::Forward));
    for p in &line {
        assert_relative_eq!(p.length(), 0.5, epsilon = 1e-4);
    }
}

#[test]
fn trace_all_preserves_seed_order() {
    let b = Bounds::planar(0.0, 1.0, 0.0, 1.0);
    let field = UniformField::new(b, Vec3::planar(0.0, 1.0));
    let s = seeds::uniform(4, &b).unwrap();
    let lines = trace_all(&field, &Rk4Tracer, &s, &params(0.2, 0.05, Direction::Both));
    assert_eq!(lines.len(), s.len());
    for (line, seed) in lines.iter().zip(s.iter()) {
        assert!(line.contains(seed));
        assert!(line.iter().all(|p| p.x == seed.x));
    }
}

#[test]
fn grid_field_matches_linear_flow() {
    let b = Bounds::planar(0.0, 2.0, 0.0, 1.0);
    let grid = GridField::from_fn(b, 5, 3, |p| Vec3::planar(p.x, 2.0 * p.y)).unwrap();
    let v = grid.sample(Vec3::planar(1.3, 0.7)).unwrap();
    assert_relative_eq!(v.x, 1.3, epsilon = 1e-12);
    assert_relative_eq!(v.y, 1.4, epsilon = 1e-12);
    assert!(grid.sample(Vec3::planar(2.5, 0.5)).is_none());
}

#[test]
fn vertex_bytes_cover_three_doubles_per_point() {
    let line = [Vec3::planar(1.0, 2.0), Vec3::planar(3.0, 4.0)];
    assert_eq!(vertex_bytes(&line).len(), 2 * 3 * 8);
}
