use crate::{error::OffsetError, io::report::OffsetReport, offset::find_self_intersections};

use super::*;

fn square() -> element::Group {
    element::Group::new()
        .add(make_polygon(vec![
            Coord { x: 10.0, y: 10.0 },
            Coord { x: 30.0, y: 10.0 },
            Coord { x: 30.0, y: 30.0 },
            Coord { x: 10.0, y: 30.0 },
        ]))
}

#[test]
fn square_uniform() -> Result<()> {
    let doc = make_test_svg(square(), (40, 40));
    let od = run("concept-square-uniform", &doc, &shared(false), job(vec![], 1.0))?;

    assert_eq!(od.results.len(), 1);
    let ring = od.results[0].as_ref().unwrap();
    assert_ring(ring.coords(), &[(9.0, 9.0), (31.0, 9.0), (31.0, 31.0), (9.0, 31.0)], 1e-9);

    Ok(())
}

#[test]
fn square_per_edge() -> Result<()> {
    let doc = make_test_svg(square(), (40, 40));
    let od = run("concept-square-per-edge", &doc, &shared(false), job(vec![1.0, 2.0, 3.0, 4.0], 0.0))?;

    let ring = od.results[0].as_ref().unwrap();
    assert_ring(ring.coords(), &[(6.0, 9.0), (32.0, 9.0), (32.0, 33.0), (6.0, 33.0)], 1e-9);

    Ok(())
}

#[test]
fn square_open_loop() -> Result<()> {
    let doc = make_test_svg(square(), (40, 40));
    let mut job = job(vec![], 1.0);
    job.edge_loop = EdgeLoop::Open;

    let od = run("concept-square-open-loop", &doc, &shared(false), job)?;

    // The closing edge is not offset, the top and bottom lines meet in a fallback corner
    let ring = od.results[0].as_ref().unwrap();
    assert_ring(ring.coords(), &[(10.0, 31.0), (31.0, 9.0), (31.0, 31.0)], 1e-9);

    Ok(())
}

#[test]
fn clockwise_input_still_grows() -> Result<()> {
    let g = element::Group::new()
        .add(make_polygon(vec![
            Coord { x: 10.0, y: 10.0 },
            Coord { x: 10.0, y: 30.0 },
            Coord { x: 30.0, y: 30.0 },
            Coord { x: 30.0, y: 10.0 },
        ]));

    let doc = make_test_svg(g, (40, 40));
    let od = run("concept-clockwise", &doc, &shared(false), job(vec![], 1.0))?;

    let ring = od.results[0].as_ref().unwrap();
    assert!((ring.signed_area() - 484.0).abs() < 1e-9);

    Ok(())
}

#[test]
fn swallowtail() -> Result<()> {
    let g = element::Group::new()
        .add(make_polygon(vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 10.0, y: 0.0 },
            Coord { x: 10.0, y: 6.0 },
            Coord { x: 6.0, y: 8.0 },
            Coord { x: 4.0, y: 8.0 },
            Coord { x: 0.0, y: 6.0 },
        ]));

    let doc = make_test_svg(g, (20, 20));
    let od = run("concept-swallowtail", &doc, &shared(false), job(vec![0.0, 0.0, 0.0, 2.0], 0.0))?;

    let ring = od.results[0].as_ref().unwrap();
    assert_eq!(ring.len(), 5);
    assert!((ring.signed_area() - 72.5).abs() < 1e-6);
    assert!(find_self_intersections(ring, DEFAULT_TOLERANCE).is_empty());

    let report = OffsetReport::new(&od);
    assert_eq!(report.failures(), 0);
    assert_eq!(report.boundaries[0].points.as_ref().map(|p| p.len()), Some(6));

    Ok(())
}

#[test]
fn swallowtail_unresolved() -> Result<()> {
    let g = element::Group::new()
        .add(make_polygon(vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 10.0, y: 0.0 },
            Coord { x: 10.0, y: 6.0 },
            Coord { x: 6.0, y: 8.0 },
            Coord { x: 4.0, y: 8.0 },
            Coord { x: 0.0, y: 6.0 },
        ]));

    let doc = make_test_svg(g, (20, 20));
    let mut job = job(vec![0.0, 0.0, 0.0, 2.0], 0.0);
    job.resolve = false;

    let od = run("concept-swallowtail-unresolved", &doc, &shared(false), job)?;

    let ring = od.results[0].as_ref().unwrap();
    assert_ring(ring.coords(), &[(0.0, 0.0), (10.0, 0.0), (10.0, 6.0), (2.0, 10.0), (8.0, 10.0), (0.0, 6.0)], 1e-9);

    Ok(())
}

#[test]
fn quantized() -> Result<()> {
    let g = element::Group::new()
        .add(make_polygon(vec![
            Coord { x: 10.004, y: 10.004 },
            Coord { x: 30.006, y: 10.004 },
            Coord { x: 30.006, y: 30.009 },
            Coord { x: 10.004, y: 30.009 },
        ]));

    let doc = make_test_svg(g, (40, 40));
    let od = run("concept-quantized", &doc, &shared(true), job(vec![], 1.0))?;

    // Input coordinates are truncated onto the 0.01 grid before offsetting
    let ring = od.results[0].as_ref().unwrap();
    assert_ring(ring.coords(), &[(9.0, 9.0), (31.0, 9.0), (31.0, 31.0), (9.0, 31.0)], 1e-9);

    Ok(())
}

#[test]
fn failures_stay_per_boundary() -> Result<()> {
    let g = square()
        .add(make_polygon(vec![
            Coord { x: 50.0, y: 10.0 },
            Coord { x: 60.0, y: 10.0 },
            Coord { x: 70.0, y: 10.0 },
            Coord { x: 70.0, y: 30.0 },
            Coord { x: 50.0, y: 30.0 },
        ]));

    let doc = make_test_svg(g, (80, 40));
    let mut job = job(vec![], 1.0);
    job.parallel = ParallelPolicy::Error;

    let od = run("concept-failures", &doc, &shared(false), job)?;

    assert_eq!(od.results.len(), 2);
    assert!(od.results[0].is_ok());
    assert_eq!(od.results[1], Err(OffsetError::DegenerateIntersection { corner: 1 }));

    let report = OffsetReport::new(&od);
    assert_eq!(report.failures(), 1);
    assert!(report.boundaries[1].error.as_ref().is_some_and(|e| e.contains("parallel")));

    Ok(())
}

#[test]
fn per_path_offsets() -> Result<()> {
    let g = square()
        .add(make_polygon(vec![
            Coord { x: 50.0, y: 10.0 },
            Coord { x: 70.0, y: 10.0 },
            Coord { x: 70.0, y: 30.0 },
            Coord { x: 50.0, y: 30.0 },
        ]));

    let doc = make_test_svg(g, (80, 40));
    let mut job = job(vec![], 1.0);
    job.path_offsets.insert(1, vec![-1.0, -1.0, -1.0]);

    let od = run("concept-per-path", &doc, &shared(false), job)?;

    assert!((od.results[0].as_ref().unwrap().area() - 484.0).abs() < 1e-9);
    // The fourth edge of the second square falls back to the default
    assert_ring(od.results[1].as_ref().unwrap().coords(), &[(49.0, 11.0), (69.0, 11.0), (69.0, 29.0), (49.0, 29.0)], 1e-9);

    Ok(())
}

#[test]
fn invalid_rings_keep_their_slot() -> Result<()> {
    init_test_logger();

    let rings = vec![
        geo::LineString::from(vec![(0.0, 0.0), (5.0, 0.0)]),
        geo::LineString::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]),
        geo::LineString::from(vec![(20.0, 0.0), (30.0, 0.0), (30.0, 10.0), (20.0, 10.0)]),
    ];

    let mut job = job(vec![], 1.0);
    job.path_offsets.insert(2, vec![-1.0; 4]);

    let od = OffsetData::new(&shared(false), job, rings)?;

    assert_eq!(od.originals.len(), 2);
    assert_eq!(od.results.len(), 3);
    assert!(matches!(od.results[0], Err(OffsetError::InvalidInput(_))));
    assert!((od.results[1].as_ref().unwrap().area() - 144.0).abs() < 1e-9);
    assert!((od.results[2].as_ref().unwrap().area() - 64.0).abs() < 1e-9);

    let report = OffsetReport::new(&od);
    assert_eq!(report.failures(), 1);
    assert_eq!(report.boundaries[2].index, 2);
    assert!(report.boundaries[2].points.is_some());

    Ok(())
}

#[test]
fn two_swallowtails() -> Result<()> {
    let g = element::Group::new()
        .add(make_polygon(vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 10.0, y: 0.0 },
            Coord { x: 10.0, y: 6.0 },
            Coord { x: 8.0, y: 8.0 },
            Coord { x: 7.0, y: 8.0 },
            Coord { x: 5.0, y: 6.0 },
            Coord { x: 3.0, y: 8.0 },
            Coord { x: 2.0, y: 8.0 },
            Coord { x: 0.0, y: 6.0 },
        ]));

    let doc = make_test_svg(g, (20, 20));
    let od = run("concept-two-swallowtails", &doc, &shared(false), job(vec![0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 2.5], 0.0))?;

    // Both raised roof edges fold over, the walls and the valley between them survive
    let ring = od.results[0].as_ref().unwrap();
    assert_ring(ring.coords(), &[(7.5, 8.5), (5.0, 6.0), (2.5, 8.5), (0.0, 6.0), (0.0, 0.0), (10.0, 0.0), (10.0, 6.0)], 1e-9);

    Ok(())
}
