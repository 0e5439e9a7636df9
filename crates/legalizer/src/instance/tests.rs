use super::*;
use crate::geometry::Pin;

const SMALL: &str = "\
# bounding box
0 0 10 4
2            # cells
4 4 1 1
4 4 2 1
1            # obstacles
8 0 10 4
2            # nets
2
0 0 0 1 1
1 3 3 4 4
1
-1 5 5 5 5
0 0
4 0
";

#[test]
fn parses_the_text_format() {
    let inst = Instance::from_text(SMALL).unwrap();
    assert_eq!(inst.bbox, Rect::new(0, 0, 10, 4));
    assert_eq!(inst.cells, vec![Cell::new(4, 4, 1, 1), Cell::new(4, 4, 2, 1)]);
    assert_eq!(inst.obstacles, vec![Rect::new(8, 0, 10, 4)]);
    assert_eq!(inst.nets.len(), 2);
    assert_eq!(inst.nets[0].pins[1], Pin::on_cell(1, Rect::new(3, 3, 4, 4)));
    assert_eq!(inst.nets[1].pins[0], Pin::external(Rect::new(5, 5, 5, 5)));
    assert_eq!(
        inst.baseline,
        Some(vec![Point::new(0, 0), Point::new(4, 0)])
    );
    // Net 0 spans x 0..8, y 0..4; net 1 is a single point.
    assert_eq!(inst.baseline_cost(), Some(12));
    assert_eq!(Instance::from_text(&inst.to_text()), Ok(inst));
}

#[test]
fn baseline_is_optional() {
    let text = "0 0 5 5\n1\n1 1 1 1\n0\n0\n";
    let inst = Instance::from_text(text).unwrap();
    assert_eq!(inst.baseline, None);
    assert_eq!(inst.baseline_cost(), None);
    assert!(inst.legalizer().unwrap().is_feasible());
}

#[test]
fn malformed_input_is_reported() {
    assert_eq!(
        Instance::from_text("0 0 5"),
        Err(ParseError::UnexpectedEnd {
            expected: "bounding box"
        })
    );
    assert!(matches!(
        Instance::from_text("0 0 5 5 x"),
        Err(ParseError::InvalidInteger { index: 4, .. })
    ));
    assert!(matches!(
        Instance::from_text("0 0 5 5 -2"),
        Err(ParseError::NegativeCount { what: "cell", value: -2 })
    ));
    assert!(matches!(
        Instance::from_text("0 0 5 5 1 1 1 1 1 0 1 1 3 0 0 0 0"),
        Err(ParseError::InvalidOwner { owner: 3, cells: 1, .. })
    ));
    // Half a baseline.
    assert_eq!(
        Instance::from_text("0 0 5 5 2 1 1 1 1 1 1 1 1 0 0 0 0"),
        Err(ParseError::UnexpectedEnd {
            expected: "baseline x"
        })
    );
    assert!(matches!(
        Instance::from_text("0 0 5 5 1 1 1 1 1 0 0 0 0 7"),
        Err(ParseError::TrailingInput { index: 13, .. })
    ));
}

#[test]
fn huge_counts_run_out_of_input() {
    assert_eq!(
        Instance::from_text("0 0 5 5 4000000000000000000"),
        Err(ParseError::UnexpectedEnd {
            expected: "cell width"
        })
    );
    assert_eq!(
        Instance::from_text("0 0 5 5 0 0 1 9223372036854775807"),
        Err(ParseError::UnexpectedEnd {
            expected: "pin owner"
        })
    );
    assert_eq!(
        Instance::from_text("0 0 5 5 0 9223372036854775807"),
        Err(ParseError::UnexpectedEnd {
            expected: "obstacle"
        })
    );
}

#[test]
fn json_round_trip() {
    let inst = Instance::from_text(SMALL).unwrap();
    let json = serde_json::to_string(&inst).unwrap();
    let back: Instance = serde_json::from_str(&json).unwrap();
    assert_eq!(back, inst);
}

#[test]
fn draws_are_reproducible() {
    let cfg = InstanceCfg::default();
    let a = draw_instance(cfg, ReplayToken::new(7, 3));
    let b = draw_instance(cfg, ReplayToken::new(7, 3));
    assert_eq!(a, b);
    let others: Vec<Instance> = (4..8)
        .map(|index| draw_instance(cfg, ReplayToken::new(7, index)))
        .collect();
    assert!(others.iter().any(|o| *o != a));
}

#[test]
fn drawn_baseline_is_legal() {
    for index in 0..16 {
        let cfg = InstanceCfg {
            cells: 5 + index as usize % 4,
            obstacles: index as usize % 3,
            max_pitch: 3,
            external_pin_prob: 0.3,
            ..InstanceCfg::default()
        };
        let inst = draw_instance(cfg, ReplayToken::new(11, index));
        assert_eq!(inst.cells.len(), cfg.cells);
        assert_eq!(inst.obstacles.len(), cfg.obstacles);
        assert_eq!(inst.nets.len(), cfg.nets);
        let lg = inst.legalizer().unwrap();
        assert!(lg.is_feasible());
        let baseline = inst.baseline.as_deref().unwrap();
        assert!(lg.is_solution_correct(baseline), "token index {index}");
        assert_eq!(inst.baseline_cost(), Some(lg.solution_cost(baseline)));
        assert!(lg.cost() <= lg.solution_cost(baseline));
        assert_eq!(Instance::from_text(&inst.to_text()).as_ref(), Ok(&inst));
    }
}
