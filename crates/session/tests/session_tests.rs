//! Integration tests for sessions replayed from recorded formulas

use formula::{FormulaError, LabeledBox, Mode, Rect};
use session::{load_formulas, Formula, Request, Session, SessionError};
use std::io::Write;

fn boxed(label: char, x: f32) -> serde_json::Value {
    serde_json::json!({
        "label": label,
        "rect": { "center": { "x": x, "y": 50.0 }, "width": 8.0, "height": 12.0 }
    })
}

fn recorded(mode: &str, text: &str) -> serde_json::Value {
    let boxes: Vec<_> = text
        .chars()
        .enumerate()
        .map(|(i, c)| boxed(c, 15.0 * i as f32))
        .collect();
    serde_json::json!({ "mode": mode, "boxes": boxes })
}

fn write_json(value: &serde_json::Value) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(value.to_string().as_bytes()).unwrap();
    file
}

#[test]
fn test_replay_recorded_session() {
    let file = write_json(&serde_json::json!([
        recorded("Declare", "AB=2"),
        recorded("Declare", "G(X)=ABX"),
        recorded("Eval", "G(3)="),
        recorded("Solve", "XX=AB"),
    ]));

    let formulas = load_formulas(file.path()).unwrap();
    assert_eq!(formulas.len(), 4);
    assert_eq!(formulas[1].mode(), Mode::Declare);

    let mut session = Session::new();
    for formula in formulas {
        session.add_formula(formula);
    }
    let lines: Vec<String> = session
        .submit_all()
        .into_iter()
        .map(|outcome| outcome.unwrap().request.to_string())
        .collect();

    assert_eq!(
        lines,
        vec![
            "declare AB=2",
            "declare G(X)=AB*X",
            "eval G(3)",
            "solve X*X-(AB)=0 for X",
        ]
    );
    assert!(session.registry().is_function("G"));
}

#[test]
fn test_load_rejects_unknown_label() {
    let file = write_json(&serde_json::json!([
        { "mode": "Eval", "boxes": [boxed('#', 0.0)] }
    ]));
    assert!(matches!(
        load_formulas(file.path()),
        Err(SessionError::Json(_))
    ));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_formulas(&dir.path().join("missing.json")),
        Err(SessionError::Io(_))
    ));
}

#[test]
fn test_manual_correction_before_submit() {
    let mut session = Session::new();
    let boxes = "1+I"
        .chars()
        .enumerate()
        .map(|(i, c)| LabeledBox::new(c, Rect::new(15.0 * i as f32, 50.0, 8.0, 12.0)).unwrap())
        .collect();
    let index = session.add_formula(Formula::from_boxes(Mode::Eval, boxes));

    let formula = session.formula_mut(index).unwrap();
    assert_eq!(formula.prediction(), "1+I");
    formula.relabel("1+1").unwrap();

    let outcome = session.submit(index).unwrap();
    assert_eq!(
        outcome.request,
        Request::Evaluate {
            expression: "1+1".to_string()
        }
    );
}

#[test]
fn test_nested_exponent_is_reported() {
    // X with an exponent that carries its own exponent
    let boxes = vec![
        LabeledBox::new('X', Rect::new(0.0, 50.0, 10.0, 14.0)).unwrap(),
        LabeledBox::new('2', Rect::new(8.0, 38.0, 6.0, 8.0)).unwrap(),
        LabeledBox::new('3', Rect::new(13.0, 30.0, 4.0, 5.0)).unwrap(),
    ];
    let mut session = Session::new();
    let index = session.add_formula(Formula::from_boxes(Mode::Eval, boxes));
    assert!(matches!(
        session.submit(index),
        Err(SessionError::Formula(FormulaError::NestedExponent))
    ));
}
