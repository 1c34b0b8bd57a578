//! Counting and classification properties of placement files.
//!
//! Run: cargo test --test placement_properties

#![allow(clippy::unwrap_used)]

use std::io::Cursor;
use std::path::Path;

use placement_viz::error::{Error, FormatErrorKind};
use placement_viz::geometry::Point;
use placement_viz::placement::{is_pad, parse_records, Classifier, Placement, Record, ValidityRegion};
use placement_viz::plotter::Plotter;
use proptest::prelude::*;

fn coordinate() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => -50.0f64..200.0,
        2 => (-5i32..120).prop_map(f64::from),
        1 => Just(0.0),
        1 => Just(99.0),
        1 => Just(101.0),
        2 => prop::num::f64::NORMAL,
    ]
}

fn classifier() -> impl Strategy<Value = Classifier> {
    prop_oneof![Just(Classifier::Single), Just(Classifier::PadPrefix)]
}

/// Bounds `(lo, hi)` with `lo <= hi`, fractional as often as not.
fn bounds() -> impl Strategy<Value = (f64, f64)> {
    (-1e6f64..1e6, 0.0f64..1e6).prop_map(|(lo, width)| (lo, lo + width))
}

fn record() -> impl Strategy<Value = Record> {
    ("[cp][a-z0-9_]{0,8}", coordinate(), coordinate()).prop_map(|(id, x, y)| Record::new(id, x, y))
}

/// Render records as file text, with optional blank lines and mixed whitespace.
fn file_text(records: &[Record], blanks: &[bool]) -> String {
    let mut text = String::new();
    for (i, r) in records.iter().enumerate() {
        if blanks.get(i).copied().unwrap_or(false) {
            text.push_str("   \n");
        }
        let sep = if i % 2 == 0 { " " } else { "\t " };
        text.push_str(&format!("{}{sep}{:?}{sep}{:?}\n", r.id, r.x, r.y));
    }
    text
}

fn load(text: &str, classifier: Classifier) -> Placement {
    let records = parse_records(Cursor::new(text), Path::new("prop.kiaPad")).unwrap();
    Placement::from_records(records, classifier, &ValidityRegion::default())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_total_counts_non_empty_lines(
        records in prop::collection::vec(record(), 0..60),
        blanks in prop::collection::vec(any::<bool>(), 0..60),
    ) {
        let text = file_text(&records, &blanks);
        let non_empty = text.lines().filter(|l| !l.trim().is_empty()).count();

        let placement = load(&text, Classifier::PadPrefix);
        prop_assert_eq!(placement.counter.total, non_empty);
        prop_assert_eq!(placement.counter.total, records.len());
    }

    #[test]
    fn prop_valid_matches_inclusive_bounds(records in prop::collection::vec(record(), 0..60)) {
        let placement = load(&file_text(&records, &[]), Classifier::Single);
        let expected = records
            .iter()
            .filter(|r| (0.0..=101.0).contains(&r.x) && (0.0..=99.0).contains(&r.y))
            .count();

        prop_assert_eq!(placement.counter.valid, expected);
        prop_assert!(placement.counter.valid <= placement.counter.total);
    }

    #[test]
    fn prop_pads_and_cells_partition(records in prop::collection::vec(record(), 0..60)) {
        let placement = load(&file_text(&records, &[]), Classifier::PadPrefix);
        let cells = &placement.series[0].points;
        let pads = &placement.series[1].points;

        prop_assert_eq!(cells.len() + pads.len(), placement.counter.total);

        let expected_pads: Vec<_> = records.iter().filter(|r| is_pad(&r.id)).map(Record::point).collect();
        let expected_cells: Vec<_> = records.iter().filter(|r| !is_pad(&r.id)).map(Record::point).collect();
        prop_assert_eq!(pads, &expected_pads);
        prop_assert_eq!(cells, &expected_cells);
    }

    #[test]
    fn prop_single_preserves_order(records in prop::collection::vec(record(), 0..60)) {
        let placement = load(&file_text(&records, &[]), Classifier::Single);
        let expected: Vec<_> = records.iter().map(Record::point).collect();

        prop_assert_eq!(&placement.series[0].points, &expected);
    }

    #[test]
    fn prop_loading_is_idempotent(records in prop::collection::vec(record(), 0..40)) {
        let text = file_text(&records, &[]);
        prop_assert_eq!(load(&text, Classifier::PadPrefix), load(&text, Classifier::PadPrefix));
    }

    #[test]
    fn prop_region_bounds_are_inclusive((x_min, x_max) in bounds(), (y_min, y_max) in bounds()) {
        let region = ValidityRegion { x_min, x_max, y_min, y_max };

        prop_assert!(region.contains(Point::new(x_min, y_min)));
        prop_assert!(region.contains(Point::new(x_max, y_max)));
        prop_assert!(region.contains(Point::new(x_min, y_max)));
        prop_assert!(!region.contains(Point::new(f64::NAN, y_min)));
    }

    #[test]
    fn prop_non_utf8_line_reports_its_number(
        records in prop::collection::vec(record(), 0..20),
        tail in prop::collection::vec(record(), 0..5),
    ) {
        let mut bytes = file_text(&records, &[]).into_bytes();
        bytes.extend_from_slice(b"c\xff 1 1\n");
        bytes.extend_from_slice(file_text(&tail, &[]).as_bytes());

        let err = parse_records(Cursor::new(bytes), Path::new("prop.kiaPad")).unwrap_err();
        match err {
            Error::Format { line, kind, .. } => {
                prop_assert_eq!(line, records.len() + 1);
                prop_assert_eq!(kind, FormatErrorKind::InvalidUtf8);
            }
            other => prop_assert!(false, "expected format error, got {other:?}"),
        }
    }

    #[test]
    fn prop_wrong_token_count_is_rejected(
        records in prop::collection::vec(record(), 0..10),
        extra in "[a-z]{1,4}",
    ) {
        let mut text = file_text(&records, &[]);
        text.push_str(&format!("bad 1 2 {extra}\n"));

        let err = parse_records(Cursor::new(text), Path::new("prop.kiaPad")).unwrap_err();
        prop_assert!(err.is_format());
        let expected_line = format!(":{}:", records.len() + 1);
        prop_assert!(err.to_string().contains(&expected_line));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_any_finite_placement_renders(
        records in prop::collection::vec(record(), 0..30),
        classifier in classifier(),
    ) {
        let placement = Placement::from_records(records, classifier, &ValidityRegion::default());
        let plot = Plotter::new(classifier).figure(&placement, "Placement: prop.kiaPad").unwrap();

        prop_assert!(plot.to_framebuffer().is_ok());
        let svg = plot.to_svg().unwrap().render();
        prop_assert!(!svg.contains("NaN"));
    }
}
