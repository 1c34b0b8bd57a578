//! Placement files: parsing, classification and validity counting.
//!
//! A placement file holds one `<id> <x> <y>` record per line. Loading one produces a
//! [`Placement`]: the records split into ordered render series plus the counts for the
//! summary line.

mod classify;
mod reader;
mod record;
mod summary;

pub use classify::{is_pad, Classifier, ALL_LABEL, CELLS_LABEL, PADS_LABEL};
pub use reader::{parse_records, read_records};
pub use record::{parse_line, Record};
pub use summary::{ValidityCounter, ValidityRegion};

use std::path::Path;

use crate::error::Result;
use crate::geometry::Point;

/// A named, ordered collection of points drawn as one scatter series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointSet {
    /// Legend label.
    pub name: String,
    /// Points in input order.
    pub points: Vec<Point>,
}

impl PointSet {
    /// Create an empty set.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), points: Vec::new() }
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the set has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Everything one plotting run needs from a placement file.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// One set per classifier series, in series order. Present even when empty.
    pub series: Vec<PointSet>,
    /// Totals over every record.
    pub counter: ValidityCounter,
}

impl Placement {
    /// Classify and count records.
    ///
    /// # Example
    ///
    /// ```
    /// use placement_viz::placement::{Classifier, Placement, Record, ValidityRegion};
    ///
    /// let records = vec![Record::new("c1", 0.0, 0.0), Record::new("p1", 150.0, 5.0)];
    /// let placement = Placement::from_records(records, Classifier::PadPrefix, &ValidityRegion::default());
    ///
    /// assert_eq!(placement.counter.total, 2);
    /// assert_eq!(placement.counter.valid, 1);
    /// assert_eq!(placement.series[1].name, "I/O Pads");
    /// ```
    #[must_use]
    pub fn from_records<I>(records: I, classifier: Classifier, region: &ValidityRegion) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        let mut series: Vec<PointSet> =
            classifier.series_names().iter().copied().map(PointSet::new).collect();
        let mut counter = ValidityCounter::default();

        for record in records {
            let point = record.point();
            series[classifier.classify(&record)].points.push(point);
            counter.count(region, point);
        }

        Self { series, counter }
    }

    /// Read, classify and count a placement file.
    pub fn load(path: impl AsRef<Path>, classifier: Classifier, region: &ValidityRegion) -> Result<Self> {
        Ok(Self::from_records(read_records(path)?, classifier, region))
    }

    /// All points across every series.
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.series.iter().flat_map(|s| s.points.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scenario() -> Vec<Record> {
        parse_records(Cursor::new("c1 0 0\nc2 101 99\nc3 102 0\np1 50 50\n"), Path::new("mem"))
            .unwrap()
    }

    #[test]
    fn test_counts_for_mixed_file() {
        let placement =
            Placement::from_records(scenario(), Classifier::PadPrefix, &ValidityRegion::default());
        assert_eq!(placement.counter, ValidityCounter { total: 4, valid: 3 });
    }

    #[test]
    fn test_pad_prefix_partition() {
        let placement =
            Placement::from_records(scenario(), Classifier::PadPrefix, &ValidityRegion::default());

        let cells = &placement.series[0];
        let pads = &placement.series[1];
        assert_eq!(cells.name, CELLS_LABEL);
        assert_eq!(
            cells.points,
            vec![Point::new(0.0, 0.0), Point::new(101.0, 99.0), Point::new(102.0, 0.0)]
        );
        assert_eq!(pads.name, PADS_LABEL);
        assert_eq!(pads.points, vec![Point::new(50.0, 50.0)]);
    }

    #[test]
    fn test_single_keeps_input_order() {
        let placement =
            Placement::from_records(scenario(), Classifier::Single, &ValidityRegion::default());

        assert_eq!(placement.series.len(), 1);
        assert_eq!(placement.series[0].name, ALL_LABEL);
        let xs: Vec<f64> = placement.points().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 101.0, 102.0, 50.0]);
    }

    #[test]
    fn test_empty_input_keeps_empty_series() {
        let placement =
            Placement::from_records(Vec::new(), Classifier::PadPrefix, &ValidityRegion::default());

        assert_eq!(placement.counter, ValidityCounter::default());
        assert_eq!(placement.series.len(), 2);
        assert!(placement.series.iter().all(PointSet::is_empty));
    }

    #[test]
    fn test_custom_region() {
        let region = ValidityRegion { x_min: 0.0, x_max: 200.0, y_min: 0.0, y_max: 99.0 };
        let placement = Placement::from_records(scenario(), Classifier::Single, &region);
        assert_eq!(placement.counter.valid, 4);
    }
}
