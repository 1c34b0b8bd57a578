//! Splitting records into named render series.

use super::record::Record;

/// Label of the only series in the single-series variant.
pub const ALL_LABEL: &str = "Cells/IO Pads";
/// Label of the cell series.
pub const CELLS_LABEL: &str = "Cells";
/// Label of the I/O pad series.
pub const PADS_LABEL: &str = "I/O Pads";

/// How records are assigned to render series.
///
/// Every record lands in exactly one series; [`Classifier::classify`] returns its index
/// into [`Classifier::series_names`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Classifier {
    /// Everything in one series.
    Single,
    /// Ids starting with `p` are I/O pads, everything else is a cell.
    #[default]
    PadPrefix,
}

impl Classifier {
    /// Series labels in index order.
    #[must_use]
    pub const fn series_names(self) -> &'static [&'static str] {
        match self {
            Self::Single => &[ALL_LABEL],
            Self::PadPrefix => &[CELLS_LABEL, PADS_LABEL],
        }
    }

    /// Number of series this classifier produces.
    #[must_use]
    pub const fn series_count(self) -> usize {
        self.series_names().len()
    }

    /// Series index for a record.
    #[must_use]
    pub fn classify(self, record: &Record) -> usize {
        match self {
            Self::Single => 0,
            Self::PadPrefix => usize::from(is_pad(&record.id)),
        }
    }
}

/// Whether an id names an I/O pad (first character is a lowercase `p`).
#[must_use]
pub fn is_pad(id: &str) -> bool {
    id.starts_with('p')
}
