//! The plot operation: read, classify, count, summarize, display.

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::PlotConfig;
use crate::error::Result;
use crate::output::{FileFormat, PngEncoder, TerminalEncoder, TerminalMode};
use crate::placement::{Classifier, Placement, ValidityCounter};
use crate::plots::PlacementPlot;

/// Where the figure goes once the summary is printed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Target {
    /// Interactive terminal viewer; blocks until dismissed.
    #[default]
    Viewer,
    /// Text preview printed after the summary.
    Terminal(TerminalMode),
    /// `.png` or `.svg` file.
    File(PathBuf),
}

/// Runs the plot operation with a fixed classifier, configuration and target.
#[derive(Debug, Clone, Default)]
pub struct Plotter {
    classifier: Classifier,
    config: PlotConfig,
    target: Target,
}

impl Plotter {
    /// Create a plotter that opens the viewer with default styles.
    #[must_use]
    pub fn new(classifier: Classifier) -> Self {
        Self { classifier, ..Self::default() }
    }

    /// Use `config` for figure size, validity region and styles.
    #[must_use]
    pub fn config(mut self, config: PlotConfig) -> Self {
        self.config = config;
        self
    }

    /// Send the figure to `target`.
    #[must_use]
    pub fn target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Plot `path`, writing the summary line (and any preview) to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed, or the figure cannot be
    /// rendered or written. Nothing is printed when the file fails to load.
    pub fn plot(&self, path: impl AsRef<Path>) -> Result<ValidityCounter> {
        let stdout = io::stdout();
        let interactive = stdout.is_terminal();
        self.plot_to(path, &mut stdout.lock(), interactive)
    }

    /// Plot `path`, writing text output to `out`. `interactive` says whether `out` is
    /// a terminal the viewer may take over.
    ///
    /// # Errors
    ///
    /// See [`Plotter::plot`].
    pub fn plot_to<W: Write>(
        &self,
        path: impl AsRef<Path>,
        out: &mut W,
        interactive: bool,
    ) -> Result<ValidityCounter> {
        let path = path.as_ref();
        let format = match &self.target {
            Target::File(output) => Some(FileFormat::from_path(output)?),
            _ => None,
        };

        let placement = Placement::load(path, self.classifier, &self.config.region)?;
        let counter = placement.counter;
        debug!(total = counter.total, valid = counter.valid, invalid = counter.invalid(), "counted placement");

        writeln!(out, "{counter}")?;
        out.flush()?;

        let title = format!("Placement: {}", path.display());
        match (&self.target, format) {
            (Target::File(output), Some(format)) => self.write_file(&placement, &title, output, format)?,
            (Target::Terminal(mode), _) => self.preview(&placement, &title, *mode, out)?,
            _ => self.show(&placement, &title, out, interactive)?,
        }

        Ok(counter)
    }

    /// Build the figure for an already loaded placement.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured style is invalid.
    pub fn figure(&self, placement: &Placement, title: &str) -> Result<PlacementPlot> {
        let styles = self.config.styles(self.classifier)?;
        let plot = placement.series.iter().zip(styles).fold(
            PlacementPlot::new()
                .title(title)
                .dimensions(self.config.width, self.config.height)
                .margin(self.config.margin),
            |plot, (set, style)| plot.series(set, style),
        );
        Ok(plot)
    }

    fn write_file(&self, placement: &Placement, title: &str, output: &Path, format: FileFormat) -> Result<()> {
        let plot = self.figure(placement, title)?;
        match format {
            FileFormat::Png => PngEncoder::new().title(title).write_to_file(&plot.to_framebuffer()?, output)?,
            FileFormat::Svg => plot.to_svg()?.write_to_file(output)?,
        }
        info!(output = %output.display(), points = plot.point_count(), "wrote figure");
        Ok(())
    }

    fn preview<W: Write>(&self, placement: &Placement, title: &str, mode: TerminalMode, out: &mut W) -> Result<()> {
        let fb = self.figure(placement, title)?.to_framebuffer()?;
        writeln!(out, "{title}")?;
        TerminalEncoder::new().mode(mode).write_to(&fb, out)
    }

    #[cfg(feature = "viewer")]
    fn show<W: Write>(&self, placement: &Placement, title: &str, out: &mut W, interactive: bool) -> Result<()> {
        if !interactive {
            warn!("stdout is not a terminal; printing a preview instead of opening the viewer");
            return self.preview(placement, title, TerminalMode::Ascii, out);
        }
        let styles = self.config.styles(self.classifier)?;
        crate::viewer::Viewer::new(title, &placement.series, &styles).run()
    }

    #[cfg(not(feature = "viewer"))]
    fn show<W: Write>(&self, placement: &Placement, title: &str, out: &mut W, interactive: bool) -> Result<()> {
        let mode = if interactive { TerminalMode::HalfBlock } else { TerminalMode::Ascii };
        warn!("built without the viewer; printing a preview");
        self.preview(placement, title, mode, out)
    }
}
