//! Interactive terminal viewer.
//!
//! Shows the placement as a braille scatter chart and blocks until dismissed.
//!
//! | Key | Action |
//! |---|---|
//! | arrows, `hjkl` | pan |
//! | `+` / `-` | zoom in / out |
//! | `r` | reset view |
//! | `q`, `Esc`, `Enter` | close |

use std::io::{stdout, Stdout};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style, Stylize};
use ratatui::symbols::Marker;
use ratatui::text::Line;
use ratatui::widgets::{Axis, Block, Chart, Dataset, GraphType, LegendPosition, Paragraph};
use ratatui::{Frame, Terminal};
use tracing::debug;

use crate::color::Rgba;
use crate::error::Result;
use crate::placement::PointSet;
use crate::plots::SeriesStyle;
use crate::render::MarkerShape;
use crate::scale::{format_tick, midpoint, tick_step, Extent};

/// Zoom factor applied per key press.
const ZOOM_STEP: f64 = 1.25;
/// Zoom limits relative to the initial view.
const ZOOM_RANGE: (f64, f64) = (0.25, 512.0);
/// Pan distance per key press, as a fraction of the visible span.
const PAN_STEP: f64 = 0.1;

const HELP: &str = " ←↓↑→/hjkl pan · +/- zoom · r reset · q/Esc/Enter close ";

struct ViewSeries {
    name: String,
    points: Vec<(f64, f64)>,
    color: Color,
    marker: Marker,
}

/// Interactive chart state.
pub struct Viewer {
    title: String,
    series: Vec<ViewSeries>,
    home: Extent,
    zoom: f64,
    pan: (f64, f64),
}

impl Viewer {
    /// Build a viewer over point sets paired with their styles.
    #[must_use]
    pub fn new(title: impl Into<String>, sets: &[PointSet], styles: &[SeriesStyle]) -> Self {
        let series = sets
            .iter()
            .zip(styles)
            .map(|(set, style)| ViewSeries {
                name: set.name.clone(),
                points: set.points.iter().filter(|p| p.is_finite()).map(|p| (p.x, p.y)).collect(),
                color: terminal_color(style.color),
                marker: terminal_marker(style.shape),
            })
            .collect();

        Self {
            title: title.into(),
            series,
            home: Extent::from_points(sets.iter().flat_map(|s| s.points.iter())),
            zoom: 1.0,
            pan: (0.0, 0.0),
        }
    }

    /// Data bounds currently on screen.
    #[must_use]
    pub fn visible(&self) -> Extent {
        self.home.view(self.zoom, self.pan)
    }

    /// Apply one key press. Returns `true` when the viewer should close.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let step = PAN_STEP / self.zoom;
        match code {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => return true,
            KeyCode::Left | KeyCode::Char('h') => self.pan.0 -= step,
            KeyCode::Right | KeyCode::Char('l') => self.pan.0 += step,
            KeyCode::Down | KeyCode::Char('j') => self.pan.1 -= step,
            KeyCode::Up | KeyCode::Char('k') => self.pan.1 += step,
            KeyCode::Char('+' | '=') => self.zoom = (self.zoom * ZOOM_STEP).min(ZOOM_RANGE.1),
            KeyCode::Char('-' | '_') => self.zoom = (self.zoom / ZOOM_STEP).max(ZOOM_RANGE.0),
            KeyCode::Char('r') => {
                self.zoom = 1.0;
                self.pan = (0.0, 0.0);
            }
            _ => {}
        }
        false
    }

    /// Draw one frame.
    pub fn draw(&self, frame: &mut Frame<'_>) {
        let [chart_area, help_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(frame.area());
        let view = self.visible();

        let datasets = self
            .series
            .iter()
            .map(|s| {
                Dataset::default()
                    .name(s.name.clone())
                    .marker(s.marker)
                    .graph_type(GraphType::Scatter)
                    .style(Style::default().fg(s.color))
                    .data(&s.points)
            })
            .collect::<Vec<_>>();

        let chart = Chart::new(datasets)
            .block(Block::bordered().title(Line::from(self.title.as_str()).bold().centered()))
            .x_axis(Axis::default().title("X").bounds([view.x.0, view.x.1]).labels(axis_labels(view.x)))
            .y_axis(Axis::default().title("Y").bounds([view.y.0, view.y.1]).labels(axis_labels(view.y)))
            .legend_position(Some(LegendPosition::TopRight))
            .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)));

        frame.render_widget(chart, chart_area);
        frame.render_widget(Paragraph::new(HELP).dim(), help_area);
    }

    /// Take over the terminal until the user closes the viewer.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up, drawn or read.
    pub fn run(&mut self) -> Result<()> {
        let mut session = Session::start()?;
        debug!(series = self.series.len(), "viewer opened");

        loop {
            session.terminal.draw(|frame| self.draw(frame))?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && self.handle_key(key.code) {
                    break;
                }
            }
        }

        session.finish()
    }
}

/// Raw mode plus alternate screen, restored on drop.
struct Session {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    active: bool,
}

impl Session {
    fn start() -> Result<Self> {
        enable_raw_mode()?;
        if let Err(e) = stdout().execute(EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        let session = Self { terminal: Terminal::new(CrosstermBackend::new(stdout()))?, active: true };
        Ok(session)
    }

    fn finish(mut self) -> Result<()> {
        self.active = false;
        disable_raw_mode()?;
        stdout().execute(LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.active {
            let _ = disable_raw_mode();
            let _ = stdout().execute(LeaveAlternateScreen);
            let _ = self.terminal.show_cursor();
        }
    }
}

fn axis_labels((lo, hi): (f64, f64)) -> Vec<Line<'static>> {
    let step = tick_step(lo, hi, 6);
    [lo, midpoint(lo, hi), hi].into_iter().map(|v| Line::from(format_tick(v, step / 10.0))).collect()
}

fn terminal_color(color: Rgba) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

fn terminal_marker(shape: MarkerShape) -> Marker {
    match shape {
        MarkerShape::Circle => Marker::Braille,
        MarkerShape::Square => Marker::Block,
        MarkerShape::Triangle | MarkerShape::Cross => Marker::Dot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::placement::{CELLS_LABEL, PADS_LABEL};
    use approx::assert_relative_eq;
    use ratatui::backend::TestBackend;

    fn viewer() -> Viewer {
        let cells = PointSet {
            name: CELLS_LABEL.to_string(),
            points: vec![Point::new(0.0, 0.0), Point::new(100.0, 100.0)],
        };
        let pads = PointSet::new(PADS_LABEL);
        Viewer::new("Placement: chip.kiaPad", &[cells, pads], &[SeriesStyle::CELLS, SeriesStyle::PADS])
    }

    fn screen(viewer: &Viewer) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("Failed to create terminal");
        terminal.draw(|frame| viewer.draw(frame)).expect("Failed to draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol().chars().next().unwrap_or(' '))
            .collect()
    }

    #[test]
    fn test_close_keys() {
        let mut v = viewer();
        assert!(v.handle_key(KeyCode::Char('q')));
        assert!(v.handle_key(KeyCode::Esc));
        assert!(v.handle_key(KeyCode::Enter));
        assert!(!v.handle_key(KeyCode::Char('x')));
    }

    #[test]
    fn test_zoom_and_reset() {
        let mut v = viewer();
        let home = v.visible();

        v.handle_key(KeyCode::Char('+'));
        let zoomed = v.visible();
        assert!(zoomed.x.1 - zoomed.x.0 < home.x.1 - home.x.0);

        v.handle_key(KeyCode::Char('r'));
        assert_eq!(v.visible(), home);
    }

    #[test]
    fn test_pan_moves_view() {
        let mut v = viewer();
        let home = v.visible();
        let span = home.x.1 - home.x.0;

        v.handle_key(KeyCode::Right);
        assert_relative_eq!(v.visible().x.0, home.x.0 + span * PAN_STEP, epsilon = 1e-9);

        v.handle_key(KeyCode::Char('k'));
        assert!(v.visible().y.0 > home.y.0);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut v = viewer();
        for _ in 0..100 {
            v.handle_key(KeyCode::Char('-'));
        }
        assert_relative_eq!(v.zoom, ZOOM_RANGE.0);
    }

    #[test]
    fn test_draw_shows_title_axes_and_legend() {
        let content = screen(&viewer());

        assert!(content.contains("Placement: chip.kiaPad"));
        assert!(content.contains(CELLS_LABEL));
        assert!(content.contains(PADS_LABEL));
        assert!(content.contains("q/Esc/Enter"));
        assert!(content.chars().any(|c| ('\u{2800}'..='\u{28FF}').contains(&c)), "braille points expected");
    }

    #[test]
    fn test_styles_map_to_terminal() {
        assert_eq!(terminal_color(Rgba::PAD_RED), Color::Rgb(214, 39, 40));
        assert_eq!(terminal_marker(MarkerShape::Square), Marker::Block);
    }
}
