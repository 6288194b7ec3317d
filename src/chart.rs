//! Bar chart rendering
//!
//! One bar per label, value annotated above the bar. Charts are written as
//! SVG, which carries its text as `<text>` elements and needs no font stack.

use anyhow::{anyhow, bail, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::panic;
use std::path::Path;

const CHART_SIZE: (u32, u32) = (1000, 600);
const BAR_COLOR: RGBColor = RGBColor(74, 144, 217);
/// Headroom above the tallest bar for its annotation
const Y_HEADROOM: f64 = 1.1;

/// Reject output paths that do not end in `.svg` (case-insensitive)
pub fn ensure_svg_path(path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());

    match ext.as_deref() {
        Some("svg") => Ok(()),
        Some("png") => bail!(
            "PNG charts are not supported (no font backend); use an .svg path instead of {}",
            path.display()
        ),
        _ => bail!("unsupported chart format for {} (use .svg)", path.display()),
    }
}

/// A single labelled bar
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

/// An ordered set of bars plus presentation text
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    /// Appended to each annotated value (e.g. `µs`, ` kB`)
    pub unit: String,
    pub bars: Vec<Bar>,
}

impl BarChart {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_desc: String::new(),
            y_desc: String::new(),
            unit: String::new(),
            bars: Vec::new(),
        }
    }

    pub fn with_axes(mut self, x_desc: impl Into<String>, y_desc: impl Into<String>) -> Self {
        self.x_desc = x_desc.into();
        self.y_desc = y_desc.into();
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Append a bar; bars render left to right in insertion order
    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.bars.push(Bar {
            label: label.into(),
            value,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Text drawn above a bar
    pub fn annotation(&self, value: f64) -> String {
        format!("{:.2}{}", value, self.unit)
    }

    /// Upper bound of the value axis
    pub fn y_max(&self) -> f64 {
        let tallest = self.bars.iter().map(|bar| bar.value).fold(0.0, f64::max);
        if tallest > 0.0 {
            tallest * Y_HEADROOM
        } else {
            1.0
        }
    }

    /// Render to `path`, overwriting any existing file
    pub fn render(&self, path: &Path) -> Result<()> {
        if self.bars.is_empty() {
            bail!("no bars to plot");
        }
        ensure_svg_path(path)?;

        let render = || self.draw(SVGBackend::new(path, CHART_SIZE).into_drawing_area());

        panic::catch_unwind(panic::AssertUnwindSafe(render))
            .map_err(|_| anyhow!("plotting backend panicked while writing {}", path.display()))??;

        tracing::info!("Plot saved as {}", path.display());
        Ok(())
    }

    fn draw<DB>(&self, root: DrawingArea<DB, Shift>) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE)?;

        let count = self.bars.len() as u32;
        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", 24).into_font())
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d((0u32..count).into_segmented(), 0f64..self.y_max())?;

        let label_for = |value: &SegmentValue<u32>| match value {
            SegmentValue::CenterOf(idx) => self
                .bars
                .get(*idx as usize)
                .map(|bar| bar.label.clone())
                .unwrap_or_default(),
            _ => String::new(),
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(self.bars.len() + 1)
            .x_label_formatter(&label_for)
            .x_desc(self.x_desc.as_str())
            .y_desc(self.y_desc.as_str())
            .draw()?;

        chart.draw_series(self.bars.iter().zip(0u32..).map(|(bar, idx)| {
            let mut rect = Rectangle::new(
                [
                    (SegmentValue::Exact(idx), 0.0),
                    (SegmentValue::Exact(idx + 1), bar.value),
                ],
                BAR_COLOR.filled(),
            );
            rect.set_margin(0, 0, 12, 12);
            rect
        }))?;

        let annotation_style =
            TextStyle::from(("sans-serif", 16).into_font()).pos(Pos::new(HPos::Center, VPos::Bottom));
        chart.draw_series(self.bars.iter().zip(0u32..).map(|(bar, idx)| {
            Text::new(
                self.annotation(bar.value),
                (SegmentValue::CenterOf(idx), bar.value),
                annotation_style.clone(),
            )
        }))?;

        root.present()?;
        Ok(())
    }
}
