//! Rendering of a 2D trajectory around a central body.
//!
//! A [`TrajectoryPresenter`] receives the `(x, y)` points of a scaled series
//! and the radius of the central body in the same unit (1.0 once the series
//! is scaled by that radius). [`PngPresenter`] draws them with `plotters`:
//! the trajectory as a line, the central body as a filled disc, on square
//! and symmetric axes so distances keep their proportions.
use std::fs;

use camino::Utf8PathBuf;
use log::info;
use plotters::prelude::*;

use crate::barytrack_errors::BaryTrackError;

/// Fraction of the largest coordinate added around the drawing.
const BOUNDS_MARGIN: f64 = 0.1;
const DISC_POINTS: usize = 360;

/// Sink of the scaled trajectory.
pub trait TrajectoryPresenter {
    fn present(&self, points: &[(f64, f64)], reference_radius: f64) -> Result<(), BaryTrackError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotSettings {
    pub output: Utf8PathBuf,
    /// Figure width and height, in inches.
    pub size_inches: (f64, f64),
    pub dpi: u32,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl Default for PlotSettings {
    fn default() -> Self {
        PlotSettings {
            output: Utf8PathBuf::from("ssb_wrt_sun.png"),
            size_inches: (8.0, 8.0),
            dpi: 300,
            title: "Trajectory of the Solar System Barycentre wrt the Sun".into(),
            x_label: "X in Sun-Radius".into(),
            y_label: "Y in Sun-Radius".into(),
        }
    }
}

impl PlotSettings {
    /// Image size in pixels: figure size times DPI.
    pub fn pixel_size(&self) -> (u32, u32) {
        let (width, height) = self.size_inches;
        (
            (width * self.dpi as f64).round() as u32,
            (height * self.dpi as f64).round() as u32,
        )
    }
}

/// Half-width of square axes centered on the origin that contain every point
/// and the reference disc, with a margin.
pub fn plot_bounds(points: &[(f64, f64)], reference_radius: f64) -> f64 {
    let extent = points
        .iter()
        .flat_map(|&(x, y)| [x.abs(), y.abs()])
        .filter(|v| v.is_finite())
        .fold(reference_radius.abs(), f64::max);

    if extent > 0.0 {
        extent * (1.0 + BOUNDS_MARGIN)
    } else {
        1.0
    }
}

fn plot_error<E: std::fmt::Display>(error: E) -> BaryTrackError {
    BaryTrackError::PlotError(error.to_string())
}

/// PNG renderer writing to [`PlotSettings::output`].
#[derive(Debug, Clone, Default)]
pub struct PngPresenter {
    pub settings: PlotSettings,
}

impl PngPresenter {
    pub fn new(settings: PlotSettings) -> Self {
        PngPresenter { settings }
    }
}

impl TrajectoryPresenter for PngPresenter {
    fn present(&self, points: &[(f64, f64)], reference_radius: f64) -> Result<(), BaryTrackError> {
        let settings = &self.settings;
        if let Some(parent) = settings.output.parent() {
            if !parent.as_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let (width, height) = settings.pixel_size();
        // fonts and strokes follow the resolution
        let scale = settings.dpi as f64 / 100.0;
        let font = |size: f64| {
            ("sans-serif", (size * scale).round() as i32)
                .into_font()
                .color(&BLACK)
        };

        let root = BitMapBackend::new(&settings.output, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(plot_error)?;

        let bound = plot_bounds(points, reference_radius);
        let mut chart = ChartBuilder::on(&root)
            .caption(&settings.title, font(16.0))
            .margin((10.0 * scale) as u32)
            .x_label_area_size((40.0 * scale) as u32)
            .y_label_area_size((50.0 * scale) as u32)
            .build_cartesian_2d(-bound..bound, -bound..bound)
            .map_err(plot_error)?;

        chart
            .configure_mesh()
            .x_desc(settings.x_label.as_str())
            .y_desc(settings.y_label.as_str())
            .label_style(font(10.0))
            .axis_desc_style(font(12.0))
            .draw()
            .map_err(plot_error)?;

        // central body
        let disc: Vec<(f64, f64)> = (0..DISC_POINTS)
            .map(|i| {
                let angle = std::f64::consts::TAU * i as f64 / DISC_POINTS as f64;
                (reference_radius * angle.cos(), reference_radius * angle.sin())
            })
            .collect();
        chart
            .draw_series(std::iter::once(Polygon::new(
                disc,
                RGBColor(255, 200, 0).mix(0.9).filled(),
            )))
            .map_err(plot_error)?
            .label("Sun")
            .legend(|(x, y)| Circle::new((x, y), 5, RGBColor(255, 200, 0).filled()));

        chart
            .draw_series(LineSeries::new(
                points.iter().copied(),
                BLUE.stroke_width(scale.max(1.0) as u32),
            ))
            .map_err(plot_error)?
            .label("SSB")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

        chart
            .configure_series_labels()
            .label_font(font(10.0))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(plot_error)?;

        root.present().map_err(plot_error)?;
        info!(
            "trajectory of {} points written to {} ({width}x{height} px)",
            points.len(),
            settings.output
        );
        Ok(())
    }
}
