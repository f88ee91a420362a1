use std::ops::Range;
use std::path::Path;
use std::sync::Once;

use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, FontStyle};

use crate::color::{self, ColorMap};
use crate::config::{prettify_column, ChartOptions, ColumnSelection};
use crate::data::model::Analysis;
use crate::error::ParetoError;

const FONT_FAMILY: &str = "sans-serif";
const MIN_WIDTH: u32 = 200;
const MIN_HEIGHT: u32 = 150;
const MAX_WIDTH: u32 = 10_000;
const MAX_HEIGHT: u32 = 10_000;

static FONTS: Once = Once::new();

fn register_fonts() {
    FONTS.call_once(|| {
        let regular = register_font(
            FONT_FAMILY,
            FontStyle::Normal,
            include_bytes!("../assets/DejaVuSans.ttf"),
        );
        let bold = register_font(
            FONT_FAMILY,
            FontStyle::Bold,
            include_bytes!("../assets/DejaVuSans-Bold.ttf"),
        );
        if regular.is_err() || bold.is_err() {
            log::warn!("bundled chart fonts could not be registered");
        }
    });
}

fn render_err<E: std::fmt::Debug>(err: E) -> ParetoError {
    ParetoError::Render(format!("{err:?}"))
}

/// Padded axis range over `values`: 5% of the span on each side, or 5% of the
/// magnitude (±1 at zero) when all values are equal.
///
/// Padding is clamped to the finite range.  Values whose span itself does not
/// fit in an `f64` cannot be drawn and give [`ParetoError::Render`].
pub fn axis_range(values: impl IntoIterator<Item = f64>) -> Result<Range<f64>, ParetoError> {
    let (lo, hi) = values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return Ok(0.0..1.0);
    }
    let half_span = hi / 2.0 - lo / 2.0;
    let pad = if half_span > 0.0 {
        half_span * 0.1
    } else if lo != 0.0 {
        lo.abs() * 0.05
    } else {
        1.0
    };
    let start = (lo - pad).max(f64::MIN);
    let end = (hi + pad).min(f64::MAX);
    if !(end - start).is_finite() {
        return Err(ParetoError::Render(format!(
            "axis range {lo:e}..{hi:e} is too wide to draw"
        )));
    }
    Ok(start..end)
}

/// Draw the chart into an RGB8 buffer of `options.width` x `options.height`.
pub fn render_rgb(
    analysis: &Analysis,
    columns: &ColumnSelection,
    options: &ChartOptions,
) -> Result<Vec<u8>, ParetoError> {
    let (width, height) = (options.width, options.height);
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        return Err(ParetoError::Render(format!(
            "image size {width}x{height} is below the {MIN_WIDTH}x{MIN_HEIGHT} minimum"
        )));
    }
    if width > MAX_WIDTH || height > MAX_HEIGHT {
        return Err(ParetoError::Render(format!(
            "image size {width}x{height} is above the {MAX_WIDTH}x{MAX_HEIGHT} maximum"
        )));
    }
    register_fonts();

    // Sizes are tuned for a 700 px tall chart and scale with the height.
    let scale = f64::from(height) / 700.0;
    let px = |v: f64| (v * scale).round() as i32;
    let font = |size: f64| (FONT_FAMILY, size * scale).into_font();

    let x_range = axis_range(analysis.points.iter().map(|p| p.x))?;
    let y_range = axis_range(analysis.points.iter().map(|p| p.y))?;

    let point_colors = ColorMap::new(analysis.points.iter().map(|p| p.label.as_str()));
    let accent = color::FRONTIER.to_plotters();
    let label_pos = Pos::new(HPos::Left, VPos::Bottom);

    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&options.title, font(16.0))
            .margin(px(14.0))
            .x_label_area_size(px(40.0))
            .y_label_area_size(px(60.0))
            .build_cartesian_2d(x_range, y_range)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc(prettify_column(&columns.x))
            .y_desc(prettify_column(&columns.y))
            .axis_desc_style(font(11.0))
            .label_style(font(9.0))
            .bold_line_style(BLACK.mix(0.12))
            .light_line_style(BLACK.mix(0.04))
            .draw()
            .map_err(render_err)?;

        // ---- All trials ----
        let radius = px(5.0);
        chart
            .draw_series(analysis.points.iter().map(|p| {
                let c = point_colors.color_for(&p.label).to_plotters();
                Circle::new((p.x, p.y), radius, c.mix(0.6).filled())
            }))
            .map_err(render_err)?
            .label("All Trials")
            .legend(move |(x, y)| {
                Circle::new((x, y), radius, color::DEFAULT_POINT.to_plotters().mix(0.6).filled())
            });

        if options.show_labels {
            let style = font(8.0).color(&BLACK).pos(label_pos);
            let offset = px(3.0);
            chart
                .draw_series(analysis.points.iter().map(|p| {
                    EmptyElement::at((p.x, p.y))
                        + Text::new(p.label.clone(), (offset, -offset), style.clone())
                }))
                .map_err(render_err)?;
        }

        // ---- Frontier ----
        let line_width = px(2.0).max(1) as u32;
        chart
            .draw_series(LineSeries::new(
                analysis.frontier.iter().map(|f| (f.x, f.y)),
                accent.stroke_width(line_width),
            ))
            .map_err(render_err)?
            .label("Pareto Frontier")
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], accent.stroke_width(line_width))
            });

        let marker = px(7.0);
        chart
            .draw_series(analysis.frontier.iter().map(|f| {
                EmptyElement::at((f.x, f.y))
                    + Circle::new((0, 0), marker, accent.filled())
                    + Circle::new((0, 0), marker, BLACK.stroke_width(2))
            }))
            .map_err(render_err)?;

        if options.show_labels {
            let style = font(9.0)
                .style(FontStyle::Bold)
                .color(&accent)
                .pos(label_pos);
            let (dx, dy) = (px(3.0), px(6.0));
            chart
                .draw_series(analysis.frontier.iter().map(|f| {
                    EmptyElement::at((f.x, f.y))
                        + Text::new(f.label.clone(), (dx, -dy), style.clone())
                }))
                .map_err(render_err)?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .label_font(font(10.0))
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK.mix(0.3))
            .draw()
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }

    Ok(buffer)
}

/// Render the chart and write it as a PNG, creating missing parent
/// directories.
pub fn render_png(
    path: &Path,
    analysis: &Analysis,
    columns: &ColumnSelection,
    options: &ChartOptions,
) -> Result<(), ParetoError> {
    let buffer = render_rgb(analysis, columns, options)?;
    let image = RgbImage::from_raw(options.width, options.height, buffer)
        .ok_or_else(|| ParetoError::Render("rendered buffer has the wrong size".to_string()))?;

    create_parent_dirs(path)?;
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| ParetoError::Image {
            path: path.to_path_buf(),
            source,
        })?;

    log::info!("wrote {}x{} chart to {}", options.width, options.height, path.display());
    Ok(())
}

pub(crate) fn create_parent_dirs(path: &Path) -> Result<(), ParetoError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|source| ParetoError::Io {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Point;
    use crate::pareto::pareto_frontier;

    fn sample() -> Analysis {
        let points = vec![
            Point::new(10.0, 0.30, "short"),
            Point::new(14.0, 0.42, "medium"),
            Point::new(18.0, 0.40, "long"),
            Point::new(22.0, 0.47, "long"),
        ];
        let frontier = pareto_frontier(&points);
        Analysis { points, frontier }
    }

    fn sized(width: u32, height: u32) -> ChartOptions {
        ChartOptions {
            width,
            height,
            ..ChartOptions::default()
        }
    }

    #[test]
    fn axis_range_pads_span() {
        let r = axis_range([0.0, 10.0]).unwrap();
        assert!((r.start + 0.5).abs() < 1e-12);
        assert!((r.end - 10.5).abs() < 1e-12);
    }

    #[test]
    fn axis_range_handles_flat_and_empty() {
        let r = axis_range([4.0, 4.0]).unwrap();
        assert!(r.start < 4.0 && r.end > 4.0);
        assert_eq!(axis_range([0.0]).unwrap(), -1.0..1.0);
        assert_eq!(axis_range(std::iter::empty()).unwrap(), 0.0..1.0);
    }

    #[test]
    fn axis_range_stays_finite_near_f64_max() {
        let r = axis_range([f64::MAX]).unwrap();
        assert!(r.start.is_finite() && r.end.is_finite());
        assert!(r.start < f64::MAX);
        assert_eq!(r.end, f64::MAX);

        let r = axis_range([-1e307, 1e307]).unwrap();
        assert!(r.start.is_finite() && r.end.is_finite());
        assert!(r.start < -1e307 && r.end > 1e307);
    }

    #[test]
    fn overflowing_axis_span_is_an_error() {
        let err = axis_range([-1e308, 1e308]).unwrap_err();
        assert!(matches!(err, ParetoError::Render(_)));

        let points = vec![Point::new(-1e308, 0.0, "a"), Point::new(1e308, 1.0, "b")];
        let frontier = pareto_frontier(&points);
        let analysis = Analysis { points, frontier };
        let err = render_rgb(&analysis, &ColumnSelection::default(), &sized(400, 300)).unwrap_err();
        assert!(matches!(err, ParetoError::Render(_)));
    }

    #[test]
    fn renders_non_blank_buffer() {
        let buffer = render_rgb(&sample(), &ColumnSelection::default(), &sized(400, 300)).unwrap();
        assert_eq!(buffer.len(), 400 * 300 * 3);
        assert!(buffer.iter().any(|&b| b != 255));
    }

    #[test]
    fn tiny_images_are_rejected() {
        let err = render_rgb(&sample(), &ColumnSelection::default(), &sized(10, 10)).unwrap_err();
        assert!(matches!(err, ParetoError::Render(_)));
    }

    #[test]
    fn huge_images_are_rejected() {
        let err = render_rgb(&sample(), &ColumnSelection::default(), &sized(100_000, 100_000))
            .unwrap_err();
        assert!(matches!(err, ParetoError::Render(_)));
        assert!(err.to_string().contains("maximum"));
    }
}
