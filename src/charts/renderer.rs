//! Static Chart Renderer
//! Draws the proficiency bar chart with plotters.
//!
//! Layout:
//! 1. Title: main title centered at the top
//! 2. Subtitle: legend string for the 1-10 scale
//! 3. Horizontal bars, one per language, first dataset row at the top
//! 4. No spines, no tick marks; only the value and name labels remain

use crate::config::ChartConfig;
use crate::data::SkillRecord;
use image::{ImageFormat, RgbImage};
use plotters::coord::ranged1d::SegmentValue;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

const FONT_FAMILY: &str = "sans-serif";
const FONT_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// Gap between neighbouring bars in pixels.
const BAR_MARGIN: u32 = 4;
const X_LABELS: usize = 6;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to register embedded font")]
    Font,
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Unsupported output format '{0}' (expected .png or .svg)")]
    UnsupportedFormat(String),
    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("Failed to write chart: {0}")]
    Io(#[from] std::io::Error),
    #[error("Chart has no bars")]
    Empty,
}

fn drawing_error<E: std::error::Error>(err: E) -> ChartError {
    ChartError::Drawing(err.to_string())
}

/// Bytes needed for a `w` x `h` RGB buffer, `None` on overflow.
fn rgb_buffer_len(w: u32, h: u32) -> Option<usize> {
    (w as usize).checked_mul(h as usize)?.checked_mul(3)
}

fn ensure_font() -> Result<(), ChartError> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let ok = *REGISTERED
        .get_or_init(|| register_font(FONT_FAMILY, FontStyle::Normal, FONT_BYTES).is_ok());
    if ok {
        Ok(())
    } else {
        Err(ChartError::Font)
    }
}

/// Visibility of the four lines bounding the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spines {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

/// Axis decoration applied around the bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisDecor {
    pub spines: Spines,
    pub tick_mark_size: u32,
}

impl AxisDecor {
    /// No spines, no tick marks.
    pub fn unboxed() -> Self {
        Self {
            spines: Spines {
                top: false,
                right: false,
                bottom: false,
                left: false,
            },
            tick_mark_size: 0,
        }
    }

    pub fn has_visible_lines(&self) -> bool {
        let s = self.spines;
        s.top || s.right || s.bottom || s.left || self.tick_mark_size > 0
    }
}

/// Output file type, chosen from the path extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self, ChartError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            _ => Err(ChartError::UnsupportedFormat(ext)),
        }
    }
}

/// Chart model: records in plot order plus styling.
#[derive(Debug, Clone)]
pub struct BarChart {
    config: ChartConfig,
    records: Vec<SkillRecord>,
    decor: AxisDecor,
}

impl BarChart {
    /// `records` must already be in plot order (bottom bar first).
    pub fn new(config: ChartConfig, records: Vec<SkillRecord>) -> Self {
        Self {
            config,
            records,
            decor: AxisDecor::unboxed(),
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn decor(&self) -> AxisDecor {
        self.decor
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Bars with their vertical slot; slot 0 is the bottom bar.
    pub fn rows(&self) -> impl Iterator<Item = (u32, &SkillRecord)> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| (i as u32, r))
    }

    /// Bar names as they appear from top to bottom.
    pub fn visual_order(&self) -> Vec<&str> {
        self.records.iter().rev().map(|r| r.name.as_str()).collect()
    }

    /// Right edge of the value axis.
    pub fn x_max(&self) -> f64 {
        self.records
            .iter()
            .map(|r| r.proficiency)
            .fold(self.config.x_max, f64::max)
    }

    fn label_for(&self, slot: &SegmentValue<u32>) -> String {
        match slot {
            SegmentValue::CenterOf(i) => self
                .records
                .get(*i as usize)
                .map(|r| r.name.clone())
                .unwrap_or_default(),
            _ => String::new(),
        }
    }
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render into an RGB pixel buffer.
    pub fn render_rgb(chart: &BarChart) -> Result<RgbImage, ChartError> {
        let (w, h) = (chart.config.width, chart.config.height);
        let len = rgb_buffer_len(w, h).ok_or_else(|| {
            ChartError::Drawing(format!("image size {w}x{h} is too large"))
        })?;
        let mut buffer = vec![0u8; len];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (w, h)).into_drawing_area();
            Self::draw(&root, chart)?;
            root.present().map_err(drawing_error)?;
        }
        RgbImage::from_raw(w, h, buffer)
            .ok_or_else(|| ChartError::Drawing("pixel buffer size mismatch".to_string()))
    }

    /// Render to an SVG document.
    pub fn render_svg(chart: &BarChart) -> Result<String, ChartError> {
        let (w, h) = (chart.config.width, chart.config.height);
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (w, h)).into_drawing_area();
            Self::draw(&root, chart)?;
            root.present().map_err(drawing_error)?;
        }
        Ok(svg)
    }

    /// Render and write to `path`; the extension picks the format.
    pub fn save(chart: &BarChart, path: &Path) -> Result<OutputFormat, ChartError> {
        let format = OutputFormat::from_path(path)?;
        match format {
            OutputFormat::Png => {
                let img = Self::render_rgb(chart)?;
                img.save_with_format(path, ImageFormat::Png)?;
            }
            OutputFormat::Svg => {
                let svg = Self::render_svg(chart)?;
                std::fs::write(path, svg)?;
            }
        }
        debug!(path = %path.display(), ?format, "chart saved");
        Ok(format)
    }

    fn draw<DB>(root: &DrawingArea<DB, Shift>, chart: &BarChart) -> Result<(), ChartError>
    where
        DB: DrawingBackend,
    {
        if chart.is_empty() {
            return Err(ChartError::Empty);
        }
        ensure_font()?;

        let cfg = &chart.config;
        root.fill(&WHITE).map_err(drawing_error)?;

        let title_style = (FONT_FAMILY, f64::from(cfg.title_font_size)).into_font();
        let area = root
            .titled(&cfg.title, title_style)
            .map_err(drawing_error)?;

        let last_slot = (chart.len() - 1) as u32;
        let mut ctx = ChartBuilder::on(&area)
            .caption(&cfg.subtitle, (FONT_FAMILY, f64::from(cfg.subtitle_font_size)))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(cfg.label_area_width)
            .build_cartesian_2d(0f64..chart.x_max(), (0u32..last_slot).into_segmented())
            .map_err(drawing_error)?;

        let decor = chart.decor();
        let label_font = (FONT_FAMILY, f64::from(cfg.label_font_size));
        let x_fmt = |v: &f64| format!("{:.0}", v);
        let y_fmt = |slot: &SegmentValue<u32>| chart.label_for(slot);
        let mut mesh = ctx.configure_mesh();
        mesh.disable_mesh()
            .set_all_tick_mark_size(decor.tick_mark_size)
            .x_labels(X_LABELS)
            .y_labels(chart.len())
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt)
            .x_label_style(label_font)
            .y_label_style(label_font);
        // Top and right lines are never drawn by plotters
        if !decor.spines.bottom {
            mesh.disable_x_axis();
        }
        if !decor.spines.left {
            mesh.disable_y_axis();
        }
        mesh.draw().map_err(drawing_error)?;

        let [r, g, b] = cfg.bar_color;
        ctx.draw_series(
            Histogram::horizontal(&ctx)
                .style(RGBColor(r, g, b).filled())
                .margin(BAR_MARGIN)
                .data(chart.rows().map(|(slot, rec)| (slot, rec.proficiency))),
        )
        .map_err(drawing_error)?;

        debug!(bars = chart.len(), x_max = chart.x_max(), "chart drawn");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, proficiency: f64) -> SkillRecord {
        SkillRecord {
            skill: "Programming languages".to_string(),
            name: name.to_string(),
            proficiency,
        }
    }

    /// Records in plot order for dataset order [Python, R, SQL].
    fn sample_chart() -> BarChart {
        BarChart::new(
            ChartConfig::default(),
            vec![record("SQL", 7.0), record("R", 8.0), record("Python", 9.0)],
        )
    }

    #[test]
    fn test_bottom_up_slots_give_dataset_order() {
        let chart = sample_chart();
        let slots: Vec<(u32, &str)> = chart.rows().map(|(s, r)| (s, r.name.as_str())).collect();
        assert_eq!(slots, vec![(0, "SQL"), (1, "R"), (2, "Python")]);
        assert_eq!(chart.visual_order(), vec!["Python", "R", "SQL"]);
    }

    #[test]
    fn test_x_max_grows_with_data() {
        assert_eq!(sample_chart().x_max(), 10.0);
        let chart = BarChart::new(ChartConfig::default(), vec![record("Fortran", 12.0)]);
        assert_eq!(chart.x_max(), 12.0);
    }

    #[test]
    fn test_decor_is_unboxed() {
        let decor = sample_chart().decor();
        assert_eq!(decor, AxisDecor::unboxed());
        assert!(!decor.has_visible_lines());
    }

    #[test]
    fn test_labels_only_at_bar_centers() {
        let chart = sample_chart();
        assert_eq!(chart.label_for(&SegmentValue::CenterOf(2)), "Python");
        assert_eq!(chart.label_for(&SegmentValue::Exact(2)), "");
        assert_eq!(chart.label_for(&SegmentValue::CenterOf(9)), "");
    }

    #[test]
    fn test_output_format_from_extension() {
        let png = OutputFormat::from_path(Path::new("a/chart.png")).unwrap();
        assert_eq!(png, OutputFormat::Png);
        let svg = OutputFormat::from_path(Path::new("chart.SVG")).unwrap();
        assert_eq!(svg, OutputFormat::Svg);
        assert!(matches!(
            OutputFormat::from_path(Path::new("chart.pdf")),
            Err(ChartError::UnsupportedFormat(ref e)) if e == "pdf"
        ));
        assert!(OutputFormat::from_path(Path::new("chart")).is_err());
    }

    #[test]
    fn test_svg_has_bars_labels_and_no_lines() {
        let svg = StaticChartRenderer::render_svg(&sample_chart()).unwrap();
        for text in ["Programming proficiency", "Python", "R", "SQL"] {
            assert!(svg.contains(text), "missing {text}");
        }
        assert!(svg.contains("<rect"));
        assert!(!svg.contains("<line"));
        assert!(!svg.contains("<polyline"));
    }

    #[test]
    fn test_rgb_render_uses_config_size() {
        let img = StaticChartRenderer::render_rgb(&sample_chart()).unwrap();
        assert_eq!(img.dimensions(), (500, 550));
        assert!(img.pixels().any(|p| p.0 == [31, 119, 180]));
    }

    #[test]
    fn test_rgb_buffer_len_checks_overflow() {
        assert_eq!(rgb_buffer_len(500, 550), Some(825_000));
        assert_eq!(rgb_buffer_len(u32::MAX, u32::MAX), None);
    }

    #[test]
    fn test_oversized_chart_is_an_error() {
        let config = ChartConfig {
            width: u32::MAX,
            height: u32::MAX,
            ..ChartConfig::default()
        };
        let chart = BarChart::new(config, vec![record("Python", 9.0)]);
        assert!(matches!(
            StaticChartRenderer::render_rgb(&chart),
            Err(ChartError::Drawing(_))
        ));
    }

    #[test]
    fn test_empty_chart_rejected() {
        let chart = BarChart::new(ChartConfig::default(), Vec::new());
        assert!(matches!(
            StaticChartRenderer::render_svg(&chart),
            Err(ChartError::Empty)
        ));
    }
}
