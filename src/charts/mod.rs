//! Charts module - Chart rendering

mod renderer;

pub use renderer::{AxisDecor, BarChart, ChartError, OutputFormat, Spines, StaticChartRenderer};
