pub mod chart_writer;
pub mod table_writer;

pub use chart_writer::{
    line_rgb, Axes, Bars, ChartRenderer, Extent, MapPoint, Orientation, Series, PALETTE,
    PRIMARY,
};
pub use table_writer::TableWriter;
