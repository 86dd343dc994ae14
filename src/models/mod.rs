pub mod day_type;
pub mod line_color;
pub mod table;
pub mod value;

pub use day_type::DayType;
pub use line_color::{normalize_color, LineColor};
pub use table::{is_id_column, Table};
pub use value::{parse_date, ColumnKind, Value};
