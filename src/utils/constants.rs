/// Merger input file names
pub const LINES_FILE: &str = "Lines.csv";
pub const STATIONS_FILE: &str = "Stations.csv";
pub const STOPS_FILE: &str = "Stops.csv";
pub const STOP_DETAILS_FILE: &str = "StopDetails.csv";
pub const RIDERSHIP_FILE: &str = "Ridership.csv";

/// Default artifact locations
pub const DEFAULT_COMBINED_FILE: &str = "CTA_Combined_Data.csv";
pub const DEFAULT_DATABASE_FILE: &str = "CTA2_L_daily_ridership.db";
pub const DEFAULT_OUTPUT_DIR: &str = "output_plots";
pub const DEFAULT_MAP_IMAGE: &str = "chicago.png";
pub const CONFIG_FILE_STEM: &str = "cta-tracker";
pub const ENV_PREFIX: &str = "CTA_TRACKER";

/// Join keys
pub const STATION_ID: &str = "Station_ID";
pub const STOP_ID: &str = "Stop_ID";
pub const LINE_ID: &str = "Line_ID";

/// Combined-table columns the analysis passes look for
pub const COL_STATION_NAME: &str = "Station_Name";
pub const COL_NUM_RIDERS: &str = "Num_Riders";
pub const COL_TYPE_OF_DAY: &str = "Type_of_Day";
pub const COL_RIDE_DATE: &str = "Ride_Date";
pub const COL_ADA: &str = "ADA";
pub const COL_COLOR: &str = "Color";
pub const COL_LATITUDE: &str = "Latitude";
pub const COL_LONGITUDE: &str = "Longitude";
pub const COL_YEAR: &str = "Year";
pub const COL_MONTH: &str = "Month";
pub const COL_DAY: &str = "Day";
pub const COL_DAY_OF_WEEK: &str = "DayOfWeek";

/// Categorical columns with this many distinct values or more are tabulated, not charted
pub const CATEGORY_CHART_LIMIT: usize = 30;

/// Text columns with fewer distinct values than this list them in the variable summary
pub const CATEGORY_LIST_LIMIT: usize = 10;

/// Rows shown by head-style previews
pub const PREVIEW_ROWS: usize = 5;

/// Size of ranked station lists
pub const TOP_N: usize = 10;

/// Historical all-time ridership used as the fixed percentage base
pub const HISTORICAL_TOTAL_RIDERSHIP: i64 = 3_377_404_512;

/// Geographic extent of the Chicago background map
pub const MAP_MIN_LON: f64 = -87.9277;
pub const MAP_MAX_LON: f64 = -87.5569;
pub const MAP_MIN_LAT: f64 = 41.7012;
pub const MAP_MAX_LAT: f64 = 42.0868;

/// Chart dimensions in pixels
pub const CHART_WIDTH: u32 = 1200;
pub const CHART_HEIGHT: u32 = 800;

/// Fonts probed when no font path is configured
pub const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];
