use std::collections::BTreeMap;

use crate::schema::{ColumnType, Overrides};

/// Default database file name, created under the working directory.
pub const DB_FILE: &str = "bird_survey_db.sqlite3";

/// The fixed set of remote release files and where to fetch them from.
///
/// The survey publishes one release as a handful of well-known file names;
/// nothing here is discovered dynamically. The base URL is overridable from
/// the CLI for mirrors.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub base_url: String,
    /// Remote directory holding the fifty-stop zip archives.
    pub fifty_stop_path: String,
    pub fifty_stop_files: Vec<String>,
    /// Fixed-width metadata text files, served from the base directory.
    pub meta_text_files: Vec<String>,
    /// Zipped metadata CSV files, served from the base directory.
    pub meta_csv_files: Vec<String>,
    /// Column-type overrides applied during schema inference.
    pub overrides: Overrides,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            base_url: "https://www.pwrc.usgs.gov/BBS/DataFiles".to_string(),
            fifty_stop_path: "50-StopData/1997ToPresent_SurveyWide".to_string(),
            fifty_stop_files: (1..=10).map(|i| format!("Fifty{i}.zip")).collect(),
            meta_text_files: [
                "SpeciesList.txt",
                "BBSStrata.txt",
                "BCR.txt",
                "RunProtocolID.txt",
                "RegionCodes.txt",
                "RouteInf.txt",
            ]
            .map(str::to_string)
            .to_vec(),
            meta_csv_files: ["Weather.zip", "Routes.zip"].map(str::to_string).to_vec(),
            overrides: default_overrides(),
        }
    }
}

/// Survey start/end times are clock readings like `0605`; sampling would
/// call them integers and lose the leading zero.
pub fn default_overrides() -> Overrides {
    let mut overrides = BTreeMap::new();
    overrides.insert("StartTime".to_string(), ColumnType::Text);
    overrides.insert("EndTime".to_string(), ColumnType::Text);
    overrides
}
