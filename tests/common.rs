use std::path::{Path, PathBuf};

/// Sample archive export: three storms, one observation without position
pub const SAMPLE_FIXTURE: &str = "tests/fixtures/atlantic_sample.csv";

/// Workbook export: blank first row, numeric Date/Time cells, sheet "Atlantic"
pub const SAMPLE_WORKBOOK: &str = "tests/fixtures/atlantic_sample.xlsx";

/// Write `contents` to `dir/name` and return the full path
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write test fixture");
    path
}
