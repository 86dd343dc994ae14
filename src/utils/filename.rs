use std::path::{Path, PathBuf};

/// Build a chart path of the form `{output_dir}/{prefix}_{column}.png`
pub fn column_chart_path(output_dir: &Path, prefix: &str, column: &str) -> PathBuf {
    output_dir.join(format!("{}_{}.png", prefix, sanitize(column)))
}

/// Build a chart path with a fixed name: `{output_dir}/{name}.png`
pub fn chart_path(output_dir: &Path, name: &str) -> PathBuf {
    output_dir.join(format!("{}.png", sanitize(name)))
}

/// Replace anything outside `[A-Za-z0-9_-]` so column names are safe on every filesystem
pub fn sanitize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
