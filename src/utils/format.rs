/// Format an integer with comma thousands separators (`1234567` -> `1,234,567`)
pub fn thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    if value < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

/// Share of `part` in `total`, as a percentage. Zero when the total is zero.
pub fn percentage(part: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// `(12.34%)` style suffix used throughout the reports
pub fn percent_suffix(part: i64, total: i64) -> String {
    format!("({:.2}%)", percentage(part, total))
}

/// Format a float the way summary tables print it: integers without decimals
pub fn number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{:.6}", value)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

/// Aligned text grid: first column left-aligned, the rest right-aligned, two spaces apart
pub fn text_grid(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    std::iter::once(header)
        .chain(rows.iter().map(Vec::as_slice))
        .map(|row| {
            row.iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (cell, width))| match i {
                    0 => format!("{:<width$}", cell, width = *width),
                    _ => format!("{:>width$}", cell, width = *width),
                })
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(3_377_404_512), "3,377,404,512");
        assert_eq!(thousands(-45_000), "-45,000");
    }

    #[test]
    fn test_percentage() {
        assert!((percentage(25, 100) - 25.0).abs() < f64::EPSILON);
        assert_eq!(percentage(5, 0), 0.0);
        assert_eq!(percent_suffix(1, 3), "(33.33%)");
    }

    #[test]
    fn test_number() {
        assert_eq!(number(12.0), "12");
        assert_eq!(number(12.5), "12.5");
        assert_eq!(number(1.0 / 3.0), "0.333333");
        assert_eq!(number(f64::NAN), "NaN");
    }

    #[test]
    fn test_text_grid_alignment() {
        let header = vec!["".to_string(), "W".to_string()];
        let rows = vec![
            vec!["Clark/Lake".to_string(), "1,240".to_string()],
            vec!["Elm".to_string(), "7".to_string()],
        ];
        assert_eq!(
            text_grid(&header, &rows),
            "                W\nClark/Lake  1,240\nElm             7"
        );
    }
}
