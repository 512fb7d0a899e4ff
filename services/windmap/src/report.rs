//! Plain-text observation table, strongest wind first.

use wind_common::{compass_name, WindSample};

/// Format the observation table as printed below the rendered image.
pub fn format_table(samples: &[WindSample]) -> String {
    let mut sorted: Vec<&WindSample> = samples.iter().collect();
    sorted.sort_by(|a, b| {
        b.speed_ms
            .partial_cmp(&a.speed_ms)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut out = String::new();
    out.push_str(&format!(
        "{:<10} {:>10} {:>10} {:>9}\n",
        "City", "Speed m/s", "Direction", "Compass"
    ));
    for sample in sorted {
        out.push_str(&format!(
            "{:<10} {:>10.1} {:>9}\u{00b0} {:>9}\n",
            sample.city,
            sample.speed_ms,
            sample.direction_deg as i64,
            compass_name(sample.direction_deg)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sorted_by_speed_descending() {
        let samples = vec![
            WindSample::new("Slow", 130.0, 30.0, 2.0, 0.0).unwrap(),
            WindSample::new("Fast", 140.0, 40.0, 9.0, 90.0).unwrap(),
        ];
        let table = format_table(&samples);
        let fast_pos = table.find("Fast").unwrap();
        let slow_pos = table.find("Slow").unwrap();
        assert!(fast_pos < slow_pos);
    }

    #[test]
    fn test_table_includes_compass_name() {
        let samples = vec![WindSample::new("Tokyo", 139.69, 35.69, 5.0, 90.0).unwrap()];
        let table = format_table(&samples);
        assert!(table.contains(" E"));
    }
}
