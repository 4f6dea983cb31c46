use crate::{
    compute::Summary,
    data::{Record, DATE_FORMAT},
};
use std::io::Write;

/// `1234567` -> `1,234,567`
pub(crate) fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Prints the totals, best/worst day and the statistics table.
pub(crate) fn display_summary<W: Write>(out: &mut W, summary: &Summary) -> std::io::Result<()> {
    writeln!(out, "\nTotal Steps: {}", group_thousands(summary.total_steps))?;
    writeln!(out, "Total Calories Burned: {}", group_thousands(summary.total_calories))?;
    writeln!(out, "Average Workout Duration: {:.2} minutes", summary.mean_duration)?;
    writeln!(
        out,
        "Best Day: {} ({} steps)",
        summary.best_day.date.format(DATE_FORMAT),
        group_thousands(summary.best_day.steps.into())
    )?;
    writeln!(
        out,
        "Worst Day: {} ({} steps)",
        summary.worst_day.date.format(DATE_FORMAT),
        group_thousands(summary.worst_day.steps.into())
    )?;

    writeln!(out, "\n--- Statistical Overview ---")?;
    write!(out, "{:<8}", "")?;
    for column in &summary.columns {
        write!(out, " {:>24}", column.name)?;
    }
    writeln!(out)?;
    let rows: Vec<_> = summary.columns.iter().map(|c| c.rows()).collect();
    for (i, (label, _)) in rows[0].iter().enumerate() {
        write!(out, "{label:<8}")?;
        for column in &rows {
            match column[i].1 {
                Some(value) => write!(out, " {value:>24.6}")?,
                None => write!(out, " {:>24}", "NaN")?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Prints records as a table, one row per record.
pub(crate) fn display_records<W: Write>(out: &mut W, records: &[Record]) -> std::io::Result<()> {
    writeln!(out, "{}", "=".repeat(64))?;
    writeln!(
        out,
        "{:<12} {:>12} {:>16} {:>20}",
        "Date", "Steps", "Calories", "Duration (min)"
    )?;
    writeln!(out, "{}", "-".repeat(64))?;
    for record in records {
        writeln!(
            out,
            "{:<12} {:>12} {:>16} {:>20}",
            record.date.format(DATE_FORMAT).to_string(),
            record.steps,
            record.calories,
            record.duration_minutes
        )?;
    }
    writeln!(out, "{}", "=".repeat(64))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{
        compute::Summary,
        data::Record,
        display::{display_records, display_summary, group_thousands},
    };
    use chrono::NaiveDate;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(
            group_thousands(3 * u128::from(u64::MAX)),
            "55,340,232,221,128,654,845"
        );
    }

    #[test]
    fn test_summary_output() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let summary = Summary::compute(&[Record::new(date, 12345, 2000, 45)]).unwrap();
        let mut buf = Vec::new();
        display_summary(&mut buf, &summary).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Total Steps: 12,345"));
        assert!(text.contains("Total Calories Burned: 2,000"));
        assert!(text.contains("Average Workout Duration: 45.00 minutes"));
        assert!(text.contains("Best Day: 2024-01-01 (12,345 steps)"));
        assert!(text.contains("NaN"));
    }

    #[test]
    fn test_records_table() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
        let mut buf = Vec::new();
        display_records(&mut buf, &[Record::new(date, 1, 2, 3)]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("2024-01-09"));
        assert_eq!(text.lines().count(), 5);
    }
}
