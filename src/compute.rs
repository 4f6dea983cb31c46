use crate::data::{Count, Record, STORE_HEADER};
use std::cmp::Ordering;

/// Descriptive statistics of one numeric column, the same figures (and the
/// same conventions) as a dataframe `describe()`: sample standard deviation
/// and linearly interpolated quartiles.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ColumnStats {
    pub name: &'static str,
    pub count: usize,
    pub mean: f64,
    /// `None` with a single value, there is no sample deviation for it.
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnStats {
    /// Computes the statistics of `values`, `None` if there are none.
    pub fn describe(name: &'static str, values: &[Count]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted: Vec<f64> = values.iter().map(|&v| v as f64).collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std = (count > 1).then(|| {
            let squares: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (squares / (count - 1) as f64).sqrt()
        });
        Some(Self {
            name,
            count,
            mean,
            std,
            min: sorted[0],
            q25: quantile(&sorted, 0.25),
            q50: quantile(&sorted, 0.5),
            q75: quantile(&sorted, 0.75),
            max: sorted[count - 1],
        })
    }

    /// Statistic labels and values, in the row order of the summary table.
    pub fn rows(&self) -> [(&'static str, Option<f64>); 8] {
        [
            ("count", Some(self.count as f64)),
            ("mean", Some(self.mean)),
            ("std", self.std),
            ("min", Some(self.min)),
            ("25%", Some(self.q25)),
            ("50%", Some(self.q50)),
            ("75%", Some(self.q75)),
            ("max", Some(self.max)),
        ]
    }
}

/// Linear interpolation between the closest ranks; `sorted` must be sorted
/// and non-empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Index of the first record with the highest `key`.
pub(crate) fn peak_index(records: &[Record], key: impl Fn(&Record) -> Count) -> Option<usize> {
    let mut best: Option<(usize, Count)> = None;
    for (i, record) in records.iter().enumerate() {
        let value = key(record);
        if best.map_or(true, |(_, b)| value > b) {
            best = Some((i, value));
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the first record with the lowest `key`.
pub(crate) fn trough_index(records: &[Record], key: impl Fn(&Record) -> Count) -> Option<usize> {
    let mut worst: Option<(usize, Count)> = None;
    for (i, record) in records.iter().enumerate() {
        let value = key(record);
        if worst.map_or(true, |(_, w)| value < w) {
            worst = Some((i, value));
        }
    }
    worst.map(|(i, _)| i)
}

/// Aggregates over the whole log. Only exists for a non-empty log, so none
/// of the figures below can be a division by zero. Totals are summed in
/// `u128`, which can't overflow for any log that fits in memory.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Summary {
    pub total_steps: u128,
    pub total_calories: u128,
    pub mean_duration: f64,
    pub columns: [ColumnStats; 3],
    pub best_day: Record,
    pub worst_day: Record,
}

impl Summary {
    /// Summarizes `records`, or `None` when there's no data at all.
    pub fn compute(records: &[Record]) -> Option<Self> {
        let steps: Vec<Count> = records.iter().map(|r| r.steps).collect();
        let calories: Vec<Count> = records.iter().map(|r| r.calories).collect();
        let durations: Vec<Count> = records.iter().map(|r| r.duration_minutes).collect();

        let columns = [
            ColumnStats::describe(STORE_HEADER[1], &steps)?,
            ColumnStats::describe(STORE_HEADER[2], &calories)?,
            ColumnStats::describe(STORE_HEADER[3], &durations)?,
        ];
        let best_day = records[peak_index(records, |r| r.steps)?];
        let worst_day = records[trough_index(records, |r| r.steps)?];
        Some(Self {
            total_steps: steps.iter().map(|&v| u128::from(v)).sum(),
            total_calories: calories.iter().map(|&v| u128::from(v)).sum(),
            mean_duration: columns[2].mean,
            columns,
            best_day,
            worst_day,
        })
    }
}

/// Writes the descriptive statistics as CSV: one column per metric, one row
/// per statistic, an empty cell where a statistic is undefined.
pub(crate) fn write_summary<W: std::io::Write>(
    writer: W,
    summary: &Summary,
) -> Result<(), anyhow::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut header = vec![String::new()];
    header.extend(summary.columns.iter().map(|c| c.name.to_owned()));
    wtr.write_record(&header)?;
    let rows: Vec<_> = summary.columns.iter().map(ColumnStats::rows).collect();
    for (i, (label, _)) in rows[0].iter().enumerate() {
        let mut line = vec![(*label).to_owned()];
        line.extend(
            rows.iter()
                .map(|column| column[i].1.map_or_else(String::new, |v| v.to_string())),
        );
        wtr.write_record(&line)?;
    }
    wtr.flush()?;
    Ok(())
}
