use crate::{
    compute::peak_index,
    data::{Count, Record, DATE_FORMAT},
    display::group_thousands,
};
use chrono::NaiveDate;
use std::io::Write;

/// One bar of the recent-steps chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StepsBar {
    pub date: NaiveDate,
    pub steps: Count,
    pub peak: bool,
}

/// The last few records, in store order, with the best one flagged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StepsWindow {
    pub bars: Vec<StepsBar>,
}

impl StepsWindow {
    /// Takes the trailing `days` records. Exactly one bar is flagged as
    /// peak (first one on ties) unless the window is empty.
    pub fn recent(records: &[Record], days: usize) -> Self {
        let window = &records[records.len().saturating_sub(days)..];
        let peak = peak_index(window, |r| r.steps);
        let bars = window
            .iter()
            .enumerate()
            .map(|(i, r)| StepsBar {
                date: r.date,
                steps: r.steps,
                peak: Some(i) == peak,
            })
            .collect();
        Self { bars }
    }
}

/// Calories burned per record, ordered by date. Records sharing a date keep
/// their store order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CalorieSeries {
    pub points: Vec<(NaiveDate, Count)>,
}

impl CalorieSeries {
    pub fn from_records(records: &[Record]) -> Self {
        let mut points: Vec<_> = records.iter().map(|r| (r.date, r.calories)).collect();
        points.sort_by_key(|&(date, _)| date);
        Self { points }
    }
}

/// Something that can draw the two charts. The log only decides what goes
/// in them; how they look is up to the implementation.
pub(crate) trait ChartRenderer {
    fn bar_chart(&mut self, window: &StepsWindow) -> Result<(), anyhow::Error>;
    fn line_chart(&mut self, series: &CalorieSeries) -> Result<(), anyhow::Error>;
}

const BAR_WIDTH: u64 = 50;
const LINE_HEIGHT: u64 = 10;

/// Plain text charts written straight to the console.
pub(crate) struct TextCharts<W: Write> {
    out: W,
}

impl<W: Write> TextCharts<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

/// Scales `value` into `0..=cells` relative to `max`.
fn scale(value: Count, max: Count, cells: u64) -> u64 {
    if max == 0 {
        0
    } else {
        (u128::from(value) * u128::from(cells) / u128::from(max)) as u64
    }
}

impl<W: Write> ChartRenderer for TextCharts<W> {
    fn bar_chart(&mut self, window: &StepsWindow) -> Result<(), anyhow::Error> {
        let out = &mut self.out;
        writeln!(out, "\nSteps: Last {} Days", window.bars.len())?;
        writeln!(out, "{}", "-".repeat(80))?;
        let max = window.bars.iter().map(|b| b.steps).max().unwrap_or(0);
        for bar in &window.bars {
            let fill = if bar.peak { '*' } else { '#' };
            let len = scale(bar.steps, max, BAR_WIDTH) as usize;
            writeln!(
                out,
                "{} | {:<width$} {}",
                bar.date.format(DATE_FORMAT),
                fill.to_string().repeat(len),
                group_thousands(bar.steps.into()),
                width = BAR_WIDTH as usize,
            )?;
        }
        writeln!(out, "{}", "-".repeat(80))?;
        writeln!(out, "# Daily Steps    * Peak Performance Day")?;
        Ok(())
    }

    fn line_chart(&mut self, series: &CalorieSeries) -> Result<(), anyhow::Error> {
        let out = &mut self.out;
        writeln!(out, "\nCaloric Expenditure Over Time")?;
        writeln!(out, "{}", "-".repeat(80))?;
        let max = series.points.iter().map(|&(_, c)| c).max().unwrap_or(0);
        let levels: Vec<u64> = series
            .points
            .iter()
            .map(|&(_, c)| scale(c, max, LINE_HEIGHT))
            .collect();
        for row in (0..=LINE_HEIGHT).rev() {
            let label = u128::from(max) * u128::from(row) / u128::from(LINE_HEIGHT);
            let cells: String = levels
                .iter()
                .map(|&level| if level == row { 'o' } else { ' ' })
                .collect();
            writeln!(out, "{label:>10} |{cells}")?;
        }
        writeln!(out, "{:>10} +{}", "", "-".repeat(levels.len()))?;
        if let (Some(first), Some(last)) = (series.points.first(), series.points.last()) {
            writeln!(
                out,
                "{:>12}{} .. {}",
                "",
                first.0.format(DATE_FORMAT),
                last.0.format(DATE_FORMAT)
            )?;
        }
        writeln!(out, "o Calories Burned")?;
        Ok(())
    }
}
