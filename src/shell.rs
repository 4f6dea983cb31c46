use crate::{
    chart::{CalorieSeries, ChartRenderer, StepsWindow, TextCharts},
    compute::{write_summary, Summary},
    config::Config,
    data::{Record, DATE_FORMAT},
    display::{display_records, display_summary},
    erase::erase_date,
    query::{filter_by_date_range, DateRange},
    store::Store,
    validate::{parse_count, parse_date, prompt_until, read_line},
};
use std::{
    fs::File,
    io::{BufRead, ErrorKind, Write},
    str::FromStr,
};
use tracing::{debug, warn};

/// The six things one can do from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuChoice {
    Add,
    Analyze,
    Visualize,
    Search,
    Delete,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use MenuChoice::*;
        match s.trim() {
            "1" => Ok(Add),
            "2" => Ok(Analyze),
            "3" => Ok(Visualize),
            "4" => Ok(Search),
            "5" => Ok(Delete),
            "6" => Ok(Exit),
            _ => Err(()),
        }
    }
}

const MENU: &str = "
=============================================
      Fitness Tracking & Visualization
=============================================
1. Add New Fitness Data
2. Analyze Fitness Data
3. Visualize Fitness Progress
4. Search Records by Date Range
5. Delete Records by Date
6. Exit the Application
---------------------------------------------";

/// Menu loop over any line based input and any output, so it can run on the
/// console as well as on byte buffers in tests.
pub(crate) struct Shell<R, W> {
    input: R,
    output: W,
    config: Config,
    store: Store,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, config: Config) -> Self {
        let store = Store::new(config.data_path.clone());
        Self {
            input,
            output,
            config,
            store,
        }
    }

    /// Runs until Exit is chosen or the input runs dry. Failed operations are
    /// reported and the menu comes back; only a broken console is returned
    /// as an error.
    pub fn run(&mut self) -> Result<(), anyhow::Error> {
        if let Err(e) = self.store.ensure_initialized() {
            warn!(path = %self.store.path().display(), "could not initialize the data file: {e}");
            writeln!(self.output, "Error: {e}")?;
        }
        loop {
            writeln!(self.output, "{MENU}")?;
            write!(self.output, "Choose your option (1-6): ")?;
            self.output.flush()?;
            let Some(line) = read_line(&mut self.input)? else {
                break;
            };
            let Ok(choice) = line.parse::<MenuChoice>() else {
                writeln!(
                    self.output,
                    "\nInvalid choice. Please enter a number between 1 and 6."
                )?;
                continue;
            };
            debug!(?choice, "menu");
            let result = match choice {
                MenuChoice::Add => self.add(),
                MenuChoice::Analyze => self.analyze(),
                MenuChoice::Visualize => self.visualize(),
                MenuChoice::Search => self.search(),
                MenuChoice::Delete => self.delete(),
                MenuChoice::Exit => break,
            };
            if let Err(e) = result {
                if is_end_of_input(&e) {
                    break;
                }
                warn!("{choice:?} failed: {e}");
                writeln!(self.output, "Error: {e}")?;
            }
        }
        writeln!(self.output, "\nExiting Application...")?;
        Ok(())
    }

    fn add(&mut self) -> Result<(), anyhow::Error> {
        let (input, output) = (&mut self.input, &mut self.output);
        writeln!(output, "\n--- Record Your Daily Activity ---")?;
        let date = prompt_until(
            input,
            output,
            "Enter the date of your activity (YYYY-MM-DD): ",
            parse_date,
        )?;
        let steps = prompt_until(input, output, "Enter the total steps taken: ", parse_count)?;
        let calories = prompt_until(
            input,
            output,
            "Enter the total calories burned: ",
            parse_count,
        )?;
        let duration = prompt_until(
            input,
            output,
            "Enter the duration of exercise (in minutes): ",
            parse_count,
        )?;
        self.store
            .append(&Record::new(date, steps, calories, duration))?;
        writeln!(self.output, "\nYour Data has been added")?;
        Ok(())
    }

    fn analyze(&mut self) -> Result<(), anyhow::Error> {
        writeln!(self.output, "\n--- Analyzing Your Efforts ---")?;
        let records = self.store.load_all()?;
        let Some(summary) = Summary::compute(&records) else {
            writeln!(self.output, "No Data Found. Record some data first.")?;
            return Ok(());
        };
        display_summary(&mut self.output, &summary)?;
        let path = &self.config.summary_path;
        match File::create(path)
            .map_err(anyhow::Error::from)
            .and_then(|file| write_summary(file, &summary))
        {
            Ok(()) => writeln!(self.output, "\nSummary exported to {}", path.display())?,
            Err(e) => {
                warn!("summary export failed: {e}");
                writeln!(self.output, "\nCould not export summary: {e}")?;
            }
        }
        Ok(())
    }

    fn visualize(&mut self) -> Result<(), anyhow::Error> {
        writeln!(self.output, "\n--- Visualizing Data ---")?;
        let records = self.store.load_all()?;
        if records.is_empty() {
            writeln!(self.output, "No data to visualize.")?;
            return Ok(());
        }
        let mut charts = TextCharts::new(&mut self.output);
        charts.bar_chart(&StepsWindow::recent(&records, self.config.recent_days))?;
        charts.line_chart(&CalorieSeries::from_records(&records))?;
        Ok(())
    }

    fn search(&mut self) -> Result<(), anyhow::Error> {
        writeln!(self.output, "\n--- Search Records ---")?;
        let start = self.ask("Enter the start date (YYYY-MM-DD): ")?;
        let end = self.ask("Enter the end date (YYYY-MM-DD): ")?;
        let range = DateRange::parse(&start, &end)?;
        let found = filter_by_date_range(&self.store.load_all()?, &range);
        if found.is_empty() {
            writeln!(
                self.output,
                "No records found between {} and {}.",
                range.start.format(DATE_FORMAT),
                range.end.format(DATE_FORMAT)
            )?;
            return Ok(());
        }
        display_records(&mut self.output, &found)?;
        writeln!(self.output, "{} record(s) found.", found.len())?;
        Ok(())
    }

    fn delete(&mut self) -> Result<(), anyhow::Error> {
        writeln!(self.output, "\n--- Delete Records ---")?;
        let date = prompt_until(
            &mut self.input,
            &mut self.output,
            "Enter the date to delete (YYYY-MM-DD): ",
            parse_date,
        )?;
        let date_str = date.format(DATE_FORMAT);
        match erase_date(&self.store, date)? {
            0 => writeln!(self.output, "No records found for {date_str}.")?,
            removed => writeln!(self.output, "Deleted {removed} record(s) for {date_str}.")?,
        }
        Ok(())
    }

    /// Single unvalidated answer; running out of input ends the session.
    fn ask(&mut self, prompt: &str) -> Result<String, anyhow::Error> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        read_line(&mut self.input)?
            .ok_or_else(|| std::io::Error::from(ErrorKind::UnexpectedEof).into())
    }
}

fn is_end_of_input(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .is_some_and(|e| e.kind() == ErrorKind::UnexpectedEof)
}
