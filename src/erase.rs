use crate::{data::Record, store::Store};
use chrono::NaiveDate;
use tracing::info;

/// Splits off every record dated exactly `date`. Returns what is left, in
/// store order, and how many records went away.
pub(crate) fn delete_by_date(records: Vec<Record>, date: NaiveDate) -> (Vec<Record>, usize) {
    let before = records.len();
    let remaining: Vec<Record> = records.into_iter().filter(|r| r.date != date).collect();
    let removed = before - remaining.len();
    (remaining, removed)
}

/// Removes all records for `date` from the store and returns how many there
/// were. A missing store is an error, not a zero; when nothing matches the
/// file isn't touched.
pub(crate) fn erase_date(store: &Store, date: NaiveDate) -> Result<usize, anyhow::Error> {
    let (remaining, removed) = delete_by_date(store.load_all()?, date);
    if removed > 0 {
        store.rewrite(&remaining)?;
        info!(%date, removed, "deleted records");
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use crate::{
        data::{Error, Record},
        erase::{delete_by_date, erase_date},
        store::Store,
    };
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_delete_all_matching() {
        let records = vec![
            Record::new(day(1), 1, 0, 0),
            Record::new(day(2), 2, 0, 0),
            Record::new(day(1), 3, 0, 0),
        ];
        let (remaining, removed) = delete_by_date(records, day(1));
        assert_eq!(removed, 2);
        assert_eq!(remaining, [Record::new(day(2), 2, 0, 0)]);
    }

    #[test]
    fn test_delete_nothing() {
        let records = vec![Record::new(day(2), 2, 0, 0)];
        let (remaining, removed) = delete_by_date(records.clone(), day(3));
        assert_eq!(removed, 0);
        assert_eq!(remaining, records);
    }

    #[test]
    fn test_erase_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("log.csv"));
        for (d, steps) in [(1, 10), (2, 20), (1, 30)] {
            store.append(&Record::new(day(d), steps, 0, 0)).unwrap();
        }
        assert_eq!(erase_date(&store, day(1)).unwrap(), 2);
        assert_eq!(store.load_all().unwrap(), [Record::new(day(2), 20, 0, 0)]);
        assert_eq!(erase_date(&store, day(1)).unwrap(), 0);
    }

    #[test]
    fn test_erase_missing_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let err = erase_date(&Store::new(&path), day(1)).unwrap_err();
        assert_eq!(err.downcast_ref::<Error>(), Some(&Error::StoreNotFound(path)));
    }
}
