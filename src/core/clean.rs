use crate::domain::model::{CleanedTable, FieldValue, MeteoriteRow, RawRecord};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

pub const MASS_FIELD: &str = "mass";
pub const YEAR_FIELD: &str = "year";
pub const NAME_FIELD: &str = "name";

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Turns raw records into typed rows, keeping input order.
///
/// Returns an empty table when no record carries a `mass` or a `year` field
/// at all. Rows whose mass or year cannot be parsed are dropped silently.
pub fn clean(records: Vec<RawRecord>) -> CleanedTable {
    let has_column = |field: &str| records.iter().any(|r| r.contains(field));

    if !has_column(MASS_FIELD) || !has_column(YEAR_FIELD) {
        tracing::error!(
            "Critical columns ('{}', '{}') are missing from the dataset",
            MASS_FIELD,
            YEAR_FIELD
        );
        return CleanedTable::empty();
    }

    let total = records.len();
    let rows: Vec<MeteoriteRow> = records.iter().filter_map(clean_row).collect();

    tracing::debug!("Dropped {} of {} rows during cleaning", total - rows.len(), total);

    CleanedTable::new(rows)
}

fn clean_row(record: &RawRecord) -> Option<MeteoriteRow> {
    let mass = record.get(MASS_FIELD).and_then(parse_mass)?;
    let year = record.get(YEAR_FIELD).and_then(parse_year)?;
    let name = record
        .get(NAME_FIELD)
        .and_then(FieldValue::as_text)
        .unwrap_or("Unknown")
        .to_string();

    Some(MeteoriteRow { name, mass, year })
}

/// Numeric coercion: numbers and numeric text. NaN and infinities count as missing.
pub fn parse_mass(value: &FieldValue) -> Option<f64> {
    let mass = match value {
        FieldValue::Number(n) => *n,
        FieldValue::Text(s) => s.trim().parse::<f64>().ok()?,
        FieldValue::Null | FieldValue::Other(_) => return None,
    };
    mass.is_finite().then_some(mass)
}

/// Date coercion keeping only the calendar year.
pub fn parse_year(value: &FieldValue) -> Option<i32> {
    let text = value.as_text()?.trim();

    if text.len() == 4 && text.bytes().all(|b| b.is_ascii_digit()) {
        return text.parse().ok();
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.year());
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.year());
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .map(|date| date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    fn record(name: &str, mass: FieldValue, year: FieldValue) -> RawRecord {
        RawRecord::new()
            .with(NAME_FIELD, text(name))
            .with(MASS_FIELD, mass)
            .with(YEAR_FIELD, year)
    }

    #[test]
    fn test_missing_mass_column_yields_empty_table() {
        let records = vec![
            RawRecord::new()
                .with(NAME_FIELD, text("Aachen"))
                .with(YEAR_FIELD, text("1880-01-01T00:00:00.000")),
            RawRecord::new()
                .with(NAME_FIELD, text("Aarhus"))
                .with(YEAR_FIELD, text("1951-01-01T00:00:00.000")),
        ];

        assert!(clean(records).is_empty());
    }

    #[test]
    fn test_missing_year_column_yields_empty_table() {
        let records = vec![RawRecord::new()
            .with(NAME_FIELD, text("Aachen"))
            .with(MASS_FIELD, text("21"))];

        assert!(clean(records).is_empty());
    }

    #[test]
    fn test_column_present_in_any_record_is_enough() {
        let records = vec![
            RawRecord::new().with(NAME_FIELD, text("No mass")).with(YEAR_FIELD, text("1990")),
            record("Abee", text("107000"), text("1952-01-01T00:00:00.000")),
        ];

        let table = clean(records);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].name, "Abee");
    }

    #[test]
    fn test_non_numeric_mass_drops_only_that_row() {
        let records = vec![
            record("Aachen", text("21"), text("1880-01-01T00:00:00.000")),
            record("Broken", text("heavy"), text("1900-01-01T00:00:00.000")),
            record("Aarhus", FieldValue::Number(720.0), text("1951-01-01T00:00:00.000")),
        ];

        let table = clean(records);

        assert_eq!(
            table.rows(),
            &[
                MeteoriteRow { name: "Aachen".to_string(), mass: 21.0, year: 1880 },
                MeteoriteRow { name: "Aarhus".to_string(), mass: 720.0, year: 1951 },
            ]
        );
    }

    #[test]
    fn test_unparsable_or_null_year_is_dropped() {
        let records = vec![
            record("A", text("1"), text("sometime")),
            record("B", text("2"), FieldValue::Null),
            record("C", text("3"), FieldValue::Number(1990.0)),
            record("D", text("4"), text("2001-06-15")),
        ];

        let table = clean(records);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].year, 2001);
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let records = vec![
            record("Aachen", text("21"), text("1880-01-01T00:00:00.000")),
            record("Bad", text(""), text("1880-01-01T00:00:00.000")),
            record("Abee", text("107000"), text("1952-01-01T00:00:00.000")),
        ];

        assert_eq!(clean(records.clone()), clean(records));
    }

    #[test]
    fn test_missing_name_becomes_unknown() {
        let records = vec![RawRecord::new()
            .with(MASS_FIELD, text("5"))
            .with(YEAR_FIELD, text("1999"))];

        let table = clean(records);
        assert_eq!(table.rows()[0].name, "Unknown");
    }

    #[test]
    fn test_parse_mass() {
        assert_eq!(parse_mass(&text(" 21.5 ")), Some(21.5));
        assert_eq!(parse_mass(&FieldValue::Number(0.0)), Some(0.0));
        assert_eq!(parse_mass(&text("NaN")), None);
        assert_eq!(parse_mass(&text("inf")), None);
        assert_eq!(parse_mass(&FieldValue::Null), None);
        assert_eq!(parse_mass(&FieldValue::Other(serde_json::json!(true))), None);
    }

    #[test]
    fn test_parse_year_formats() {
        assert_eq!(parse_year(&text("1880-01-01T00:00:00.000")), Some(1880));
        assert_eq!(parse_year(&text("1880-01-01T00:00:00")), Some(1880));
        assert_eq!(parse_year(&text("2010-03-04 12:30:00")), Some(2010));
        assert_eq!(parse_year(&text("2010-03-04T12:30:00+02:00")), Some(2010));
        assert_eq!(parse_year(&text("1999/12/31")), Some(1999));
        assert_eq!(parse_year(&text("1492")), Some(1492));
        assert_eq!(parse_year(&text("2010-13-45")), None);
        assert_eq!(parse_year(&text("")), None);
    }
}
