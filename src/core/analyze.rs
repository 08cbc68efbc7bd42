use crate::domain::model::{AnalysisResult, CleanedTable};
use std::collections::HashMap;

/// Summary statistics over a cleaned table.
///
/// Ties resolve to the first row (or first-seen year) in table order. An
/// empty table produces `AnalysisResult::default()`.
pub fn analyze(table: &CleanedTable) -> AnalysisResult {
    let mut result = AnalysisResult {
        total_entries: table.len(),
        ..AnalysisResult::default()
    };

    let mut heaviest = None;
    for row in table {
        match heaviest {
            Some((_, mass)) if row.mass <= mass => {}
            _ => heaviest = Some((row.name.as_str(), row.mass)),
        }
    }
    if let Some((name, mass)) = heaviest {
        result.most_massive_name = name.to_string();
        result.most_massive_mass = mass;
    }

    let mut best: Option<(i32, usize)> = None;
    for (year, count) in year_counts_in_order(table) {
        match best {
            Some((_, top)) if count <= top => {}
            _ => best = Some((year, count)),
        }
    }
    if let Some((year, count)) = best {
        result.most_frequent_year = year;
        result.most_frequent_count = count;
    }

    result
}

/// Row count per year, listed in order of each year's first appearance.
pub fn year_counts_in_order(table: &CleanedTable) -> Vec<(i32, usize)> {
    let mut counts: Vec<(i32, usize)> = Vec::new();
    let mut index: HashMap<i32, usize> = HashMap::new();

    for row in table {
        match index.get(&row.year) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(row.year, counts.len());
                counts.push((row.year, 1));
            }
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::MeteoriteRow;

    fn table(rows: &[(&str, f64, i32)]) -> CleanedTable {
        CleanedTable::new(
            rows.iter()
                .map(|(name, mass, year)| MeteoriteRow {
                    name: name.to_string(),
                    mass: *mass,
                    year: *year,
                })
                .collect(),
        )
    }

    #[test]
    fn test_basic_summary() {
        let t = table(&[("a", 10.0, 2000), ("b", 50.0, 2000), ("c", 5.0, 2001)]);
        let result = analyze(&t);

        assert_eq!(result.total_entries, 3);
        assert_eq!(result.most_massive_name, "b");
        assert_eq!(result.most_massive_mass, 50.0);
        assert_eq!(result.most_frequent_year, 2000);
        assert_eq!(result.most_frequent_count, 2);
    }

    #[test]
    fn test_mass_tie_prefers_first_row() {
        let t = table(&[("first", 10.0, 1990), ("second", 10.0, 1991)]);
        let result = analyze(&t);

        assert_eq!(result.most_massive_name, "first");
        assert_eq!(result.most_massive_mass, 10.0);
    }

    #[test]
    fn test_year_tie_prefers_first_seen_year() {
        let t = table(&[
            ("a", 1.0, 2005),
            ("b", 1.0, 1990),
            ("c", 1.0, 1990),
            ("d", 1.0, 2005),
        ]);
        let result = analyze(&t);

        assert_eq!(result.most_frequent_year, 2005);
        assert_eq!(result.most_frequent_count, 2);
    }

    #[test]
    fn test_year_counts_keep_first_appearance_order() {
        let t = table(&[("a", 1.0, 1999), ("b", 1.0, 1850), ("c", 1.0, 1999)]);
        assert_eq!(year_counts_in_order(&t), vec![(1999, 2), (1850, 1)]);
    }

    #[test]
    fn test_empty_table_is_zeroed() {
        let result = analyze(&CleanedTable::empty());
        assert_eq!(result, AnalysisResult::default());
    }
}
