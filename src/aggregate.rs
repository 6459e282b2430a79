// Frequency counts and cross-tabulations over the complaints table.
//
// Everything here is a pure read of the table. Results use insertion-ordered
// maps so that output order is always the order decided below, never hash
// order.
use crate::types::{Column, CrossTab, Table};
use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

/// Label used by `value_counts` for blank or missing cells.
pub const MISSING_LABEL: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    #[error("column '{0}' not found in dataset")]
    ColumnNotFound(Column),
}

/// How the columns of a crosstab are chosen and ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnOrder {
    /// Every observed label, ascending.
    Observed,
    /// Exactly these labels in this order; unlisted labels are left out.
    Fixed(Vec<String>),
    /// These labels first, then any other observed label ascending.
    Preferred(Vec<String>),
}

impl ColumnOrder {
    pub fn fixed<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ColumnOrder::Fixed(labels.into_iter().map(Into::into).collect())
    }

    pub fn preferred<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ColumnOrder::Preferred(labels.into_iter().map(Into::into).collect())
    }

    fn resolve(&self, observed: &IndexSet<&str>) -> Vec<String> {
        let mut rest: Vec<&str> = observed.iter().copied().collect();
        rest.sort_unstable();
        // Repeated labels in a given list collapse to their first position.
        let columns: IndexSet<&str> = match self {
            ColumnOrder::Observed => rest.into_iter().collect(),
            ColumnOrder::Fixed(labels) => labels.iter().map(String::as_str).collect(),
            ColumnOrder::Preferred(labels) => labels
                .iter()
                .map(String::as_str)
                .chain(rest)
                .collect(),
        };
        columns.into_iter().map(str::to_string).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowOrder {
    /// Busiest row first; equal totals keep first-seen order.
    #[default]
    TotalDescending,
    /// Order in which row labels first appear in the table.
    FirstSeen,
}

fn require(table: &Table, column: Column) -> Result<(), AggregateError> {
    if table.schema().contains(column) {
        Ok(())
    } else {
        Err(AggregateError::ColumnNotFound(column))
    }
}

/// Count records per value of `column`, in first-seen order. Missing values
/// are counted under [`MISSING_LABEL`].
pub fn value_counts(
    table: &Table,
    column: Column,
) -> Result<IndexMap<String, usize>, AggregateError> {
    require(table, column)?;
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for record in table.records() {
        let label = record.get(column).unwrap_or(MISSING_LABEL);
        *counts.entry(label.to_string()).or_insert(0) += 1;
    }
    Ok(counts)
}

/// Cross-tabulate `row_column` against `col_column`.
///
/// Records missing either key are skipped. Every (row, column) pair is
/// present in the result, zero-filled where nothing was observed.
pub fn cross_tab(
    table: &Table,
    row_column: Column,
    col_column: Column,
    column_order: &ColumnOrder,
    row_order: RowOrder,
) -> Result<CrossTab, AggregateError> {
    require(table, row_column)?;
    require(table, col_column)?;

    let mut rows: IndexSet<&str> = IndexSet::new();
    let mut observed: IndexSet<&str> = IndexSet::new();
    let mut cells: IndexMap<(usize, &str), usize> = IndexMap::new();

    for record in table.records() {
        let (Some(row), Some(col)) = (record.get(row_column), record.get(col_column)) else {
            continue;
        };
        let (row_idx, _) = rows.insert_full(row);
        observed.insert(col);
        *cells.entry((row_idx, col)).or_insert(0) += 1;
    }

    let columns = column_order.resolve(&observed);
    // grid[c][i]: count for column c and row i, rows still in first-seen order.
    let grid: Vec<Vec<usize>> = columns
        .iter()
        .map(|c| {
            (0..rows.len())
                .map(|i| cells.get(&(i, c.as_str())).copied().unwrap_or(0))
                .collect()
        })
        .collect();

    let mut order: Vec<usize> = (0..rows.len()).collect();
    if row_order == RowOrder::TotalDescending {
        let totals: Vec<usize> = order
            .iter()
            .map(|&i| grid.iter().map(|counts| counts[i]).sum())
            .collect();
        // sort_by_key is stable, so ties stay in first-seen order.
        order.sort_by_key(|&i| std::cmp::Reverse(totals[i]));
    }

    let matrix: IndexMap<String, Vec<usize>> = columns
        .iter()
        .zip(&grid)
        .map(|(c, counts)| (c.clone(), order.iter().map(|&i| counts[i]).collect()))
        .collect();
    let rows = order
        .iter()
        .filter_map(|&i| rows.get_index(i))
        .map(|r| r.to_string())
        .collect();

    Ok(CrossTab {
        rows,
        columns,
        matrix,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Record, Schema};
    use proptest::prelude::*;

    fn rec(state: &str, status: Option<&str>) -> Record {
        Record {
            state: Some(state.to_string()),
            status: status.map(str::to_string),
            ..Record::default()
        }
    }

    fn table(records: Vec<Record>) -> Table {
        Table::new(Schema::full(), records)
    }

    #[test]
    fn value_counts_keeps_first_seen_order_and_counts_missing() {
        let t = table(vec![
            rec("Kedah", Some("Resolved")),
            rec("Perak", None),
            rec("Kedah", Some("Submitted")),
            rec("Perak", Some("Resolved")),
        ]);
        let counts = value_counts(&t, Column::Status).unwrap();
        let pairs: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(
            pairs,
            vec![("Resolved", 2), (MISSING_LABEL, 1), ("Submitted", 1)]
        );
        assert_eq!(counts.values().sum::<usize>(), t.len());
    }

    #[test]
    fn value_counts_on_absent_column_is_not_found() {
        let t = Table::new(Schema::new([Column::State]), vec![rec("Kedah", None)]);
        assert_eq!(
            value_counts(&t, Column::SignalStrength),
            Err(AggregateError::ColumnNotFound(Column::SignalStrength))
        );
    }

    #[test]
    fn observed_columns_are_sorted_and_rows_ranked_by_total() {
        let t = table(vec![
            rec("Perlis", Some("Submitted")),
            rec("Kedah", Some("Resolved")),
            rec("Kedah", Some("Submitted")),
            rec("Johor", Some("Resolved")),
            rec("Kedah", Some("In Progress")),
        ]);
        let ct = cross_tab(
            &t,
            Column::State,
            Column::Status,
            &ColumnOrder::Observed,
            RowOrder::TotalDescending,
        )
        .unwrap();
        assert_eq!(ct.columns, vec!["In Progress", "Resolved", "Submitted"]);
        assert_eq!(ct.rows, vec!["Kedah", "Perlis", "Johor"]);
        assert_eq!(ct.matrix["Resolved"], vec![1, 0, 1]);
        assert_eq!(ct.matrix["Submitted"], vec![1, 1, 0]);
        assert_eq!(ct.matrix["In Progress"], vec![1, 0, 0]);
    }

    #[test]
    fn equal_totals_keep_first_seen_order() {
        let t = table(vec![
            rec("Sabah", Some("Submitted")),
            rec("Melaka", Some("Submitted")),
            rec("Pahang", Some("Resolved")),
            rec("Pahang", Some("Resolved")),
            rec("Kelantan", Some("Resolved")),
        ]);
        let ct = cross_tab(
            &t,
            Column::State,
            Column::Status,
            &ColumnOrder::Observed,
            RowOrder::TotalDescending,
        )
        .unwrap();
        assert_eq!(ct.rows, vec!["Pahang", "Sabah", "Melaka", "Kelantan"]);
        let totals: Vec<usize> = (0..ct.rows.len()).map(|i| ct.row_total(i)).collect();
        assert_eq!(totals, vec![2, 1, 1, 1]);
    }

    #[test]
    fn first_seen_row_order_skips_ranking() {
        let t = table(vec![
            rec("Sabah", Some("Submitted")),
            rec("Pahang", Some("Resolved")),
            rec("Pahang", Some("Resolved")),
        ]);
        let ct = cross_tab(
            &t,
            Column::State,
            Column::Status,
            &ColumnOrder::Observed,
            RowOrder::FirstSeen,
        )
        .unwrap();
        assert_eq!(ct.rows, vec!["Sabah", "Pahang"]);
    }

    #[test]
    fn fixed_columns_zero_fill_and_drop_unlisted() {
        let t = table(vec![
            rec("Kedah", Some("Submitted")),
            rec("Kedah", Some("Closed")),
            rec("Perak", Some("Closed")),
        ]);
        let ct = cross_tab(
            &t,
            Column::State,
            Column::Status,
            &ColumnOrder::fixed(["Submitted", "In Progress", "Resolved"]),
            RowOrder::TotalDescending,
        )
        .unwrap();
        assert_eq!(ct.columns, vec!["Submitted", "In Progress", "Resolved"]);
        assert_eq!(ct.rows, vec!["Kedah", "Perak"]);
        assert_eq!(ct.matrix["In Progress"], vec![0, 0]);
        assert_eq!(ct.matrix["Submitted"], vec![1, 0]);
        assert!(!ct.matrix.contains_key("Closed"));
    }

    #[test]
    fn preferred_columns_come_first_then_the_rest_ascending() {
        let t = table(vec![
            rec("Kedah", Some("Zeta")),
            rec("Kedah", Some("Weak")),
            rec("Kedah", Some("Alpha")),
        ]);
        let ct = cross_tab(
            &t,
            Column::State,
            Column::Status,
            &ColumnOrder::preferred(["Strong", "Weak"]),
            RowOrder::TotalDescending,
        )
        .unwrap();
        assert_eq!(ct.columns, vec!["Strong", "Weak", "Alpha", "Zeta"]);
        assert_eq!(ct.matrix["Strong"], vec![0]);
        assert_eq!(ct.matrix["Weak"], vec![1]);
    }

    #[test]
    fn every_column_vector_matches_row_count_and_column_sums_match() {
        let t = table(vec![
            rec("Kedah", Some("Submitted")),
            rec("Perak", Some("Resolved")),
            rec("Perak", None),
            rec("Johor", Some("Resolved")),
            rec("Kedah", Some("Resolved")),
        ]);
        let ct = cross_tab(
            &t,
            Column::State,
            Column::Status,
            &ColumnOrder::Observed,
            RowOrder::TotalDescending,
        )
        .unwrap();
        for column in &ct.columns {
            let counts = &ct.matrix[column];
            assert_eq!(counts.len(), ct.rows.len());
            let expected = t
                .records()
                .iter()
                .filter(|r| r.state.is_some() && r.status.as_deref() == Some(column.as_str()))
                .count();
            assert_eq!(counts.iter().sum::<usize>(), expected, "column {column}");
        }
        let all: usize = ct.matrix.values().flatten().sum();
        assert_eq!(all, 4);
    }

    #[test]
    fn missing_column_reports_not_found() {
        let t = Table::new(
            Schema::new([Column::State, Column::Status]),
            vec![rec("Kedah", Some("Submitted"))],
        );
        let err = cross_tab(
            &t,
            Column::State,
            Column::SignalStrength,
            &ColumnOrder::Observed,
            RowOrder::TotalDescending,
        )
        .unwrap_err();
        assert_eq!(err, AggregateError::ColumnNotFound(Column::SignalStrength));
        assert_eq!(err.to_string(), "column 'signal_strength' not found in dataset");
    }

    #[test]
    fn empty_table_with_fixed_columns_keeps_columns() {
        let t = table(vec![]);
        let ct = cross_tab(
            &t,
            Column::State,
            Column::Status,
            &ColumnOrder::fixed(["Submitted", "In Progress", "Resolved"]),
            RowOrder::TotalDescending,
        )
        .unwrap();
        assert!(ct.rows.is_empty());
        assert_eq!(ct.columns.len(), 3);
        assert!(ct.matrix.values().all(Vec::is_empty));
    }

    #[test]
    fn repeated_labels_in_given_order_collapse() {
        let t = table(vec![
            rec("Kedah", Some("Submitted")),
            rec("Kedah", Some("Resolved")),
        ]);
        for order in [
            ColumnOrder::fixed(["Submitted", "Submitted", "Resolved"]),
            ColumnOrder::preferred(["Resolved", "Submitted", "Resolved"]),
        ] {
            let ct = cross_tab(&t, Column::State, Column::Status, &order, RowOrder::TotalDescending)
                .unwrap();
            assert_eq!(ct.columns.len(), 2, "{order:?}");
            assert_eq!(ct.columns.len(), ct.matrix.len());
            let keys: Vec<&String> = ct.matrix.keys().collect();
            let columns: Vec<&String> = ct.columns.iter().collect();
            assert_eq!(keys, columns);
        }
    }

    const STATES: [&str; 4] = ["Kedah", "Perak", "Johor", "Sabah"];
    const STATUSES: [&str; 5] = ["Submitted", "In Progress", "Resolved", "Closed", "Pending"];

    fn arb_records() -> impl Strategy<Value = Vec<Record>> {
        prop::collection::vec(
            (
                prop::option::of(0..STATES.len()),
                prop::option::of(0..STATUSES.len()),
            ),
            0..40,
        )
        .prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(state, status)| Record {
                    state: state.map(|i| STATES[i].to_string()),
                    status: status.map(|i| STATUSES[i].to_string()),
                    ..Record::default()
                })
                .collect()
        })
    }

    fn arb_column_order() -> impl Strategy<Value = ColumnOrder> {
        prop_oneof![
            Just(ColumnOrder::Observed),
            Just(ColumnOrder::fixed(["Submitted", "In Progress", "Resolved", "Escalated"])),
            Just(ColumnOrder::preferred(["Resolved", "Escalated"])),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_crosstab_shape_and_column_sums(records in arb_records(), order in arb_column_order()) {
            let t = table(records);
            let ct = cross_tab(&t, Column::State, Column::Status, &order, RowOrder::TotalDescending)
                .unwrap();

            let keys: Vec<&String> = ct.matrix.keys().collect();
            let columns: Vec<&String> = ct.columns.iter().collect();
            prop_assert_eq!(keys, columns);

            for column in &ct.columns {
                let counts = &ct.matrix[column];
                prop_assert_eq!(counts.len(), ct.rows.len());
                let expected = t
                    .records()
                    .iter()
                    .filter(|r| r.state.is_some() && r.status.as_deref() == Some(column.as_str()))
                    .count();
                prop_assert_eq!(counts.iter().sum::<usize>(), expected);
            }
        }

        #[test]
        fn prop_rows_ranked_by_total_then_first_seen(records in arb_records(), order in arb_column_order()) {
            let t = table(records);
            let ct = cross_tab(&t, Column::State, Column::Status, &order, RowOrder::TotalDescending)
                .unwrap();

            let mut first_seen: IndexSet<&str> = IndexSet::new();
            for r in t.records() {
                if let (Some(state), Some(_)) = (r.state.as_deref(), r.status.as_deref()) {
                    first_seen.insert(state);
                }
            }
            prop_assert_eq!(ct.rows.len(), first_seen.len());

            for i in 1..ct.rows.len() {
                let (prev, cur) = (ct.row_total(i - 1), ct.row_total(i));
                prop_assert!(prev >= cur, "rows {} and {} out of order", i - 1, i);
                if prev == cur {
                    let a = first_seen.get_index_of(ct.rows[i - 1].as_str());
                    let b = first_seen.get_index_of(ct.rows[i].as_str());
                    prop_assert!(a < b, "tie between {} and {} not stable", ct.rows[i - 1], ct.rows[i]);
                }
            }
        }
    }
}
