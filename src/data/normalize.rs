use super::model::{CellValue, Dataset, RawRecord};

// ---------------------------------------------------------------------------
// Row normalization: raw decoded records → canonical Dataset
// ---------------------------------------------------------------------------

/// Build a [`Dataset`] from decoded records.
///
/// Records whose every value is blank are dropped (padding rows from the
/// source file); the relative order of survivors is preserved. Canonical
/// column order is the key order of the first surviving record. A record
/// missing a column gets an `Empty` fill for it; the decoders already
/// guarantee the full column set, so this is a backstop, not a repair pass.
///
/// A zero-length input (or one that is all padding) yields an empty
/// Dataset; the caller decides how to report "no data".
pub fn normalize(file_name: &str, records: Vec<RawRecord>) -> Dataset {
    let survivors: Vec<RawRecord> = records
        .into_iter()
        .filter(|rec| rec.iter().any(|(_, v)| !v.is_empty()))
        .collect();

    let columns: Vec<String> = survivors
        .first()
        .map(|rec| rec.iter().map(|(name, _)| name.clone()).collect())
        .unwrap_or_default();

    let rows: Vec<Vec<CellValue>> = survivors
        .into_iter()
        .map(|mut rec| {
            columns
                .iter()
                .map(|col| {
                    rec.iter_mut()
                        .find(|(name, _)| name == col)
                        .map(|(_, v)| std::mem::replace(v, CellValue::Empty))
                        .unwrap_or(CellValue::Empty)
                })
                .collect()
        })
        .collect();

    Dataset {
        file_name: file_name.to_string(),
        columns,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    fn i(v: i64) -> CellValue {
        CellValue::Integer(v)
    }

    #[test]
    fn drops_blank_rows_and_fixes_column_order() {
        let records = vec![
            vec![("name".into(), s("a")), ("qty".into(), i(1))],
            vec![("name".into(), s("b")), ("qty".into(), i(2))],
            vec![("name".into(), s("")), ("qty".into(), s(""))],
        ];

        let ds = normalize("orders.csv", records);
        assert_eq!(ds.columns, vec!["name".to_string(), "qty".to_string()]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows[0], vec![s("a"), i(1)]);
        assert_eq!(ds.rows[1], vec![s("b"), i(2)]);
    }

    #[test]
    fn preserves_relative_order_of_survivors() {
        let records = vec![
            vec![("id".into(), i(1))],
            vec![("id".into(), CellValue::Empty)],
            vec![("id".into(), i(2))],
            vec![("id".into(), i(3))],
        ];

        let ds = normalize("t.csv", records);
        assert_eq!(ds.rows, vec![vec![i(1)], vec![i(2)], vec![i(3)]]);
    }

    #[test]
    fn output_length_counts_rows_with_any_nonempty_value() {
        let records = vec![
            vec![("a".into(), s("")), ("b".into(), CellValue::Bool(false))],
            vec![("a".into(), CellValue::Empty), ("b".into(), s(""))],
        ];

        // `false` is a value, so the first row survives the filter.
        let ds = normalize("t.csv", records);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.rows[0], vec![s(""), CellValue::Bool(false)]);
    }

    #[test]
    fn empty_input_yields_empty_dataset() {
        let ds = normalize("empty.csv", Vec::new());
        assert!(ds.is_empty());
        assert!(ds.columns.is_empty());
        assert_eq!(ds.file_name, "empty.csv");
    }

    #[test]
    fn fills_missing_columns_with_empty() {
        let records = vec![
            vec![("name".into(), s("a")), ("qty".into(), i(1))],
            vec![("name".into(), s("b"))],
        ];

        let ds = normalize("t.csv", records);
        assert_eq!(ds.rows[1], vec![s("b"), CellValue::Empty]);
    }

    #[test]
    fn normalizing_a_normalized_dataset_is_identity() {
        let records = vec![
            vec![("name".into(), s("a")), ("qty".into(), i(1))],
            vec![("name".into(), s("")), ("qty".into(), s(""))],
            vec![("name".into(), s("b")), ("qty".into(), i(2))],
        ];

        let first = normalize("t.csv", records);
        let refed: Vec<RawRecord> = first
            .rows
            .iter()
            .map(|row| {
                first
                    .columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect();
        let second = normalize("t.csv", refed);

        assert_eq!(first, second);
    }
}
