use super::model::{AugmentedRow, Dataset, RowPrediction};

// ---------------------------------------------------------------------------
// Merge: align predictions back onto their source rows
// ---------------------------------------------------------------------------

/// Pair each dataset row with its prediction by position.
///
/// Pure: the dataset is only read, so prediction can be re-run with a
/// different config without reloading the file. The client guarantees
/// exactly one prediction per row, so the output length always equals the
/// dataset length.
pub fn merge(dataset: &Dataset, predictions: &[RowPrediction]) -> Vec<AugmentedRow> {
    debug_assert_eq!(dataset.len(), predictions.len());

    dataset
        .rows
        .iter()
        .zip(predictions)
        .map(|(values, prediction)| AugmentedRow {
            values: values.clone(),
            prediction: prediction.value,
            provenance: prediction.provenance,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Provenance};

    fn dataset() -> Dataset {
        Dataset {
            file_name: "orders.csv".to_string(),
            columns: vec!["name".to_string(), "qty".to_string()],
            rows: vec![
                vec![
                    CellValue::String("a".to_string()),
                    CellValue::Integer(1),
                ],
                vec![
                    CellValue::String("b".to_string()),
                    CellValue::Integer(2),
                ],
            ],
        }
    }

    #[test]
    fn preserves_original_fields_exactly() {
        let ds = dataset();
        let predictions = vec![
            RowPrediction {
                value: 10.0,
                provenance: Provenance::Service,
            },
            RowPrediction {
                value: 20.0,
                provenance: Provenance::Synthesized,
            },
        ];

        let merged = merge(&ds, &predictions);
        assert_eq!(merged.len(), ds.len());
        for (row, original) in merged.iter().zip(&ds.rows) {
            assert_eq!(&row.values, original);
        }
        assert_eq!(merged[0].prediction, 10.0);
        assert_eq!(merged[0].provenance, Provenance::Service);
        assert_eq!(merged[1].prediction, 20.0);
        assert_eq!(merged[1].provenance, Provenance::Synthesized);
    }

    #[test]
    fn leaves_dataset_untouched() {
        let ds = dataset();
        let before = ds.clone();
        let predictions = vec![
            RowPrediction {
                value: 1.0,
                provenance: Provenance::Service,
            },
            RowPrediction {
                value: 2.0,
                provenance: Provenance::Service,
            },
        ];

        let _ = merge(&ds, &predictions);
        assert_eq!(ds, before);
    }
}
