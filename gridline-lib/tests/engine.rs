use std::cmp::Ordering;

use gridline_lib::column::Column;
use gridline_lib::engine::{Direction, SelectionSet, SortState, filter, paginate, sort};
use gridline_lib::engine::sort::compare_values;
use gridline_lib::model::{Record, RowKey, TableRow, Value};

/// Deterministic pseudo-random dataset with ties, nulls and mixed case.
fn dataset(n: i64) -> Vec<Record> {
    const NAMES: [&str; 6] = ["alpha", "Alpha", "beta", "Gamma", "delta", "beta"];
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    (0..n)
        .map(|i| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let pick = (seed >> 33) as usize;
            let score = match pick % 7 {
                0 => Value::Null,
                1 => Value::Float((pick % 5) as f64 + 0.5),
                _ => Value::Int((pick % 5) as i64),
            };
            Record::new(i)
                .set("name", NAMES[pick % NAMES.len()])
                .set("score", score)
        })
        .collect()
}

fn columns() -> Vec<Column<Record>> {
    vec![Column::new("name", "Name"), Column::new("score", "Score")]
}

fn keys(rows: &[&Record]) -> Vec<RowKey> {
    rows.iter().map(|row| row.key()).collect()
}

fn field(row: &Record, name: &str) -> Value {
    row.get(name).cloned().unwrap_or_default()
}

#[test]
fn test_sorted_rows_are_ordered_and_stable() {
    let rows = dataset(200);
    let columns = columns();

    for column in ["name", "score"] {
        for state in [SortState::asc(column), SortState::desc(column)] {
            let sorted = sort(rows.iter().collect(), &columns, &state);
            assert_eq!(sorted.len(), rows.len());

            for pair in sorted.windows(2) {
                let (a, b) = (field(pair[0], column), field(pair[1], column));
                let ordering = match state.direction() {
                    Some(Direction::Desc) => compare_values(&b, &a),
                    _ => compare_values(&a, &b),
                };
                assert_ne!(ordering, Ordering::Greater, "{state:?}: {a:?} before {b:?}");
                if ordering == Ordering::Equal {
                    assert!(pair[0].key() < pair[1].key(), "ties keep input order");
                }
            }
        }
    }
}

/// Column mixing every value type, including numeric-looking text and NaN.
fn mixed_values(seed: u64, len: usize) -> Vec<Value> {
    let mut state = seed | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let n = (state >> 40) as i64 % 40;
            match state % 9 {
                0 => Value::Int(n),
                1 => Value::Float(n as f64 / 4.0),
                2 => Value::from(n.to_string()),
                3 => Value::from(format!("{}z", n)),
                4 => Value::Float(f64::NAN),
                5 => Value::Null,
                6 => Value::Bool(n % 2 == 0),
                7 => Value::from(serde_json::json!([n])),
                _ => Value::from(chrono::DateTime::from_timestamp(n * 3600, 0).unwrap_or_default()),
            }
        })
        .collect()
}

#[test]
fn test_mixed_type_columns_sort_without_panicking() {
    let columns = vec![Column::new("v", "Value")];

    for seed in 1..=150u64 {
        let size = 20 + (seed as usize * 7) % 200;
        let rows: Vec<Record> = mixed_values(seed, size)
            .into_iter()
            .enumerate()
            .map(|(i, v)| Record::new(i as i64).set("v", v))
            .collect();

        for state in [SortState::asc("v"), SortState::desc("v")] {
            let sorted = sort(rows.iter().collect(), &columns, &state);
            assert_eq!(sorted.len(), rows.len());
            for pair in sorted.windows(2) {
                let (a, b) = (field(pair[0], "v"), field(pair[1], "v"));
                let ordering = match state.direction() {
                    Some(Direction::Desc) => compare_values(&b, &a),
                    _ => compare_values(&a, &b),
                };
                assert_ne!(ordering, Ordering::Greater, "seed {seed}: {a:?} before {b:?}");
                if ordering == Ordering::Equal {
                    assert!(pair[0].key() < pair[1].key(), "ties keep input order");
                }
            }
        }
    }
}

#[test]
fn test_value_comparison_is_transitive() {
    let values = mixed_values(0x9e37_79b9, 60);
    for a in &values {
        assert_eq!(compare_values(a, a), Ordering::Equal, "{a:?} equals itself");
        for b in &values {
            assert_eq!(compare_values(a, b), compare_values(b, a).reverse());
            for c in &values {
                if compare_values(a, b) != Ordering::Greater
                    && compare_values(b, c) != Ordering::Greater
                {
                    assert_ne!(
                        compare_values(a, c),
                        Ordering::Greater,
                        "{a:?} <= {b:?} <= {c:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_nulls_sort_last_ascending_and_first_descending() {
    let rows = dataset(100);
    let columns = columns();
    let nulls = rows.iter().filter(|r| field(r, "score").is_null()).count();
    assert!(nulls > 0);

    let asc = sort(rows.iter().collect(), &columns, &SortState::asc("score"));
    assert!(asc[asc.len() - nulls..].iter().all(|r| field(r, "score").is_null()));

    let desc = sort(rows.iter().collect(), &columns, &SortState::desc("score"));
    assert!(desc[..nulls].iter().all(|r| field(r, "score").is_null()));
}

#[test]
fn test_unsorted_keeps_input_order() {
    let rows = dataset(50);
    let sorted = sort(rows.iter().collect(), &columns(), &SortState::Unsorted);
    assert_eq!(keys(&sorted), rows.iter().map(|r| r.key()).collect::<Vec<_>>());
}

#[test]
fn test_filter_keeps_matching_rows_in_order() {
    let rows = dataset(200);
    let columns = columns();

    for term in ["ALPHA", "ta", "4", "2.5", "zzz", ""] {
        let kept = filter(rows.iter().collect(), &columns, term);
        let needle = term.to_lowercase();
        let expected: Vec<&Record> = rows
            .iter()
            .filter(|row| {
                ["name", "score"].iter().any(|name| {
                    field(row, name)
                        .search_text()
                        .is_some_and(|text| text.contains(&needle))
                })
            })
            .collect();
        assert_eq!(keys(&kept), keys(&expected), "term {term:?}");

        let again = filter(kept.clone(), &columns, term);
        assert_eq!(keys(&again), keys(&kept), "filtering is idempotent");
    }
}

#[test]
fn test_unsearchable_columns_are_skipped() {
    let rows = dataset(50);
    let columns = vec![
        Column::new("name", "Name").searchable(false),
        Column::new("score", "Score"),
    ];
    assert!(filter(rows.iter().collect(), &columns, "alpha").is_empty());
}

#[test]
fn test_pages_partition_the_rows() {
    let rows = dataset(47);
    for page_size in [1, 5, 10, 47, 100] {
        let first = paginate(&rows, page_size, 1);
        let mut seen = Vec::new();
        for page in 1..=first.total_pages {
            let window = paginate(&rows, page_size, page);
            assert_eq!(window.page, page);
            assert!(window.rows.len() <= page_size);
            assert!(!window.rows.is_empty());
            seen.extend(window.rows.iter().map(|r| r.key()));
        }
        assert_eq!(seen, rows.iter().map(|r| r.key()).collect::<Vec<_>>());
    }
}

#[test]
fn test_toggle_all_round_trip_leaves_other_keys() {
    let mut selection: SelectionSet<RowKey> = [RowKey::Int(100), RowKey::Int(3)].into_iter().collect();
    let page: Vec<RowKey> = (0..10).map(RowKey::Int).collect();

    selection.toggle_all(&page, true);
    assert!(selection.all_selected(&page));
    selection.toggle_all(&page, false);

    assert_eq!(selection.to_vec(), vec![RowKey::Int(100)]);
    assert!(!selection.some_selected(&page));
}
