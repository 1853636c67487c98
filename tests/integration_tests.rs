use serde_json::json;
use sift_lang::{
    FilterError, FilterOptions, Predicate, Value, compile, compile_filter, compile_filter_with,
    compile_selection, parse_str,
};
use std::thread;

fn matches(expr_str: &str, doc: &Value) -> bool {
    compile_filter(expr_str).unwrap().matches(doc)
}

fn json_object(pairs: Vec<(&str, Value)>) -> Value {
    Value::object(pairs)
}

fn run(seed: i64, lr: f64, optimizer: &str, status: &str) -> Value {
    json_object(vec![
        (
            "config",
            json_object(vec![
                ("seed", Value::Integer(seed)),
                ("lr", Value::Float(lr)),
                (
                    "optimizer",
                    json_object(vec![("name", Value::String(optimizer.into()))]),
                ),
            ]),
        ),
        (
            "info",
            json_object(vec![("status", Value::String(status.into()))]),
        ),
    ])
}

fn runs() -> Vec<Value> {
    vec![
        run(0, 0.1, "sgd", "COMPLETE"),
        run(1, 0.01, "adam", "COMPLETE"),
        run(2, 0.01, "adam", "FAILED"),
        run(3, 0.001, "sgd", "RUNNING"),
    ]
}

fn seeds(predicate: &Predicate, records: &[Value]) -> Vec<i64> {
    predicate
        .select(records)
        .map(|r| match r {
            Value::Object(map) => match map.get("config") {
                Some(Value::Object(config)) => match config.get("seed") {
                    Some(Value::Integer(seed)) => *seed,
                    _ => -1,
                },
                _ => -1,
            },
            _ => -1,
        })
        .collect()
}

// ============================================================================
// Filtering collections
// ============================================================================

#[test]
fn test_filter_by_nested_string() {
    let predicate = compile_filter("config.optimizer.name == 'adam'").unwrap();
    assert_eq!(seeds(&predicate, &runs()), vec![1, 2]);
}

#[test]
fn test_filter_with_and() {
    let predicate =
        compile_filter("config.lr <= 0.01 & info.status == 'COMPLETE'").unwrap();
    assert_eq!(seeds(&predicate, &runs()), vec![1]);
}

#[test]
fn test_filter_with_or_and_not() {
    let predicate =
        compile_filter("~info.status == 'COMPLETE' | config.seed in [0]").unwrap();
    assert_eq!(seeds(&predicate, &runs()), vec![0, 2, 3]);
}

#[test]
fn test_filter_with_group() {
    let predicate =
        compile_filter("(config.seed == 0 | config.seed == 3) & config.optimizer.name == 'sgd'")
            .unwrap();
    assert_eq!(seeds(&predicate, &runs()), vec![0, 3]);
}

#[test]
fn test_select_owned_records() {
    let predicate = compile_filter("config.seed > 1").unwrap();
    let selected: Vec<Value> = predicate.select(runs()).collect();
    assert_eq!(selected.len(), 2);
}

// ============================================================================
// JSON documents
// ============================================================================

#[test]
fn test_json_documents() {
    let records = vec![
        json!({"config": {"seed": 1, "dataset": "mnist"}}),
        json!({"config": {"seed": 2, "dataset": "cifar10"}}),
        json!({"config": {"seed": 3}}),
    ];
    let predicate = compile_filter("config.dataset in ['mnist', 'svhn'] | config.seed >= 3").unwrap();
    let selected: Vec<&serde_json::Value> = predicate.select(&records).collect();
    assert_eq!(selected, vec![&records[0], &records[2]]);
}

#[test]
fn test_json_and_native_agree() {
    let doc = json!({"a": {"b": 1.5, "c": [1, 2], "d": null, "e": true}});
    let native = Value::from(doc.clone());
    for query in [
        "a.b == 1.5",
        "a.b > 1",
        "a.c == 1",
        "a.c != 1",
        "a.d == 0",
        "a.d != 0",
        "a.e == TRUE",
        "a.e in [1, true]",
        "a.b.x == 1",
    ] {
        let predicate = compile_filter(query).unwrap();
        assert_eq!(
            predicate.matches(&doc),
            predicate.matches(&native),
            "Disagreement for: {}",
            query
        );
    }
}

// ============================================================================
// Compilation
// ============================================================================

#[test]
fn test_compile_from_ast() {
    let expr = parse_str("x == 1").unwrap();
    let predicate = compile(expr.clone());
    assert_eq!(predicate.expr(), Some(&expr));
    assert!(predicate.matches(&json!({"x": 1})));
}

#[test]
fn test_compile_twice_behaves_identically() {
    let expr = parse_str("a < 3 | ~b in ['x']").unwrap();
    let first = compile(expr.clone());
    let second = compile(expr);
    for doc in [
        json!({}),
        json!({"a": 1}),
        json!({"a": 5, "b": "x"}),
        json!({"a": "1", "b": "y"}),
    ] {
        assert_eq!(first.matches(&doc), second.matches(&doc));
    }
}

#[test]
fn test_predicate_display_is_canonical() {
    let predicate = compile_filter("(a==1)&( b in [1,'x'] )").unwrap();
    assert_eq!(predicate.to_string(), "a == 1 & b in [1, 'x']");
}

#[test]
fn test_errors_surface_through_compile_filter() {
    assert!(matches!(compile_filter("a@1"), Err(FilterError::Lex(_))));
    assert!(matches!(compile_filter("a== =="), Err(FilterError::Parse(_))));
}

#[test]
fn test_searchable_prefixes() {
    let options = FilterOptions::experiment_defaults();
    assert!(compile_filter_with("config.seed == 1", &options).is_ok());
    match compile_filter_with("seed == 1", &options) {
        Err(FilterError::InvalidKey { key, allowed }) => {
            assert_eq!(key, "seed");
            assert_eq!(allowed, vec!["info.", "config."]);
        }
        other => panic!("Expected invalid key, got {:?}", other),
    }
}

#[test]
fn test_max_depth_option() {
    let options = FilterOptions {
        max_depth: 2,
        ..FilterOptions::default()
    };
    assert!(compile_filter_with("a==1 & b==2", &options).is_ok());
    assert!(compile_filter_with("a==1 & b==2 & c==3", &options).is_err());
}

#[test]
fn test_huge_chain_is_a_parse_error() {
    let query = vec!["config.seed==1"; 150_000].join(" & ");
    assert!(matches!(compile_filter(&query), Err(FilterError::Parse(_))));

    let query = vec!["config.seed==1"; 150_000].join("|");
    assert!(matches!(compile_filter(&query), Err(FilterError::Parse(_))));
}

#[test]
fn test_blank_selection_matches_everything() {
    let predicate = compile_selection("   ", &FilterOptions::default()).unwrap();
    assert!(predicate.expr().is_none());
    assert_eq!(predicate.select(runs()).count(), 4);

    let predicate = compile_selection("config.seed == 2", &FilterOptions::default()).unwrap();
    assert_eq!(predicate.select(runs()).count(), 1);

    assert!(compile_filter("   ").is_err());
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_predicate_shared_across_threads() {
    let predicate = compile_filter("config.lr < 0.05").unwrap();
    let handles: Vec<_> = runs()
        .into_iter()
        .map(|record| {
            let predicate = predicate.clone();
            thread::spawn(move || predicate.matches(&record))
        })
        .collect();
    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![false, true, true, true]);
}
