use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::DateTime;
use rstest::{fixture, rstest};
use tabula_api::{convert, ConvertError, DriverValue, ErrorKind, Nullable, Row, Value, ValueConverter};
use tabula_engine::binder::{Binder, NamedValue};
use tabula_engine::config::BindingConfig;
use tabula_engine::error::EngineError;

#[fixture]
fn binder() -> Binder {
    Binder::new(BindingConfig::default())
}

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[rstest]
fn binds_mixed_parameters(binder: Binder) {
    let ts = DateTime::parse_from_rfc3339("2023-11-05T08:00:00-03:00").unwrap();
    let params = vec![
        NamedValue::positional(1, 7u16),
        NamedValue::positional(2, "abc"),
        NamedValue::positional(3, None::<i64>),
        NamedValue::positional(4, ts),
        NamedValue::positional(5, Value::Float(0.5)),
        NamedValue::positional(6, DriverValue::Nil),
    ];
    let bound = binder.bind(params).unwrap();
    assert_eq!(
        bound,
        vec![
            Value::Integer(7),
            Value::Text("abc".to_string()),
            Value::Null,
            Value::Timestamp(ts),
            Value::Float(0.5),
            Value::Null,
        ]
    );
}

#[rstest]
fn overflow_names_the_parameter(binder: Binder) {
    let params = vec![
        NamedValue::positional(1, 1u64),
        NamedValue::positional(2, u64::MAX),
    ];
    let err = binder.bind(params).unwrap_err();
    let EngineError::Convert(inner) = &err else {
        panic!("expected conversion error, got {err:?}");
    };
    assert_eq!(inner.kind(), ErrorKind::Overflow);
    assert_eq!(
        err.to_string(),
        "parameter $2: u64 values with high bit set are not supported"
    );
}

#[rstest]
fn unsupported_names_the_named_parameter(binder: Binder) {
    let params = vec![NamedValue::named("payload", 1, vec![1u8, 2, 3])];
    let err = binder.bind(params).unwrap_err();
    assert_eq!(err.to_string(), "parameter :payload: unsupported type: bytes");
}

#[rstest]
#[case::exact(2, 2, true)]
#[case::too_few(3, 2, false)]
#[case::too_many(1, 2, false)]
fn strict_arity(binder: Binder, #[case] expected: usize, #[case] given: usize, #[case] ok: bool) {
    let params = (1..=given).map(|i| NamedValue::positional(i, i as i64)).collect();
    let result = binder.bind_exact(expected, params);
    if ok {
        assert_eq!(result.unwrap().len(), given);
    } else {
        assert!(
            matches!(result, Err(EngineError::Arity { expected: e, got: g }) if e == expected && g == given)
        );
    }
}

#[test]
fn lenient_arity_binds_anything() {
    let binder = Binder::new(BindingConfig {
        strict_arity: false,
        ..BindingConfig::default()
    });
    let bound = binder
        .bind_exact(5, vec![NamedValue::positional(1, true)])
        .unwrap();
    assert_eq!(bound, vec![Value::Boolean(true)]);
}

#[test]
fn max_params_is_enforced() {
    let binder = Binder::new(BindingConfig {
        max_params: 2,
        ..BindingConfig::default()
    });
    let params = (1..=3).map(|i| NamedValue::positional(i, 0i8)).collect();
    let err = binder.bind(params).unwrap_err();
    assert!(matches!(err, EngineError::TooManyParams { max: 2, got: 3 }));
}

#[rstest]
fn converts_result_row(binder: Binder) {
    let row = binder
        .convert_row(
            &columns(&["id", "name", "flag", "initial"]),
            vec![
                DriverValue::I64(10),
                DriverValue::NullString(Nullable::null()),
                DriverValue::NullBool(Nullable::new(false)),
                DriverValue::NullByte(Nullable::new(b'Z')),
            ],
        )
        .unwrap();
    assert_eq!(
        row,
        Row(vec![
            Value::Integer(10),
            Value::Null,
            Value::Boolean(false),
            Value::Text("Z".to_string()),
        ])
    );
}

#[rstest]
fn row_error_names_the_column(binder: Binder) {
    let err = binder
        .convert_row(
            &columns(&["a", "tags"]),
            vec![DriverValue::I8(1), DriverValue::List(vec![])],
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "column 'tags': unsupported type: list");
}

#[rstest]
fn row_width_must_match(binder: Binder) {
    let err = binder
        .convert_row(&columns(&["a", "b"]), vec![DriverValue::Nil])
        .unwrap_err();
    assert!(matches!(err, EngineError::ColumnCount { expected: 2, got: 1 }));
}

struct CountingConverter {
    calls: AtomicUsize,
}

impl ValueConverter for CountingConverter {
    fn convert_value(&self, value: DriverValue) -> Result<Value, ConvertError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        convert(value)
    }
}

#[test]
fn custom_converter_is_used() {
    let conv = Arc::new(CountingConverter {
        calls: AtomicUsize::new(0),
    });
    let binder = Binder::with_converter(BindingConfig::default(), conv.clone());
    binder
        .bind(vec![
            NamedValue::positional(1, 1i32),
            NamedValue::positional(2, 2i32),
        ])
        .unwrap();
    binder
        .convert_row(&columns(&["x"]), vec![DriverValue::F32(1.5)])
        .unwrap();
    assert_eq!(conv.calls.load(Ordering::Relaxed), 3);
}

#[test]
fn binder_is_shareable_across_threads() {
    let binder = Arc::new(Binder::new(BindingConfig::default()));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let binder = Arc::clone(&binder);
            std::thread::spawn(move || binder.bind(vec![NamedValue::positional(1, i as u32)]))
        })
        .collect();
    for (i, h) in handles.into_iter().enumerate() {
        assert_eq!(h.join().unwrap().unwrap(), vec![Value::Integer(i as i64)]);
    }
}
