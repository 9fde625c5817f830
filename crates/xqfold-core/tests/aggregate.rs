//! End-to-end aggregate calls through the public function library.

use std::{cell::Cell, rc::Rc};
use xqfold_core::{
    config::Config,
    error::ErrorCode,
    obs::{metrics_report, metrics_reset_all},
    prelude::*,
    types::{DayTimeDuration, YearMonthDuration},
};

fn library() -> FunctionLibrary {
    FunctionLibrary::builtin()
}

fn sum(ctx: &QueryContext, seq: &dyn Sequence) -> Result<Option<Atomic>, QueryError> {
    library().call(ctx, QName::builtin("sum"), &[Some(seq)])
}

fn avg(ctx: &QueryContext, seq: &dyn Sequence) -> Result<Option<Atomic>, QueryError> {
    library().call(ctx, QName::builtin("avg"), &[Some(seq)])
}

#[test]
fn prices_from_document_nodes() {
    let ctx = QueryContext::default();
    let prices: ItemSequence = ["10.25", "4.75", "5"]
        .into_iter()
        .map(|text| Node::element("price", text))
        .collect();

    assert_eq!(sum(&ctx, &prices).unwrap().unwrap().to_string(), "20");
    assert_eq!(avg(&ctx, &prices).unwrap().unwrap().to_string(), "6.666666666666667");
}

#[test]
fn durations_from_lazy_producer() {
    let ctx = QueryContext::default();
    let runs = Rc::new(Cell::new(0));
    let counter = Rc::clone(&runs);
    let seq = LazySequence::new(move || {
        counter.set(counter.get() + 1);
        (1..=4).map(|hours| Ok(Item::from(Atomic::from(DayTimeDuration::from_hours(hours)))))
    });

    assert_eq!(sum(&ctx, &seq).unwrap().unwrap().to_string(), "PT10H");
    assert_eq!(avg(&ctx, &seq).unwrap().unwrap().to_string(), "PT2H30M");
    assert_eq!(runs.get(), 2);
}

#[test]
fn year_month_average_rounds_half_up() {
    let ctx = QueryContext::default();
    let seq: ItemSequence = [1, 2]
        .into_iter()
        .map(|months| Atomic::from(YearMonthDuration::from_months(months)))
        .collect();

    // 3 months / 2 = 1.5 months
    assert_eq!(avg(&ctx, &seq).unwrap().unwrap().to_string(), "P2M");
}

#[test]
fn sum_with_default_through_library() {
    let ctx = QueryContext::default();
    let empty = ItemSequence::empty();
    let zero = Atomic::from(YearMonthDuration::from_months(0));

    let result = library().call(&ctx, QName::builtin("sum"), &[Some(&empty), Some(&zero)]);
    assert_eq!(result.unwrap().unwrap().to_string(), "P0M");
}

#[test]
fn mixing_domains_reports_standard_code() {
    let ctx = QueryContext::default();
    let seq: ItemSequence = [
        Atomic::from(YearMonthDuration::from_years(1)),
        Atomic::from(DayTimeDuration::from_days(1)),
    ]
    .into_iter()
    .collect();

    let err = sum(&ctx, &seq).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidArgumentType);
    assert!(err.to_string().starts_with("FORG0006: "), "{err}");
}

#[test]
fn config_scale_applies_to_integer_average() {
    let config = Config::from_toml_str(
        r"
[arithmetic]
decimal_scale = 4

[metrics]
enabled = true
",
    )
    .expect("config parses");
    let ctx = QueryContext::new(config);
    let seq: ItemSequence = [1, 1, 2].into_iter().map(Atomic::int).collect();

    assert_eq!(avg(&ctx, &seq).unwrap().unwrap().to_string(), "1.3333");
}

#[test]
fn config_loads_from_file() {
    let path = std::env::temp_dir().join(format!("xqfold-config-{}.toml", std::process::id()));
    std::fs::write(&path, "[arithmetic]\ndecimal_scale = 6\n").expect("write config");

    let config = Config::load(&path);
    std::fs::remove_file(&path).ok();

    assert_eq!(config.expect("config loads").arithmetic.decimal_scale, 6);
}

#[test]
fn global_metrics_accumulate_per_domain() {
    metrics_reset_all();
    let ctx = QueryContext::default();

    let numbers: ItemSequence = [1, 2, 3].into_iter().map(Atomic::int).collect();
    let bad: ItemSequence = [Atomic::string("x")].into_iter().collect();

    sum(&ctx, &numbers).unwrap();
    avg(&ctx, &numbers).unwrap();
    avg(&ctx, &ItemSequence::empty()).unwrap();
    sum(&ctx, &bad).unwrap_err();

    let report = metrics_report();
    assert_eq!(report.ops.sum_calls, 2);
    assert_eq!(report.ops.avg_calls, 2);
    assert_eq!(report.ops.empty_inputs, 1);
    assert_eq!(report.ops.items_folded, 6);
    assert_eq!(report.ops.errors, 1);
    assert_eq!(report.ops.invalid_argument_errors, 1);

    let numeric = &report.domains["xs:numeric"];
    assert_eq!((numeric.calls, numeric.items), (2, 6));
}
