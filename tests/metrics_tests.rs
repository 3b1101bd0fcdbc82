use scriptcloak::metrics::Metrics;

#[test]
fn counters_increment() {
    let metrics = Metrics::new();
    metrics.batches_total.inc();
    metrics.files_obfuscated.inc_by(3);
    assert_eq!(metrics.batches_total.get(), 1);
    assert_eq!(metrics.files_obfuscated.get(), 3);
}

#[test]
fn render_exposes_registered_counters() {
    let metrics = Metrics::new();
    metrics.files_skipped.inc();
    let text = metrics.render().unwrap();
    assert!(text.contains("files_skipped_total 1"));
    assert!(text.contains("batches_total 0"));
}
