use std::process::Command;

#[derive(Debug)]
struct Totals {
    total_tons: f64,
    risk: f64,
    saved_kwh: f64,
    regressions: f64,
}

#[test]
fn scenario_files_run_via_cli_and_produce_distinct_totals() {
    let demo = run_and_parse_totals(&["run", "--scenario", "scenarios/demo.toml"]);
    let campus = run_and_parse_totals(&["run", "--scenario", "scenarios/campus.toml"]);
    let high_price = run_and_parse_totals(&["run", "--scenario", "scenarios/high_price.toml"]);

    assert!(
        (demo.total_tons - 1435.0).abs() < 0.01,
        "expected demo emissions of 1435 t, got {:.3}",
        demo.total_tons
    );
    assert!(
        (demo.saved_kwh - 121_600.0).abs() < 0.01,
        "expected demo savings of 121600 kWh, got {:.3}",
        demo.saved_kwh
    );
    assert!(
        campus.total_tons > demo.total_tons,
        "expected campus emissions above demo: campus={:.3}, demo={:.3}",
        campus.total_tons,
        demo.total_tons
    );
    assert_eq!(campus.regressions, 1.0);
    assert!(
        high_price.risk > demo.risk,
        "expected high_price risk above demo: high_price={:.3}, demo={:.3}",
        high_price.risk,
        demo.risk
    );
}

#[test]
fn preset_and_scenario_file_agree() {
    let preset = run_and_parse_totals(&["run", "--preset", "campus"]);
    let file = run_and_parse_totals(&["run", "--scenario", "scenarios/campus.toml"]);
    assert_eq!(preset.total_tons, file.total_tons);
    assert_eq!(preset.saved_kwh, file.saved_kwh);
}

#[test]
fn facility_filter_runs_one_facility() {
    let output = run(&["run", "--preset", "campus", "--facility", "lab"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    assert!(stdout.contains("(lab)"));
    assert!(!stdout.contains("(library)"));
    assert_eq!(parse_metric(&stdout, "Facilities:", ""), 1.0);
}

#[test]
fn unknown_preset_fails() {
    let output = run(&["run", "--preset", "nope"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown preset"), "stderr: {stderr}");
}

#[test]
fn invalid_scenario_reports_every_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.toml");
    std::fs::write(
        &path,
        r#"
[[facility]]
id = "x"
electricity_kwh = -1.0
gas_m3 = 0.0
floor_area_m2 = 0.0
delta_t_c = 0.0
sensitivity_per_c = 0.0
beta = 0.0
water_baseline_m3 = 0.0
water_actual_m3 = 0.0
pump_kwh_per_m3 = 0.0
"#,
    )
    .expect("write scenario");

    let output = run(&["run", "--scenario", path.to_str().expect("utf-8 path")]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("facility[0].electricity_kwh"), "stderr: {stderr}");
    assert!(stderr.contains("facility[0].floor_area_m2"), "stderr: {stderr}");
}

#[test]
fn run_writes_exports_and_audit_log() {
    let dir = tempfile::tempdir().expect("tempdir");
    let json = dir.path().join("out.json");
    let csv = dir.path().join("out.csv");
    let log = dir.path().join("audit.jsonl");

    for _ in 0..2 {
        let output = run(&[
            "run",
            "--preset",
            "campus",
            "--json-out",
            json.to_str().expect("utf-8 path"),
            "--csv-out",
            csv.to_str().expect("utf-8 path"),
            "--audit-log",
            log.to_str().expect("utf-8 path"),
        ]);
        assert!(
            output.status.success(),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    assert!(json.exists());
    let csv_text = std::fs::read_to_string(&csv).expect("csv readable");
    assert_eq!(csv_text.lines().count(), 5);
    let log_text = std::fs::read_to_string(&log).expect("log readable");
    assert_eq!(log_text.lines().count(), 6);

    let output = run(&["audit", "--log", log.to_str().expect("utf-8 path"), "--facility", "dorm"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 2);
}

#[test]
fn presets_are_listed() {
    let output = run(&["presets"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let names: Vec<&str> = stdout.lines().collect();
    assert_eq!(names, ["demo", "campus"]);
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_biolot"))
        .args(args)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("biolot process should run")
}

fn run_and_parse_totals(args: &[&str]) -> Totals {
    let output = run(args);

    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={} ",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    parse_totals(&stdout)
}

fn parse_totals(stdout: &str) -> Totals {
    Totals {
        total_tons: parse_metric(stdout, "Total emissions:", "t"),
        risk: parse_metric(stdout, "Carbon risk:", ""),
        saved_kwh: parse_metric(stdout, "Saved energy:", "kWh"),
        regressions: parse_metric(stdout, "Water regressions:", ""),
    }
}

/// Reads the last line starting with `label`, so portfolio totals win over
/// per-facility lines with the same label.
fn parse_metric(stdout: &str, label: &str, unit: &str) -> f64 {
    let line = stdout
        .lines()
        .rev()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing line `{label}` in output: {stdout}"));

    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid format for line `{line}`"));

    let value = raw.strip_suffix(unit).unwrap_or(raw).trim();
    value
        .parse::<f64>()
        .unwrap_or_else(|err| panic!("failed to parse `{value}` from `{line}`: {err}"))
}
