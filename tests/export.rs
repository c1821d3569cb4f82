use fin_optimizer::DEFAULT_CONFIG_PATH;
use fin_optimizer::config::load_design;
use fin_optimizer::design::{
    Evaluation, FinDesignProblem, FinDesignReport, OptimizationOutcome, minimum_margin,
    sweep_stability,
};
use fin_optimizer::export::{report, sweep, writer_for_path};

fn problem() -> FinDesignProblem {
    let config = load_design(DEFAULT_CONFIG_PATH).expect("default config");
    FinDesignProblem::from_config(&config).expect("problem")
}

fn sample_report(problem: &FinDesignProblem) -> FinDesignReport {
    let design = match problem.evaluate(1.0, 0.5, 0.3) {
        Evaluation::Feasible(design) => design,
        Evaluation::Infeasible(reason) => panic!("reference geometry infeasible: {reason}"),
    };
    let samples = sweep_stability(problem, &design.geometry);
    FinDesignReport {
        vehicle_name: problem.vehicle.name.clone(),
        material_name: problem.material.name.clone(),
        outcome: OptimizationOutcome {
            best_geometry: design.geometry,
            best_objective: design.mass_kg,
            evaluations: 90,
            generations: 1,
            converged: true,
            message: "Optimization terminated successfully.",
        },
        design,
        min_margin_cal: minimum_margin(&samples).expect("non-empty sweep"),
        sweep: samples,
    }
}

#[test]
fn sweep_csv_reads_back_one_row_per_mach() {
    let problem = problem();
    let fins = problem.vehicle.fins(1.0, 0.5, 0.3);
    let samples = sweep_stability(&problem, &fins);

    let mut buffer = Vec::new();
    sweep::write_csv(&mut buffer, &samples).expect("write csv");

    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        ["mach", "regime", "margin_cal", "centre_of_pressure_m"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
    assert_eq!(rows.len(), samples.len());
    assert_eq!(&rows[0][1], "subsonic");
    assert_eq!(&rows[rows.len() - 1][1], "supersonic");
    for (row, sample) in rows.iter().zip(&samples) {
        let mach: f64 = row[0].parse().expect("mach");
        let margin: f64 = row[2].parse().expect("margin");
        assert!((mach - sample.mach).abs() < 1e-6);
        assert!((margin - sample.margin_cal).abs() < 1e-6);
        assert_eq!(&row[1], sample.regime.label());
    }
}

#[test]
fn json_report_carries_design_and_sweep() {
    let problem = problem();
    let report = sample_report(&problem);

    let mut buffer = Vec::new();
    report::write_json(&mut buffer, &report).expect("write json");
    let value: serde_json::Value = serde_json::from_slice(&buffer).expect("valid json");

    assert_eq!(value["vehicle"], "Panthera");
    assert_eq!(value["material"], "Aluminium 6061-T6");
    assert_eq!(value["status"], "Optimization terminated successfully.");
    assert_eq!(value["converged"], true);
    assert_eq!(value["evaluations"], 90);
    assert_eq!(value["chord_root_m"].as_f64(), Some(1.0));
    assert_eq!(value["span_m"].as_f64(), Some(0.3));

    let mass = value["mass_kg"].as_f64().expect("mass");
    assert!((mass - report.design.mass_kg).abs() < 1e-9);
    let thickness = value["thickness_mm"].as_f64().expect("thickness");
    assert!((thickness - report.design.thickness_m * 1000.0).abs() < 1e-9);
    let force = value["peak_fin_force_kn"].as_f64().expect("force");
    assert!((force - report.design.peak_fin_force_n / 1000.0).abs() < 1e-9);

    let sweep = value["sweep"].as_array().expect("sweep array");
    assert_eq!(sweep.len(), 30);
    assert_eq!(sweep[0]["regime"], "subsonic");
    assert!(
        value["generated_at"]
            .as_str()
            .is_some_and(|stamp| stamp.contains('T'))
    );
}

#[test]
fn writer_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("sweep.csv");

    let problem = problem();
    let fins = problem.vehicle.fins(1.0, 0.5, 0.3);
    let samples = sweep_stability(&problem, &fins);
    {
        let mut writer = writer_for_path(&path).expect("writer");
        sweep::write_csv(&mut *writer, &samples).expect("write csv");
    }

    let contents = std::fs::read_to_string(&path).expect("read back");
    assert_eq!(contents.lines().count(), samples.len() + 1);
}
