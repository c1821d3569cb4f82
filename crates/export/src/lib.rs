//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod sweep {
    use std::io::{self, Write};

    use fin_design::StabilitySample;

    const HEADER: &str = "mach,regime,margin_cal,centre_of_pressure_m";

    /// Write the sweep as CSV, one row per Mach sample.
    pub fn write_csv(writer: &mut dyn Write, samples: &[StabilitySample]) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)?;
        for sample in samples {
            writeln!(
                writer,
                "{:.6},{},{:.6},{:.6}",
                sample.mach,
                sample.regime.label(),
                sample.margin_cal,
                sample.centre_of_pressure_m,
            )?;
        }
        writer.flush()
    }
}

pub mod report {
    use std::io::Write;

    use chrono::Utc;
    use fin_core::units::{m_to_mm, n_to_kn};
    use fin_design::FinDesignReport;
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use crate::ExportError;

    #[derive(Debug, Clone, Serialize)]
    pub struct SweepRow {
        pub mach: f64,
        pub regime: &'static str,
        pub margin_cal: f64,
    }

    /// JSON envelope of an optimized finset.
    #[derive(Debug, Clone, Serialize)]
    pub struct DesignSummary {
        pub generated_at: String,
        pub vehicle: String,
        pub material: String,
        pub status: &'static str,
        pub converged: bool,
        pub evaluations: usize,
        pub generations: usize,
        pub chord_root_m: f64,
        pub chord_tip_m: f64,
        pub span_m: f64,
        pub mass_kg: f64,
        pub thickness_mm: f64,
        pub peak_fin_force_kn: f64,
        pub min_margin_cal: f64,
        pub sweep: Vec<SweepRow>,
    }

    impl DesignSummary {
        pub fn from_report(report: &FinDesignReport) -> Self {
            let geometry = &report.design.geometry;
            Self {
                generated_at: Utc::now().to_rfc3339(),
                vehicle: report.vehicle_name.clone(),
                material: report.material_name.clone(),
                status: report.outcome.message,
                converged: report.outcome.converged,
                evaluations: report.outcome.evaluations,
                generations: report.outcome.generations,
                chord_root_m: geometry.chord_root_m,
                chord_tip_m: geometry.chord_tip_m,
                span_m: geometry.span_m,
                mass_kg: report.design.mass_kg,
                thickness_mm: m_to_mm(report.design.thickness_m),
                peak_fin_force_kn: n_to_kn(report.design.peak_fin_force_n),
                min_margin_cal: report.min_margin_cal,
                sweep: report
                    .sweep
                    .iter()
                    .map(|s| SweepRow {
                        mach: s.mach,
                        regime: s.regime.label(),
                        margin_cal: s.margin_cal,
                    })
                    .collect(),
            }
        }
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_json(writer: &mut dyn Write, report: &FinDesignReport) -> Result<(), ExportError> {
        to_writer_pretty(&mut *writer, &DesignSummary::from_report(report))?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
