use crate::ccd_impl::CcdOutcome;
use crate::io::write_summary;
use crate::system::CcdSystem;
use tracing::{info, warn};

pub fn report_system(system: &CcdSystem) {
    info!("\nSingle-particle energies:");
    for (p, energy) in system.sp_energies().iter().enumerate() {
        let kind = if p < system.n_fermi() { "hole" } else { "particle" };
        info!("  State {:>3} ({:>8}): {:.8}", p, kind, energy);
    }
}

pub fn report_outcome(outcome: &CcdOutcome, reference_energy: Option<f64>) {
    let mut summary = Vec::new();
    if let Err(err) = write_summary(&mut summary, outcome, reference_energy) {
        warn!("Could not format CCD summary: {}", err);
        return;
    }

    info!("\n===========================================");
    info!("        CCD Results Summary");
    info!("===========================================");
    for line in String::from_utf8_lossy(&summary).lines() {
        info!("{}", line);
    }
    info!("===========================================\n");
}
