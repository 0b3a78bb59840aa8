use crate::algorithms::{Algorithm, SearchResult};
use std::fmt;
use std::time::Duration;

/// Summary of one finished search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    pub algorithm: Algorithm,
    pub result: SearchResult,
    pub checked: usize,
    pub elapsed: Duration,
}

impl SearchReport {
    /// Moves on the found route.
    pub fn hops(&self) -> Option<usize> {
        self.result.hops()
    }

    /// Route length relative to the shortest possible one; 1.0 is optimal.
    pub fn route_efficiency(&self, optimal_hops: usize) -> Option<f64> {
        match self.hops() {
            Some(hops) if optimal_hops > 0 => Some(hops as f64 / optimal_hops as f64),
            _ => None,
        }
    }
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Algorithm: {}", self.algorithm)?;
        writeln!(f, "Outcome: {}", self.result.label())?;
        if let Some(hops) = self.hops() {
            writeln!(f, "Path length: {}", hops)?;
        }
        writeln!(f, "Cells checked: {}", self.checked)?;
        writeln!(f, "Elapsed: {:.2?}", self.elapsed)?;
        Ok(())
    }
}

/// Side-by-side table of several runs on the same layout.
pub struct Comparison<'a> {
    pub reports: &'a [SearchReport],
    pub optimal_hops: Option<usize>,
}

impl Comparison<'_> {
    /// Fewest checked cells among runs that found a route.
    pub fn most_focused(&self) -> Option<&SearchReport> {
        self.reports
            .iter()
            .filter(|r| r.hops().is_some())
            .min_by_key(|r| r.checked)
    }
}

impl fmt::Display for Comparison<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== ALGORITHM COMPARISON RESULTS ===")?;
        writeln!(
            f,
            "{:<15} {:<12} {:<8} {:<10} {:<12} {:<12}",
            "Algorithm", "Outcome", "Length", "Checked", "Efficiency", "Elapsed"
        )?;
        writeln!(f, "{}", "-".repeat(72))?;

        for report in self.reports {
            let length = report
                .hops()
                .map_or_else(|| "-".to_string(), |hops| hops.to_string());
            let efficiency = self
                .optimal_hops
                .and_then(|optimal| report.route_efficiency(optimal))
                .map_or_else(|| "-".to_string(), |e| format!("{:.3}", e));
            writeln!(
                f,
                "{:<15} {:<12} {:<8} {:<10} {:<12} {:<12}",
                report.algorithm.key(),
                report.result.label(),
                length,
                report.checked,
                efficiency,
                format!("{:.2?}", report.elapsed)
            )?;
        }

        if let Some(optimal) = self.optimal_hops {
            writeln!(f, "\nShortest possible length: {}", optimal)?;
        }
        if let Some(best) = self.most_focused() {
            writeln!(
                f,
                "Fewest cells checked: {} ({} cells)",
                best.algorithm, best.checked
            )?;
        }
        Ok(())
    }
}
