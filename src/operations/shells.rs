use tracing::debug;

use crate::error::Result;
use crate::geometry::Loop;
use crate::operations::inset::{InsetConfig, InsetOutput, LoopInset};

/// Produces nested shells, each inset `spacing` from the one before it.
///
/// Generation stops after `count` shells, when a shell collapses to nothing,
/// or after the first shell that reports anomalies. That last shell is
/// still returned; further insets of an open loop are not meaningful.
#[derive(Debug, Clone)]
pub struct ConcentricShells {
    boundary: Loop,
    spacing: f64,
    count: usize,
    config: InsetConfig,
}

impl ConcentricShells {
    #[must_use]
    pub fn new(boundary: Loop, spacing: f64, count: usize) -> Self {
        Self {
            boundary,
            spacing,
            count,
            config: InsetConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: InsetConfig) -> Self {
        self.config = config;
        self
    }

    /// Generates the shells, outermost first.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by an individual inset.
    pub fn execute(&self) -> Result<Vec<InsetOutput>> {
        let mut shells: Vec<InsetOutput> = Vec::with_capacity(self.count);
        let mut current = self.boundary.clone();

        while shells.len() < self.count {
            let output = LoopInset::new(current, self.spacing)
                .with_config(self.config)
                .execute()?;
            if output.is_collapsed() {
                break;
            }
            let clean = output.is_clean();
            current = output.result.clone();
            shells.push(output);
            if !clean {
                break;
            }
        }

        debug!(
            requested = self.count,
            produced = shells.len(),
            spacing = self.spacing,
            "concentric shells"
        );
        Ok(shells)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::InsetError;
    use crate::geometry::Segment;
    use crate::math::Point2;

    fn square(side: f64) -> Loop {
        Loop::from_points(&[
            Point2::new(0.0, 0.0),
            Point2::new(side, 0.0),
            Point2::new(side, side),
            Point2::new(0.0, side),
        ])
    }

    #[test]
    fn shells_shrink_by_spacing() {
        let shells = ConcentricShells::new(square(2.0), 0.2, 3).execute().unwrap();
        assert_eq!(shells.len(), 3);
        for (i, shell) in shells.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let side = 2.0 - 0.4 * (i + 1) as f64;
            assert!(shell.is_clean());
            assert!((shell.result.signed_area() - side * side).abs() < 1e-9);
        }
    }

    #[test]
    fn stops_when_the_loop_collapses() {
        let shells = ConcentricShells::new(square(1.0), 0.2, 10).execute().unwrap();
        // Sides 0.6 and 0.2 survive; the next inset collapses.
        assert_eq!(shells.len(), 2);
    }

    #[test]
    fn zero_count_produces_nothing() {
        let shells = ConcentricShells::new(square(1.0), 0.1, 0).execute().unwrap();
        assert!(shells.is_empty());
    }

    #[test]
    fn errors_propagate() {
        let err = ConcentricShells::new(square(1.0), -0.1, 2)
            .execute()
            .unwrap_err();
        assert!(matches!(err, InsetError::InvalidParameter { .. }));
    }

    #[test]
    fn thin_rectangle_stops_when_its_sides_meet() {
        let rect = Loop::from_points(&[
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 1.0),
            Point2::new(0.0, 1.0),
        ]);
        let shells = ConcentricShells::new(rect, 0.2, 6).execute().unwrap();
        // Heights 0.6 and 0.2; the third inset brings the long sides together.
        assert_eq!(shells.len(), 2);
        for shell in &shells {
            assert!(shell.is_clean());
            assert!(shell.result.signed_area() > 0.0);
        }
    }

    #[test]
    fn stops_after_an_unclean_shell() {
        let notched = Loop::new(vec![
            Segment::from_coords(0.0, 0.0, 0.7, 0.0),
            Segment::from_coords(1.0, 0.0, 1.0, 1.0),
            Segment::from_coords(1.0, 1.0, 0.0, 1.0),
            Segment::from_coords(0.0, 1.0, 0.0, 0.0),
        ]);
        let config = InsetConfig::default()
            .with_cutoff_length(0.5)
            .with_elongation(0.1);
        let shells = ConcentricShells::new(notched, 0.1, 3)
            .with_config(config)
            .execute()
            .unwrap();
        assert_eq!(shells.len(), 1);
        assert!(!shells[0].is_clean());
    }
}
