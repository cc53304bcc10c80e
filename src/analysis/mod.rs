//! The four Van Westendorp price points.
//!
//! Each price point is the first crossing of a fixed pair of rate curves (see
//! `PriceKind::lines` and `PriceKind::transition`). All four detections read the
//! same immutable buckets and are independent: a missing or parallel result for
//! one point leaves the others untouched.

use tracing::info;

use crate::detect::find_crossing;
use crate::domain::{PriceKind, PricePoint, RateBucket};

/// Results of one analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceAnalysis {
    pub highest: PricePoint,
    pub compromise: PricePoint,
    pub ideal: PricePoint,
    pub min_quality: PricePoint,
}

impl PriceAnalysis {
    /// Price points in reporting order.
    pub fn points(&self) -> [PricePoint; 4] {
        [self.highest, self.compromise, self.ideal, self.min_quality]
    }

    pub fn get(&self, kind: PriceKind) -> PricePoint {
        match kind {
            PriceKind::Highest => self.highest,
            PriceKind::Compromise => self.compromise,
            PriceKind::Ideal => self.ideal,
            PriceKind::MinQuality => self.min_quality,
        }
    }
}

/// Locate one price point on the buckets.
pub fn price_point(buckets: &[RateBucket], kind: PriceKind) -> PricePoint {
    let (lhs, rhs) = kind.lines();
    PricePoint {
        kind,
        detection: find_crossing(buckets, kind.transition(), lhs, rhs),
    }
}

/// Locate all four price points.
pub fn analyze(buckets: &[RateBucket]) -> PriceAnalysis {
    let analysis = PriceAnalysis {
        highest: price_point(buckets, PriceKind::Highest),
        compromise: price_point(buckets, PriceKind::Compromise),
        ideal: price_point(buckets, PriceKind::Ideal),
        min_quality: price_point(buckets, PriceKind::MinQuality),
    };

    for point in analysis.points() {
        info!(
            kind = point.kind.display_name(),
            raw = ?point.raw(),
            reported = ?point.reported(),
            "price point"
        );
    }
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::build_rate_curve;
    use crate::domain::{Detection, RespondentPrices};

    fn survey() -> Vec<RespondentPrices> {
        vec![
            RespondentPrices::new(50.0, 200.0, 100.0, 150.0),
            RespondentPrices::new(50.0, 200.0, 100.0, 150.0),
            RespondentPrices::new(100.0, 250.0, 150.0, 200.0),
            RespondentPrices::new(100.0, 250.0, 150.0, 200.0),
        ]
    }

    #[test]
    fn four_respondent_survey_price_points() {
        let buckets = build_rate_curve(&survey(), 50.0).unwrap();
        let analysis = analyze(&buckets);

        assert_eq!(analysis.highest.reported(), Some(175.0));
        assert_eq!(analysis.compromise.reported(), Some(150.0));
        assert_eq!(analysis.ideal.reported(), Some(150.0));
        assert_eq!(analysis.min_quality.reported(), Some(125.0));

        assert_eq!(
            analysis.highest.detection,
            Detection::Crossed { price: 175.0, lower: 150.0, upper: 200.0 }
        );
        assert_eq!(
            analysis.min_quality.detection,
            Detection::Crossed { price: 125.0, lower: 100.0, upper: 150.0 }
        );
    }

    #[test]
    fn points_are_in_reporting_order() {
        let buckets = build_rate_curve(&survey(), 50.0).unwrap();
        let analysis = analyze(&buckets);
        let kinds: Vec<PriceKind> = analysis.points().iter().map(|p| p.kind).collect();
        assert_eq!(kinds, PriceKind::ALL.to_vec());
        for kind in PriceKind::ALL {
            assert_eq!(analysis.get(kind).kind, kind);
        }
    }

    #[test]
    fn fractional_crossing_is_rounded_up() {
        // too cheap: 100% -> 40%, expensive: 0% -> 90% over [100, 150]
        // 100 - 1.2t = 1.8t  =>  t = 33.33.. => x = 133.33..
        let buckets = vec![
            RateBucket { price: 100.0, too_expensive_rate: 0.0, too_cheap_rate: 100.0, expensive_rate: 0.0, cheap_rate: 100.0 },
            RateBucket { price: 150.0, too_expensive_rate: 10.0, too_cheap_rate: 40.0, expensive_rate: 90.0, cheap_rate: 100.0 },
        ];
        let point = price_point(&buckets, PriceKind::MinQuality);
        let raw = point.raw().unwrap();
        assert!((raw - 133.333_333).abs() < 1e-5);
        assert_eq!(point.reported(), Some(134.0));
    }

    #[test]
    fn whole_crossing_with_round_off_is_not_bumped() {
        // Exact crossing at 25; the intersection arithmetic lands a few ulps above it.
        let buckets = vec![
            RateBucket { price: 0.0, too_expensive_rate: 56.3, too_cheap_rate: 0.0, expensive_rate: 0.0, cheap_rate: 66.1 },
            RateBucket { price: 50.0, too_expensive_rate: 75.7, too_cheap_rate: 0.0, expensive_rate: 0.0, cheap_rate: 65.9 },
        ];
        let point = price_point(&buckets, PriceKind::Highest);
        let raw = point.raw().unwrap();
        assert!((raw - 25.0).abs() < 1e-9, "{raw}");
        assert_eq!(point.reported(), Some(25.0));
    }

    #[test]
    fn identical_answers_cross_on_the_grid() {
        let respondents = vec![RespondentPrices::new(100.0, 300.0, 150.0, 250.0); 3];
        let buckets = build_rate_curve(&respondents, 50.0).unwrap();
        let analysis = analyze(&buckets);

        assert_eq!(analysis.highest.reported(), Some(200.0));
        assert_eq!(analysis.compromise.reported(), Some(200.0));
        assert_eq!(analysis.ideal.reported(), Some(150.0));
        assert_eq!(analysis.min_quality.reported(), Some(150.0));
    }

    #[test]
    fn missing_point_does_not_affect_the_others() {
        // Cut the grid before too expensive reaches cheap.
        let mut buckets = build_rate_curve(&survey(), 50.0).unwrap();
        buckets.truncate(3);
        let analysis = analyze(&buckets);

        assert_eq!(analysis.highest.detection, Detection::NoTransition);
        assert_eq!(analysis.compromise.reported(), Some(150.0));
        assert_eq!(analysis.ideal.reported(), Some(150.0));
        assert_eq!(analysis.min_quality.reported(), Some(125.0));
    }

    #[test]
    fn flat_survey_has_no_crossings() {
        // Curves that never meet in the required direction are reported absent, not zero.
        let buckets = vec![
            RateBucket { price: 100.0, too_expensive_rate: 50.0, too_cheap_rate: 0.0, expensive_rate: 0.0, cheap_rate: 0.0 },
            RateBucket { price: 150.0, too_expensive_rate: 50.0, too_cheap_rate: 0.0, expensive_rate: 0.0, cheap_rate: 0.0 },
        ];
        let analysis = analyze(&buckets);
        for point in analysis.points() {
            assert_eq!(point.detection, Detection::NoTransition, "{:?}", point.kind);
            assert_eq!(point.reported(), None);
        }
    }
}
