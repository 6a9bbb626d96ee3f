use crate::types::ComparisonOperator;

/// Display progress of a prediction toward its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// 0 to 100.
    pub percent: f64,
    pub met: bool,
}

/// Evaluate `current` against `target` under `op`.
///
/// Upward goals (`more_than`, `at_least`) fill as `current / target`.
/// Downward goals (`less_than`, `at_most`) show the share of `target` still
/// left under it, and 0 once the limit is reached or passed. `exactly` fills
/// like an upward goal and reads 100 only on an exact hit. A zero target is
/// 0% progress unless `exactly` hits it.
///
/// `met` is the operator applied literally and is independent of `percent`:
/// `less_than(5, 10)` is met while progress reads 50.
pub fn evaluate(current: f64, target: f64, op: ComparisonOperator) -> Progress {
    let met = match op {
        ComparisonOperator::MoreThan => current > target,
        ComparisonOperator::AtLeast => current >= target,
        ComparisonOperator::LessThan => current < target,
        ComparisonOperator::AtMost => current <= target,
        ComparisonOperator::Exactly => current == target,
    };

    let percent = match op {
        ComparisonOperator::Exactly if current == target => 100.0,
        _ if target == 0.0 => 0.0,
        ComparisonOperator::MoreThan | ComparisonOperator::AtLeast | ComparisonOperator::Exactly => {
            current / target * 100.0
        }
        ComparisonOperator::LessThan if current >= target => 0.0,
        ComparisonOperator::AtMost if current > target => 0.0,
        ComparisonOperator::LessThan | ComparisonOperator::AtMost => {
            (target - current) / target * 100.0
        }
    };

    Progress {
        percent: if percent.is_finite() { percent.clamp(0.0, 100.0) } else { 0.0 },
        met,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ComparisonOperator::*;

    fn check(current: f64, target: f64, op: ComparisonOperator, percent: f64, met: bool) {
        let p = evaluate(current, target, op);
        assert!(
            (p.percent - percent).abs() < 1e-9,
            "{op}({current}, {target}) percent {} != {percent}",
            p.percent
        );
        assert_eq!(p.met, met, "{op}({current}, {target}) met");
    }

    #[test]
    fn zero_target_never_divides() {
        check(0.0, 0.0, MoreThan, 0.0, false);
        check(5.0, 0.0, AtLeast, 0.0, true);
        check(3.0, 0.0, LessThan, 0.0, false);
    }

    #[test]
    fn more_than() {
        check(15.0, 30.0, MoreThan, 50.0, false);
        check(30.0, 30.0, MoreThan, 100.0, false);
        check(45.0, 30.0, MoreThan, 100.0, true);
    }

    #[test]
    fn exactly() {
        check(30.0, 30.0, Exactly, 100.0, true);
        check(0.0, 0.0, Exactly, 100.0, true);
        check(10.0, 40.0, Exactly, 25.0, false);
        check(50.0, 40.0, Exactly, 100.0, false);
    }

    #[test]
    fn less_than() {
        check(5.0, 10.0, LessThan, 50.0, true);
        check(12.0, 10.0, LessThan, 0.0, false);
        check(10.0, 10.0, LessThan, 0.0, false);
        check(0.0, 10.0, LessThan, 100.0, true);
    }

    #[test]
    fn inclusive_operators() {
        check(30.0, 30.0, AtLeast, 100.0, true);
        check(29.0, 30.0, AtLeast, 29.0 / 30.0 * 100.0, false);
        check(10.0, 10.0, AtMost, 0.0, true);
        check(11.0, 10.0, AtMost, 0.0, false);
        check(4.0, 10.0, AtMost, 60.0, true);
    }

    #[test]
    fn negative_values_clamp_to_zero() {
        check(-5.0, 10.0, MoreThan, 0.0, false);
    }
}
