use std::collections::HashMap;
use std::collections::hash_map::Entry;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::{Error, InterestStrategy};

/// Scale the raw interest is held at before the engine's final rounding.
const INTERNAL_SCALE: u32 = 10;

/// One month's share of the annual rate, rounded half-up at internal precision.
fn monthly_share(balance: Decimal, annual_rate: Decimal) -> Decimal {
    (balance * annual_rate / Decimal::from(12))
        .round_dp_with_strategy(INTERNAL_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// 1% annual, eligible after the first 30 days.
pub struct BasicPlan;

impl InterestStrategy for BasicPlan {
    fn plan_type(&self) -> &'static str {
        "basic"
    }

    fn monthly_interest(&self, balance: Decimal, days: u32) -> Decimal {
        if days > 30 {
            monthly_share(balance, Decimal::new(1, 2))
        } else {
            Decimal::ZERO
        }
    }
}

/// 3% annual, eligible after the first 30 days and only through day 365.
pub struct StudentPlan;

impl InterestStrategy for StudentPlan {
    fn plan_type(&self) -> &'static str {
        "student"
    }

    fn monthly_interest(&self, balance: Decimal, days: u32) -> Decimal {
        if days > 30 && days <= 365 {
            monthly_share(balance, Decimal::new(3, 2))
        } else {
            Decimal::ZERO
        }
    }
}

/// 5% annual, eligible after the first 45 days.
pub struct PremiumPlan;

impl InterestStrategy for PremiumPlan {
    fn plan_type(&self) -> &'static str {
        "premium"
    }

    fn monthly_interest(&self, balance: Decimal, days: u32) -> Decimal {
        if days > 45 {
            monthly_share(balance, Decimal::new(5, 2))
        } else {
            Decimal::ZERO
        }
    }
}

/// Maps plan-type tags to their interest rule.
pub struct StrategyRegistry {
    strategies: HashMap<&'static str, Box<dyn InterestStrategy>>,
}

impl StrategyRegistry {
    /// Builds a registry from a set of strategies. Fails when two strategies
    /// claim the same plan-type tag rather than letting one shadow the other.
    pub fn new(strategies: Vec<Box<dyn InterestStrategy>>) -> Result<Self, Error> {
        let mut map = HashMap::new();
        for strategy in strategies {
            match map.entry(strategy.plan_type()) {
                Entry::Vacant(e) => {
                    e.insert(strategy);
                }
                Entry::Occupied(e) => {
                    return Err(Error::DuplicatePlanType(e.key().to_string()));
                }
            }
        }
        Ok(Self { strategies: map })
    }

    /// The three built-in plans.
    pub fn builtin() -> Self {
        Self::new(vec![
            Box::new(BasicPlan),
            Box::new(StudentPlan),
            Box::new(PremiumPlan),
        ])
        .expect("built-in plan tags are distinct")
    }

    pub fn resolve(&self, plan_type: &str) -> Result<&dyn InterestStrategy, Error> {
        self.strategies
            .get(plan_type)
            .map(Box::as_ref)
            .ok_or_else(|| Error::UnknownPlanType(plan_type.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn basic_pays_nothing_through_day_30() {
        let plan = BasicPlan;
        assert_eq!(plan.monthly_interest(dec("10000.00"), 25), Decimal::ZERO);
        assert_eq!(plan.monthly_interest(dec("10000.00"), 30), Decimal::ZERO);
    }

    #[test]
    fn basic_pays_from_day_31() {
        let interest = BasicPlan.monthly_interest(dec("10000.00"), 31);
        assert_eq!(interest, dec("8.3333333333"));
    }

    #[test]
    fn student_window_is_31_through_365() {
        let plan = StudentPlan;
        assert_eq!(plan.monthly_interest(dec("5000.00"), 30), Decimal::ZERO);
        assert_eq!(plan.monthly_interest(dec("5000.00"), 31), dec("12.5"));
        assert_eq!(plan.monthly_interest(dec("5000.00"), 365), dec("12.5"));
        assert_eq!(plan.monthly_interest(dec("5000.00"), 366), Decimal::ZERO);
    }

    #[test]
    fn premium_pays_nothing_through_day_45() {
        let plan = PremiumPlan;
        assert_eq!(plan.monthly_interest(dec("20000.00"), 45), Decimal::ZERO);
        assert_eq!(
            plan.monthly_interest(dec("20000.00"), 46),
            dec("83.3333333333")
        );
    }

    #[test]
    fn registry_resolves_every_builtin_tag() {
        let registry = StrategyRegistry::builtin();
        for tag in ["basic", "student", "premium"] {
            assert_eq!(registry.resolve(tag).unwrap().plan_type(), tag);
        }
    }

    #[test]
    fn registry_rejects_unknown_tag_with_the_tag_attached() {
        let registry = StrategyRegistry::builtin();
        match registry.resolve("gold") {
            Err(Error::UnknownPlanType(tag)) => assert_eq!(tag, "gold"),
            other => panic!("expected UnknownPlanType, got {:?}", other.map(|s| s.plan_type())),
        }
    }

    #[test]
    fn registry_rejects_duplicate_registration() {
        let result = StrategyRegistry::new(vec![Box::new(BasicPlan), Box::new(BasicPlan)]);
        match result {
            Err(Error::DuplicatePlanType(tag)) => assert_eq!(tag, "basic"),
            Ok(_) => panic!("duplicate tag was accepted"),
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
}
