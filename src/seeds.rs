//! Bundled demo rule set.
//!
//! A small weather-domain rule base compiled into the binary, used by the
//! CLI `demo` subcommand and as a known-good fixture in tests. It goes
//! through the ordinary parser like any user-supplied rules file.

use crate::error::AugurResult;
use crate::kb::KnowledgeBase;

/// The weather demo rules, verbatim.
pub const WEATHER_RULES: &str = include_str!("../data/rules/weather.rules");

/// Parse the bundled weather rule set.
pub fn weather() -> AugurResult<KnowledgeBase> {
    Ok(KnowledgeBase::parse(WEATHER_RULES)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_rules_parse() {
        let kb = weather().unwrap();
        assert_eq!(kb.len(), 6);
        assert_eq!(kb.hypotheses().len(), 3);
    }

    #[test]
    fn bundled_rules_chain_today_into_tomorrow() {
        use crate::rule::Condition;
        let kb = weather().unwrap();
        let today_rain = Condition::new("today", "rain");
        assert!(kb.is_hypothesis(&today_rain));
        assert!(
            kb.antecedent_conditions().contains(&&today_rain),
            "today is rain should feed other rules"
        );
    }
}
