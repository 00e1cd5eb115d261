//! Natural-language banding for certainty factors.
//!
//! A pure lookup table mapping a numeric CF to a descriptive label, for
//! presentation layers that render results to people. The engine itself never
//! produces labels; nothing in the inference path depends on this module.
//!
//! | CF            | label                  |
//! |---------------|------------------------|
//! | 1.0           | Definitely             |
//! | [0.8, 1.0)    | Almost certainly       |
//! | [0.6, 0.8)    | Probably               |
//! | [0.4, 0.6)    | Maybe                  |
//! | [-0.2, 0.4)   | Unknown if             |
//! | [-0.4, -0.2)  | Maybe not              |
//! | [-0.6, -0.4)  | Probably not           |
//! | (-1.0, -0.6)  | Almost certainly not   |
//! | -1.0          | Definitely not         |

use crate::cf::Cf;

/// The natural-language label for a certainty factor.
pub fn label(cf: Cf) -> &'static str {
    let value = cf.get();
    if value >= 1.0 {
        "Definitely"
    } else if value >= 0.8 {
        "Almost certainly"
    } else if value >= 0.6 {
        "Probably"
    } else if value >= 0.4 {
        "Maybe"
    } else if value >= -0.2 {
        "Unknown if"
    } else if value >= -0.4 {
        "Maybe not"
    } else if value >= -0.6 {
        "Probably not"
    } else if value > -1.0 {
        "Almost certainly not"
    } else {
        "Definitely not"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cf(value: f64) -> Cf {
        Cf::new(value).unwrap()
    }

    #[test]
    fn positive_bands() {
        assert_eq!(label(cf(1.0)), "Definitely");
        assert_eq!(label(cf(0.99)), "Almost certainly");
        assert_eq!(label(cf(0.8)), "Almost certainly");
        assert_eq!(label(cf(0.79)), "Probably");
        assert_eq!(label(cf(0.6)), "Probably");
        assert_eq!(label(cf(0.59)), "Maybe");
        assert_eq!(label(cf(0.4)), "Maybe");
    }

    #[test]
    fn neutral_band_straddles_zero() {
        assert_eq!(label(cf(0.39)), "Unknown if");
        assert_eq!(label(cf(0.0)), "Unknown if");
        assert_eq!(label(cf(-0.2)), "Unknown if");
    }

    #[test]
    fn negative_bands() {
        assert_eq!(label(cf(-0.21)), "Maybe not");
        assert_eq!(label(cf(-0.4)), "Maybe not");
        assert_eq!(label(cf(-0.41)), "Probably not");
        assert_eq!(label(cf(-0.6)), "Probably not");
        assert_eq!(label(cf(-0.61)), "Almost certainly not");
        assert_eq!(label(cf(-0.99)), "Almost certainly not");
        assert_eq!(label(cf(-1.0)), "Definitely not");
    }
}
