//! # Harvard spectral classification
//!
//! Ordered categories for the spectral **type** (`O B A F G K M`) and the spectral
//! **subclass** (letter + digit, `O0 … M9`), and the classifiers that extract them from
//! a free-text catalog classification such as `"G2V"` or `"K3III"`.
//!
//! ## Ordering
//!
//! Both categories derive [`Ord`] so that every sort, `BTreeMap` grouping, or chart axis
//! built from them follows the physical sequence from hottest to coolest:
//!
//! ```text
//! O < B < A < F < G < K < M
//! O0 < O1 < … < O9 < B0 < … < M9
//! ```
//!
//! and never the alphabetical one (`A, B, F, G, K, M, O`).
//!
//! ## Classification rules
//!
//! - Matching is **case-sensitive** on the catalog's uppercase convention.
//! - Only the leading character(s) are examined; luminosity classes and peculiarity
//!   flags that follow (`V`, `III`, `e`, `:`…) are ignored.
//! - Anything else (missing value, lowercase letter, `W`/`C`/`S`/`D` types, a missing
//!   digit) is **undefined** (`None`), never coerced to a default letter.
use std::fmt;
use std::str::FromStr;

use crate::hipcat_errors::HipcatError;

/// Harvard spectral type, ordered from hottest (`O`) to coolest (`M`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpectralType {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
}

impl SpectralType {
    /// All spectral types in category order.
    pub const ALL: [SpectralType; 7] = [
        SpectralType::O,
        SpectralType::B,
        SpectralType::A,
        SpectralType::F,
        SpectralType::G,
        SpectralType::K,
        SpectralType::M,
    ];

    /// Map a single uppercase letter to its spectral type.
    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'O' => Some(SpectralType::O),
            'B' => Some(SpectralType::B),
            'A' => Some(SpectralType::A),
            'F' => Some(SpectralType::F),
            'G' => Some(SpectralType::G),
            'K' => Some(SpectralType::K),
            'M' => Some(SpectralType::M),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            SpectralType::O => 'O',
            SpectralType::B => 'B',
            SpectralType::A => 'A',
            SpectralType::F => 'F',
            SpectralType::G => 'G',
            SpectralType::K => 'K',
            SpectralType::M => 'M',
        }
    }

    /// Position in the category order (`O = 0`, …, `M = 6`).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Discrete chart color associated with the type.
    ///
    /// Consumers rely on this mapping to color histograms and HR diagrams consistently.
    pub fn chart_color(self) -> &'static str {
        match self {
            SpectralType::O => "violet",
            SpectralType::B => "blue",
            SpectralType::A => "lightblue",
            SpectralType::F => "white",
            SpectralType::G => "yellow",
            SpectralType::K => "orange",
            SpectralType::M => "red",
        }
    }

    /// The ten subclasses of this type, `X0..=X9`.
    pub fn subclasses(self) -> impl Iterator<Item = SpectralSubclass> {
        (0..=9).map(move |digit| SpectralSubclass {
            spectral_type: self,
            digit,
        })
    }
}

impl fmt::Display for SpectralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.letter().encode_utf8(&mut [0u8; 4]))
    }
}

impl FromStr for SpectralType {
    type Err = HipcatError;

    /// Parse an exact one-letter type (`"G"`). Use [`classify_spectral_type`] for raw
    /// catalog strings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => SpectralType::from_letter(c)
                .ok_or_else(|| HipcatError::InvalidSpectralClass(s.into())),
            _ => Err(HipcatError::InvalidSpectralClass(s.into())),
        }
    }
}

/// Spectral subclass: a type letter followed by a digit `0..=9` (e.g. `K3`).
///
/// Field order makes the derived ordering compare the type first, then the digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpectralSubclass {
    spectral_type: SpectralType,
    digit: u8,
}

impl SpectralSubclass {
    /// Number of canonical subclasses (`7 types × 10 digits`).
    pub const COUNT: usize = 70;

    /// Build a subclass, rejecting digits above 9.
    pub fn new(spectral_type: SpectralType, digit: u8) -> Option<Self> {
        (digit <= 9).then_some(SpectralSubclass {
            spectral_type,
            digit,
        })
    }

    pub fn spectral_type(self) -> SpectralType {
        self.spectral_type
    }

    pub fn digit(self) -> u8 {
        self.digit
    }

    /// Position in the 70-element category order (`O0 = 0`, …, `M9 = 69`).
    pub fn index(self) -> usize {
        self.spectral_type.index() * 10 + self.digit as usize
    }

    /// All 70 subclasses in category order.
    pub fn all() -> impl Iterator<Item = SpectralSubclass> {
        SpectralType::ALL.into_iter().flat_map(SpectralType::subclasses)
    }
}

impl fmt::Display for SpectralSubclass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{}{}", self.spectral_type.letter(), self.digit))
    }
}

impl FromStr for SpectralSubclass {
    type Err = HipcatError;

    /// Parse an exact two-character code (`"K3"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.chars().count() != 2 {
            return Err(HipcatError::InvalidSpectralClass(s.into()));
        }
        classify_spectral_subclass(Some(s))
            .ok_or_else(|| HipcatError::InvalidSpectralClass(s.into()))
    }
}

/// Spectral type of a raw catalog classification.
///
/// Arguments
/// -----------------
/// * `raw`: free-text classification (`"G2V"`, `"B9.5IV"`, …) or `None` if missing.
///
/// Return
/// ----------
/// * `Some(SpectralType)` if the first character is exactly one of `O B A F G K M`.
/// * `None` for missing, empty or unrecognized classifications.
///
/// See also
/// ------------
/// * [`classify_spectral_subclass`] – letter + digit variant.
pub fn classify_spectral_type(raw: Option<&str>) -> Option<SpectralType> {
    raw?.chars().next().and_then(SpectralType::from_letter)
}

/// Spectral subclass of a raw catalog classification.
///
/// Arguments
/// -----------------
/// * `raw`: free-text classification or `None` if missing.
///
/// Return
/// ----------
/// * `Some(SpectralSubclass)` if the first character is a spectral type letter and the
///   second an ASCII digit (`"K3III"` → `K3`, `"B9.5V"` → `B9`).
/// * `None` otherwise (`"G"`, `"Gp"`, `"DA2"`, …).
pub fn classify_spectral_subclass(raw: Option<&str>) -> Option<SpectralSubclass> {
    let mut chars = raw?.chars();
    let spectral_type = chars.next().and_then(SpectralType::from_letter)?;
    let digit = chars.next()?.to_digit(10)?;
    SpectralSubclass::new(spectral_type, digit as u8)
}

#[cfg(test)]
mod spectral_test {
    use super::*;

    #[test]
    fn test_classify_type() {
        assert_eq!(classify_spectral_type(Some("G2V")), Some(SpectralType::G));
        assert_eq!(classify_spectral_type(Some("M")), Some(SpectralType::M));
        assert_eq!(classify_spectral_type(Some("O5f")), Some(SpectralType::O));
        assert_eq!(classify_spectral_type(Some("Q9")), None);
        assert_eq!(classify_spectral_type(Some("g2V")), None);
        assert_eq!(classify_spectral_type(Some("")), None);
        assert_eq!(classify_spectral_type(Some(" G2V")), None);
        assert_eq!(classify_spectral_type(None), None);
    }

    #[test]
    fn test_classify_subclass() {
        let k3 = classify_spectral_subclass(Some("K3III")).unwrap();
        assert_eq!(k3.to_string(), "K3");
        assert_eq!(k3.spectral_type(), SpectralType::K);
        assert_eq!(k3.digit(), 3);

        assert_eq!(
            classify_spectral_subclass(Some("B9.5V")),
            SpectralSubclass::new(SpectralType::B, 9)
        );
        assert_eq!(classify_spectral_subclass(Some("G")), None);
        assert_eq!(classify_spectral_subclass(Some("Gp")), None);
        assert_eq!(classify_spectral_subclass(Some("DA2")), None);
        assert_eq!(classify_spectral_subclass(Some("Q9")), None);
        assert_eq!(classify_spectral_subclass(None), None);
    }

    #[test]
    fn test_type_order_is_physical_not_alphabetical() {
        let mut types = vec![
            SpectralType::M,
            SpectralType::A,
            SpectralType::O,
            SpectralType::K,
            SpectralType::B,
            SpectralType::G,
            SpectralType::F,
        ];
        types.sort();
        let letters: String = types.iter().map(|t| t.letter()).collect();
        assert_eq!(letters, "OBAFGKM");
    }

    #[test]
    fn test_subclass_order_and_count() {
        let all: Vec<SpectralSubclass> = SpectralSubclass::all().collect();
        assert_eq!(all.len(), SpectralSubclass::COUNT);
        assert_eq!(all[0].to_string(), "O0");
        assert_eq!(all[9].to_string(), "O9");
        assert_eq!(all[10].to_string(), "B0");
        assert_eq!(all[69].to_string(), "M9");
        assert!(all.windows(2).all(|w| w[0] < w[1]));
        assert!(all.iter().enumerate().all(|(i, s)| s.index() == i));
    }

    #[test]
    fn test_subclass_digit_bound() {
        assert!(SpectralSubclass::new(SpectralType::A, 9).is_some());
        assert!(SpectralSubclass::new(SpectralType::A, 10).is_none());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("F".parse::<SpectralType>(), Ok(SpectralType::F));
        assert_eq!(
            "FG".parse::<SpectralType>(),
            Err(HipcatError::InvalidSpectralClass("FG".into()))
        );
        assert_eq!(
            "M9".parse::<SpectralSubclass>().map(|s| s.index()),
            Ok(69)
        );
        assert!("M9V".parse::<SpectralSubclass>().is_err());
    }

    #[test]
    fn test_chart_colors() {
        assert_eq!(SpectralType::O.chart_color(), "violet");
        assert_eq!(SpectralType::G.chart_color(), "yellow");
        assert_eq!(SpectralType::M.chart_color(), "red");
    }
}
