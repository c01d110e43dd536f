//! Supplementary generated batch.
//!
//! Combinatorial phrases over common Darija material, appended after the
//! declared sources to top a corpus up to its target size. Generated
//! records face the same dedup gate as scraped ones; collisions are
//! frequent by construction and simply count as duplicates.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::sources::RawRecord;

const OPENERS: &[&str] = &[
    "salam khoya",
    "salam khti",
    "wach kayn",
    "والله",
    "بصح",
    "yak a sahbi",
    "chouf",
    "سمعني مزيان",
    "الله يبارك",
    "tbarkallah 3lik",
];

const BODIES: &[&str] = &[
    "had lvideo wa3ra bzaf",
    "هاد الحاجة عجباتني",
    "ma fhamt walou",
    "لقيت واحد الحاجة زوينة",
    "l9it chi haja zwina",
    "هاد الماتش كان واعر",
    "lkhedma s3iba had lyamat",
    "الماكلة ديال دارنا أحسن",
    "atay bla na3na3 machi atay",
    "درت كيما قلتي ليا",
];

const TAILS: &[&str] = &[
    "bzaf",
    "صافي",
    "wakha",
    "الله يحفظك",
    "nchallah ghadi nzid",
    "دابا عرفت",
    "safi baraka",
    "hhh",
    "والله حتى عجبني الحال",
    "allah y3tik sa7a",
];

/// Finite generated source. Deterministic for a given seed, so resumed
/// configurations regenerate the same candidate stream.
pub struct SyntheticSource {
    rng: StdRng,
    budget: usize,
    emitted: usize,
}

impl SyntheticSource {
    pub fn new(budget: usize, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            budget,
            emitted: 0,
        }
    }
}

impl Iterator for SyntheticSource {
    type Item = RawRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.emitted >= self.budget {
            return None;
        }
        let opener = OPENERS.choose(&mut self.rng).unwrap();
        let body = BODIES.choose(&mut self.rng).unwrap();
        let tail = TAILS.choose(&mut self.rng).unwrap();

        let text = format!("{} {} {}", opener, body, tail);
        let url = format!("synthetic://jam3a/{}", self.emitted);
        self.emitted += 1;
        Some(RawRecord::new(text, url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respects_budget() {
        assert_eq!(SyntheticSource::new(25, 0).count(), 25);
        assert_eq!(SyntheticSource::new(0, 0).count(), 0);
    }

    #[test]
    fn deterministic_for_a_seed() {
        let a: Vec<String> = SyntheticSource::new(10, 42).map(|r| r.text).collect();
        let b: Vec<String> = SyntheticSource::new(10, 42).map(|r| r.text).collect();
        let c: Vec<String> = SyntheticSource::new(10, 43).map(|r| r.text).collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn records_carry_synthetic_urls() {
        let record = SyntheticSource::new(1, 0).next().unwrap();
        assert!(record.url.starts_with("synthetic://"));
        assert!(!record.text.is_empty());
    }
}
