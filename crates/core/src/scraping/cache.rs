use std::collections::BTreeSet;

use messesinfo_domain::{DayBuckets, DayKey, Mass};

/// Day buckets accumulated across refresh cycles.
///
/// A populated bucket is never overwritten by `merge`; it stays until it is
/// evicted, after which the day becomes eligible for scraping again.
#[derive(Debug, Clone, Default)]
pub struct DayBucketCache {
    buckets: DayBuckets,
}

impl DayBucketCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add buckets for days not yet cached. Returns how many days were added.
    pub fn merge(&mut self, incoming: DayBuckets) -> usize {
        let mut added = 0;
        for (day, masses) in incoming {
            if let std::collections::btree_map::Entry::Vacant(slot) = self.buckets.entry(day) {
                slot.insert(masses);
                added += 1;
            }
        }
        added
    }

    /// Drop every bucket strictly before `cutoff`. Returns the number removed.
    pub fn evict_before(&mut self, cutoff: DayKey) -> usize {
        let retained = self.buckets.split_off(&cutoff);
        let removed = self.buckets.len();
        self.buckets = retained;
        removed
    }

    pub fn evict(&mut self, day: &DayKey) -> bool {
        self.buckets.remove(day).is_some()
    }

    pub fn known_days(&self) -> BTreeSet<DayKey> {
        self.buckets.keys().copied().collect()
    }

    pub fn buckets(&self) -> &DayBuckets {
        &self.buckets
    }

    pub fn get(&self, day: &DayKey) -> Option<&[Mass]> {
        self.buckets.get(day).map(Vec::as_slice)
    }

    pub fn total_masses(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, TimeZone};
    use messesinfo_domain::constants::MASS_TIMEZONE;

    use super::*;

    fn day(d: u32) -> DayKey {
        DayKey::new(NaiveDate::from_ymd_opt(2024, 3, d).unwrap())
    }

    fn mass_on(d: u32, kind: &str) -> Mass {
        let start = MASS_TIMEZONE.with_ymd_and_hms(2024, 3, d, 10, 0, 0).unwrap();
        Mass::new(start, Duration::hours(1), kind).unwrap()
    }

    fn buckets(days: &[(u32, &str)]) -> DayBuckets {
        days.iter().map(|(d, kind)| (day(*d), vec![mass_on(*d, kind)])).collect()
    }

    #[test]
    fn merge_keeps_existing_buckets() {
        let mut cache = DayBucketCache::new();
        assert_eq!(cache.merge(buckets(&[(10, "Messe"), (11, "Messe")])), 2);
        assert_eq!(cache.merge(buckets(&[(11, "Vêpres"), (12, "Messe")])), 1);

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(&day(11)).unwrap()[0].kind, "Messe");
    }

    #[test]
    fn evict_before_is_exclusive_of_cutoff() {
        let mut cache = DayBucketCache::new();
        cache.merge(buckets(&[(8, "Messe"), (9, "Messe"), (10, "Messe"), (11, "Messe")]));

        assert_eq!(cache.evict_before(day(10)), 2);
        assert_eq!(cache.known_days().into_iter().collect::<Vec<_>>(), vec![day(10), day(11)]);
    }

    #[test]
    fn explicit_eviction_reopens_day() {
        let mut cache = DayBucketCache::new();
        cache.merge(buckets(&[(10, "Messe")]));

        assert!(cache.evict(&day(10)));
        assert!(!cache.evict(&day(10)));
        assert!(cache.is_empty());
        assert_eq!(cache.merge(buckets(&[(10, "Vêpres")])), 1);
        assert_eq!(cache.total_masses(), 1);
    }
}
