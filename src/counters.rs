use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Minute,
    Hour,
    Day,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Minute, Period::Hour, Period::Day];

    #[inline]
    fn key(self) -> char {
        match self {
            Period::Minute => 'm',
            Period::Hour => 'h',
            Period::Day => 'd',
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    pub minute: u64,
    pub hour: u64,
    pub day: u64,
}

impl Counter {
    #[inline]
    pub fn add(&mut self, n: u64) {
        self.minute += n;
        self.hour += n;
        self.day += n;
    }

    #[inline]
    pub fn get(&self, period: Period) -> u64 {
        match period {
            Period::Minute => self.minute,
            Period::Hour => self.hour,
            Period::Day => self.day,
        }
    }

    #[inline]
    pub fn reset(&mut self, period: Period) {
        match period {
            Period::Minute => self.minute = 0,
            Period::Hour => self.hour = 0,
            Period::Day => self.day = 0,
        }
    }
}

/// Vehicle and pedestrian counts over minute/hour/day windows.
///
/// Every pedestrian counted as going up or down also counts as a pedestrian.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Counters {
    pub vehicles: Counter,
    pub peds: Counter,
    pub peds_up: Counter,
    pub peds_down: Counter,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    fn all(&self) -> [(char, &Counter); 4] {
        [
            ('v', &self.vehicles),
            ('p', &self.peds),
            ('u', &self.peds_up),
            ('d', &self.peds_down),
        ]
    }

    pub fn add_vehicles(&mut self, n: u64) {
        self.vehicles.add(n);
    }

    pub fn add_peds_up(&mut self, n: u64) {
        self.peds.add(n);
        self.peds_up.add(n);
    }

    pub fn add_peds_down(&mut self, n: u64) {
        self.peds.add(n);
        self.peds_down.add(n);
    }

    pub fn any_counted(&self, period: Period) -> bool {
        self.all().iter().any(|(_, c)| c.get(period) > 0)
    }

    pub fn reset(&mut self, period: Period) {
        for c in [
            &mut self.vehicles,
            &mut self.peds,
            &mut self.peds_up,
            &mut self.peds_down,
        ] {
            c.reset(period);
        }
    }

    pub fn reset_all(&mut self) {
        *self = Self::default();
    }

    /// Counts for `period` keyed by two letters: `v`, `p`, `u` or `d`
    /// followed by `m`, `h` or `d`, e.g. `"um"` is pedestrians going up this
    /// minute.
    pub fn snapshot(&self, period: Period) -> BTreeMap<String, u64> {
        self.all()
            .iter()
            .map(|(k, c)| (format!("{}{}", k, period.key()), c.get(period)))
            .collect()
    }
}
