use super::normalize::NormalizedSample;

/// A present NHPI value at a date.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observation {
    pub doy: f64,
    pub nhpi: f32,
}

/// Per-pixel crossing search.
///
/// ```text
/// Searching ──(nhpi > threshold && doy >= window start)──> Found
///     │
///     └──(input exhausted)──> NoCrossing
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CrossingState {
    Searching { prev: Option<Observation> },
    Found {
        prev: Option<Observation>,
        hit: Observation,
    },
}

impl Default for CrossingState {
    fn default() -> Self {
        Self::Searching { prev: None }
    }
}

impl CrossingState {
    /// Advance by one date. `Found` is terminal.
    pub fn step(self, sample: NormalizedSample, threshold: f32, window_start: f64) -> Self {
        let Self::Searching { prev } = self else {
            return self;
        };
        let Some(nhpi) = sample.nhpi else {
            return self;
        };
        let obs = Observation {
            doy: sample.doy,
            nhpi,
        };
        if nhpi > threshold && sample.doy >= window_start {
            Self::Found { prev, hit: obs }
        } else {
            Self::Searching { prev: Some(obs) }
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// Final result of the crossing search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CrossingOutcome {
    NoCrossing,
    /// The crossing sample had no earlier present sample; its date is used as is.
    Edge { doy: f64 },
    /// Linear interpolation between `prev` and `hit`.
    Interpolated {
        doy: f64,
        prev: Observation,
        hit: Observation,
    },
}

impl CrossingOutcome {
    pub fn harvest_doy(&self) -> Option<f64> {
        match *self {
            Self::NoCrossing => None,
            Self::Edge { doy } | Self::Interpolated { doy, .. } => Some(doy),
        }
    }

    pub fn is_edge(&self) -> bool {
        matches!(self, Self::Edge { .. })
    }
}

/// Walks a normalized series through [`CrossingState`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrossingDetector {
    pub threshold: f32,
    pub window_start: f64,
}

impl CrossingDetector {
    pub fn new(threshold: f32, window_start: f64) -> Self {
        Self {
            threshold,
            window_start,
        }
    }

    /// Samples must arrive in chronological order.
    pub fn run<I>(&self, series: I) -> CrossingState
    where
        I: IntoIterator<Item = NormalizedSample>,
    {
        let mut state = CrossingState::default();
        for sample in series {
            state = state.step(sample, self.threshold, self.window_start);
            if state.is_found() {
                break;
            }
        }
        state
    }

    pub fn finish(&self, state: CrossingState) -> CrossingOutcome {
        match state {
            CrossingState::Searching { .. } => CrossingOutcome::NoCrossing,
            CrossingState::Found { prev: None, hit } => CrossingOutcome::Edge { doy: hit.doy },
            CrossingState::Found {
                prev: Some(prev),
                hit,
            } => CrossingOutcome::Interpolated {
                doy: interpolate_crossing(prev, hit, self.threshold),
                prev,
                hit,
            },
        }
    }

    pub fn detect<I>(&self, series: I) -> CrossingOutcome
    where
        I: IntoIterator<Item = NormalizedSample>,
    {
        self.finish(self.run(series))
    }
}

/// Date at which the straight line from `prev` to `hit` reaches `threshold`.
/// Falls back to `hit.doy` when both values are equal.
pub fn interpolate_crossing(prev: Observation, hit: Observation, threshold: f32) -> f64 {
    let rise = hit.nhpi as f64 - prev.nhpi as f64;
    if rise == 0.0 {
        return hit.doy;
    }
    prev.doy + (threshold as f64 - prev.nhpi as f64) / rise * (hit.doy - prev.doy)
}
