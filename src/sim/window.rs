//! Sliding-window aggregation of hourly deficits.
//!
//! A window's required capacity is its largest contiguous deficit sum, or
//! zero when every run is a surplus. [`Span`] summarizes a run of hours so
//! that two adjacent runs merge in O(1), and [`SlidingSpan`] keeps a FIFO of
//! spans with amortized O(1) push, pop, and query. Every sum is taken over
//! hours currently in the queue, never over the whole year.

/// Summary of a contiguous run of hourly deficits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    /// Sum of every deficit in the run.
    pub total: f64,
    /// Largest sum of a run prefix, never below zero.
    pub best_prefix: f64,
    /// Largest sum of a run suffix, never below zero.
    pub best_suffix: f64,
    /// Largest sum of any contiguous stretch, never below zero.
    pub best: f64,
}

impl Span {
    /// Span of a single hour's deficit.
    pub fn point(deficit: f64) -> Self {
        let gain = deficit.max(0.0);
        Self {
            total: deficit,
            best_prefix: gain,
            best_suffix: gain,
            best: gain,
        }
    }

    /// Merges `self` with the run that immediately follows it.
    ///
    /// Associative but not commutative: `self` must be the earlier run.
    pub fn then(self, later: Span) -> Span {
        Span {
            total: self.total + later.total,
            best_prefix: self.best_prefix.max(self.total + later.best_prefix),
            best_suffix: later.best_suffix.max(later.total + self.best_suffix),
            best: self
                .best
                .max(later.best)
                .max(self.best_suffix + later.best_prefix),
        }
    }
}

/// FIFO queue of hourly deficits answering "largest contiguous sum" queries.
///
/// Two-stack layout: new values land on `back`, whose combined span is kept
/// in `back_agg`; when `front` runs dry the back stack is flipped over and
/// each front entry stores the span from itself to the newest flipped value.
#[derive(Debug, Default)]
pub struct SlidingSpan {
    front: Vec<Span>,
    back: Vec<Span>,
    back_agg: Option<Span>,
}

impl SlidingSpan {
    /// Empty queue with room for `capacity` hours on each stack.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            front: Vec::with_capacity(capacity),
            back: Vec::with_capacity(capacity),
            back_agg: None,
        }
    }

    /// Number of queued hours.
    pub fn len(&self) -> usize {
        self.front.len() + self.back.len()
    }

    /// True when no hours are queued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends the newest hour's deficit.
    pub fn push(&mut self, deficit: f64) {
        let span = Span::point(deficit);
        self.back_agg = Some(match self.back_agg {
            Some(agg) => agg.then(span),
            None => span,
        });
        self.back.push(span);
    }

    /// Drops the oldest hour. No-op on an empty queue.
    pub fn pop(&mut self) {
        if self.front.is_empty() {
            while let Some(span) = self.back.pop() {
                let agg = match self.front.last() {
                    Some(&newer) => span.then(newer),
                    None => span,
                };
                self.front.push(agg);
            }
            self.back_agg = None;
        }
        self.front.pop();
    }

    /// Span covering everything currently queued.
    pub fn query(&self) -> Option<Span> {
        match (self.front.last(), self.back_agg) {
            (Some(&front), Some(back)) => Some(front.then(back)),
            (Some(&front), None) => Some(front),
            (None, back) => back,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_best(deficits: &[f64]) -> f64 {
        let mut best = 0.0_f64;
        for k in 0..deficits.len() {
            let mut sum = 0.0;
            for &d in &deficits[k..] {
                sum += d;
                best = best.max(sum);
            }
        }
        best
    }

    fn span_of(deficits: &[f64]) -> Span {
        deficits
            .iter()
            .map(|&d| Span::point(d))
            .reduce(Span::then)
            .unwrap()
    }

    #[test]
    fn point_floors_surplus_at_zero() {
        let s = Span::point(-3.0);
        assert_eq!(s.total, -3.0);
        assert_eq!(s.best, 0.0);
        assert_eq!(Span::point(2.5).best, 2.5);
    }

    #[test]
    fn then_respects_order() {
        // deficit 4 then surplus 3: the peak stays 4
        let s = span_of(&[4.0, -3.0]);
        assert_eq!(s.best, 4.0);
        assert_eq!(s.best_prefix, 4.0);
        assert_eq!(s.best_suffix, 1.0);

        let r = span_of(&[-3.0, 4.0]);
        assert_eq!(r.best_prefix, 1.0);
        assert_eq!(r.best_suffix, 4.0);
    }

    #[test]
    fn then_is_associative() {
        let a = Span::point(2.0);
        let b = Span::point(-1.0);
        let c = Span::point(4.0);
        assert_eq!(a.then(b).then(c), a.then(b.then(c)));
    }

    #[test]
    fn huge_surplus_does_not_absorb_later_deficits() {
        let s = span_of(&[-1e17, 1.0, 1.0, 1.0]);
        assert_eq!(s.best, 3.0);
        let s = span_of(&[-1e308, -1e308, 1.0]);
        assert_eq!(s.best, 1.0);
    }

    #[test]
    fn empty_queue_has_no_span() {
        let mut q = SlidingSpan::default();
        assert!(q.query().is_none());
        q.pop();
        assert!(q.is_empty());
    }

    #[test]
    fn sliding_matches_brute_force() {
        let deficits = [3.0, -2.0, 3.0, -6.0, 7.0, 0.0, -5.0, 7.0, -8.0, 3.0];
        let width = 4;
        let mut q = SlidingSpan::with_capacity(width);
        for &d in &deficits[..width] {
            q.push(d);
        }
        for start in 0..=deficits.len() - width {
            assert_eq!(q.len(), width);
            let got = q.query().map(|s| s.best);
            assert_eq!(got, Some(brute_best(&deficits[start..start + width])));
            q.pop();
            if start + width < deficits.len() {
                q.push(deficits[start + width]);
            }
        }
    }
}
