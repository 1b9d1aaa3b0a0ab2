use crate::domain::value_object::Username;

/// Per-user click counters of one room.
///
/// Entries keep the order in which each user first clicked; that order
/// breaks ties when picking the winner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickTally {
    counts: Vec<(Username, u64)>,
}

impl ClickTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one click for `user` and return the user's new total.
    pub fn record(&mut self, user: Username) -> u64 {
        if let Some((_, count)) = self.counts.iter_mut().find(|(name, _)| *name == user) {
            *count += 1;
            return *count;
        }
        self.counts.push((user, 1));
        1
    }

    pub fn count(&self, user: &Username) -> u64 {
        self.counts
            .iter()
            .find(|(name, _)| name == user)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// User with the strictly greatest count.
    ///
    /// Ties go to whoever clicked first. Returns `None` when no user has a
    /// positive count.
    pub fn winner(&self) -> Option<&Username> {
        let mut best: Option<(&Username, u64)> = None;
        for (user, count) in &self.counts {
            if *count > best.map_or(0, |(_, max)| max) {
                best = Some((user, *count));
            }
        }
        best.map(|(user, _)| user)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Username, u64)> {
        self.counts.iter().map(|(user, count)| (user, *count))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(Username, u64)> for ClickTally {
    fn from_iter<I: IntoIterator<Item = (Username, u64)>>(iter: I) -> Self {
        let mut tally = Self::new();
        for (user, count) in iter {
            match tally.counts.iter_mut().find(|(name, _)| *name == user) {
                Some((_, existing)) => *existing += count,
                None => tally.counts.push((user, count)),
            }
        }
        tally
    }
}
