/// Countdown state machine of one room: `NotStarted -> Running -> Expired`.
///
/// A countdown starts at most once and is never reset, so a room runs a
/// single round for the lifetime of the process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Countdown {
    #[default]
    NotStarted,
    Running {
        seconds_remaining: u32,
    },
    Expired,
}

/// Outcome of advancing a countdown by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    /// The countdown announced this value and decremented it.
    Tick(u32),
    /// The countdown reached zero on this step and is now expired.
    Expired,
    /// The countdown is not running; nothing happened.
    Idle,
}

impl Countdown {
    /// Move from `NotStarted` to `Running`. Returns `false` if the
    /// countdown was already started.
    pub fn start(&mut self, seconds: u32) -> bool {
        match self {
            Self::NotStarted => {
                *self = Self::Running {
                    seconds_remaining: seconds,
                };
                true
            }
            Self::Running { .. } | Self::Expired => false,
        }
    }

    /// Advance one tick.
    ///
    /// Running with `n > 0` seconds left yields `Tick(n)` and leaves `n - 1`;
    /// running with nothing left expires.
    pub fn tick(&mut self) -> CountdownStep {
        match *self {
            Self::Running {
                seconds_remaining: 0,
            } => {
                *self = Self::Expired;
                CountdownStep::Expired
            }
            Self::Running { seconds_remaining } => {
                *self = Self::Running {
                    seconds_remaining: seconds_remaining - 1,
                };
                CountdownStep::Tick(seconds_remaining)
            }
            Self::NotStarted | Self::Expired => CountdownStep::Idle,
        }
    }

    /// Seconds left; zero unless running.
    pub fn seconds_remaining(&self) -> u32 {
        match self {
            Self::Running { seconds_remaining } => *seconds_remaining,
            Self::NotStarted | Self::Expired => 0,
        }
    }

    pub fn is_started(&self) -> bool {
        !matches!(self, Self::NotStarted)
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }
}
