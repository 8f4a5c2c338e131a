//! Blink patterns and pattern selection
//!
//! The selector is a pure function of the sampled connectivity and the
//! long-press countdown, re-evaluated on every iteration.

use crate::blink::Phase;

/// Network connectivity as reported by the provisioning subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// Not connected and no configuration portal running
    #[default]
    Disconnected,
    /// Configuration access point is up, waiting for credentials
    Configuring,
    /// Joined a network
    Connected,
}

/// On/off timing of a blink pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkPattern {
    pub on_ms: u32,
    pub off_ms: u32,
}

impl BlinkPattern {
    pub const fn new(on_ms: u32, off_ms: u32) -> Self {
        Self { on_ms, off_ms }
    }

    /// Pattern with equal on and off time
    pub const fn symmetric(ms: u32) -> Self {
        Self::new(ms, ms)
    }

    /// Duration of the given phase
    pub const fn duration(self, phase: Phase) -> u32 {
        match phase {
            Phase::On => self.on_ms,
            Phase::Off => self.off_ms,
        }
    }

    /// Length of one full on/off cycle
    pub const fn period_ms(self) -> u32 {
        self.on_ms.saturating_add(self.off_ms)
    }
}

/// Patterns for every indicator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternSet {
    /// Rapid blink while the reset button is being held
    pub reset_countdown: BlinkPattern,
    /// Configuration portal is running
    pub access_point: BlinkPattern,
    pub connected: BlinkPattern,
    pub disconnected: BlinkPattern,
}

impl PatternSet {
    pub const fn new() -> Self {
        Self {
            reset_countdown: BlinkPattern::symmetric(100),
            access_point: BlinkPattern::new(250, 750),
            connected: BlinkPattern::symmetric(1000),
            disconnected: BlinkPattern::symmetric(500),
        }
    }

    #[must_use]
    pub const fn with_connected(mut self, pattern: BlinkPattern) -> Self {
        self.connected = pattern;
        self
    }

    #[must_use]
    pub const fn with_disconnected(mut self, pattern: BlinkPattern) -> Self {
        self.disconnected = pattern;
        self
    }

    #[must_use]
    pub const fn with_access_point(mut self, pattern: BlinkPattern) -> Self {
        self.access_point = pattern;
        self
    }

    #[must_use]
    pub const fn with_reset_countdown(mut self, pattern: BlinkPattern) -> Self {
        self.reset_countdown = pattern;
        self
    }

    /// Select the active pattern
    ///
    /// Priority: reset countdown, then access point, then connected,
    /// then disconnected. `countdown_active` is true while the reset
    /// button is held and the long-press threshold has not been reached.
    pub const fn select(&self, connectivity: Connectivity, countdown_active: bool) -> BlinkPattern {
        if countdown_active {
            return self.reset_countdown;
        }
        match connectivity {
            Connectivity::Configuring => self.access_point,
            Connectivity::Connected => self.connected,
            Connectivity::Disconnected => self.disconnected,
        }
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Connectivity; 3] = [
        Connectivity::Disconnected,
        Connectivity::Configuring,
        Connectivity::Connected,
    ];

    #[test]
    fn countdown_wins_over_any_connectivity() {
        let patterns = PatternSet::new();
        for connectivity in ALL {
            assert_eq!(
                patterns.select(connectivity, true),
                BlinkPattern::symmetric(100)
            );
        }
    }

    #[test]
    fn connectivity_patterns() {
        let patterns = PatternSet::new();
        assert_eq!(
            patterns.select(Connectivity::Configuring, false),
            BlinkPattern::new(250, 750)
        );
        assert_eq!(
            patterns.select(Connectivity::Connected, false),
            BlinkPattern::symmetric(1000)
        );
        assert_eq!(
            patterns.select(Connectivity::Disconnected, false),
            BlinkPattern::symmetric(500)
        );
    }

    #[test]
    fn builder_overrides_single_pattern() {
        let patterns = PatternSet::new().with_connected(BlinkPattern::symmetric(500));
        assert_eq!(patterns.connected, BlinkPattern::symmetric(500));
        assert_eq!(patterns.disconnected, BlinkPattern::symmetric(500));
        assert_eq!(patterns.access_point, PatternSet::new().access_point);
    }

    #[test]
    fn phase_durations() {
        let ap = BlinkPattern::new(250, 750);
        assert_eq!(ap.duration(Phase::On), 250);
        assert_eq!(ap.duration(Phase::Off), 750);
        assert_eq!(ap.period_ms(), 1000);
    }
}
