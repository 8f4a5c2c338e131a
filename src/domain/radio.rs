use crate::domain::entity::WifiCredentials;

/// Requests for the radio control task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RadioCommand {
    Connect(WifiCredentials),
    StartAccessPoint,
    StopAccessPoint,
}

/// Interfaces the radio should currently run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RadioPlan {
    pub station: Option<WifiCredentials>,
    pub access_point: bool,
}

impl RadioPlan {
    /// Fold a command into the plan. Returns `false` when the plan is
    /// unchanged and the radio can keep running as is.
    pub fn apply(&mut self, command: RadioCommand) -> bool {
        let previous = self.clone();
        match command {
            RadioCommand::Connect(credentials) => self.station = Some(credentials),
            RadioCommand::StartAccessPoint => self.access_point = true,
            RadioCommand::StopAccessPoint => self.access_point = false,
        }
        *self != previous
    }

    pub fn is_idle(&self) -> bool {
        self.station.is_none() && !self.access_point
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testing::credentials;

    fn home() -> WifiCredentials {
        credentials("home", "secret")
    }

    #[test]
    fn fresh_plan_is_idle() {
        assert!(RadioPlan::default().is_idle());
    }

    #[test]
    fn repeated_connect_leaves_plan_unchanged() {
        let mut plan = RadioPlan::default();
        assert!(plan.apply(RadioCommand::Connect(home())));
        assert!(!plan.apply(RadioCommand::Connect(home())));
        assert_eq!(plan.station, Some(home()));
    }

    #[test]
    fn new_network_changes_plan() {
        let mut plan = RadioPlan::default();
        plan.apply(RadioCommand::Connect(home()));
        let office = credentials("office", "");
        assert!(plan.apply(RadioCommand::Connect(office.clone())));
        assert_eq!(plan.station, Some(office));
    }

    #[test]
    fn portal_round_trip_changes_plan_once_per_edge() {
        let mut plan = RadioPlan::default();
        plan.apply(RadioCommand::Connect(home()));

        assert!(plan.apply(RadioCommand::StartAccessPoint));
        assert!(!plan.apply(RadioCommand::StartAccessPoint));
        assert!(plan.apply(RadioCommand::StopAccessPoint));
        assert!(!plan.apply(RadioCommand::Connect(home())));
        assert_eq!(
            plan,
            RadioPlan {
                station: Some(home()),
                access_point: false,
            }
        );
    }

    #[test]
    fn stopping_access_point_without_station_goes_idle() {
        let mut plan = RadioPlan::default();
        plan.apply(RadioCommand::StartAccessPoint);
        assert!(!plan.is_idle());
        assert!(plan.apply(RadioCommand::StopAccessPoint));
        assert!(plan.is_idle());
    }
}
