use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::aircraft::AircraftId;
use super::time::TimeOfDay;

crate::define_id_type!(CharterId);

/// Lifecycle of a client-contracted flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharterStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl Default for CharterStatus {
    fn default() -> Self {
        CharterStatus::Pending
    }
}

impl CharterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CharterStatus::Pending => "pending",
            CharterStatus::Confirmed => "confirmed",
            CharterStatus::Cancelled => "cancelled",
            CharterStatus::Completed => "completed",
        }
    }
}

impl std::str::FromStr for CharterStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(CharterStatus::Pending),
            "confirmed" => Ok(CharterStatus::Confirmed),
            "cancelled" => Ok(CharterStatus::Cancelled),
            "completed" => Ok(CharterStatus::Completed),
            other => Err(format!("unknown charter status: {other:?}")),
        }
    }
}

/// A client-contracted flight, independent of the pax pool: it carries its
/// own passenger count and is overlaid on an aircraft's day but never
/// consumes a route pool. Cancelled charters are excluded from every derived
/// board view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Charter {
    pub id: CharterId,
    pub client: String,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub dep_time: Option<TimeOfDay>,
    #[serde(default)]
    pub arr_time: Option<TimeOfDay>,
    #[serde(default)]
    pub pax: u32,
    /// Unassigned ("TBD") until dispatch picks an airframe.
    #[serde(default)]
    pub aircraft_id: Option<AircraftId>,
    #[serde(default)]
    pub status: CharterStatus,
    #[serde(default)]
    pub notes: String,
}

impl Charter {
    pub fn is_cancelled(&self) -> bool {
        self.status == CharterStatus::Cancelled
    }

    /// True when this charter sits on the given aircraft's timeline for the
    /// given day.
    pub fn overlays(&self, aircraft_id: AircraftId, date: NaiveDate) -> bool {
        self.aircraft_id == Some(aircraft_id) && self.date == date && !self.is_cancelled()
    }
}

/// List filters matching the dispatch desk's charter views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharterFilter {
    /// Dated today or later and not cancelled.
    Upcoming,
    Status(CharterStatus),
    All,
}

/// Filter and date-sort a charter list.
pub fn filter_charters<'a>(
    charters: &'a [Charter],
    filter: CharterFilter,
    today: NaiveDate,
) -> Vec<&'a Charter> {
    let mut out: Vec<&Charter> = charters
        .iter()
        .filter(|c| match filter {
            CharterFilter::Upcoming => c.date >= today && !c.is_cancelled(),
            CharterFilter::Status(s) => c.status == s,
            CharterFilter::All => true,
        })
        .collect();
    out.sort_by_key(|c| c.date);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charter(date: NaiveDate, status: CharterStatus) -> Charter {
        Charter {
            id: CharterId::generate(),
            client: "MinCo".to_string(),
            from: Some("FBM".to_string()),
            to: Some("KWZ".to_string()),
            date,
            dep_time: None,
            arr_time: None,
            pax: 6,
            aircraft_id: None,
            status,
            notes: String::new(),
        }
    }

    #[test]
    fn test_upcoming_excludes_past_and_cancelled() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let yesterday = today.pred_opt().unwrap();
        let tomorrow = today.succ_opt().unwrap();

        let charters = vec![
            charter(yesterday, CharterStatus::Confirmed),
            charter(tomorrow, CharterStatus::Cancelled),
            charter(tomorrow, CharterStatus::Pending),
            charter(today, CharterStatus::Confirmed),
        ];

        let upcoming = filter_charters(&charters, CharterFilter::Upcoming, today);
        assert_eq!(upcoming.len(), 2);
        // Date-sorted: today's confirmed charter first.
        assert_eq!(upcoming[0].date, today);
        assert_eq!(upcoming[1].date, tomorrow);
    }

    #[test]
    fn test_status_filter() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let charters = vec![
            charter(today, CharterStatus::Confirmed),
            charter(today, CharterStatus::Pending),
        ];
        let confirmed = filter_charters(
            &charters,
            CharterFilter::Status(CharterStatus::Confirmed),
            today,
        );
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].status, CharterStatus::Confirmed);
    }

    #[test]
    fn test_overlays_requires_assignment_date_and_liveness() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let ac = AircraftId::generate();

        let mut c = charter(date, CharterStatus::Confirmed);
        c.aircraft_id = Some(ac);
        assert!(c.overlays(ac, date));
        assert!(!c.overlays(ac, date.succ_opt().unwrap()));
        assert!(!c.overlays(AircraftId::generate(), date));

        c.status = CharterStatus::Cancelled;
        assert!(!c.overlays(ac, date));
    }
}
