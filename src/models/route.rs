use serde::{Deserialize, Serialize};

crate::define_id_type!(RouteId);

/// One directed hop of a route's physical flight path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteHop {
    pub from: String,
    pub to: String,
}

/// An origin/destination pair tickets are sold on. A marketed sector may span
/// several operational hops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketedSector {
    pub from: String,
    pub to: String,
}

/// A scheduled passenger route: the multi-stop path actually flown plus the
/// sectors sold on it.
///
/// A usable route has a non-empty `operational_routing` in which every hop
/// departs from the previous hop's destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub name: String,
    #[serde(default)]
    pub operational_routing: Vec<RouteHop>,
    #[serde(default)]
    pub marketed_sectors: Vec<MarketedSector>,
    #[serde(default)]
    pub notes: String,
}

impl Route {
    /// Origin of the first hop.
    pub fn first_origin(&self) -> Option<&str> {
        self.operational_routing.first().map(|h| h.from.as_str())
    }

    /// Destination of the final hop.
    pub fn last_destination(&self) -> Option<&str> {
        self.operational_routing.last().map(|h| h.to.as_str())
    }

    /// The hop departing from `position`, if the routing contains one.
    pub fn hop_from(&self, position: &str) -> Option<&RouteHop> {
        self.operational_routing.iter().find(|h| h.from == position)
    }

    /// Compact label of the full path, e.g. `"FBM-KWZ-GMA"`.
    pub fn routing_label(&self) -> String {
        let mut label = String::new();
        for (i, hop) in self.operational_routing.iter().enumerate() {
            if i == 0 {
                label.push_str(&hop.from);
            }
            label.push('-');
            label.push_str(&hop.to);
        }
        label
    }

    /// True when the routing is non-empty and every hop chains onto the
    /// previous one.
    pub fn routing_is_valid(&self) -> bool {
        if self.operational_routing.is_empty() {
            return false;
        }
        self.operational_routing
            .windows(2)
            .all(|w| w[0].to == w[1].from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hop(from: &str, to: &str) -> RouteHop {
        RouteHop {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    fn shuttle() -> Route {
        Route {
            id: RouteId::generate(),
            name: "FBM-KWZ".to_string(),
            operational_routing: vec![hop("FBM", "KWZ"), hop("KWZ", "GMA")],
            marketed_sectors: vec![MarketedSector {
                from: "FBM".to_string(),
                to: "GMA".to_string(),
            }],
            notes: String::new(),
        }
    }

    #[test]
    fn test_endpoints() {
        let r = shuttle();
        assert_eq!(r.first_origin(), Some("FBM"));
        assert_eq!(r.last_destination(), Some("GMA"));
    }

    #[test]
    fn test_hop_from() {
        let r = shuttle();
        assert_eq!(r.hop_from("KWZ").map(|h| h.to.as_str()), Some("GMA"));
        assert!(r.hop_from("XYZ").is_none());
    }

    #[test]
    fn test_routing_label() {
        assert_eq!(shuttle().routing_label(), "FBM-KWZ-GMA");
    }

    #[test]
    fn test_routing_validity() {
        let mut r = shuttle();
        assert!(r.routing_is_valid());

        r.operational_routing = vec![hop("FBM", "KWZ"), hop("GMA", "FBM")];
        assert!(!r.routing_is_valid());

        r.operational_routing.clear();
        assert!(!r.routing_is_valid());
    }
}
