use crate::models::Market;

/// Detect which market a query refers to, if any.
///
/// Substring rule, `dam` checked before `rtm`; `None` means all markets.
pub fn extract_market(query: &str) -> Option<Market> {
    if query.contains("dam") {
        Some(Market::Dam)
    } else if query.contains("rtm") {
        Some(Market::Rtm)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dam_detected() {
        assert_eq!(extract_market("average price for dam last week"), Some(Market::Dam));
    }

    #[test]
    fn test_rtm_detected() {
        assert_eq!(extract_market("total volume for rtm yesterday"), Some(Market::Rtm));
    }

    #[test]
    fn test_dam_beats_rtm() {
        assert_eq!(extract_market("compare dam vs rtm"), Some(Market::Dam));
    }

    #[test]
    fn test_no_market() {
        assert_eq!(extract_market("show me prices"), None);
    }
}
