use crates::domain::{
    entities::payment_contacts::PaymentContactEntity,
    value_objects::storefront::ContactOptionDto,
};

/// Contacts below this share of today's clicks are shown as fast responders.
pub const LOW_TRAFFIC_THRESHOLD_PERCENT: u32 = 30;

/// Share of `total_clicks` owned by `clicks`, rounded half up to a whole percent.
/// A zero total is treated as 1 so an idle roster reads 0% everywhere.
pub fn traffic_percent(clicks: i32, total_clicks: i64) -> u32 {
    let clicks = i64::from(clicks.max(0));
    let total = total_clicks.max(1);
    let percent = (clicks * 200 + total) / (total * 2);
    u32::try_from(percent).unwrap_or(u32::MAX)
}

pub fn contact_options(contacts: &[PaymentContactEntity]) -> Vec<ContactOptionDto> {
    let total_clicks: i64 = contacts
        .iter()
        .map(|contact| i64::from(contact.daily_clicks.max(0)))
        .sum();

    contacts
        .iter()
        .map(|contact| {
            let percent = traffic_percent(contact.daily_clicks, total_clicks);
            ContactOptionDto::new(contact, percent, percent < LOW_TRAFFIC_THRESHOLD_PERCENT)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(id: &str, daily_clicks: i32) -> PaymentContactEntity {
        PaymentContactEntity {
            id: id.to_string(),
            name: format!("Admin {id}"),
            number: "9000000000".to_string(),
            daily_clicks,
        }
    }

    #[test]
    fn zero_total_yields_zero_percent_for_everyone() {
        let options = contact_options(&[contact("a", 0), contact("b", 0), contact("c", 0)]);

        assert!(options.iter().all(|o| o.traffic_percent == 0));
        assert!(options.iter().all(|o| o.is_low_traffic));
    }

    #[test]
    fn shares_are_rounded_to_nearest_percent() {
        let options = contact_options(&[contact("a", 1), contact("b", 2)]);

        assert_eq!(options[0].traffic_percent, 33);
        assert_eq!(options[1].traffic_percent, 67);
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(traffic_percent(1, 8), 13);
        assert_eq!(traffic_percent(1, 200), 1);
    }

    #[test]
    fn thirty_percent_is_not_low_traffic() {
        let options = contact_options(&[contact("a", 3), contact("b", 7)]);

        assert_eq!(options[0].traffic_percent, 30);
        assert!(!options[0].is_low_traffic);
        assert_eq!(options[1].traffic_percent, 70);
        assert!(!options[1].is_low_traffic);
    }

    #[test]
    fn lightly_used_contact_is_low_traffic() {
        let options = contact_options(&[contact("a", 1), contact("b", 9)]);

        assert_eq!(options[0].traffic_percent, 10);
        assert!(options[0].is_low_traffic);
        assert!(!options[1].is_low_traffic);
    }

    #[test]
    fn negative_counters_are_treated_as_zero() {
        let options = contact_options(&[contact("a", -5), contact("b", 5)]);

        assert_eq!(options[0].traffic_percent, 0);
        assert_eq!(options[1].traffic_percent, 100);
    }
}
