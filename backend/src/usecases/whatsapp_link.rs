use crates::domain::value_objects::purchase_selection::PurchaseSelection;

const WHATSAPP_BASE_URL: &str = "https://wa.me";
const COUNTRY_CODE: &str = "91";

/// Message pre-filled in the admin chat. The admin reads it to confirm the
/// item, the amount and who to credit.
pub fn compose_purchase_message(selection: &PurchaseSelection, user_id: &str) -> String {
    let item = match selection.tier() {
        Some(tier) => format!("{} ({})", selection.item_name(), tier),
        None => selection.item_name().to_string(),
    };

    format!(
        "Hello Admin, I want to buy:\n\nItem: {}\nPrice: ₹{}\nUser ID: {}\nDetails: {}\n\nPlease share payment details.",
        item,
        selection.price(),
        user_id,
        selection.summary()
    )
}

/// `https://wa.me/91<number>?text=<message>`. Separators in the stored number
/// are dropped because wa.me only accepts digits.
pub fn build_whatsapp_link(number: &str, message: &str) -> String {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    format!(
        "{}/{}{}?text={}",
        WHATSAPP_BASE_URL,
        COUNTRY_CODE,
        digits,
        urlencoding::encode(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crates::domain::{
        entities::{
            credit_packages::CreditPackageEntity, subscription_plans::SubscriptionPlanEntity,
        },
        value_objects::enums::tiers::Tier,
    };

    fn hundred_credits() -> PurchaseSelection {
        PurchaseSelection::Package(CreditPackageEntity {
            id: "pkg-1".to_string(),
            name: "100 Credits".to_string(),
            credits: 100,
            price: 10,
        })
    }

    fn monthly(tier: Tier) -> PurchaseSelection {
        PurchaseSelection::Plan {
            plan: SubscriptionPlanEntity {
                id: "monthly".to_string(),
                name: "Monthly".to_string(),
                duration: "1 Month".to_string(),
                basic_price: 99,
                basic_original_price: Some(149),
                ultra_price: 199,
                ultra_original_price: None,
                features: vec!["Doubt Support".to_string()],
                popular: true,
            },
            tier,
        }
    }

    #[test]
    fn package_message_lists_credits_price_and_user() {
        let message = compose_purchase_message(&hundred_credits(), "user-42");

        assert_eq!(
            message,
            "Hello Admin, I want to buy:\n\nItem: 100 Credits\nPrice: ₹10\nUser ID: user-42\nDetails: 100 Credits\n\nPlease share payment details."
        );
    }

    #[test]
    fn ultra_plan_message_mentions_tier_and_media_summary() {
        let message = compose_purchase_message(&monthly(Tier::Ultra), "user-42");

        assert!(message.contains("Item: Monthly (ULTRA)\n"));
        assert!(message.contains("Price: ₹199\n"));
        assert!(message.contains("Details: PDF + Videos\n"));
    }

    #[test]
    fn basic_plan_message_uses_basic_price_and_summary() {
        let message = compose_purchase_message(&monthly(Tier::Basic), "user-42");

        assert!(message.contains("Item: Monthly (BASIC)\n"));
        assert!(message.contains("Price: ₹99\n"));
        assert!(message.contains("Details: MCQ + Notes\n"));
    }

    #[test]
    fn link_targets_indian_number_with_encoded_text() {
        let message = compose_purchase_message(&hundred_credits(), "user-42");
        let link = build_whatsapp_link("8227070298", &message);

        assert!(link.starts_with("https://wa.me/918227070298?text="));
        let encoded = link.split_once("?text=").unwrap().1;
        assert!(!encoded.contains(' '));
        assert!(!encoded.contains('\n'));

        let decoded = urlencoding::decode(encoded).unwrap();
        assert!(decoded.contains("100"));
        assert!(decoded.contains("₹10"));
        assert!(!decoded.contains("Credits: 100"));
        assert_eq!(decoded, message);
    }

    #[test]
    fn number_separators_are_stripped() {
        let link = build_whatsapp_link(" 82270-70298 ", "hi");
        assert_eq!(link, "https://wa.me/918227070298?text=hi");
    }
}
