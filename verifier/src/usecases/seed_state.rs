use chrono::{SecondsFormat, Utc};
use serde_json::{Value, json};

pub const CURRENT_USER_KEY: &str = "nst_current_user";
pub const SYSTEM_SETTINGS_KEY: &str = "nst_system_settings";
pub const TERMS_ACCEPTED_KEY: &str = "nst_terms_accepted";
pub const WELCOME_SEEN_KEY: &str = "nst_has_seen_welcome";
pub const AD_SEEN_KEY: &str = "nst_ad_seen";

/// Privileged account the probe signs in as; admin unlocks the AI Studio card.
pub fn admin_test_user() -> Value {
    json!({
        "id": "admin_123",
        "name": "Admin User",
        "email": "admin@test.com",
        "role": "ADMIN",
        "credits": 9999,
        "isPremium": true,
        "subscriptionTier": "LIFETIME",
        "subscriptionLevel": "ULTRA",
        "createdAt": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "mobile": "1234567890",
        "password": "admin",
        "progress": {},
        "redeemedCodes": []
    })
}

/// Just enough settings for the app to boot without the startup ad.
pub fn minimal_system_settings() -> Value {
    json!({
        "appName": "Test App",
        "adminEmail": "admin@test.com",
        "adminCode": "123456",
        "startupAd": { "enabled": false }
    })
}

/// Script that writes the persisted client state the app reads on boot.
pub fn seed_script(user: &Value, settings: &Value) -> String {
    let local = [
        (CURRENT_USER_KEY, user.to_string()),
        (SYSTEM_SETTINGS_KEY, settings.to_string()),
        (TERMS_ACCEPTED_KEY, "true".to_string()),
        (WELCOME_SEEN_KEY, "true".to_string()),
    ];

    let mut lines: Vec<String> = local
        .iter()
        .map(|(key, value)| format!("localStorage.setItem({}, {});", js_string(key), js_string(value)))
        .collect();
    lines.push(format!(
        "sessionStorage.setItem({}, {});",
        js_string(AD_SEEN_KEY),
        js_string("true")
    ));
    lines.join("\n")
}

// A JSON string literal is a valid JS string literal.
fn js_string(value: &str) -> String {
    Value::String(value.to_string()).to_string()
}
