use super::config::{AlertConfig, ServiceContext};
use anyhow::{Result, anyhow};
use chrono::{SecondsFormat, Utc};
use reqwest::Client;
use serde_json::json;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber, warn};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use url::Url;

const DISCORD_CONTENT_LIMIT: usize = 2000;
const QUEUE_CAPACITY: usize = 256;
// Delivery failures are logged under this target and must not be re-alerted.
const DELIVERY_TARGET: &str = module_path!();

/// Forwards events at or above `min_level` to a Discord webhook.
/// Delivery runs on a background task so logging never blocks a request.
pub(crate) struct DiscordAlertLayer {
    tx: mpsc::Sender<String>,
    service_context: ServiceContext,
    min_level: Level,
}

impl DiscordAlertLayer {
    pub(crate) fn spawn(config: &AlertConfig, service_context: ServiceContext) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(3))
            .build()?;
        let webhook_url = config.webhook_url.clone();
        let (tx, mut rx) = mpsc::channel::<String>(QUEUE_CAPACITY);

        tokio::spawn(async move {
            while let Some(content) = rx.recv().await {
                if let Err(error) = post_webhook(&client, &webhook_url, content).await {
                    warn!(error = %error, "observability: discord alert failed");
                }
            }
        });

        Ok(Self {
            tx,
            service_context,
            min_level: config.min_level,
        })
    }
}

async fn post_webhook(client: &Client, webhook_url: &Url, content: String) -> Result<()> {
    let response = client
        .post(webhook_url.clone())
        .json(&json!({ "content": content }))
        .send()
        .await
        // reqwest errors include the URL, which carries the webhook token.
        .map_err(|err| anyhow!("discord webhook request failed (timeout: {})", err.is_timeout()))?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "discord webhook returned status {}",
            response.status()
        ));
    }
    Ok(())
}

#[derive(Default)]
struct FieldCollector {
    message: Option<String>,
    fields: BTreeMap<String, String>,
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.insert(field, format!("{value:?}"));
    }
}

impl FieldCollector {
    fn insert(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = Some(value.trim_matches('"').to_string());
            return;
        }
        self.fields
            .insert(field.name().to_string(), redact(field.name(), value));
    }
}

impl<S> Layer<S> for DiscordAlertLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if *metadata.level() > self.min_level || metadata.target().starts_with(DELIVERY_TARGET) {
            return;
        }

        let mut collector = FieldCollector::default();
        event.record(&mut collector);

        let content = format_alert(
            &self.service_context,
            metadata.level(),
            metadata.target(),
            collector.message.as_deref(),
            &collector.fields,
        );

        // Dropped when the queue is full; the fmt layer still has the event.
        let _ = self.tx.try_send(content);
    }
}

fn format_alert(
    service: &ServiceContext,
    level: &Level,
    target: &str,
    message: Option<&str>,
    fields: &BTreeMap<String, String>,
) -> String {
    let mut lines = vec![
        format!(
            "**{}** `{}` `{}` `{}`",
            service.service_name, service.environment, service.component, level
        ),
        format!(
            "`{}` `{}`",
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            target
        ),
    ];

    if let Some(message) = message.filter(|m| !m.trim().is_empty()) {
        lines.push(format!("> {}", message.trim()));
    }
    for (key, value) in fields {
        lines.push(format!("- `{}` = `{}`", key, value));
    }

    truncate(lines.join("\n"))
}

fn truncate(content: String) -> String {
    const SUFFIX: &str = "\n... (truncated)";
    if content.chars().count() <= DISCORD_CONTENT_LIMIT {
        return content;
    }
    let keep = DISCORD_CONTENT_LIMIT - SUFFIX.len();
    let mut truncated: String = content.chars().take(keep).collect();
    truncated.push_str(SUFFIX);
    truncated
}

fn redact(field_name: &str, value: String) -> String {
    let field = field_name.to_ascii_lowercase();
    let sensitive = ["webhook", "secret", "password", "token", "authorization", "number", "phone"]
        .iter()
        .any(|needle| field.contains(needle));
    if sensitive {
        "[REDACTED]".to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ServiceContext {
        ServiceContext {
            service_name: "nst-store".to_string(),
            environment: "staging".to_string(),
            component: "backend".to_string(),
        }
    }

    #[test]
    fn contact_numbers_are_redacted() {
        assert_eq!(redact("contact_number", "8227070298".to_string()), "[REDACTED]");
        assert_eq!(redact("contact_id", "c1".to_string()), "c1");
    }

    #[test]
    fn alert_includes_message_and_fields() {
        let mut fields = BTreeMap::new();
        fields.insert("contact_id".to_string(), "c1".to_string());

        let content = format_alert(
            &service(),
            &Level::ERROR,
            "backend::usecases::storefront",
            Some("storefront: failed to load settings"),
            &fields,
        );

        assert!(content.starts_with("**nst-store** `staging` `backend` `ERROR`"));
        assert!(content.contains("> storefront: failed to load settings"));
        assert!(content.contains("- `contact_id` = `c1`"));
    }

    #[test]
    fn long_alerts_are_truncated_to_discord_limit() {
        let content = truncate("x".repeat(5000));
        assert_eq!(content.chars().count(), DISCORD_CONTENT_LIMIT);
        assert!(content.ends_with("(truncated)"));
    }

    #[test]
    fn delivery_failures_are_not_forwarded_again() {
        use tracing_subscriber::layer::SubscriberExt;

        let (tx, mut rx) = mpsc::channel::<String>(8);
        let layer = DiscordAlertLayer {
            tx,
            service_context: service(),
            min_level: Level::WARN,
        };
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            warn!(error = "status 429", "observability: discord alert failed");
            warn!(target: "backend::usecases::storefront", "storefront: failed to record click");
        });

        let forwarded = rx.try_recv().unwrap();
        assert!(forwarded.contains("storefront: failed to record click"));
        assert!(rx.try_recv().is_err());
    }
}
