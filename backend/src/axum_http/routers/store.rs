use crate::{
    axum_http::{auth::AuthUser, error_responses::ErrorResponse},
    usecases::storefront::{StoreError, StorefrontUseCase},
};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use crates::{
    domain::{
        repositories::{
            payment_contacts::PaymentContactClickRecorder,
            store_settings::StoreSettingsRepository,
        },
        value_objects::{enums::tiers::Tier, purchase_selection::PurchaseSelectionRequest},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            payment_contacts::PaymentContactPostgres, store_settings::StoreSettingsPostgres,
        },
    },
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Default, Deserialize)]
pub struct StorefrontQuery {
    tier: Option<String>,
}

impl StorefrontQuery {
    fn tier(&self) -> Tier {
        self.tier.as_deref().map(Tier::from_str).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    pub selection: PurchaseSelectionRequest,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub selection: PurchaseSelectionRequest,
    pub contact_id: String,
}

#[derive(Debug, Serialize)]
pub struct ResetClicksResponse {
    pub reset_contacts: usize,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let settings_repository = StoreSettingsPostgres::new(Arc::clone(&db_pool));
    let contact_repository = PaymentContactPostgres::new(Arc::clone(&db_pool));

    let usecase =
        StorefrontUseCase::new(Arc::new(settings_repository), Arc::new(contact_repository));

    Router::new()
        .route(
            "/",
            get(storefront::<StoreSettingsPostgres, PaymentContactPostgres>),
        )
        .route(
            "/purchase",
            post(initiate_purchase::<StoreSettingsPostgres, PaymentContactPostgres>),
        )
        .route(
            "/checkout",
            post(checkout::<StoreSettingsPostgres, PaymentContactPostgres>),
        )
        .route(
            "/contacts/reset-clicks",
            post(reset_daily_clicks::<StoreSettingsPostgres, PaymentContactPostgres>),
        )
        .with_state(Arc::new(usecase))
}

pub async fn storefront<S, C>(
    State(usecase): State<Arc<StorefrontUseCase<S, C>>>,
    _auth: AuthUser,
    Query(query): Query<StorefrontQuery>,
) -> impl IntoResponse
where
    S: StoreSettingsRepository + Send + Sync,
    C: PaymentContactClickRecorder + Send + Sync,
{
    match usecase.render(query.tier()).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn initiate_purchase<S, C>(
    State(usecase): State<Arc<StorefrontUseCase<S, C>>>,
    AuthUser { user_id, .. }: AuthUser,
    Json(request): Json<PurchaseRequest>,
) -> impl IntoResponse
where
    S: StoreSettingsRepository + Send + Sync,
    C: PaymentContactClickRecorder + Send + Sync,
{
    match usecase.initiate_purchase(request.selection).await {
        Ok(prompt) => (StatusCode::OK, Json(prompt)).into_response(),
        Err(err) => {
            warn!(%user_id, error = %err, "store router: purchase prompt refused");
            err.into_response()
        }
    }
}

pub async fn checkout<S, C>(
    State(usecase): State<Arc<StorefrontUseCase<S, C>>>,
    AuthUser { user_id, .. }: AuthUser,
    Json(request): Json<CheckoutRequest>,
) -> impl IntoResponse
where
    S: StoreSettingsRepository + Send + Sync,
    C: PaymentContactClickRecorder + Send + Sync,
{
    let contact_id = request.contact_id.trim();
    if contact_id.is_empty() {
        return ErrorResponse::new(StatusCode::BAD_REQUEST, "contact_id is required")
            .into_response();
    }

    match usecase
        .confirm_contact(&user_id, request.selection, contact_id)
        .await
    {
        Ok(redirect) => (StatusCode::OK, Json(redirect)).into_response(),
        Err(err) => {
            warn!(%user_id, %contact_id, error = %err, "store router: checkout refused");
            err.into_response()
        }
    }
}

pub async fn reset_daily_clicks<S, C>(
    State(usecase): State<Arc<StorefrontUseCase<S, C>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    S: StoreSettingsRepository + Send + Sync,
    C: PaymentContactClickRecorder + Send + Sync,
{
    if !auth.is_admin() {
        warn!(user_id = %auth.user_id, role = %auth.role, "store router: reset denied");
        return StoreError::Forbidden.into_response();
    }

    match usecase.reset_daily_clicks().await {
        Ok(reset_contacts) => {
            (StatusCode::OK, Json(ResetClicksResponse { reset_contacts })).into_response()
        }
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crates::domain::repositories::{
        payment_contacts::MockPaymentContactClickRecorder,
        store_settings::MockStoreSettingsRepository,
    };

    type MockedUseCase = StorefrontUseCase<MockStoreSettingsRepository, MockPaymentContactClickRecorder>;

    fn usecase(
        settings_repo: MockStoreSettingsRepository,
        click_recorder: MockPaymentContactClickRecorder,
    ) -> State<Arc<MockedUseCase>> {
        State(Arc::new(StorefrontUseCase::new(
            Arc::new(settings_repo),
            Arc::new(click_recorder),
        )))
    }

    fn user(role: &str) -> AuthUser {
        AuthUser {
            user_id: "user-42".to_string(),
            email: None,
            role: role.to_string(),
        }
    }

    #[tokio::test]
    async fn reset_clicks_is_forbidden_for_non_admins() {
        let mut click_recorder = MockPaymentContactClickRecorder::new();
        click_recorder.expect_reset_daily_clicks().never();

        let response = reset_daily_clicks(
            usecase(MockStoreSettingsRepository::new(), click_recorder),
            user("USER"),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn reset_clicks_runs_for_admins() {
        let mut click_recorder = MockPaymentContactClickRecorder::new();
        click_recorder
            .expect_reset_daily_clicks()
            .times(1)
            .returning(|| Box::pin(async { Ok(3) }));

        let response = reset_daily_clicks(
            usecase(MockStoreSettingsRepository::new(), click_recorder),
            user("admin"),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn blank_contact_id_is_a_bad_request() {
        let mut settings_repo = MockStoreSettingsRepository::new();
        settings_repo.expect_load_settings().never();
        let mut click_recorder = MockPaymentContactClickRecorder::new();
        click_recorder.expect_record_click().never();

        let request = CheckoutRequest {
            selection: PurchaseSelectionRequest::Package {
                id: "pkg-1".to_string(),
            },
            contact_id: "   ".to_string(),
        };

        let response = checkout(usecase(settings_repo, click_recorder), user("USER"), Json(request))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_tier_defaults_to_basic() {
        assert_eq!(StorefrontQuery::default().tier(), Tier::Basic);
        assert_eq!(
            StorefrontQuery {
                tier: Some("ultra".to_string())
            }
            .tier(),
            Tier::Ultra
        );
    }

    #[test]
    fn checkout_body_carries_tagged_selection() {
        let request: CheckoutRequest = serde_json::from_str(
            r#"{"selection":{"kind":"plan","id":"monthly","tier":"ULTRA"},"contact_id":"c1"}"#,
        )
        .unwrap();

        assert_eq!(request.contact_id, "c1");
        assert_eq!(
            request.selection,
            PurchaseSelectionRequest::Plan {
                id: "monthly".to_string(),
                tier: Tier::Ultra
            }
        );
    }

    #[test]
    fn unknown_selection_kind_is_rejected() {
        let result = serde_json::from_str::<PurchaseRequest>(
            r#"{"selection":{"kind":"bundle","id":"x"}}"#,
        );
        assert!(result.is_err());
    }
}
