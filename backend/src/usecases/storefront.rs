use std::sync::Arc;

use crates::domain::{
    entities::store_settings::StoreSettingsEntity,
    repositories::{
        payment_contacts::PaymentContactClickRecorder, store_settings::StoreSettingsRepository,
    },
    value_objects::{
        enums::tiers::Tier,
        purchase_selection::{PurchaseSelection, PurchaseSelectionRequest},
        storefront::{
            CheckoutRedirectDto, CreditPackageDto, PlanCardDto, PurchasePromptDto, STORE_NOTICE,
            StorefrontView,
        },
    },
};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::usecases::{
    contact_traffic::contact_options,
    whatsapp_link::{build_whatsapp_link, compose_purchase_message},
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("plan not found")]
    PlanNotFound,
    #[error("credit package not found")]
    PackageNotFound,
    #[error("payment contact not found")]
    ContactNotFound,
    #[error("purchases are disabled: {0}")]
    PaymentsDisabled(String),
    #[error("admin role required")]
    Forbidden,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl StoreError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            StoreError::PlanNotFound
            | StoreError::PackageNotFound
            | StoreError::ContactNotFound => StatusCode::NOT_FOUND,
            StoreError::PaymentsDisabled(_) | StoreError::Forbidden => StatusCode::FORBIDDEN,
            StoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, StoreError>;

/// The coin store screen: catalog rendering, the contact prompt and the
/// WhatsApp hand-off. Settings are read-only here; the only write is the
/// injected click recorder.
pub struct StorefrontUseCase<S, C>
where
    S: StoreSettingsRepository + Send + Sync + 'static,
    C: PaymentContactClickRecorder + Send + Sync + 'static,
{
    settings_repo: Arc<S>,
    click_recorder: Arc<C>,
}

impl<S, C> StorefrontUseCase<S, C>
where
    S: StoreSettingsRepository + Send + Sync + 'static,
    C: PaymentContactClickRecorder + Send + Sync + 'static,
{
    pub fn new(settings_repo: Arc<S>, click_recorder: Arc<C>) -> Self {
        Self {
            settings_repo,
            click_recorder,
        }
    }

    pub async fn render(&self, tier: Tier) -> UseCaseResult<StorefrontView> {
        let settings = self.load_settings().await?;

        if settings.is_locked() {
            info!(%tier, "storefront: store is locked");
            return Ok(StorefrontView::Locked {
                message: settings.locked_message(),
            });
        }

        let plans: Vec<PlanCardDto> = settings
            .subscription_plans_or_empty()
            .iter()
            .map(|plan| PlanCardDto::for_tier(plan, tier))
            .collect();
        let packages: Vec<CreditPackageDto> = settings
            .packages_or_default()
            .into_iter()
            .map(CreditPackageDto::from)
            .collect();

        debug!(
            %tier,
            plan_count = plans.len(),
            package_count = packages.len(),
            "storefront: catalog rendered"
        );

        Ok(StorefrontView::Open {
            tier,
            plans,
            packages,
            notice: STORE_NOTICE.to_string(),
        })
    }

    pub async fn initiate_purchase(
        &self,
        request: PurchaseSelectionRequest,
    ) -> UseCaseResult<PurchasePromptDto> {
        let settings = self.load_open_settings().await?;
        let selection = resolve_selection(&settings, &request)?;
        let contacts = contact_options(&settings.payment_contacts_or_fallback());

        info!(
            item_id = selection.item_id(),
            contact_count = contacts.len(),
            "storefront: contact prompt opened"
        );

        Ok(PurchasePromptDto {
            item_name: selection.item_name().to_string(),
            price: selection.price(),
            selection: request,
            contacts,
        })
    }

    pub async fn confirm_contact(
        &self,
        user_id: &str,
        request: PurchaseSelectionRequest,
        contact_id: &str,
    ) -> UseCaseResult<CheckoutRedirectDto> {
        let settings = self.load_open_settings().await?;
        let selection = resolve_selection(&settings, &request)?;
        let contact = settings
            .payment_contacts_or_fallback()
            .into_iter()
            .find(|contact| contact.id == contact_id)
            .ok_or_else(|| {
                warn!(%user_id, %contact_id, "storefront: unknown payment contact");
                StoreError::ContactNotFound
            })?;

        // The built-in fallback contact has no stored counter.
        if settings.payment_numbers.is_some() {
            self.record_click_best_effort(contact_id).await;
        }

        let message = compose_purchase_message(&selection, user_id);
        let redirect_url = build_whatsapp_link(&contact.number, &message);

        info!(
            %user_id,
            item_id = selection.item_id(),
            tier = ?selection.tier(),
            price = selection.price(),
            %contact_id,
            "storefront: checkout redirect issued"
        );

        Ok(CheckoutRedirectDto { redirect_url })
    }

    pub async fn reset_daily_clicks(&self) -> UseCaseResult<usize> {
        let reset = self
            .click_recorder
            .reset_daily_clicks()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "storefront: failed to reset daily clicks");
                StoreError::Internal(err)
            })?;
        info!(reset, "storefront: daily clicks reset");
        Ok(reset)
    }

    async fn record_click_best_effort(&self, contact_id: &str) {
        match self.click_recorder.record_click(contact_id.to_string()).await {
            Ok(true) => debug!(%contact_id, "storefront: click recorded"),
            Ok(false) => warn!(%contact_id, "storefront: contact vanished before click was recorded"),
            Err(err) => warn!(
                %contact_id,
                db_error = ?err,
                "storefront: failed to record click; continuing with redirect"
            ),
        }
    }

    async fn load_settings(&self) -> UseCaseResult<StoreSettingsEntity> {
        self.settings_repo.load_settings().await.map_err(|err| {
            error!(db_error = ?err, "storefront: failed to load store settings");
            StoreError::Internal(err)
        })
    }

    async fn load_open_settings(&self) -> UseCaseResult<StoreSettingsEntity> {
        let settings = self.load_settings().await?;
        if settings.is_locked() {
            warn!("storefront: purchase attempted while store is locked");
            return Err(StoreError::PaymentsDisabled(settings.locked_message()));
        }
        Ok(settings)
    }
}

fn resolve_selection(
    settings: &StoreSettingsEntity,
    request: &PurchaseSelectionRequest,
) -> UseCaseResult<PurchaseSelection> {
    match request {
        PurchaseSelectionRequest::Plan { id, tier } => settings
            .subscription_plans_or_empty()
            .into_iter()
            .find(|plan| &plan.id == id)
            .map(|plan| PurchaseSelection::Plan { plan, tier: *tier })
            .ok_or(StoreError::PlanNotFound),
        PurchaseSelectionRequest::Package { id } => settings
            .packages_or_default()
            .into_iter()
            .find(|package| &package.id == id)
            .map(PurchaseSelection::Package)
            .ok_or(StoreError::PackageNotFound),
    }
}
