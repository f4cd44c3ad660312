//! The card spending limits shown on the settings page.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error};

/// Spending limits and payment toggles for the user's card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardLimits {
    /// The most that may be spent in a day.
    pub daily_limit: f64,
    /// The most that may be spent in a month. Never less than `daily_limit`.
    pub monthly_limit: f64,
    /// The most that a single transaction may be for.
    pub transaction_limit: f64,
    /// Whether payments abroad are allowed.
    pub international_transactions: bool,
    /// Whether online payments are allowed.
    pub online_transactions: bool,
    /// Whether cash may be withdrawn at ATMs.
    pub atm_withdrawals: bool,
    /// Whether tap-to-pay is allowed.
    pub contactless_payments: bool,
    /// The merchant categories the card may be used for.
    pub merchant_categories: Vec<String>,
}

impl Default for CardLimits {
    fn default() -> Self {
        Self {
            daily_limit: 1000.0,
            monthly_limit: 5000.0,
            transaction_limit: 500.0,
            international_transactions: true,
            online_transactions: true,
            atm_withdrawals: true,
            contactless_payments: true,
            merchant_categories: vec![
                "grocery".to_owned(),
                "gas".to_owned(),
                "restaurants".to_owned(),
            ],
        }
    }
}

impl CardLimits {
    /// Check that no limit is negative and the daily limit fits in the monthly limit.
    ///
    /// # Errors
    ///
    /// Returns an [Error::NegativeLimit] or [Error::DailyLimitAboveMonthly].
    pub fn validate(&self) -> Result<(), Error> {
        if self.daily_limit < 0.0 || self.monthly_limit < 0.0 || self.transaction_limit < 0.0 {
            return Err(Error::NegativeLimit);
        }

        if self.daily_limit > self.monthly_limit {
            return Err(Error::DailyLimitAboveMonthly);
        }

        Ok(())
    }

    /// A copy of these limits with the fields present in `update` replaced.
    pub fn merged(&self, update: CardLimitsUpdate) -> Self {
        Self {
            daily_limit: update.daily_limit.unwrap_or(self.daily_limit),
            monthly_limit: update.monthly_limit.unwrap_or(self.monthly_limit),
            transaction_limit: update.transaction_limit.unwrap_or(self.transaction_limit),
            international_transactions: update
                .international_transactions
                .unwrap_or(self.international_transactions),
            online_transactions: update
                .online_transactions
                .unwrap_or(self.online_transactions),
            atm_withdrawals: update.atm_withdrawals.unwrap_or(self.atm_withdrawals),
            contactless_payments: update
                .contactless_payments
                .unwrap_or(self.contactless_payments),
            merchant_categories: update
                .merchant_categories
                .unwrap_or_else(|| self.merchant_categories.clone()),
        }
    }
}

/// A partial update of [CardLimits].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct CardLimitsUpdate {
    pub daily_limit: Option<f64>,
    pub monthly_limit: Option<f64>,
    pub transaction_limit: Option<f64>,
    pub international_transactions: Option<bool>,
    pub online_transactions: Option<bool>,
    pub atm_withdrawals: Option<bool>,
    pub contactless_payments: Option<bool>,
    pub merchant_categories: Option<Vec<String>>,
}

/// The body returned after the limits were saved.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CardLimitsUpdated {
    /// Always `true`; failures are reported as errors instead.
    pub success: bool,
    /// A confirmation for the settings page.
    pub message: String,
    /// The limits now in effect.
    pub data: CardLimits,
}

/// The state needed to read and update the card limits.
#[derive(Debug, Clone)]
pub struct CardLimitsState {
    /// The limits currently in effect.
    pub card_limits: Arc<Mutex<CardLimits>>,
}

impl FromRef<AppState> for CardLimitsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            card_limits: state.card_limits.clone(),
        }
    }
}

/// Get the card limits currently in effect.
pub async fn get_card_limits(
    State(state): State<CardLimitsState>,
) -> Result<Json<CardLimits>, Error> {
    let card_limits = state
        .card_limits
        .lock()
        .map_err(|_| Error::LockError("card limits"))?
        .clone();

    Ok(Json(card_limits))
}

/// Merge the supplied fields into the card limits.
///
/// The stored limits are only replaced if the merged limits are valid.
///
/// # Errors
///
/// Returns an:
/// - [Error::InvalidRequest] if the body is malformed.
/// - [Error::NegativeLimit] or [Error::DailyLimitAboveMonthly] if the merged limits are invalid.
pub async fn put_card_limits(
    State(state): State<CardLimitsState>,
    body: Result<Json<CardLimitsUpdate>, JsonRejection>,
) -> Result<Json<CardLimitsUpdated>, Error> {
    let Json(update) = body.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    let mut card_limits = state
        .card_limits
        .lock()
        .map_err(|_| Error::LockError("card limits"))?;

    let merged = card_limits.merged(update);
    merged.validate()?;
    *card_limits = merged.clone();

    tracing::info!("Updated card limits: {merged:?}");

    Ok(Json(CardLimitsUpdated {
        success: true,
        message: "Card limitations updated successfully".to_owned(),
        data: merged,
    }))
}
