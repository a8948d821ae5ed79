//! Port for traveller journey plans.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{JourneyPlan, JourneyPlanUpdate, NewJourneyPlan, UserId};

use super::StoreError;

/// CRUD access to [`JourneyPlan`] records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JourneyPlanStore: Send + Sync {
    /// Plans owned by `user_id`.
    async fn plans_for_user(&self, user_id: &UserId) -> Result<Vec<JourneyPlan>, StoreError>;

    /// A single plan by id, whoever owns it.
    async fn find_journey_plan(&self, id: Uuid) -> Result<Option<JourneyPlan>, StoreError>;

    /// Insert a plan with a fresh id; both timestamps are set to now.
    async fn create_journey_plan(
        &self,
        plan: &NewJourneyPlan,
    ) -> Result<JourneyPlan, StoreError>;

    /// Merge `update` into an existing plan.
    ///
    /// Returns `None` when no plan has this id; an update never creates one.
    async fn update_journey_plan(
        &self,
        id: Uuid,
        update: JourneyPlanUpdate,
    ) -> Result<Option<JourneyPlan>, StoreError>;

    /// Remove a plan, reporting whether one existed.
    async fn delete_journey_plan(&self, id: Uuid) -> Result<bool, StoreError>;
}
