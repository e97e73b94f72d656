use anyhow::{anyhow, Result};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::OnboardingCategory;
use crate::database::entities::{onboarding_options, users};

/// A user's answers to the onboarding questions; unanswered questions are `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingAnswers {
    pub industry: Option<String>,
    pub team_size: Option<String>,
    pub role: Option<String>,
    pub app_usage: Option<String>,
}

impl OnboardingAnswers {
    fn entries(&self) -> [(OnboardingCategory, Option<&str>); 4] {
        [
            (OnboardingCategory::Industry, self.industry.as_deref()),
            (OnboardingCategory::TeamSize, self.team_size.as_deref()),
            (OnboardingCategory::Role, self.role.as_deref()),
            (OnboardingCategory::AppUsage, self.app_usage.as_deref()),
        ]
    }

    /// Check every given answer against the catalog.
    pub fn validate(&self) -> Result<()> {
        for (category, answer) in self.entries() {
            if let Some(answer) = answer {
                if !category.contains(answer) {
                    return Err(anyhow!("'{}' is not a valid {} answer", answer, category));
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct OnboardingService {
    db: DatabaseConnection,
}

impl OnboardingService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_onboarding_options(
        &self,
        category: OnboardingCategory,
    ) -> Result<Vec<onboarding_options::Model>> {
        let options = onboarding_options::Entity::find()
            .filter(onboarding_options::Column::Category.eq(category.as_str()))
            .order_by_asc(onboarding_options::Column::Position)
            .all(&self.db)
            .await?;
        Ok(options)
    }

    /// Store the answers on the user and mark them onboarded.
    pub async fn record_onboarding_answers(
        &self,
        user_id: i32,
        answers: &OnboardingAnswers,
    ) -> Result<users::Model> {
        answers.validate()?;

        let user = users::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow!("User {} not found", user_id))?;

        let now = Utc::now();
        let mut user: users::ActiveModel = user.into();
        user.industry = Set(answers.industry.clone());
        user.team_size = Set(answers.team_size.clone());
        user.role = Set(answers.role.clone());
        user.app_usage = Set(answers.app_usage.clone());
        user.onboarded_at = Set(Some(now));
        user.updated_at = Set(now);
        let user = user.update(&self.db).await?;

        info!("Recorded onboarding answers for user {}", user.id);
        Ok(user)
    }
}
