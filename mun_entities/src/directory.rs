use async_trait::async_trait;
use itertools::Itertools;
use sea_orm::{prelude::*, ActiveValue, IntoActiveModel, TransactionTrait};

use crate::domain::participant::{ConflictKey, ParticipantPatch, ParticipantProfile, RecordFilter};
use crate::domain::session::Session;
use crate::schema::participant;


#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
    #[error("Participant not found")]
    NotFound,
    #[error("Upsert on {0:?} requires a value for that key")]
    MissingConflictKey(ConflictKey),
    #[error("New participants need an email address")]
    MissingEmail,
}

/// The system of record for participant profiles.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    async fn find_one(&self, filter: RecordFilter) -> Result<Option<ParticipantProfile>, DirectoryError>;

    async fn list_all(&self) -> Result<Vec<ParticipantProfile>, DirectoryError>;

    /// Inserts or updates the row matching `conflict_key`.
    ///
    /// Only fields present in the patch are written. New rows take the
    /// patch's id if it has one and a fresh id otherwise.
    async fn upsert(&self, patch: ParticipantPatch, conflict_key: ConflictKey) -> Result<ParticipantProfile, DirectoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), DirectoryError>;

    /// Looks up the profile of a session, by account first and email second.
    async fn find_for_session(&self, session: &Session) -> Result<Option<ParticipantProfile>, DirectoryError> {
        let Session::Authenticated { user_id, email } = session else {
            return Ok(None);
        };

        if let Some(profile) = self.find_one(RecordFilter::UserId(*user_id)).await? {
            return Ok(Some(profile));
        }
        self.find_one(RecordFilter::Email(email.clone())).await
    }
}

#[derive(Debug, Clone)]
pub struct SqlDirectory {
    db: DatabaseConnection,
}

impl SqlDirectory {
    pub fn new(db: DatabaseConnection) -> Self {
        SqlDirectory { db }
    }
}

async fn find_model<C>(db: &C, filter: &RecordFilter) -> Result<Option<participant::Model>, DbErr> where C: ConnectionTrait {
    let query = participant::Entity::find();
    let query = match filter {
        RecordFilter::Id(uuid) => query.filter(participant::Column::Uuid.eq(*uuid)),
        RecordFilter::Email(email) => query.filter(participant::Column::Email.eq(email.clone())),
        RecordFilter::UserId(user_id) => query.filter(participant::Column::UserId.eq(*user_id)),
    };
    query.one(db).await
}

#[async_trait]
impl DirectoryService for SqlDirectory {
    async fn find_one(&self, filter: RecordFilter) -> Result<Option<ParticipantProfile>, DirectoryError> {
        Ok(find_model(&self.db, &filter).await?.map(ParticipantProfile::from))
    }

    async fn list_all(&self) -> Result<Vec<ParticipantProfile>, DirectoryError> {
        let models = participant::Entity::find().all(&self.db).await?;
        Ok(models.into_iter().map(ParticipantProfile::from).collect_vec())
    }

    async fn upsert(&self, patch: ParticipantPatch, conflict_key: ConflictKey) -> Result<ParticipantProfile, DirectoryError> {
        let filter = match conflict_key {
            ConflictKey::Email => RecordFilter::Email(
                patch.email.clone().ok_or(DirectoryError::MissingConflictKey(conflict_key))?
            ),
            ConflictKey::UserId => RecordFilter::UserId(
                patch.user_id.flatten().ok_or(DirectoryError::MissingConflictKey(conflict_key))?
            ),
        };

        let transaction = self.db.begin().await?;
        let model = match find_model(&transaction, &filter).await? {
            Some(existing) => {
                let mut active = existing.clone().into_active_model();
                patch.apply_to(&mut active);
                if active.is_changed() {
                    active.update(&transaction).await?
                }
                else {
                    existing
                }
            },
            None => {
                let email = patch.email.clone().ok_or(DirectoryError::MissingEmail)?;
                let mut active = participant::ActiveModel {
                    uuid: ActiveValue::Set(patch.uuid.unwrap_or_else(Uuid::new_v4)),
                    email: ActiveValue::Set(email),
                    ..Default::default()
                };
                patch.apply_to(&mut active);
                active.insert(&transaction).await?
            }
        };
        transaction.commit().await?;

        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DirectoryError> {
        let result = participant::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(DirectoryError::NotFound);
        }
        Ok(())
    }
}
