//! Fee assignment repository for database operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::debug;
use uuid::Uuid;

use feedesk_core::fees::{FeeAssignment, NewFeeAssignment, OutstandingFee, PaymentDetails};
use feedesk_core::reports::AmountBucket;
use feedesk_core::store::{FeeLedger, StoreError};

use super::store_err;
use crate::entities::sea_orm_active_enums::FeeStatus;
use crate::entities::{fee_assignments, users};

/// Fee assignment repository backing the fee ledger.
#[derive(Debug, Clone)]
pub struct FeeRepository {
    db: DatabaseConnection,
}

impl FeeRepository {
    /// Creates a new fee repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_assignment(model: fee_assignments::Model) -> FeeAssignment {
    FeeAssignment {
        id: model.id,
        student_id: model.student_id,
        fee_name: model.fee_name,
        amount: model.amount,
        due_date: model.due_date,
        status: model.status.into(),
        transaction_id: model.transaction_id,
        payment_mode: model.payment_mode,
        paid_at: model.paid_at.map(|at| at.to_utc()),
        created_at: model.created_at.to_utc(),
        updated_at: model.updated_at.to_utc(),
    }
}

#[derive(Debug, FromQueryResult)]
struct TotalRow {
    status: FeeStatus,
    due_date: NaiveDate,
    total: Option<Decimal>,
}

#[async_trait::async_trait]
impl FeeLedger for FeeRepository {
    async fn create(&self, fee: NewFeeAssignment) -> Result<FeeAssignment, StoreError> {
        let now = chrono::Utc::now().into();
        let assignment = fee_assignments::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(fee.student_id),
            fee_name: Set(fee.fee_name),
            amount: Set(fee.amount),
            due_date: Set(fee.due_date),
            status: Set(FeeStatus::Pending),
            transaction_id: Set(None),
            payment_mode: Set(None),
            paid_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = assignment.insert(&self.db).await.map_err(store_err)?;
        Ok(to_assignment(model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<FeeAssignment>, StoreError> {
        let model = fee_assignments::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(store_err)?;

        Ok(model.map(to_assignment))
    }

    async fn list_for_student(&self, student_id: Uuid) -> Result<Vec<FeeAssignment>, StoreError> {
        let models = fee_assignments::Entity::find()
            .filter(fee_assignments::Column::StudentId.eq(student_id))
            .order_by_asc(fee_assignments::Column::DueDate)
            .order_by_asc(fee_assignments::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(store_err)?;

        Ok(models.into_iter().map(to_assignment).collect())
    }

    async fn mark_paid(
        &self,
        id: Uuid,
        payment: PaymentDetails,
    ) -> Result<Option<FeeAssignment>, StoreError> {
        let paid_at = payment.paid_at.into();

        // Conditional on status so concurrent payments apply exactly once.
        let result = fee_assignments::Entity::update_many()
            .set(fee_assignments::ActiveModel {
                status: Set(FeeStatus::Paid),
                transaction_id: Set(Some(payment.transaction_id)),
                payment_mode: Set(Some(payment.payment_mode)),
                paid_at: Set(Some(paid_at)),
                updated_at: Set(paid_at),
                ..Default::default()
            })
            .filter(fee_assignments::Column::Id.eq(id))
            .filter(fee_assignments::Column::Status.ne(FeeStatus::Paid))
            .exec(&self.db)
            .await
            .map_err(store_err)?;

        if result.rows_affected == 0 {
            debug!(fee_id = %id, "Payment update matched no unpaid row");
            return Ok(None);
        }

        FeeLedger::find_by_id(self, id).await
    }

    async fn totals_by_status(&self) -> Result<Vec<AmountBucket>, StoreError> {
        let rows = fee_assignments::Entity::find()
            .select_only()
            .column(fee_assignments::Column::Status)
            .column(fee_assignments::Column::DueDate)
            .column_as(fee_assignments::Column::Amount.sum(), "total")
            .group_by(fee_assignments::Column::Status)
            .group_by(fee_assignments::Column::DueDate)
            .into_model::<TotalRow>()
            .all(&self.db)
            .await
            .map_err(store_err)?;

        Ok(rows
            .into_iter()
            .map(|row| AmountBucket {
                status: row.status.into(),
                due_date: row.due_date,
                total: row.total.unwrap_or(Decimal::ZERO),
            })
            .collect())
    }

    async fn list_outstanding(&self) -> Result<Vec<OutstandingFee>, StoreError> {
        let rows = fee_assignments::Entity::find()
            .filter(fee_assignments::Column::Status.ne(FeeStatus::Paid))
            .order_by_asc(fee_assignments::Column::DueDate)
            .find_also_related(users::Entity)
            .all(&self.db)
            .await
            .map_err(store_err)?;

        Ok(rows
            .into_iter()
            .filter_map(|(fee, owner)| {
                owner.map(|owner| OutstandingFee {
                    id: fee.id,
                    student_id: fee.student_id,
                    student_name: owner.name,
                    fee_name: fee.fee_name,
                    amount: fee.amount,
                    due_date: fee.due_date,
                    status: fee.status.into(),
                })
            })
            .collect())
    }
}
