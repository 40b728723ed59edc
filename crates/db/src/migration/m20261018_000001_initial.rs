//! Initial database migration.
//!
//! Creates the users and fee_assignments tables with the constraints the
//! application relies on: unique email, role-dependent profile columns,
//! non-negative amounts, and payment details present exactly when Paid.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(FEE_ASSIGNMENTS_SQL).await?;
        db.execute_unprepared(INDEXES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL,
    password_hash VARCHAR(255) NOT NULL,
    role VARCHAR(16) NOT NULL,
    course VARCHAR(255),
    year VARCHAR(32),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT users_role_check CHECK (role IN ('Admin', 'Student')),
    CONSTRAINT users_profile_check CHECK (
        (role = 'Student' AND course IS NOT NULL AND year IS NOT NULL)
        OR (role = 'Admin' AND course IS NULL AND year IS NULL)
    )
);
";

const FEE_ASSIGNMENTS_SQL: &str = r"
CREATE TABLE fee_assignments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    student_id UUID NOT NULL REFERENCES users(id),
    fee_name VARCHAR(255) NOT NULL,
    amount NUMERIC(12, 2) NOT NULL,
    due_date DATE NOT NULL,
    status VARCHAR(16) NOT NULL DEFAULT 'Pending',
    transaction_id VARCHAR(64),
    payment_mode VARCHAR(64),
    paid_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT fee_assignments_status_check CHECK (status IN ('Pending', 'Paid', 'Overdue')),
    CONSTRAINT fee_assignments_amount_check CHECK (amount >= 0),
    CONSTRAINT fee_assignments_name_check CHECK (btrim(fee_name) <> ''),
    CONSTRAINT fee_assignments_paid_check CHECK (
        (status = 'Paid' AND transaction_id IS NOT NULL AND payment_mode IS NOT NULL AND paid_at IS NOT NULL)
        OR (status <> 'Paid' AND transaction_id IS NULL AND paid_at IS NULL)
    )
);
";

const INDEXES_SQL: &str = r"
CREATE UNIQUE INDEX idx_users_email ON users (email);
CREATE INDEX idx_users_role ON users (role);

CREATE UNIQUE INDEX idx_fee_assignments_transaction_id
    ON fee_assignments (transaction_id)
    WHERE transaction_id IS NOT NULL;
CREATE INDEX idx_fee_assignments_student_due ON fee_assignments (student_id, due_date);
CREATE INDEX idx_fee_assignments_unpaid_due
    ON fee_assignments (due_date)
    WHERE status <> 'Paid';
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS fee_assignments;
DROP TABLE IF EXISTS users;
";
