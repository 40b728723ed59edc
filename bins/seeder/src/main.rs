//! Demo data seeder for FeeDesk development.
//!
//! Creates one admin, a few students and a spread of fee assignments so the
//! student list, payment flow and admin reports have something to show.
//! Accounts that already exist are left untouched, along with their fees.
//!
//! Usage: cargo run --bin seeder

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feedesk_core::auth::{Account, AccountProfile, NewAccount, hash_password};
use feedesk_core::fees::{FeeService, NewFeeAssignment};
use feedesk_core::store::{AccountStore, FeeLedger};
use feedesk_db::{FeeRepository, UserRepository};
use feedesk_shared::AppConfig;

/// Password shared by every seeded account.
const DEMO_PASSWORD: &str = "feedesk-demo";

struct DemoStudent {
    name: &'static str,
    email: &'static str,
    course: &'static str,
    year: &'static str,
}

const STUDENTS: [DemoStudent; 3] = [
    DemoStudent {
        name: "Asha Verma",
        email: "asha@feedesk.dev",
        course: "Computer Science",
        year: "2",
    },
    DemoStudent {
        name: "Ben Okafor",
        email: "ben@feedesk.dev",
        course: "Mechanical Engineering",
        year: "3",
    },
    DemoStudent {
        name: "Chen Li",
        email: "chen@feedesk.dev",
        course: "Economics",
        year: "1",
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seeder=info,feedesk_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    let db = feedesk_db::connect(&config.database).await?;
    let users = UserRepository::new(db.clone());
    let fees = FeeRepository::new(db);

    let password_hash = hash_password(DEMO_PASSWORD)?;

    seed_account(
        &users,
        NewAccount {
            name: "Registrar".to_string(),
            email: "admin@feedesk.dev".to_string(),
            password_hash: password_hash.clone(),
            profile: AccountProfile::Admin,
        },
    )
    .await?;

    let today = Utc::now().date_naive();
    for (index, student) in STUDENTS.iter().enumerate() {
        let Some(account) = seed_account(
            &users,
            NewAccount {
                name: student.name.to_string(),
                email: student.email.to_string(),
                password_hash: password_hash.clone(),
                profile: AccountProfile::Student {
                    course: student.course.to_string(),
                    year: student.year.to_string(),
                },
            },
        )
        .await?
        else {
            continue;
        };

        seed_fees(&fees, &account, today, index).await?;
    }

    info!(password = DEMO_PASSWORD, "Seeding complete");
    Ok(())
}

/// Creates the account unless its email is taken; returns it when created.
async fn seed_account(
    users: &UserRepository,
    account: NewAccount,
) -> anyhow::Result<Option<Account>> {
    if users.email_exists(&account.email).await? {
        info!(email = %account.email, "Account already exists, skipping");
        return Ok(None);
    }

    let created = AccountStore::create(users, account).await?;
    info!(email = %created.email, role = %created.role(), "Seeded account");
    Ok(Some(created))
}

/// Gives a student one paid, one pending and one overdue fee.
async fn seed_fees(
    fees: &FeeRepository,
    student: &Account,
    today: NaiveDate,
    offset: usize,
) -> anyhow::Result<()> {
    let shift = Duration::days(i64::try_from(offset)?);
    let plan = [
        ("Tuition", Decimal::new(150_000, 2), today + Duration::days(45) + shift),
        ("Library", Decimal::new(4_000, 2), today + Duration::days(10) + shift),
        ("Lab Fee", Decimal::new(12_550, 2), today - Duration::days(7) - shift),
    ];

    for (position, (fee_name, amount, due_date)) in plan.into_iter().enumerate() {
        let fee = FeeLedger::create(
            fees,
            NewFeeAssignment {
                student_id: student.id,
                fee_name: fee_name.to_string(),
                amount,
                due_date,
            },
        )
        .await?;

        if position == 0 {
            fees.mark_paid(fee.id, FeeService::simulated_payment(Utc::now()))
                .await?;
        }
    }

    info!(student = %student.email, "Seeded fee assignments");
    Ok(())
}
