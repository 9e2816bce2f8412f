//! Ledger tables migration.
//!
//! Creates expenses, monthly plans and monthly snapshots. Built with the
//! schema builder so the same migration runs on Postgres and SQLite.
//! `user_id` is owned by the identity service and carries no foreign key.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ============================================================
        // EXPENSES
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Expenses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Expenses::UserId).uuid().not_null())
                    .col(ColumnDef::new(Expenses::Title).string_len(80).not_null())
                    .col(ColumnDef::new(Expenses::Amount).decimal_len(14, 2).not_null())
                    .col(ColumnDef::new(Expenses::Category).string_len(32).not_null())
                    .col(ColumnDef::new(Expenses::Date).date().not_null())
                    .col(ColumnDef::new(Expenses::Notes).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Expenses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_expenses_user_date")
                    .table(Expenses::Table)
                    .col(Expenses::UserId)
                    .col(Expenses::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_expenses_user_created")
                    .table(Expenses::Table)
                    .col(Expenses::UserId)
                    .col(Expenses::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // MONTHLY PLANS (one per user and month)
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(MonthlyPlans::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MonthlyPlans::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(MonthlyPlans::UserId).uuid().not_null())
                    .col(ColumnDef::new(MonthlyPlans::Month).string_len(7).not_null())
                    .col(
                        ColumnDef::new(MonthlyPlans::IncomeAmount)
                            .decimal_len(14, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MonthlyPlans::SavingsTarget)
                            .decimal_len(14, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(MonthlyPlans::Notes).text().not_null().default(""))
                    .col(
                        ColumnDef::new(MonthlyPlans::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MonthlyPlans::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_monthly_plans_user_month")
                    .table(MonthlyPlans::Table)
                    .col(MonthlyPlans::UserId)
                    .col(MonthlyPlans::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // MONTHLY SNAPSHOTS (immutable, one per user and month)
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(MonthlySnapshots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MonthlySnapshots::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MonthlySnapshots::UserId).uuid().not_null())
                    .col(ColumnDef::new(MonthlySnapshots::Month).string_len(7).not_null())
                    .col(
                        ColumnDef::new(MonthlySnapshots::IsClosed)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(MonthlySnapshots::TotalAmount)
                            .decimal_len(14, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MonthlySnapshots::TransactionCount)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MonthlySnapshots::TopCategory)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MonthlySnapshots::CategoryBreakdown)
                            .json()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MonthlySnapshots::SummaryText).text().not_null())
                    .col(
                        ColumnDef::new(MonthlySnapshots::ClosedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Authoritative guard against duplicate concurrent closes.
        manager
            .create_index(
                Index::create()
                    .name("uq_monthly_snapshots_user_month")
                    .table(MonthlySnapshots::Table)
                    .col(MonthlySnapshots::UserId)
                    .col(MonthlySnapshots::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MonthlySnapshots::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MonthlyPlans::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Expenses {
    Table,
    Id,
    UserId,
    Title,
    Amount,
    Category,
    Date,
    Notes,
    CreatedAt,
}

#[derive(DeriveIden)]
enum MonthlyPlans {
    Table,
    Id,
    UserId,
    Month,
    IncomeAmount,
    SavingsTarget,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum MonthlySnapshots {
    Table,
    Id,
    UserId,
    Month,
    IsClosed,
    TotalAmount,
    TransactionCount,
    TopCategory,
    CategoryBreakdown,
    SummaryText,
    ClosedAt,
}
