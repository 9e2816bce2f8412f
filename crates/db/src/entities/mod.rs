//! `SeaORM` entity definitions.

pub mod expenses;
pub mod monthly_plans;
pub mod monthly_snapshots;

pub mod prelude {
    //! Entity re-exports.

    pub use super::expenses::Entity as Expenses;
    pub use super::monthly_plans::Entity as MonthlyPlans;
    pub use super::monthly_snapshots::Entity as MonthlySnapshots;
}
