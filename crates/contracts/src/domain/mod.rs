pub mod loans;
pub mod repair_orders;
pub mod repayments;
