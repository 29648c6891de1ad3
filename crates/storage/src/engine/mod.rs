pub mod clock;
pub mod ledger;
pub mod order;
pub mod race;
pub mod run;
