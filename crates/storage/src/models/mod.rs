mod category;
mod lap;
mod pair;
mod race;
mod race_entry;

pub use category::Category;
pub use lap::Lap;
pub use pair::{BullPair, RegistrationStatus};
pub use race::{Race, RaceStatus};
pub use race_entry::{RaceEntry, RunStatus};
