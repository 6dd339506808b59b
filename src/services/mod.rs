pub mod clock;
pub mod enrollment;

pub use clock::{Clock, FixedClock, SystemClock};
pub use enrollment::{EnrollOutcome, EnrollmentEngine, Roster, RosterEntry};
