use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::identity::{FileSessionStore, IdentityStore};
use crate::ledger::attendance::AttendanceLedger;
use crate::ledger::leave::LeaveLedger;
use crate::seed;

/// Everything the handlers share: the roster and the two ledgers. Built once
/// at startup and passed around by handle; nothing here is a global.
pub struct AppState {
    pub identity: IdentityStore,
    pub attendance: AttendanceLedger,
    pub leaves: LeaveLedger,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn seeded(config: &Config) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        Self {
            identity: IdentityStore::new(
                seed::demo_roster(),
                Box::new(FileSessionStore::new(&config.session_file)),
            ),
            attendance: AttendanceLedger::new(config.late_after),
            leaves: LeaveLedger::new(seed::demo_leave_applications(), clock.clone()),
            clock,
        }
    }
}
