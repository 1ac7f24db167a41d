//! Reconciliation sweep for stranded availability flags.
//!
//! Best-effort compensation can fail: an item may be left unavailable with
//! no Active booking referencing it (a failed rollback in `request_booking`,
//! or a failed reopen in `complete_booking`). The sweep finds and repairs
//! those items. Scheduling it is the operator's concern.

use tracing::{info, warn};

use agrirent_core::{Entity, ExpectedRevision};
use agrirent_ledger::BookingLedger;
use agrirent_registry::{ItemStore, RegistryError};

use crate::error::ReservationError;

/// Outcome of one sweep pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Items examined.
    pub scanned: usize,
    /// Stranded items restored to available.
    pub repaired: usize,
    /// Stranded items skipped because of a concurrent write.
    pub skipped: usize,
}

/// Scan all items and restore availability where no Active booking exists.
///
/// The repair write carries the revision observed during the scan, so a
/// booking racing the sweep always wins; the sweep skips the item and
/// reports it instead of fighting.
pub fn sweep<S, L>(items: &S, ledger: &L) -> Result<SweepReport, ReservationError>
where
    S: ItemStore,
    L: BookingLedger,
{
    let all = items.list()?;
    let mut report = SweepReport {
        scanned: all.len(),
        ..SweepReport::default()
    };

    for item in all.iter().filter(|item| !item.is_available()) {
        if ledger.find_active_for_item(*item.id())?.is_some() {
            continue;
        }

        match items.set_availability(*item.id(), true, ExpectedRevision::Exact(item.revision())) {
            Ok(_) => {
                report.repaired += 1;
                info!(item_id = %item.id_typed(), "repaired stranded availability flag");
            }
            Err(RegistryError::RevisionConflict { .. }) => {
                report.skipped += 1;
                warn!(item_id = %item.id_typed(), "item changed under the sweep; skipping");
            }
            Err(other) => return Err(other.into()),
        }
    }

    Ok(report)
}
