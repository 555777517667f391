// Mapping from the vendor network's status codes onto our availability
// states. The vendor vocabulary is wide and irregular; this table is the
// single place it collapses onto the five states the rest of the system
// understands.

use crate::models::AvailabilityState;

/// A raw status code as carried on the vendor wire. Not owned by this
/// system; we only consume it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorStatus(pub u32);

impl VendorStatus {
    pub const AVAILABLE: VendorStatus = VendorStatus(0);
    pub const BRB: VendorStatus = VendorStatus(1);
    pub const BUSY: VendorStatus = VendorStatus(2);
    pub const NOT_AT_DESK: VendorStatus = VendorStatus(4);
    pub const NOT_IN_OFFICE: VendorStatus = VendorStatus(5);
    pub const ON_PHONE: VendorStatus = VendorStatus(6);
    pub const ON_VACATION: VendorStatus = VendorStatus(7);
    pub const OUT_TO_LUNCH: VendorStatus = VendorStatus(8);
    pub const STEPPED_OUT: VendorStatus = VendorStatus(9);
    pub const IDLE: VendorStatus = VendorStatus(999);
    pub const OFFLINE: VendorStatus = VendorStatus(0x5a55_aa56);
}

/// Map a vendor status code to an availability state.
///
/// Total and pure: every code maps to exactly one state, and codes we do
/// not recognize fall through to `Available`. That fail-open default is
/// long-standing gateway behavior and is covered by a test so it stays a
/// deliberate policy rather than an accident.
pub fn map_status(status: VendorStatus) -> AvailabilityState {
    match status {
        VendorStatus::AVAILABLE => AvailabilityState::Available,
        VendorStatus::BRB => AvailabilityState::Away,
        VendorStatus::BUSY => AvailabilityState::DoNotDisturb,
        VendorStatus::IDLE => AvailabilityState::Away,
        VendorStatus::OFFLINE => AvailabilityState::Unavailable,
        VendorStatus::NOT_AT_DESK => AvailabilityState::Away,
        VendorStatus::NOT_IN_OFFICE => AvailabilityState::Away,
        VendorStatus::ON_PHONE => AvailabilityState::Away,
        VendorStatus::ON_VACATION => AvailabilityState::ExtendedAway,
        VendorStatus::OUT_TO_LUNCH => AvailabilityState::ExtendedAway,
        VendorStatus::STEPPED_OUT => AvailabilityState::Away,
        _ => AvailabilityState::Available,
    }
}
