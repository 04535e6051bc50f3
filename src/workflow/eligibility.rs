//! Mining eligibility window.

/// Cooldown between two mining starts.
pub const MINING_COOLDOWN_SECS: u64 = 24 * 60 * 60;

/// First instant at which mining may be triggered again.
pub fn next_eligible_at(last_mining_time: u64, cooldown_secs: u64) -> u64 {
    last_mining_time.saturating_add(cooldown_secs)
}

/// Eligible strictly after the cooldown has elapsed.
pub fn is_eligible(now: u64, last_mining_time: u64, cooldown_secs: u64) -> bool {
    now > next_eligible_at(last_mining_time, cooldown_secs)
}

/// Render a duration in seconds as `"5h 12m"`.
pub fn format_remaining(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        format!("{secs}s")
    }
}
