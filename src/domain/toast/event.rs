//! User interaction events reported for a shown toast

use std::fmt;

use super::time::FileTime;

/// Action index reported when the toast body (not a button) was clicked
pub const NO_ACTION: i32 = -1;

/// Why a toast left the screen without being activated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissalReason {
    /// The user closed it
    UserCanceled,
    /// The application hid it
    ApplicationHidden,
    /// It timed out or passed its expiration time
    TimedOut,
}

impl DismissalReason {
    /// Map the platform's numeric reason. Unknown values are `None`.
    pub const fn from_platform(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::UserCanceled),
            1 => Some(Self::ApplicationHidden),
            2 => Some(Self::TimedOut),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UserCanceled => "user-canceled",
            Self::ApplicationHidden => "application-hidden",
            Self::TimedOut => "timed-out",
        }
    }
}

impl fmt::Display for DismissalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One callback delivery, in channel form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastEvent {
    /// Clicked. `action` is the button index, or [`NO_ACTION`].
    Activated { action: i32 },
    Dismissed(DismissalReason),
    Failed,
}

impl fmt::Display for ToastEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Activated { action } if *action == NO_ACTION => write!(f, "activated"),
            Self::Activated { action } => write!(f, "activated (action {})", action),
            Self::Dismissed(reason) => write!(f, "dismissed ({})", reason),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Parse the activation argument payload into an action index.
///
/// Absent or empty payloads yield [`NO_ACTION`]. Otherwise the leading
/// base-10 integer is taken, `strtol` style: leading whitespace and a
/// sign are accepted, parsing stops at the first non-digit, and a
/// payload without digits yields `0`.
pub fn parse_action_index(arguments: Option<&str>) -> i32 {
    let Some(arguments) = arguments.filter(|a| !a.is_empty()) else {
        return NO_ACTION;
    };

    let trimmed = arguments.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value * 10 + i64::from(byte - b'0');
        if value > i64::from(i32::MAX) + 1 {
            break;
        }
    }
    if negative {
        value = -value;
    }

    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Apply the expiration rule to a reported dismissal.
///
/// A user cancellation reported at or after a non-zero expiration time is
/// a timeout.
pub fn reclassify_dismissal(
    reason: DismissalReason,
    expiration: Option<FileTime>,
    now: FileTime,
) -> DismissalReason {
    match (reason, expiration) {
        (DismissalReason::UserCanceled, Some(expires)) if !expires.is_zero() && now >= expires => {
            DismissalReason::TimedOut
        }
        _ => reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_empty_payload_is_no_action() {
        assert_eq!(parse_action_index(None), NO_ACTION);
        assert_eq!(parse_action_index(Some("")), NO_ACTION);
    }

    #[test]
    fn numeric_payload_is_action_index() {
        assert_eq!(parse_action_index(Some("3")), 3);
        assert_eq!(parse_action_index(Some("0")), 0);
        assert_eq!(parse_action_index(Some("  12")), 12);
    }

    #[test]
    fn prefix_parse_like_strtol() {
        assert_eq!(parse_action_index(Some("7abc")), 7);
        assert_eq!(parse_action_index(Some("abc")), 0);
        assert_eq!(parse_action_index(Some("-2")), -2);
        assert_eq!(parse_action_index(Some("99999999999999")), i32::MAX);
    }

    #[test]
    fn user_cancel_after_expiration_is_timeout() {
        let expires = FileTime::from_ticks(1_000);
        assert_eq!(
            reclassify_dismissal(DismissalReason::UserCanceled, Some(expires), FileTime::from_ticks(1_000)),
            DismissalReason::TimedOut
        );
        assert_eq!(
            reclassify_dismissal(DismissalReason::UserCanceled, Some(expires), FileTime::from_ticks(5_000)),
            DismissalReason::TimedOut
        );
    }

    #[test]
    fn user_cancel_before_expiration_is_unchanged() {
        let expires = FileTime::from_ticks(1_000);
        assert_eq!(
            reclassify_dismissal(DismissalReason::UserCanceled, Some(expires), FileTime::from_ticks(999)),
            DismissalReason::UserCanceled
        );
    }

    #[test]
    fn other_reasons_and_missing_expiration_are_unchanged() {
        let now = FileTime::from_ticks(10);
        assert_eq!(
            reclassify_dismissal(DismissalReason::UserCanceled, None, now),
            DismissalReason::UserCanceled
        );
        assert_eq!(
            reclassify_dismissal(DismissalReason::UserCanceled, Some(FileTime::default()), now),
            DismissalReason::UserCanceled
        );
        assert_eq!(
            reclassify_dismissal(DismissalReason::ApplicationHidden, Some(FileTime::from_ticks(1)), now),
            DismissalReason::ApplicationHidden
        );
    }

    #[test]
    fn platform_reason_codes() {
        assert_eq!(DismissalReason::from_platform(0), Some(DismissalReason::UserCanceled));
        assert_eq!(DismissalReason::from_platform(2), Some(DismissalReason::TimedOut));
        assert_eq!(DismissalReason::from_platform(9), None);
    }

    #[test]
    fn event_display() {
        assert_eq!(ToastEvent::Activated { action: NO_ACTION }.to_string(), "activated");
        assert_eq!(ToastEvent::Activated { action: 1 }.to_string(), "activated (action 1)");
        assert_eq!(
            ToastEvent::Dismissed(DismissalReason::TimedOut).to_string(),
            "dismissed (timed-out)"
        );
    }
}
