//! Shared color constants for the UI.

use egui::Color32;
use linkup_business::{
    NoticeLevel,
    records::{LinkupStatus, ReadState, UserStatus, VerificationStatus},
};

/// Forest green color for healthy/available/success status.
pub const COLOR_GREEN: Color32 = Color32::from_rgb(34, 139, 34);

/// Red color for error/unavailable/failed status.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Amber color for pending status.
pub const COLOR_AMBER: Color32 = Color32::from_rgb(255, 193, 7);

pub const COLOR_BLUE: Color32 = Color32::from_rgb(13, 110, 253);

pub const COLOR_GRAY: Color32 = Color32::from_rgb(108, 117, 125);

pub fn user_status(status: &UserStatus) -> Color32 {
    match status {
        UserStatus::Active => COLOR_GREEN,
        UserStatus::Suspended(_) => COLOR_AMBER,
        UserStatus::Deleted(_) => COLOR_RED,
    }
}

pub fn linkup_status(status: LinkupStatus) -> Color32 {
    match status {
        LinkupStatus::Upcoming => COLOR_BLUE,
        LinkupStatus::Happening => COLOR_GREEN,
        LinkupStatus::Happened => COLOR_GRAY,
        LinkupStatus::Cancelled => COLOR_RED,
    }
}

pub fn verification_status(status: VerificationStatus) -> Color32 {
    match status {
        VerificationStatus::Pending => COLOR_AMBER,
        VerificationStatus::Approved => COLOR_GREEN,
        VerificationStatus::Denied => COLOR_RED,
    }
}

pub fn read_state(read: ReadState) -> Color32 {
    match read {
        ReadState::Unread => COLOR_BLUE,
        ReadState::Read => COLOR_GRAY,
    }
}

pub fn notice_level(level: NoticeLevel) -> Color32 {
    match level {
        NoticeLevel::Info => COLOR_BLUE,
        NoticeLevel::Success => COLOR_GREEN,
        NoticeLevel::Error => COLOR_RED,
    }
}
