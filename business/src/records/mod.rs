//! Domain records listed by the dashboard.

mod feedback;
mod linkup;
mod report;
mod staff;
mod user;
mod verification;

pub use feedback::{Feedback, FeedbackField};
pub use linkup::{Linkup, LinkupField, LinkupStatus};
pub use report::{Report, ReportField, ReportTarget};
pub use staff::{StaffField, StaffMember, StaffRole};
pub use user::{Deletion, Suspension, User, UserField, UserStatus};
pub use verification::{Verification, VerificationField, VerificationStatus};

/// Read state of reports and feedback. Only ever moves from `Unread` to `Read`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReadState {
    #[default]
    Unread,
    Read,
}

impl ReadState {
    pub const ALL: [Self; 2] = [Self::Unread, Self::Read];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Unread => "Unread",
            Self::Read => "Read",
        }
    }

    pub fn is_read(self) -> bool {
        self == Self::Read
    }
}
