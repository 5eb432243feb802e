//! Counters for the overview page and the linkup statistics page.

use std::{any::Any, collections::BTreeMap};

use linkup_states::{Compute, ComputeDeps, Dep, Updater, assign_impl};

use crate::{
    query::RecordSource,
    records::{
        Feedback, Linkup, LinkupStatus, Report, ReportTarget, User, UserStatus, Verification,
        VerificationStatus,
    },
};

/// Work waiting for an admin, plus headline totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub active_users: usize,
    pub suspended_users: usize,
    pub deleted_users: usize,
    pub verified_users: usize,
    pub linkups: usize,
    pub upcoming_linkups: usize,
    pub unread_user_reports: usize,
    pub unread_linkup_reports: usize,
    pub pending_verifications: usize,
    pub unread_feedback: usize,
}

impl DashboardSummary {
    pub fn summarize(
        users: &RecordSource<User>,
        linkups: &RecordSource<Linkup>,
        reports: &RecordSource<Report>,
        verifications: &RecordSource<Verification>,
        feedback: &RecordSource<Feedback>,
    ) -> Self {
        let mut summary = Self::default();
        for user in users {
            match user.status {
                UserStatus::Active => summary.active_users += 1,
                UserStatus::Suspended(_) => summary.suspended_users += 1,
                UserStatus::Deleted(_) => summary.deleted_users += 1,
            }
            summary.verified_users += usize::from(user.verified);
        }
        summary.linkups = linkups.len();
        summary.upcoming_linkups = linkups
            .iter()
            .filter(|linkup| linkup.status == LinkupStatus::Upcoming)
            .count();
        for report in reports.iter().filter(|report| !report.read.is_read()) {
            match report.target {
                ReportTarget::User => summary.unread_user_reports += 1,
                ReportTarget::Linkup => summary.unread_linkup_reports += 1,
            }
        }
        summary.pending_verifications = verifications
            .iter()
            .filter(|verification| verification.status == VerificationStatus::Pending)
            .count();
        summary.unread_feedback = feedback.iter().filter(|item| !item.read.is_read()).count();
        summary
    }

    /// Items that need an admin's attention.
    pub fn open_items(&self) -> usize {
        self.unread_user_reports
            + self.unread_linkup_reports
            + self.pending_verifications
            + self.unread_feedback
    }
}

impl Compute for DashboardSummary {
    fn deps(&self) -> ComputeDeps {
        ComputeDeps::none()
            .state::<RecordSource<User>>()
            .state::<RecordSource<Linkup>>()
            .state::<RecordSource<Report>>()
            .state::<RecordSource<Verification>>()
            .state::<RecordSource<Feedback>>()
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) {
        updater.set(Self::summarize(
            deps.state(),
            deps.state(),
            deps.state(),
            deps.state(),
            deps.state(),
        ));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryStats {
    pub linkups: usize,
    pub attendees: u32,
}

/// Aggregates over every linkup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkupStats {
    pub by_status: BTreeMap<&'static str, usize>,
    pub by_category: BTreeMap<String, CategoryStats>,
    pub attendees: u32,
    pub capacity: u32,
    pub free: usize,
    pub paid: usize,
    /// Mean ticket price over paid linkups.
    pub average_price: Option<f64>,
}

impl LinkupStats {
    pub fn collect<'a>(linkups: impl IntoIterator<Item = &'a Linkup>) -> Self {
        let mut stats = Self::default();
        for status in LinkupStatus::ALL {
            stats.by_status.insert(status.as_str(), 0);
        }

        let mut paid_total = 0.0;
        for linkup in linkups {
            *stats.by_status.entry(linkup.status.as_str()).or_default() += 1;
            let category = stats.by_category.entry(linkup.category.clone()).or_default();
            category.linkups += 1;
            category.attendees += linkup.attendees;

            stats.attendees += linkup.attendees;
            stats.capacity += linkup.capacity;
            if linkup.is_free() {
                stats.free += 1;
            } else {
                stats.paid += 1;
                paid_total += linkup.price;
            }
        }
        stats.average_price = (stats.paid > 0).then(|| paid_total / stats.paid as f64);
        stats
    }

    /// Overall share of seats taken, `0.0` when there is no capacity.
    pub fn fill_ratio(&self) -> f32 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.attendees as f32 / self.capacity as f32
    }
}

impl Compute for LinkupStats {
    fn deps(&self) -> ComputeDeps {
        ComputeDeps::none().state::<RecordSource<Linkup>>()
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) {
        updater.set(Self::collect(deps.state::<RecordSource<Linkup>>()));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}
