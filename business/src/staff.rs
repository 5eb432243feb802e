//! Adding staff members.
//!
//! The staff table reads `RecordSource<StaffMember>` like any other table and subscribes to
//! it, so a member added from the dialog shows up without any other wiring.

use std::any::Any;

use linkup_states::{Command, Dep, State, Time, Updater, state_assign_impl};
use log::info;
use ustr::Ustr;

use crate::{
    error::{AdminError, ValidationError},
    moderation::{Actor, AuditAction, AuditEntry, AuditLog},
    notice::Notices,
    query::RecordSource,
    records::{StaffMember, StaffRole},
};

/// The add-staff dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffInput {
    pub name: String,
    pub email: String,
    pub role: Option<StaffRole>,
}

impl State for StaffInput {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

fn next_id(staff: &RecordSource<StaffMember>) -> Ustr {
    let mut n = staff.len() + 1;
    loop {
        let id = format!("staff-{n}");
        if !staff.contains(&id) {
            return Ustr::from(&id);
        }
        n += 1;
    }
}

/// Validates `input` and appends the new member. Emails are unique, ignoring case.
pub fn add_staff_member(
    staff: &mut RecordSource<StaffMember>,
    input: &StaffInput,
    actor: Actor<'_>,
) -> Result<AuditEntry, ValidationError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }
    let email = input.email.trim();
    if email.is_empty() {
        return Err(ValidationError::required("email"));
    }
    if !email.contains('@') {
        return Err(ValidationError::invalid("email", "must contain @"));
    }
    let role = input.role.ok_or_else(|| ValidationError::required("role"))?;
    if staff
        .iter()
        .any(|member| member.email.eq_ignore_ascii_case(email))
    {
        return Err(ValidationError::Duplicate {
            field: "email",
            value: email.to_owned(),
        });
    }

    let member = StaffMember::builder()
        .id(next_id(staff))
        .name(name)
        .email(email)
        .role(role)
        .added_at(actor.at)
        .build();
    let id = member.id;
    staff.insert(member);

    Ok(AuditEntry::builder()
        .at(actor.at)
        .actor(actor.name)
        .action(AuditAction::AddStaff)
        .record_id(id)
        .from("none")
        .to(role.as_str())
        .build())
}

/// Dispatch explicitly via `ctx.dispatch::<AddStaffCommand>()`.
#[derive(Debug, Default)]
pub struct AddStaffCommand;

impl Command for AddStaffCommand {
    fn run(&self, deps: Dep<'_>, updater: Updater) {
        let input = deps.state::<StaffInput>();
        let at = deps
            .try_state::<Time>()
            .map_or_else(|_| chrono::Utc::now(), Time::now);
        let actor_name = deps
            .try_compute::<crate::auth::AuthCompute>()
            .ok()
            .and_then(|auth| auth.user())
            .map_or("admin", |user| user.name.as_str());

        let mut staff = deps.state::<RecordSource<StaffMember>>().clone();
        let mut notices = deps.state::<Notices>().clone();
        match add_staff_member(
            &mut staff,
            input,
            Actor {
                name: actor_name,
                at,
            },
        ) {
            Ok(entry) => {
                info!("AddStaffCommand: added {} as {}", input.email.trim(), entry.to);
                notices.success(format!("{} added to staff", input.name.trim()));
                let mut log = deps.state::<AuditLog>().clone();
                log.push(entry);
                updater.set(staff);
                updater.set(log);
                updater.set(StaffInput::default());
            }
            Err(err) => {
                notices.error(&AdminError::Validation(err));
            }
        }
        updater.set(notices);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn actor() -> Actor<'static> {
        Actor {
            name: "Linkup Admin",
            at: Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        }
    }

    fn input(name: &str, email: &str, role: Option<StaffRole>) -> StaffInput {
        StaffInput {
            name: name.to_owned(),
            email: email.to_owned(),
            role,
        }
    }

    #[test]
    fn valid_input_appends_a_member() {
        let mut staff = RecordSource::default();
        let entry = add_staff_member(
            &mut staff,
            &input(" Dana ", "dana@linkup.com", Some(StaffRole::Moderator)),
            actor(),
        )
        .unwrap();

        assert_eq!(staff.len(), 1);
        let member = staff.get(&entry.record_id).unwrap();
        assert_eq!(member.name, "Dana");
        assert_eq!(member.role, StaffRole::Moderator);
        assert_eq!(entry.to, "moderator");
    }

    #[test]
    fn every_field_is_checked() {
        let mut staff = RecordSource::default();
        let cases = [
            (input("", "a@b.c", Some(StaffRole::Admin)), ValidationError::required("name")),
            (input("A", "", Some(StaffRole::Admin)), ValidationError::required("email")),
            (
                input("A", "ab.c", Some(StaffRole::Admin)),
                ValidationError::invalid("email", "must contain @"),
            ),
            (input("A", "a@b.c", None), ValidationError::required("role")),
        ];
        for (input, expected) in cases {
            assert_eq!(add_staff_member(&mut staff, &input, actor()), Err(expected));
        }
        assert!(staff.is_empty());
    }

    #[test]
    fn emails_are_unique() {
        let mut staff = RecordSource::default();
        let first = input("A", "a@linkup.com", Some(StaffRole::Support));
        add_staff_member(&mut staff, &first, actor()).unwrap();

        let again = input("B", "A@LINKUP.COM", Some(StaffRole::Admin));
        assert!(matches!(
            add_staff_member(&mut staff, &again, actor()),
            Err(ValidationError::Duplicate { field: "email", .. })
        ));
        assert_eq!(staff.len(), 1);
    }
}
